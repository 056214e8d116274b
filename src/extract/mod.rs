use crate::error::{Result, StatsError};
use scraper::{ElementRef, Selector};

pub(crate) mod highest_rating;
pub(crate) mod match_history;
pub(crate) mod matchups;
pub(crate) mod suggestions;

pub use suggestions::SuggestionRules;

/// Pre-parsed selectors for the upstream page layouts. The selector strings
/// are a fixed contract with the site; when the layout changes, extraction
/// degrades to empty or partial results rather than failing.
pub struct Selectors {
    pub rows: Selector,
    pub cell: Selector,
    pub link: Selector,
    pub player_name: Selector,
    pub win_marker: Selector,
    pub loss_marker: Selector,
    pub rating_group: Selector,
    pub rating_character: Selector,
}

impl Selectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rows: parse("tbody tr")?,
            cell: parse("td")?,
            link: parse("a")?,
            player_name: parse("section.player-header .name")?,
            win_marker: parse("span.win")?,
            loss_marker: parse("span.lose")?,
            rating_group: parse(".rating-group")?,
            rating_character: parse(".rating-entry .character")?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| StatsError::Selector(e.to_string()))
}

/// Full text content of an element, untrimmed. Callers run the result
/// through the normalizer.
pub(crate) fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>()
}
