use super::{text_of, Selectors};
use crate::domain::{SuggestionEntry, SuggestionPage};
use crate::error::{Result, StatsError};
use crate::normalize::{clean_text, parse_integer};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

/// Hard cap on returned entries; `remaining` is reported independent of it.
const MAX_SUGGESTIONS: usize = 50;

/// Default length of the upstream player-id token. The site has shipped both
/// 12 and 14 character tokens over time, so the length is pinned in config
/// rather than hard-coded here.
pub const DEFAULT_ID_LEN: usize = 14;

static REMAINING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+remaining").unwrap());
static PLATFORM_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:steam|xbox|pc)\s*\d*\s*$").unwrap());

/// Version-pinned rule for pulling the player-id token out of the combined
/// id/name cell of a search-result row.
pub struct SuggestionRules {
    token: Regex,
}

impl SuggestionRules {
    pub fn new(id_len: usize) -> Result<Self> {
        let pattern = format!(r"(?:^|[^A-Za-z0-9-])([A-Za-z0-9-]{{{id_len}}})(?:[^A-Za-z0-9-]|$)");
        let token = Regex::new(&pattern).map_err(|e| StatsError::Selector(e.to_string()))?;
        Ok(Self { token })
    }

    /// Splits a combined cell text into (id, display name). Falls back to
    /// stripping non-alphanumerics when no token of the pinned length is
    /// present; the fallback is a sign of upstream format drift.
    fn split_cell(&self, text: &str) -> (String, String) {
        if let Some(caps) = self.token.captures(text) {
            let token = &caps[1];
            let residual = text.replacen(token, " ", 1);
            let name = clean_text(&PLATFORM_TAG.replace(residual.trim(), ""));
            let id: String = token.chars().filter(|c| *c != '-').collect();
            (id, name)
        } else {
            warn!("No id token of pinned length in {text:?}; using fallback");
            let id: String = text.chars().filter(char::is_ascii_alphanumeric).collect();
            let name = clean_text(&PLATFORM_TAG.replace(text.trim(), ""));
            (id, name)
        }
    }
}

/// Reads the player-search result table. Entries missing either an id or a
/// name are discarded; the result is capped at [`MAX_SUGGESTIONS`].
pub fn extract(
    document: &Html,
    selectors: &Selectors,
    rules: &SuggestionRules,
) -> SuggestionPage {
    let mut suggestions: Vec<SuggestionEntry> = document
        .select(&selectors.rows)
        .filter_map(|row| extract_row(&row, selectors, rules))
        .collect();

    if suggestions.len() > MAX_SUGGESTIONS {
        suggestions.truncate(MAX_SUGGESTIONS);
    }

    let remaining = remaining_count(document);
    debug!(
        "Extracted {} suggestions, {remaining} remaining upstream",
        suggestions.len()
    );

    SuggestionPage {
        suggestions,
        remaining,
    }
}

fn extract_row(
    row: &ElementRef,
    selectors: &Selectors,
    rules: &SuggestionRules,
) -> Option<SuggestionEntry> {
    let cell = row.select(&selectors.cell).next()?;
    let (id, name) = rules.split_cell(text_of(&cell).trim());
    if id.is_empty() || name.is_empty() {
        return None;
    }
    Some(SuggestionEntry { id, name })
}

/// The page reports overflow as an "N remaining" phrase outside the table;
/// no phrase means nothing was held back.
fn remaining_count(document: &Html) -> u32 {
    // Text nodes joined with a space so digits from adjacent cells can't
    // run into the count.
    let text = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    REMAINING
        .captures(&text)
        .and_then(|caps| parse_integer(&caps[1]))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}
