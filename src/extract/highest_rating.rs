use super::{text_of, Selectors};
use crate::normalize::clean_text;
use scraper::Html;

/// Character name of the first rating entry in the first rating group.
/// A player with no rated characters yields an empty string, which is a
/// valid result rather than an error.
pub fn extract(document: &Html, selectors: &Selectors) -> String {
    document
        .select(&selectors.rating_group)
        .next()
        .and_then(|group| group.select(&selectors.rating_character).next())
        .map(|el| clean_text(&text_of(&el)))
        .unwrap_or_default()
}
