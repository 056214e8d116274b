use super::{text_of, Selectors};
use crate::domain::MatchupRecord;
use crate::normalize::{clean_text, parse_split_count};
use scraper::{ElementRef, Html};
use tracing::debug;

/// Separator the site renders between win and loss counts ("35–36").
const COUNT_SEPARATOR: char = '\u{2013}';

/// Reads the per-character matchup table. Rows that fail any parse step are
/// dropped, never defaulted; the page as a whole never fails.
pub fn extract(document: &Html, selectors: &Selectors) -> Vec<MatchupRecord> {
    let records: Vec<MatchupRecord> = document
        .select(&selectors.rows)
        .filter_map(|row| extract_row(&row, selectors))
        .collect();

    debug!("Extracted {} matchup rows", records.len());
    records
}

fn extract_row(row: &ElementRef, selectors: &Selectors) -> Option<MatchupRecord> {
    let cells: Vec<ElementRef> = row.select(&selectors.cell).collect();

    // The matchup link reads "<own char> vs <opponent char>".
    let link_text = text_of(&row.select(&selectors.link).next()?);
    let (_, after) = link_text.split_once("vs")?;
    let opponent_character = clean_text(after);
    if opponent_character.is_empty() {
        return None;
    }

    let counts = clean_text(&text_of(cells.get(1)?));
    let (wins, losses) = parse_split_count(&counts, COUNT_SEPARATOR)?;

    let win_rate = clean_text(&text_of(cells.get(2)?))
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()?;
    if !(0.0..=100.0).contains(&win_rate) {
        return None;
    }

    Some(MatchupRecord {
        opponent_character,
        games_played: wins + losses,
        wins,
        losses,
        win_rate,
    })
}
