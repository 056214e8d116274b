use super::{text_of, Selectors};
use crate::domain::{MatchRecord, Outcome, PlayerProfile};
use crate::normalize::{clean_text, id_from_href};
use scraper::{ElementRef, Html};
use tracing::debug;

// Fixed cell positions in the replay table.
const DATE_CELL: usize = 0;
const PLAYER_CHAR_CELL: usize = 1;
const RATING_CELL: usize = 3;
const OPPONENT_CELL: usize = 4;
const OPPONENT_CHAR_CELL: usize = 5;

/// Reads the player header and the replay table of a player page. Rows
/// without a win or loss marker contribute nothing; a row never yields more
/// than one record.
pub fn extract(document: &Html, selectors: &Selectors) -> (PlayerProfile, Vec<MatchRecord>) {
    let name = document
        .select(&selectors.player_name)
        .next()
        .map(|el| clean_text(&text_of(&el)))
        .unwrap_or_default();

    let highest_rated_character = super::highest_rating::extract(document, selectors);

    let matches: Vec<MatchRecord> = document
        .select(&selectors.rows)
        .filter_map(|row| extract_row(&row, selectors))
        .collect();

    debug!(
        "Extracted {} match rows for player {:?}",
        matches.len(),
        name
    );

    (
        PlayerProfile {
            name,
            highest_rated_character,
        },
        matches,
    )
}

fn extract_row(row: &ElementRef, selectors: &Selectors) -> Option<MatchRecord> {
    let cells: Vec<ElementRef> = row.select(&selectors.cell).collect();
    let rating_cell = cells.get(RATING_CELL)?;

    let (outcome, marker) = if let Some(win) = rating_cell.select(&selectors.win_marker).next() {
        (Outcome::Win, win)
    } else if let Some(loss) = rating_cell.select(&selectors.loss_marker).next() {
        (Outcome::Loss, loss)
    } else {
        // Not a scored row (e.g. an unranked set); skip without complaint.
        return None;
    };

    let opponent_cell = cells.get(OPPONENT_CELL)?;
    let opponent_id = opponent_cell
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(id_from_href);

    Some(MatchRecord {
        date: cells
            .get(DATE_CELL)
            .map(|c| clean_text(&text_of(c)))
            .unwrap_or_default(),
        player_character: cells
            .get(PLAYER_CHAR_CELL)
            .map(|c| clean_text(&text_of(c)))
            .unwrap_or_default(),
        opponent_name: clean_text(&text_of(opponent_cell)),
        opponent_id,
        opponent_character: cells
            .get(OPPONENT_CHAR_CELL)
            .map(|c| clean_text(&text_of(c)))
            .unwrap_or_default(),
        outcome,
        rating_delta: clean_text(&text_of(&marker)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body>
            <section class="player-header"><div class="name">TestPlayer</div></section>
            <table><tbody>{rows}</tbody></table>
            </body></html>"#
        )
    }

    #[test]
    fn win_row_yields_one_record_with_all_fields() {
        let html = page(
            r#"<tr>
                <td>2024-01-01</td>
                <td>Kazuya</td>
                <td>1800</td>
                <td><span class="win">+18</span></td>
                <td><a href="/player/aB3deFgHiJkLmN">OpponentX</a> (h2h)</td>
                <td>Jin</td>
            </tr>"#,
        );
        let document = Html::parse_document(&html);
        let selectors = Selectors::new().unwrap();

        let (profile, matches) = extract(&document, &selectors);

        assert_eq!(profile.name, "TestPlayer");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.date, "2024-01-01");
        assert_eq!(m.player_character, "Kazuya");
        assert_eq!(m.opponent_name, "OpponentX");
        assert_eq!(m.opponent_id.as_deref(), Some("aB3deFgHiJkLmN"));
        assert_eq!(m.opponent_character, "Jin");
        assert_eq!(m.outcome, Outcome::Win);
        assert_eq!(m.rating_delta, "+18");
    }

    #[test]
    fn rows_without_markers_are_skipped() {
        let html = page(
            r#"<tr><td>d</td><td>c</td><td>r</td><td>no marker</td><td>opp</td><td>oc</td></tr>
               <tr><td>d</td><td>c</td><td>r</td><td><span class="lose">-12</span></td><td>opp</td><td>oc</td></tr>"#,
        );
        let document = Html::parse_document(&html);
        let selectors = Selectors::new().unwrap();

        let (_, matches) = extract(&document, &selectors);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].outcome, Outcome::Loss);
        assert_eq!(matches[0].rating_delta, "-12");
    }

    #[test]
    fn one_record_per_marker_row() {
        let row = r#"<tr><td>d</td><td>c</td><td>r</td><td><span class="win">+5</span></td><td>o</td><td>x</td></tr>"#;
        let html = page(&row.repeat(4));
        let document = Html::parse_document(&html);
        let selectors = Selectors::new().unwrap();

        let (_, matches) = extract(&document, &selectors);
        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.outcome == Outcome::Win));
    }

    #[test]
    fn missing_header_and_empty_table_degrade_to_empty() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let selectors = Selectors::new().unwrap();

        let (profile, matches) = extract(&document, &selectors);
        assert_eq!(profile.name, "");
        assert!(matches.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = page(
            r#"<tr><td>d</td><td>c</td><td>r</td><td><span class="win">+5</span></td><td>o</td><td>x</td></tr>"#,
        );
        let document = Html::parse_document(&html);
        let selectors = Selectors::new().unwrap();

        assert_eq!(extract(&document, &selectors), extract(&document, &selectors));
    }

    #[test]
    fn opponent_without_link_has_no_id() {
        let html = page(
            r#"<tr><td>d</td><td>c</td><td>r</td><td><span class="win">+5</span></td><td>Anon (h2h)</td><td>x</td></tr>"#,
        );
        let document = Html::parse_document(&html);
        let selectors = Selectors::new().unwrap();

        let (_, matches) = extract(&document, &selectors);
        assert_eq!(matches[0].opponent_id, None);
        assert_eq!(matches[0].opponent_name, "Anon");
    }
}
