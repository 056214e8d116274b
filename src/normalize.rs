//! Pure string-cleaning routines shared by all extractors. No I/O here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal artifacts the site leaves in cell text. "(h2h)" trails opponent
/// names, "%H:%M" shows up when the date cell's hover template leaks through.
const NOISE_TOKENS: &[&str] = &["(h2h)", "%H:%M"];

static TRAILING_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)\s*$").unwrap());

/// Trims, collapses internal whitespace runs to a single space, and strips
/// the known noise substrings plus a trailing parenthesized digit group.
pub fn clean_text(raw: &str) -> String {
    let mut text = raw.to_string();
    for token in NOISE_TOKENS {
        text = text.replace(token, " ");
    }
    let text = TRAILING_COUNT.replace(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tolerant integer parse. Non-numeric input yields `None`, never zero, so a
/// failed parse can't masquerade as an empty count.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

/// Splits a "W–L"-style string on `sep` and parses both sides. Fails as a
/// unit: a half-parseable string yields `None`, not a half-filled pair.
pub fn parse_split_count(raw: &str, sep: char) -> Option<(u32, u32)> {
    let (left, right) = raw.split_once(sep)?;
    let left = left.trim().parse::<u32>().ok()?;
    let right = right.trim().parse::<u32>().ok()?;
    Some((left, right))
}

/// Final non-empty path segment of a relative link, e.g.
/// `/player/aB3deFg` -> `aB3deFg`. Query strings are not expected on these
/// links and are not handled.
pub fn id_from_href(href: &str) -> Option<String> {
    href.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}
