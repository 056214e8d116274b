use std::fmt;

/// The four upstream page layouts the extractors know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    MatchHistory,
    Matchups,
    HighestRating,
    PlayerSearch,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::MatchHistory => "match-history",
            PageKind::Matchups => "matchups",
            PageKind::HighestRating => "highest-rating",
            PageKind::PlayerSearch => "player-search",
        }
    }

    /// Path of the upstream page relative to the site root. The subject is a
    /// player id for the player pages; the search term travels as a query
    /// parameter instead, attached by the fetch layer so it gets encoded.
    pub fn url_path(&self, subject: &str) -> String {
        match self {
            PageKind::MatchHistory | PageKind::HighestRating => format!("player/{subject}"),
            PageKind::Matchups => format!("player/{subject}/matchups"),
            PageKind::PlayerSearch => "search".to_string(),
        }
    }

    /// Deterministic cache slot for a logical request. Identical requests
    /// always map to the same key.
    pub fn cache_key(&self, subject: &str) -> String {
        format!("{}:{subject}", self.as_str())
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_are_deterministic_and_distinct_per_kind() {
        assert_eq!(
            PageKind::MatchHistory.cache_key("abc123"),
            PageKind::MatchHistory.cache_key("abc123")
        );
        assert_ne!(
            PageKind::MatchHistory.cache_key("abc123"),
            PageKind::Matchups.cache_key("abc123")
        );
        assert_eq!(PageKind::PlayerSearch.cache_key("kaz"), "player-search:kaz");
    }

    #[test]
    fn url_paths_follow_the_site_layout() {
        assert_eq!(PageKind::MatchHistory.url_path("abc123"), "player/abc123");
        assert_eq!(PageKind::Matchups.url_path("abc123"), "player/abc123/matchups");
        assert_eq!(PageKind::PlayerSearch.url_path("kaz"), "search");
    }
}
