use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
}

/// One row of the replay table on a player page. `date` is kept verbatim in
/// the site-local format; `rating_delta` is the signed delta as displayed
/// (e.g. "+18").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub date: String,
    pub player_character: String,
    pub opponent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_id: Option<String>,
    pub opponent_character: String,
    pub outcome: Outcome,
    pub rating_delta: String,
}

/// Aggregate record for one opponent character on the matchups page.
/// `games_played` is always `wins + losses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRecord {
    pub opponent_character: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    pub highest_rated_character: String,
}

/// Player page result handed to the consumer: header profile plus the
/// replay rows that carried an outcome marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub profile: PlayerProfile,
    pub matches: Vec<MatchRecord>,
}

/// One player-search hit. `id` is the upstream token with dashes stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionPage {
    pub suggestions: Vec<SuggestionEntry>,
    /// Hits beyond the page the site reported, independent of our own cap.
    pub remaining: u32,
}
