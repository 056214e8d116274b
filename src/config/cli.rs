use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Root URL of the upstream stats site
    #[arg(long, env = "WAVU_BASE_URL", default_value = "https://wank.wavu.wiki")]
    pub base_url: String,

    /// Budget for a single upstream fetch, in seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// How long extracted player data stays fresh, in seconds
    #[arg(long, default_value_t = 300)]
    pub player_ttl_secs: u64,

    /// How long search suggestions stay fresh, in seconds
    #[arg(long, default_value_t = 600)]
    pub search_ttl_secs: u64,

    /// Length of the upstream player-id token in search results
    #[arg(long, default_value_t = crate::extract::suggestions::DEFAULT_ID_LEN)]
    pub suggestion_id_len: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Player profile and match history
    Player { id: String },
    /// Per-character matchup table for a player
    Matchups { id: String },
    /// Highest-rated character for a player
    Rating { id: String },
    /// Search players by name
    Search { query: String },
}
