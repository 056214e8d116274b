pub(crate) mod page;
pub(crate) mod records;

pub use page::PageKind;
pub use records::{
    MatchRecord, MatchupRecord, Outcome, PlayerProfile, PlayerReport, SuggestionEntry,
    SuggestionPage,
};
