pub(crate) mod stats;

pub use stats::StatsService;
