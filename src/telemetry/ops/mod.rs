pub mod scrape;
pub mod clean;
pub mod merge;
pub mod enrich;
pub mod stats;
