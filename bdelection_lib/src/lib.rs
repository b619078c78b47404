//! Library layer for the election results scraper: polite client, crawl
//! pipeline, detail document, report statistics, and vote-shift simulation.
//!
//! Wraps the `bdelection_api` crate with rate limiting and retries, parses
//! candidate cards out of district pages, and turns them into the
//! BNP versus NCP/Jamaat alliance comparison.

pub mod client;
pub mod crawl;
pub mod detail;
pub mod divisions;
pub mod error;
pub mod party;
pub mod scrape;
pub mod simulation;
pub mod summary;
pub mod tally;
pub mod validation;

pub use bdelection_api;
pub use bdelection_api::types;

pub use client::{PoliteClient, RetryConfig, DEFAULT_DELAY};
pub use crawl::{CrawlProgress, CrawlSummary, Crawler, NoProgress};
pub use detail::{
    build_detailed_structure, read_document, CandidateRecord, DetailDocument, DetailEntry,
    DetailError, DetailWriter, SeatDetail, DETAIL_FILE_NAME,
};
pub use divisions::{find_division, load_divisions, Division, DivisionError};
pub use error::ElectionError;
pub use party::{PartyKey, PartyMatch, PartyTable, PartyTableError, Side};
pub use scrape::{parse_district_page, ScrapeError, ScrapedCandidate, ScrapedSeat};
pub use simulation::{simulate, SimulatedSeat, SimulationOutcome};
pub use summary::{format_difference, format_votes, winner_name, CombinedSeat, ReportStats};
pub use tally::{GrandTotals, SeatTally};
