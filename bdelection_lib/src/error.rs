//! Error types for the library layer.

use std::fmt;

use crate::detail::DetailError;
use crate::divisions::DivisionError;
use crate::party::PartyTableError;
use crate::scrape::ScrapeError;

/// Errors produced by the library layer, wrapping upstream site errors
/// and adding parsing, storage, seed data, and input validation failures.
#[derive(Debug)]
pub enum ElectionError {
    /// An error from the underlying site client.
    Api(bdelection_api::Error),
    /// A results page could not be parsed.
    Scrape(ScrapeError),
    /// Reading or writing the detail document failed.
    Detail(DetailError),
    /// An embedded seed table failed to load.
    SeedData(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for ElectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Scrape(e) => write!(f, "Scrape error: {}", e),
            Self::Detail(e) => write!(f, "Detail file error: {}", e),
            Self::SeedData(msg) => write!(f, "Seed data error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ElectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Scrape(e) => Some(e),
            Self::Detail(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl ElectionError {
    /// Whether the failure is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_transient())
    }
}

impl From<bdelection_api::Error> for ElectionError {
    fn from(e: bdelection_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ScrapeError> for ElectionError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}

impl From<DetailError> for ElectionError {
    fn from(e: DetailError) -> Self {
        Self::Detail(e)
    }
}

impl From<DivisionError> for ElectionError {
    fn from(e: DivisionError) -> Self {
        Self::SeedData(e.to_string())
    }
}

impl From<PartyTableError> for ElectionError {
    fn from(e: PartyTableError) -> Self {
        Self::SeedData(e.to_string())
    }
}

impl From<serde_json::Error> for ElectionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
