//! Nested `Division → District → [entry]` document and its incremental writer.
//!
//! The crawl keeps a flat list of [`SeatDetail`] records and rewrites the whole
//! document after each district, so an interrupted run still leaves a valid
//! file covering every district finished so far.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::party::{PartyKey, Side};

/// File name of the detail document inside the output directory.
pub const DETAIL_FILE_NAME: &str = "bnp_vs_alliance_detail.json";

#[derive(thiserror::Error, Debug)]
pub enum DetailError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One candidate of a crawled seat, with the classification applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub candidate: String,
    pub party: String,
    pub party_key: Option<PartyKey>,
    pub votes: u64,
}

/// Flat crawl record for one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatDetail {
    pub division: String,
    pub district: String,
    pub seat_id: String,
    pub seat_name: String,
    pub candidates: Vec<CandidateRecord>,
}

/// One BNP or alliance candidate as stored in the detail document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DetailEntry {
    pub seat_id: String,
    pub seat_name: String,
    pub party: Side,
    pub candidate_name: String,
    pub votes: u64,
}

/// District name → entries, in crawl order.
pub type DistrictEntries = IndexMap<String, Vec<DetailEntry>>;

/// Division name → district name → entries, in crawl order.
pub type DetailDocument = IndexMap<String, DistrictEntries>;

/// Build the nested document, keeping only BNP and alliance candidates.
pub fn build_detailed_structure(details: &[SeatDetail]) -> DetailDocument {
    let mut doc = DetailDocument::new();
    for detail in details {
        let entries = doc
            .entry(detail.division.clone())
            .or_default()
            .entry(detail.district.clone())
            .or_default();

        let seat_name = if detail.seat_name.is_empty() {
            format!("{}-{}", detail.district, detail.seat_id)
        } else {
            detail.seat_name.clone()
        };

        for candidate in &detail.candidates {
            let Some(key) = candidate.party_key else {
                continue;
            };
            entries.push(DetailEntry {
                seat_id: detail.seat_id.clone(),
                seat_name: seat_name.clone(),
                party: key.side(),
                candidate_name: candidate.candidate.clone(),
                votes: candidate.votes,
            });
        }
    }
    doc
}

/// Writes and reads the detail document at a fixed path.
#[derive(Debug, Clone)]
pub struct DetailWriter {
    path: PathBuf,
}

impl DetailWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writer for `<out_dir>/bnp_vs_alliance_detail.json`.
    pub fn in_dir(out_dir: &Path) -> Self {
        Self::new(out_dir.join(DETAIL_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the output directory and reset the document to `{}`.
    pub fn initialize(&self) -> Result<(), DetailError> {
        self.write_document(&DetailDocument::new())
    }

    /// Rebuild the document from every seat crawled so far and replace the file.
    pub fn update(&self, details: &[SeatDetail]) -> Result<(), DetailError> {
        self.write_document(&build_detailed_structure(details))
    }

    pub fn read(&self) -> Result<DetailDocument, DetailError> {
        read_document(&self.path)
    }

    fn write_document(&self, doc: &DetailDocument) -> Result<(), DetailError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DetailError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(doc)?;

        // Replace via rename so readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| DetailError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| DetailError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Read a detail document from disk.
pub fn read_document(path: &Path) -> Result<DetailDocument, DetailError> {
    let content = fs::read_to_string(path).map_err(|source| DetailError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
