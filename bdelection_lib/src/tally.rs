//! Per-seat BNP versus alliance vote aggregation.

use serde::Serialize;

use crate::party::PartyTable;
use crate::scrape::ScrapedCandidate;

/// Aggregated BNP and alliance totals for one seat.
///
/// A seat has exactly one of each, regardless of how many candidates the
/// parties fielded there.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatTally {
    pub bnp_votes: u64,
    pub alliance_votes: u64,
}

impl SeatTally {
    pub fn from_candidates(candidates: &[ScrapedCandidate], table: &PartyTable) -> Self {
        let mut tally = Self::default();
        for candidate in candidates {
            match table.key_of(&candidate.party) {
                Some(key) if key.is_alliance() => {
                    tally.alliance_votes = tally.alliance_votes.saturating_add(candidate.votes)
                }
                Some(_) => tally.bnp_votes = tally.bnp_votes.saturating_add(candidate.votes),
                None => {}
            }
        }
        tally
    }
}

/// Running totals across every seat of a crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrandTotals {
    pub seats: usize,
    pub bnp_votes: u64,
    pub alliance_votes: u64,
}

impl GrandTotals {
    pub fn add(&mut self, tally: &SeatTally) {
        self.seats += 1;
        self.bnp_votes = self.bnp_votes.saturating_add(tally.bnp_votes);
        self.alliance_votes = self.alliance_votes.saturating_add(tally.alliance_votes);
    }
}
