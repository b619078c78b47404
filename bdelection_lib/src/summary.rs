//! Seat-level BNP versus alliance results and report statistics.

use serde::Serialize;

use crate::detail::{DetailDocument, DetailEntry};
use crate::party::Side;

/// Placeholder candidate name for a side that did not contest a seat.
pub const NO_CANDIDATE: &str = "N/A";

/// One row of the combined results table.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CombinedSeat {
    pub division: String,
    pub district: String,
    pub seat_id: String,
    pub seat_name: String,
    pub bnp_candidate: String,
    pub bnp_votes: u64,
    pub alliance_candidate: String,
    pub alliance_votes: u64,
    pub winner: Option<Side>,
}

impl CombinedSeat {
    /// BNP votes minus alliance votes, saturating at the `i64` range.
    pub fn vote_difference(&self) -> i64 {
        let bnp = i128::from(self.bnp_votes);
        let alliance = i128::from(self.alliance_votes);
        (bnp - alliance).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    pub fn has_bnp(&self) -> bool {
        self.bnp_candidate != NO_CANDIDATE
    }

    pub fn has_alliance(&self) -> bool {
        self.alliance_candidate != NO_CANDIDATE
    }

    /// Lowercased text of the rendered table row, cell by cell, which is what
    /// the report's search box matches against.
    pub fn search_text(&self) -> String {
        [
            self.division.clone(),
            self.district.clone(),
            self.seat_id.clone(),
            self.seat_name.clone(),
            self.bnp_candidate.clone(),
            Side::Bnp.short_name().to_string(),
            format_votes(self.bnp_votes),
            self.alliance_candidate.clone(),
            Side::Alliance.short_name().to_string(),
            format_votes(self.alliance_votes),
            format_difference(self.vote_difference()),
            winner_name(self.winner),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// Vote count with `,` thousands separators, as shown in the report.
pub fn format_votes(votes: u64) -> String {
    let digits = votes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed vote difference with a leading `+` for BNP leads.
pub fn format_difference(diff: i64) -> String {
    let magnitude = format_votes(diff.unsigned_abs());
    match diff.signum() {
        1 => format!("+{}", magnitude),
        -1 => format!("-{}", magnitude),
        _ => magnitude,
    }
}

/// Winner column text; `-` for an undecided seat.
pub fn winner_name(winner: Option<Side>) -> String {
    winner
        .map(|w| w.short_name().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Aggregate figures shown at the top of the report.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub combined_seats: Vec<CombinedSeat>,
    pub bnp_wins: usize,
    pub alliance_wins: usize,
    pub bnp_total_votes: u64,
    pub alliance_total_votes: u64,
}

#[derive(Default)]
struct SideAgg {
    names: Vec<String>,
    votes: u64,
}

impl SideAgg {
    fn push(&mut self, entry: &DetailEntry) {
        self.names.push(entry.candidate_name.clone());
        self.votes = self.votes.saturating_add(entry.votes);
    }

    fn present(&self) -> bool {
        !self.names.is_empty()
    }

    fn candidate(&self) -> String {
        if self.names.is_empty() {
            NO_CANDIDATE.to_string()
        } else {
            self.names.join(" / ")
        }
    }
}

struct SeatAgg {
    seat_id: String,
    seat_name: String,
    bnp: SideAgg,
    alliance: SideAgg,
}

impl ReportStats {
    pub fn from_document(doc: &DetailDocument) -> Self {
        let mut stats = Self::default();

        for (division, districts) in doc {
            for (district, entries) in districts {
                for seat in group_by_seat(entries) {
                    let winner = decide_winner(&seat.bnp, &seat.alliance);
                    match winner {
                        Some(Side::Bnp) => stats.bnp_wins += 1,
                        Some(Side::Alliance) => stats.alliance_wins += 1,
                        None => {}
                    }
                    stats.bnp_total_votes = stats.bnp_total_votes.saturating_add(seat.bnp.votes);
                    stats.alliance_total_votes =
                        stats.alliance_total_votes.saturating_add(seat.alliance.votes);

                    stats.combined_seats.push(CombinedSeat {
                        division: division.clone(),
                        district: district.clone(),
                        seat_id: seat.seat_id,
                        seat_name: seat.seat_name,
                        bnp_candidate: seat.bnp.candidate(),
                        bnp_votes: seat.bnp.votes,
                        alliance_candidate: seat.alliance.candidate(),
                        alliance_votes: seat.alliance.votes,
                        winner,
                    });
                }
            }
        }
        stats
    }

    /// Sorted, de-duplicated division names (the report's division filter).
    pub fn divisions(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .combined_seats
            .iter()
            .map(|s| s.division.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn seat_count(&self) -> usize {
        self.combined_seats.len()
    }
}

fn group_by_seat(entries: &[DetailEntry]) -> Vec<SeatAgg> {
    let mut seats: Vec<SeatAgg> = Vec::new();
    for entry in entries {
        let idx = match seats.iter().position(|s| s.seat_name == entry.seat_name) {
            Some(idx) => idx,
            None => {
                seats.push(SeatAgg {
                    seat_id: entry.seat_id.clone(),
                    seat_name: entry.seat_name.clone(),
                    bnp: SideAgg::default(),
                    alliance: SideAgg::default(),
                });
                seats.len() - 1
            }
        };
        match entry.party {
            Side::Bnp => seats[idx].bnp.push(entry),
            Side::Alliance => seats[idx].alliance.push(entry),
        }
    }
    seats
}

/// A side wins when it contested the seat and either ran unopposed or got
/// strictly more votes. Ties produce no winner.
fn decide_winner(bnp: &SideAgg, alliance: &SideAgg) -> Option<Side> {
    if bnp.present() && (!alliance.present() || bnp.votes > alliance.votes) {
        Some(Side::Bnp)
    } else if alliance.present() && (!bnp.present() || alliance.votes > bnp.votes) {
        Some(Side::Alliance)
    } else {
        None
    }
}
