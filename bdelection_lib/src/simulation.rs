//! What-if vote shift between BNP and the alliance.
//!
//! Shifts `pct` percent of each seat's two-party vote from BNP to the
//! alliance (negative values shift the other way) and recomputes winners.
//! The report page runs the same arithmetic in its inline script.

use serde::Serialize;

use crate::party::Side;
use crate::summary::{CombinedSeat, ReportStats};

pub const MIN_PERCENTAGE: f64 = -50.0;
pub const MAX_PERCENTAGE: f64 = 50.0;
pub const DEFAULT_PERCENTAGE: f64 = 10.0;

/// Clamp a requested shift to the supported range. NaN becomes 0.
pub fn clamp_percentage(pct: f64) -> f64 {
    if pct.is_nan() {
        return 0.0;
    }
    pct.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE)
}

/// Round to the nearest integer with halves going toward positive infinity,
/// so `-2.5` becomes `-2` and `2.5` becomes `3`.
///
/// Compares the fractional part instead of adding 0.5 first, which would
/// round `0.49999999999999994` up.
pub fn round_half_up(x: f64) -> i64 {
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SimulatedSeat {
    pub division: String,
    pub district: String,
    pub seat_id: String,
    pub seat_name: String,
    pub bnp_votes: u64,
    pub alliance_votes: u64,
    pub original_winner: Option<Side>,
    pub winner: Option<Side>,
}

impl SimulatedSeat {
    pub fn flipped(&self) -> bool {
        self.original_winner != self.winner
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub percentage: f64,
    pub seats: Vec<SimulatedSeat>,
    pub bnp_wins: usize,
    pub alliance_wins: usize,
    pub bnp_total_votes: u64,
    pub alliance_total_votes: u64,
}

impl SimulationOutcome {
    /// Seats whose winner differs from the scraped result.
    pub fn flipped(&self) -> Vec<&SimulatedSeat> {
        self.seats.iter().filter(|s| s.flipped()).collect()
    }
}

/// Apply a shift of `pct` percent to every seat of `stats`.
pub fn simulate(stats: &ReportStats, pct: f64) -> SimulationOutcome {
    let percentage = clamp_percentage(pct);
    let mut outcome = SimulationOutcome {
        percentage,
        seats: Vec::with_capacity(stats.combined_seats.len()),
        bnp_wins: 0,
        alliance_wins: 0,
        bnp_total_votes: 0,
        alliance_total_votes: 0,
    };

    for seat in &stats.combined_seats {
        let simulated = shift_seat(seat, percentage);
        match simulated.winner {
            Some(Side::Bnp) => outcome.bnp_wins += 1,
            Some(Side::Alliance) => outcome.alliance_wins += 1,
            None => {}
        }
        outcome.bnp_total_votes = outcome.bnp_total_votes.saturating_add(simulated.bnp_votes);
        outcome.alliance_total_votes = outcome
            .alliance_total_votes
            .saturating_add(simulated.alliance_votes);
        outcome.seats.push(simulated);
    }
    outcome
}

/// What the report's Reset button shows: the scraped votes with winners
/// re-decided strictly, so an unopposed seat with no votes has no winner.
pub fn reset(stats: &ReportStats) -> SimulationOutcome {
    simulate(stats, 0.0)
}

fn shift_seat(seat: &CombinedSeat, pct: f64) -> SimulatedSeat {
    let bnp = i64::try_from(seat.bnp_votes).unwrap_or(i64::MAX);
    let alliance = i64::try_from(seat.alliance_votes).unwrap_or(i64::MAX);
    let total = bnp.saturating_add(alliance);
    let change = round_half_up(total as f64 * pct / 100.0);

    let new_bnp = bnp.saturating_sub(change).max(0) as u64;
    let new_alliance = alliance.saturating_add(change).max(0) as u64;
    let winner = match new_bnp.cmp(&new_alliance) {
        std::cmp::Ordering::Greater => Some(Side::Bnp),
        std::cmp::Ordering::Less => Some(Side::Alliance),
        std::cmp::Ordering::Equal => None,
    };

    SimulatedSeat {
        division: seat.division.clone(),
        district: seat.district.clone(),
        seat_id: seat.seat_id.clone(),
        seat_name: seat.seat_name.clone(),
        bnp_votes: new_bnp,
        alliance_votes: new_alliance,
        original_winner: seat.winner,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(name: &str, bnp: u64, alliance: u64, winner: Option<Side>) -> CombinedSeat {
        CombinedSeat {
            division: "Dhaka".into(),
            district: "Dhaka".into(),
            seat_id: "1".into(),
            seat_name: name.into(),
            bnp_candidate: "A".into(),
            bnp_votes: bnp,
            alliance_candidate: "B".into(),
            alliance_votes: alliance,
            winner,
        }
    }

    fn stats(seats: Vec<CombinedSeat>) -> ReportStats {
        ReportStats {
            combined_seats: seats,
            ..ReportStats::default()
        }
    }

    #[test]
    fn round_half_up_matches_math_round() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.49999999999999994), 0);
        assert_eq!(round_half_up(1.5), 2);
    }

    #[test]
    fn clamps_percentage() {
        assert_eq!(clamp_percentage(75.0), 50.0);
        assert_eq!(clamp_percentage(-80.0), -50.0);
        assert_eq!(clamp_percentage(12.5), 12.5);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
    }

    #[test]
    fn ten_percent_shift_flips_close_seat() {
        let s = stats(vec![seat("Dhaka-1", 100, 90, Some(Side::Bnp))]);
        let out = simulate(&s, 10.0);
        // total 190, change 19
        assert_eq!(out.seats[0].bnp_votes, 81);
        assert_eq!(out.seats[0].alliance_votes, 109);
        assert_eq!(out.seats[0].winner, Some(Side::Alliance));
        assert_eq!(out.alliance_wins, 1);
        assert_eq!(out.flipped().len(), 1);
    }

    #[test]
    fn negative_shift_moves_votes_to_bnp() {
        let s = stats(vec![seat("Dhaka-1", 40, 60, Some(Side::Alliance))]);
        let out = simulate(&s, -20.0);
        assert_eq!(out.seats[0].bnp_votes, 60);
        assert_eq!(out.seats[0].alliance_votes, 40);
        assert_eq!(out.bnp_wins, 1);
    }

    #[test]
    fn votes_never_go_negative() {
        let s = stats(vec![seat("Dhaka-1", 10, 0, Some(Side::Bnp))]);
        let out = simulate(&s, -50.0);
        // change = round(-5) = -5: bnp 15, alliance max(0, -5) = 0
        assert_eq!(out.seats[0].bnp_votes, 15);
        assert_eq!(out.seats[0].alliance_votes, 0);

        let s = stats(vec![seat("Dhaka-2", 0, 10, Some(Side::Alliance))]);
        let out = simulate(&s, 50.0);
        assert_eq!(out.seats[0].bnp_votes, 0);
        assert_eq!(out.seats[0].alliance_votes, 15);
    }

    #[test]
    fn equal_after_shift_is_no_winner() {
        let s = stats(vec![seat("Dhaka-1", 60, 40, Some(Side::Bnp))]);
        let out = simulate(&s, 10.0);
        assert_eq!(out.seats[0].bnp_votes, 50);
        assert_eq!(out.seats[0].winner, None);
        assert_eq!(out.bnp_wins + out.alliance_wins, 0);
        assert!(out.seats[0].flipped());
    }

    #[test]
    fn half_rounds_up() {
        // total 5, 10% = 0.5 → 1
        let s = stats(vec![seat("Dhaka-1", 3, 2, Some(Side::Bnp))]);
        let out = simulate(&s, 10.0);
        assert_eq!(out.seats[0].bnp_votes, 2);
        assert_eq!(out.seats[0].alliance_votes, 3);
        // total 5, -10% = -0.5 → 0
        let out = simulate(&s, -10.0);
        assert_eq!(out.seats[0].bnp_votes, 3);
    }

    #[test]
    fn zero_shift_keeps_counts() {
        let s = stats(vec![
            seat("Dhaka-1", 100, 90, Some(Side::Bnp)),
            seat("Dhaka-2", 5, 50, Some(Side::Alliance)),
        ]);
        let out = simulate(&s, 0.0);
        assert_eq!(out.percentage, 0.0);
        assert_eq!(out.bnp_wins, 1);
        assert_eq!(out.alliance_wins, 1);
        assert_eq!(out.bnp_total_votes, 105);
        assert_eq!(out.alliance_total_votes, 140);
        assert!(out.flipped().is_empty());
    }

    #[test]
    fn reset_redecides_winners_from_scraped_votes() {
        let mut s = stats(vec![
            seat("Dhaka-1", 0, 0, Some(Side::Alliance)),
            seat("Dhaka-2", 100, 90, Some(Side::Bnp)),
        ]);
        s.alliance_wins = 1;
        s.bnp_wins = 1;
        let out = reset(&s);
        assert_eq!(out.percentage, 0.0);
        assert_eq!(out.seats[0].winner, None);
        assert_eq!(out.seats[1].winner, Some(Side::Bnp));
        assert_eq!(out.alliance_wins, 0);
        assert_eq!(out.bnp_wins, 1);
        assert_eq!(out.bnp_total_votes, 100);
        assert_eq!(out.alliance_total_votes, 90);
    }

    #[test]
    fn huge_counts_saturate_instead_of_wrapping() {
        let s = stats(vec![seat("Dhaka-1", u64::MAX, u64::MAX, None)]);
        let out = simulate(&s, 10.0);
        // Both sides clamp to i64::MAX, so the shift still favours the alliance.
        assert_eq!(out.seats[0].alliance_votes, i64::MAX as u64);
        assert!(out.seats[0].bnp_votes < out.seats[0].alliance_votes);
        assert_eq!(out.seats[0].winner, Some(Side::Alliance));

        let s = stats(vec![
            seat("Dhaka-1", u64::MAX, 0, Some(Side::Bnp)),
            seat("Dhaka-2", u64::MAX, 0, Some(Side::Bnp)),
            seat("Dhaka-3", u64::MAX, 0, Some(Side::Bnp)),
        ]);
        let out = simulate(&s, 0.0);
        assert_eq!(out.seats[0].bnp_votes, i64::MAX as u64);
        assert_eq!(out.bnp_total_votes, u64::MAX);
        assert_eq!(out.bnp_wins, 3);
    }

    #[test]
    fn out_of_range_percentage_is_clamped() {
        let s = stats(vec![seat("Dhaka-1", 100, 100, None)]);
        let out = simulate(&s, 90.0);
        assert_eq!(out.percentage, 50.0);
        assert_eq!(out.seats[0].bnp_votes, 0);
        assert_eq!(out.seats[0].alliance_votes, 200);
    }

    #[test]
    fn unopposed_zero_vote_seat_loses_original_winner() {
        // Unopposed alliance win with zero votes is a tie once recomputed.
        let s = stats(vec![seat("Dhaka-1", 0, 0, Some(Side::Alliance))]);
        let out = simulate(&s, 0.0);
        assert_eq!(out.seats[0].winner, None);
        assert!(out.seats[0].flipped());
    }
}
