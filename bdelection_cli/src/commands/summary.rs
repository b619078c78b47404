use std::path::PathBuf;

use anyhow::Result;
use bdelection_lib::validation::{self, WinnerFilter};
use bdelection_lib::{load_divisions, CombinedSeat};
use clap::Args;

use crate::commands::{load_stats, DEFAULT_INPUT};
use crate::output::{
    format_votes, print_json, print_seats_csv, print_seats_markdown, print_seats_table,
    OutputFormat,
};

#[derive(Args)]
pub struct SummaryArgs {
    /// Detail document produced by `scrape`
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Only seats in this division (name or id)
    #[arg(long)]
    pub division: Option<String>,

    /// Filter by outcome: winner (decided seats), non-winner (tied seats)
    #[arg(long)]
    pub winner: Option<String>,

    /// Case-insensitive search over division, district, seat, and candidates
    #[arg(long)]
    pub search: Option<String>,
}

/// Row filter equivalent to the report page's search box and dropdowns.
#[derive(Default)]
struct SeatFilter {
    search: Option<String>,
    division: Option<String>,
    winner: Option<WinnerFilter>,
}

impl SeatFilter {
    fn matches(&self, seat: &CombinedSeat) -> bool {
        let matches_search = self
            .search
            .as_ref()
            .map_or(true, |s| seat.search_text().contains(s.as_str()));
        let matches_division = self
            .division
            .as_ref()
            .map_or(true, |d| seat.division.eq_ignore_ascii_case(d));
        let matches_winner = self
            .winner
            .map_or(true, |w| w.matches(seat.winner.is_some()));
        matches_search && matches_division && matches_winner
    }
}

pub fn run(args: &SummaryArgs, format: &OutputFormat) -> Result<()> {
    let mut filter = SeatFilter::default();

    if let Some(ref search) = args.search {
        filter.search = Some(validation::validate_search(search)?.to_lowercase());
    }

    if let Some(ref division) = args.division {
        let divisions = load_divisions()?;
        filter.division = Some(validation::validate_division_filter(division, &divisions)?.name);
    }

    if let Some(ref winner) = args.winner {
        filter.winner = Some(validation::validate_winner_filter(winner)?);
    }

    let stats = load_stats(&args.input)?;
    let seats: Vec<&CombinedSeat> = stats
        .combined_seats
        .iter()
        .filter(|s| filter.matches(s))
        .collect();

    eprintln!(
        "{} of {} seats | BNP wins: {} ({} votes) | Alliance wins: {} ({} votes)",
        seats.len(),
        stats.seat_count(),
        stats.bnp_wins,
        format_votes(stats.bnp_total_votes),
        stats.alliance_wins,
        format_votes(stats.alliance_total_votes)
    );
    if seats.is_empty() {
        eprintln!("No results found matching your criteria.");
    }

    match format {
        OutputFormat::Table => print_seats_table(&seats),
        OutputFormat::Json => print_json(&seats),
        OutputFormat::Csv => print_seats_csv(&seats)?,
        OutputFormat::Markdown => print_seats_markdown(&seats),
    }

    Ok(())
}
