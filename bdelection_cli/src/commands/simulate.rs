use std::path::PathBuf;

use anyhow::Result;
use bdelection_lib::validation;
use bdelection_lib::{simulate, SimulatedSeat};
use clap::Args;
use serde::Serialize;

use crate::commands::{load_stats, DEFAULT_INPUT};
use crate::output::{
    format_votes, print_flipped_csv, print_flipped_markdown, print_flipped_table, print_json,
    OutputFormat,
};

#[derive(Args)]
pub struct SimulateArgs {
    /// Share of each seat's two-party vote moved from BNP to the alliance
    /// (-50 to 50; negative moves votes to BNP)
    #[arg(long, allow_hyphen_values = true)]
    pub percentage: f64,

    /// Detail document produced by `scrape`
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    percentage: f64,
    bnp_wins_before: usize,
    alliance_wins_before: usize,
    bnp_wins: usize,
    alliance_wins: usize,
    bnp_total_votes: u64,
    alliance_total_votes: u64,
    flipped: Vec<&'a SimulatedSeat>,
}

pub fn run(args: &SimulateArgs, format: &OutputFormat) -> Result<()> {
    let percentage = validation::validate_percentage(args.percentage)?;
    let stats = load_stats(&args.input)?;
    let outcome = simulate(&stats, percentage);
    let flipped = outcome.flipped();

    let direction = if percentage < 0.0 {
        "to BNP"
    } else {
        "to the NCP/Jamaat Alliance"
    };
    eprintln!(
        "Shifted {}% of the vote {} across {} seats",
        percentage.abs(),
        direction,
        outcome.seats.len()
    );
    eprintln!(
        "BNP: {} -> {} seats ({} votes) | Alliance: {} -> {} seats ({} votes) | {} seats flipped",
        stats.bnp_wins,
        outcome.bnp_wins,
        format_votes(outcome.bnp_total_votes),
        stats.alliance_wins,
        outcome.alliance_wins,
        format_votes(outcome.alliance_total_votes),
        flipped.len()
    );

    match format {
        OutputFormat::Table => print_flipped_table(&flipped),
        OutputFormat::Json => print_json(&SimulationReport {
            percentage: outcome.percentage,
            bnp_wins_before: stats.bnp_wins,
            alliance_wins_before: stats.alliance_wins,
            bnp_wins: outcome.bnp_wins,
            alliance_wins: outcome.alliance_wins,
            bnp_total_votes: outcome.bnp_total_votes,
            alliance_total_votes: outcome.alliance_total_votes,
            flipped,
        }),
        OutputFormat::Csv => print_flipped_csv(&flipped)?,
        OutputFormat::Markdown => print_flipped_markdown(&flipped),
    }

    Ok(())
}
