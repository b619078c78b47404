use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::{load_stats, DEFAULT_INPUT};
use crate::html_report::{render_report, ReportOptions, DEFAULT_TITLE};
use crate::output::format_votes;

#[derive(Args)]
pub struct ReportArgs {
    /// Detail document produced by `scrape`
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the HTML report (`--output` is the global format flag)
    #[arg(long = "out", default_value = "out/election_report_2026.html")]
    pub out: PathBuf,

    /// Page title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,
}

pub fn run(args: &ReportArgs) -> Result<()> {
    let stats = load_stats(&args.input)?;

    let opts = ReportOptions {
        title: args.title.clone(),
        generated_on: chrono::Local::now().format("%B %-d, %Y").to_string(),
    };
    let html = render_report(&stats, &opts);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.out, html)?;

    eprintln!("HTML report generated: {}", args.out.display());
    println!("Summary:");
    println!("  Seats: {}", stats.seat_count());
    println!("  BNP wins: {} seats", stats.bnp_wins);
    println!("  Alliance wins: {} seats", stats.alliance_wins);
    println!("  BNP total votes: {}", format_votes(stats.bnp_total_votes));
    println!(
        "  Alliance total votes: {}",
        format_votes(stats.alliance_total_votes)
    );

    Ok(())
}
