use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use bdelection_lib::types::District;
use bdelection_lib::validation;
use bdelection_lib::{
    load_divisions, CrawlProgress, Crawler, DetailWriter, Division, ElectionError, PartyTable,
    PoliteClient,
};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::format_votes;

#[derive(Args)]
pub struct ScrapeArgs {
    /// Directory the detail document is written to
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Only crawl these divisions (name or id, repeatable)
    #[arg(long)]
    pub division: Vec<String>,

    /// Minimum delay between requests in milliseconds
    #[arg(long, default_value = "1000")]
    pub delay_ms: u64,

    /// Site origin (defaults to $BDELECTION_BASE_URL or the production site)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Drives an indicatif bar from crawl events. The bar length grows as each
/// division reports its district count.
struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self> {
        let pb = ProgressBar::new(0);
        pb.set_style(ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} districts {msg}",
        )?);
        Ok(Self { pb })
    }
}

impl CrawlProgress for BarProgress {
    fn division_started(&self, division: &Division, districts: usize) {
        self.pb.inc_length(districts as u64);
        self.pb.set_message(division.name.clone());
    }

    fn division_failed(&self, division: &Division, err: &ElectionError) {
        self.pb
            .println(format!("Skipped division {}: {}", division.name, err));
    }

    fn district_finished(&self, division: &Division, district: &District, seats: usize) {
        self.pb.set_message(format!(
            "{}/{} ({} seats)",
            division.name, district.name, seats
        ));
        self.pb.inc(1);
    }

    fn district_failed(&self, division: &Division, district: &District, err: &ElectionError) {
        self.pb.println(format!(
            "Skipped district {}/{}: {}",
            division.name, district.name, err
        ));
        self.pb.inc(1);
    }
}

pub async fn run(args: &ScrapeArgs) -> Result<()> {
    let all_divisions = load_divisions()?;
    let divisions: Vec<Division> = if args.division.is_empty() {
        all_divisions
    } else {
        let mut selected: Vec<Division> = Vec::new();
        for input in &args.division {
            let division = validation::validate_division_filter(input, &all_divisions)?;
            if !selected.contains(&division) {
                selected.push(division);
            }
        }
        selected
    };
    if divisions.is_empty() {
        bail!("No divisions to crawl");
    }

    let base_url = args
        .base_url
        .clone()
        .or_else(|| std::env::var("BDELECTION_BASE_URL").ok());
    let delay = Duration::from_millis(args.delay_ms);
    let client = match base_url {
        Some(ref url) => PoliteClient::with_base_url(url, delay),
        None => PoliteClient::new(delay),
    };

    let writer = DetailWriter::in_dir(&args.out_dir);
    writer.initialize()?;

    eprintln!(
        "Crawling {} division(s) from {}",
        divisions.len(),
        client.base_url()
    );

    let crawler = Crawler::new(client, PartyTable::load()?);
    let progress = BarProgress::new()?;
    let summary = crawler.run(&divisions, &writer, &progress).await?;
    progress.pb.finish_and_clear();

    eprintln!(
        "Scraping complete: {} seats from {} districts ({} districts and {} divisions failed)",
        summary.totals.seats,
        summary.districts,
        summary.failed_districts,
        summary.failed_divisions
    );
    eprintln!("Output saved to: {}", writer.path().display());

    println!("--- GRAND TOTALS ---");
    println!("BNP: {} votes", format_votes(summary.totals.bnp_votes));
    println!(
        "NCP/Jamaat (alliance): {} votes",
        format_votes(summary.totals.alliance_votes)
    );

    Ok(())
}
