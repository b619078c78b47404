mod commands;
mod html_report;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bdelection")]
#[command(about = "Scrape Bangladesh 2026 election results and compare BNP with the NCP/Jamaat alliance")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl every division and write the detail document
    Scrape(commands::scrape::ScrapeArgs),
    /// Render the HTML report from the detail document
    Report(commands::report::ReportArgs),
    /// Print the seat-by-seat comparison
    Summary(commands::summary::SummaryArgs),
    /// Shift votes between the two sides and show which seats flip
    Simulate(commands::simulate::SimulateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bdelection=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    match &cli.command {
        Commands::Scrape(args) => commands::scrape::run(args).await?,
        Commands::Report(args) => commands::report::run(args)?,
        Commands::Summary(args) => commands::summary::run(args, &format)?,
        Commands::Simulate(args) => commands::simulate::run(args, &format)?,
    }

    Ok(())
}
