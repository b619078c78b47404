use anyhow::Result;
use bdelection_lib::{CombinedSeat, SimulatedSeat};

pub use bdelection_lib::{format_difference, format_votes, winner_name};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct SeatRow {
    #[tabled(rename = "Division")]
    #[serde(rename = "Division")]
    division: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
    #[tabled(rename = "Seat ID")]
    #[serde(rename = "Seat ID")]
    seat_id: String,
    #[tabled(rename = "Seat Name")]
    #[serde(rename = "Seat Name")]
    seat_name: String,
    #[tabled(rename = "BNP Candidate")]
    #[serde(rename = "BNP Candidate")]
    bnp_candidate: String,
    #[tabled(rename = "BNP Votes")]
    #[serde(rename = "BNP Votes")]
    bnp_votes: String,
    #[tabled(rename = "Alliance Candidate")]
    #[serde(rename = "Alliance Candidate")]
    alliance_candidate: String,
    #[tabled(rename = "Alliance Votes")]
    #[serde(rename = "Alliance Votes")]
    alliance_votes: String,
    #[tabled(rename = "Vote Difference")]
    #[serde(rename = "Vote Difference")]
    vote_difference: String,
    #[tabled(rename = "Winner")]
    #[serde(rename = "Winner")]
    winner: String,
}

#[derive(Tabled, Serialize)]
struct FlippedRow {
    #[tabled(rename = "Division")]
    #[serde(rename = "Division")]
    division: String,
    #[tabled(rename = "District")]
    #[serde(rename = "District")]
    district: String,
    #[tabled(rename = "Seat Name")]
    #[serde(rename = "Seat Name")]
    seat_name: String,
    #[tabled(rename = "BNP Votes")]
    #[serde(rename = "BNP Votes")]
    bnp_votes: String,
    #[tabled(rename = "Alliance Votes")]
    #[serde(rename = "Alliance Votes")]
    alliance_votes: String,
    #[tabled(rename = "Before")]
    #[serde(rename = "Before")]
    before: String,
    #[tabled(rename = "After")]
    #[serde(rename = "After")]
    after: String,
}

// -- Row builders --

fn build_seat_rows(seats: &[&CombinedSeat]) -> Vec<SeatRow> {
    seats
        .iter()
        .map(|s| SeatRow {
            division: s.division.clone(),
            district: s.district.clone(),
            seat_id: s.seat_id.clone(),
            seat_name: s.seat_name.clone(),
            bnp_candidate: s.bnp_candidate.clone(),
            bnp_votes: format_votes(s.bnp_votes),
            alliance_candidate: s.alliance_candidate.clone(),
            alliance_votes: format_votes(s.alliance_votes),
            vote_difference: format_difference(s.vote_difference()),
            winner: winner_name(s.winner),
        })
        .collect()
}

fn build_flipped_rows(seats: &[&SimulatedSeat]) -> Vec<FlippedRow> {
    seats
        .iter()
        .map(|s| FlippedRow {
            division: s.division.clone(),
            district: s.district.clone(),
            seat_name: s.seat_name.clone(),
            bnp_votes: format_votes(s.bnp_votes),
            alliance_votes: format_votes(s.alliance_votes),
            before: winner_name(s.original_winner),
            after: winner_name(s.winner),
        })
        .collect()
}

// -- Table output --

pub fn print_seats_table(seats: &[&CombinedSeat]) {
    println!("{}", Table::new(build_seat_rows(seats)));
}

pub fn print_flipped_table(seats: &[&SimulatedSeat]) {
    println!("{}", Table::new(build_flipped_rows(seats)));
}

// -- Markdown output --

pub fn print_seats_markdown(seats: &[&CombinedSeat]) {
    let mut table = Table::new(build_seat_rows(seats));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_flipped_markdown(seats: &[&SimulatedSeat]) {
    let mut table = Table::new(build_flipped_rows(seats));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_seats_csv(seats: &[&CombinedSeat]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_seat_rows(seats) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_flipped_csv(seats: &[&SimulatedSeat]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_flipped_rows(seats) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
