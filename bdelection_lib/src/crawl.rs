//! The batch crawl: divisions → districts → seats → candidate cards.
//!
//! Failures are contained at the smallest unit that can be skipped. A
//! division whose district list cannot be fetched is skipped, as is a
//! district whose seats or page fail. Only a failure to write the detail
//! document aborts the run.

use bdelection_api::types::District;
use serde::Serialize;

use crate::client::PoliteClient;
use crate::detail::{CandidateRecord, DetailWriter, SeatDetail};
use crate::divisions::Division;
use crate::error::ElectionError;
use crate::party::PartyTable;
use crate::scrape::parse_district_page;
use crate::tally::{GrandTotals, SeatTally};

/// Hooks for reporting crawl progress. All methods default to no-ops.
pub trait CrawlProgress {
    fn division_started(&self, _division: &Division, _districts: usize) {}
    fn division_failed(&self, _division: &Division, _err: &ElectionError) {}
    fn district_finished(&self, _division: &Division, _district: &District, _seats: usize) {}
    fn district_failed(&self, _division: &Division, _district: &District, _err: &ElectionError) {}
}

/// Progress sink that ignores every event.
pub struct NoProgress;

impl CrawlProgress for NoProgress {}

/// Outcome of a full crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub districts: usize,
    pub failed_districts: usize,
    pub failed_divisions: usize,
    /// Seat count and per-side vote totals.
    pub totals: GrandTotals,
}

pub struct Crawler {
    client: PoliteClient,
    parties: PartyTable,
}

impl Crawler {
    pub fn new(client: PoliteClient, parties: PartyTable) -> Self {
        Self { client, parties }
    }

    /// Crawl `divisions` in order, rewriting the detail document after every
    /// district.
    pub async fn run(
        &self,
        divisions: &[Division],
        writer: &DetailWriter,
        progress: &dyn CrawlProgress,
    ) -> Result<CrawlSummary, ElectionError> {
        let mut summary = CrawlSummary::default();
        let mut details: Vec<SeatDetail> = Vec::new();

        for division in divisions {
            tracing::info!("Fetching districts for {} ({})", division.name, division.id);
            let districts = match self.client.get_districts(&division.id).await {
                Ok(districts) => districts,
                Err(err) => {
                    tracing::error!("Error fetching districts for {}: {}", division.name, err);
                    summary.failed_divisions += 1;
                    progress.division_failed(division, &err);
                    continue;
                }
            };
            tracing::info!("Found {} districts in {}", districts.len(), division.name);
            progress.division_started(division, districts.len());

            for district in &districts {
                match self.crawl_district(division, district).await {
                    Ok(seats) => {
                        let count = seats.len();
                        for (detail, tally) in seats {
                            summary.totals.add(&tally);
                            details.push(detail);
                        }
                        summary.districts += 1;
                        writer.update(&details)?;
                        progress.district_finished(division, district, count);
                    }
                    Err(err) => {
                        tracing::error!("Error processing {}: {}", district.name, err);
                        summary.failed_districts += 1;
                        progress.district_failed(division, district, &err);
                    }
                }
            }
        }

        tracing::info!(
            "Crawl complete: {} seats in {} districts ({} districts failed)",
            summary.totals.seats,
            summary.districts,
            summary.failed_districts
        );
        Ok(summary)
    }

    async fn crawl_district(
        &self,
        division: &Division,
        district: &District,
    ) -> Result<Vec<(SeatDetail, SeatTally)>, ElectionError> {
        let seats = self.client.get_seats(&district.id).await?;
        tracing::info!("Processing {} with {} seats", district.name, seats.len());
        if seats.is_empty() {
            return Ok(Vec::new());
        }

        let html = self
            .client
            .get_district_page(&division.id, &district.id)
            .await?;
        let scraped = parse_district_page(&html, &seats)?;

        let mut out = Vec::with_capacity(scraped.len());
        for seat in scraped {
            let tally = SeatTally::from_candidates(&seat.candidates, &self.parties);
            tracing::info!(
                "[{}/{}/{}] BNP: {} | NCP/Jamaat: {}",
                division.name,
                district.name,
                seat.seat_name,
                tally.bnp_votes,
                tally.alliance_votes
            );

            let candidates = seat
                .candidates
                .into_iter()
                .map(|c| CandidateRecord {
                    party_key: self.parties.key_of(&c.party),
                    candidate: c.name,
                    party: c.party,
                    votes: c.votes,
                })
                .collect();

            out.push((
                SeatDetail {
                    division: division.name.clone(),
                    district: district.name.clone(),
                    seat_id: seat.seat_id,
                    seat_name: seat.seat_name,
                    candidates,
                },
                tally,
            ));
        }
        Ok(out)
    }
}
