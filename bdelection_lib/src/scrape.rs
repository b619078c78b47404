//! Candidate card extraction from district results pages.
//!
//! A district page renders every seat as a tab. Each tab body is a
//! `div[x-show="openTab === N"]` holding a grid of candidate cards.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use bdelection_api::types::Seat;

use crate::party::clean;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// One candidate card as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapedCandidate {
    pub name: String,
    pub party: String,
    pub votes: u64,
}

/// All candidate cards of one seat tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapedSeat {
    /// Tab number (see [`Seat::number`]).
    pub seat_id: String,
    pub seat_name: String,
    pub seat_slug: String,
    pub candidates: Vec<ScrapedCandidate>,
}

struct CardSelectors {
    tab: Selector,
    card: Selector,
    name: Selector,
    party: Selector,
    votes: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            tab: parse_selector("div[x-show]")?,
            card: parse_selector(".grid.grid-cols-2 .group")?,
            name: parse_selector("h3")?,
            party: parse_selector("p.text-xs.font-medium")?,
            votes: parse_selector(".text-lg.font-bold")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{}': {}", selector, e)))
}

/// Parse the candidate cards of the requested seats out of a district page.
///
/// Seats whose tab cannot be found, or whose tab has no usable cards, are
/// left out of the result.
pub fn parse_district_page(html: &str, seats: &[Seat]) -> Result<Vec<ScrapedSeat>, ScrapeError> {
    let selectors = CardSelectors::new()?;
    let document = Html::parse_document(html);
    let tabs: Vec<(String, ElementRef)> = document
        .select(&selectors.tab)
        .filter_map(|el| el.value().attr("x-show").map(|attr| (attr.to_string(), el)))
        .collect();

    let mut out = Vec::new();
    for seat in seats {
        let number = seat.number();
        let Some((_, tab)) = tabs.iter().find(|(attr, _)| shows_tab(attr, number)) else {
            tracing::warn!("Could not find content for {}", seat.name);
            continue;
        };

        let candidates: Vec<ScrapedCandidate> = tab
            .select(&selectors.card)
            .filter_map(|card| parse_card(card, &selectors))
            .collect();

        if candidates.is_empty() {
            tracing::debug!("No candidate cards for {}", seat.name);
            continue;
        }

        out.push(ScrapedSeat {
            seat_id: number.to_string(),
            seat_name: seat.name.clone(),
            seat_slug: seat.id.clone(),
            candidates,
        });
    }
    Ok(out)
}

fn parse_card(card: ElementRef, selectors: &CardSelectors) -> Option<ScrapedCandidate> {
    let name = first_text(card, &selectors.name);
    let party = first_text(card, &selectors.party);
    if name.is_empty() || party.is_empty() {
        return None;
    }
    let votes = card
        .select(&selectors.votes)
        .next()
        .and_then(|el| parse_votes(&el.text().collect::<String>()))
        .unwrap_or(0);
    Some(ScrapedCandidate { name, party, votes })
}

fn first_text(card: ElementRef, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(|el| clean(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// True when an `x-show` expression selects exactly tab `number`.
///
/// `openTab === 1` must not match the expression for tab 12.
fn shows_tab(expr: &str, number: &str) -> bool {
    let needle = format!("openTab === {}", number);
    let mut rest = expr;
    while let Some(pos) = rest.find(&needle) {
        let after = &rest[pos + needle.len()..];
        if !after.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            return true;
        }
        rest = after;
    }
    false
}

/// Parse a vote count such as `1,20,450`.
///
/// Separators are dropped and the leading run of digits is used. Bengali
/// digits are accepted. Returns `None` when there are no leading digits.
pub fn parse_votes(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .map(ascii_digit)
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn ascii_digit(c: char) -> char {
    match c {
        '\u{09E6}'..='\u{09EF}' => {
            char::from_digit(c as u32 - 0x09E6, 10).unwrap_or(c)
        }
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(id: &str, name: &str) -> Seat {
        Seat {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn page(tabs: &str) -> String {
        format!("<html><body><div x-data=\"{{ openTab: 1 }}\">{}</div></body></html>", tabs)
    }

    fn card(name: &str, party: &str, votes: &str) -> String {
        format!(
            r#"<div class="group"><h3>{}</h3><p class="text-xs font-medium">{}</p><div class="text-lg font-bold">{}</div></div>"#,
            name, party, votes
        )
    }

    #[test]
    fn parse_votes_variants() {
        assert_eq!(parse_votes("1,20,450"), Some(120450));
        assert_eq!(parse_votes("  98,120 "), Some(98120));
        assert_eq!(parse_votes("0"), Some(0));
        assert_eq!(parse_votes("4003 votes"), Some(4003));
        assert_eq!(parse_votes("--"), None);
        assert_eq!(parse_votes(""), None);
        assert_eq!(parse_votes("১,২০,৪৫০"), Some(120450));
    }

    #[test]
    fn shows_tab_is_exact() {
        assert!(shows_tab("openTab === 1", "1"));
        assert!(shows_tab("openTab === 1 && loaded", "1"));
        assert!(!shows_tab("openTab === 12", "1"));
        assert!(shows_tab("openTab === 10 || openTab === 1", "1"));
        assert!(!shows_tab("openTab === 2", "1"));
    }

    #[test]
    fn parses_cards_per_seat() {
        let html = page(&format!(
            r#"<div x-show="openTab === 1"><div class="grid grid-cols-2">{}{}</div></div>
               <div x-show="openTab === 2"><div class="grid grid-cols-2">{}</div></div>"#,
            card("A  Rahman", "BNP", "1,000"),
            card("B Karim", "Bangladesh Jamaat-e-Islami", "900"),
            card("C Akter", "NCP", "1,500"),
        ));
        let seats = vec![seat("dhaka_1", "Dhaka-1"), seat("dhaka_2", "Dhaka-2")];
        let parsed = parse_district_page(&html, &seats).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].seat_id, "1");
        assert_eq!(parsed[0].seat_slug, "dhaka_1");
        assert_eq!(parsed[0].candidates.len(), 2);
        assert_eq!(parsed[0].candidates[0].name, "A Rahman");
        assert_eq!(parsed[0].candidates[0].votes, 1000);
        assert_eq!(parsed[1].candidates[0].party, "NCP");
    }

    #[test]
    fn tab_twelve_not_confused_with_one() {
        let html = page(&format!(
            r#"<div x-show="openTab === 12"><div class="grid grid-cols-2">{}</div></div>
               <div x-show="openTab === 1"><div class="grid grid-cols-2">{}</div></div>"#,
            card("Twelve", "BNP", "12"),
            card("One", "BNP", "1"),
        ));
        let parsed = parse_district_page(&html, &[seat("x_1", "X-1")]).unwrap();
        assert_eq!(parsed[0].candidates[0].name, "One");
    }

    #[test]
    fn missing_tab_is_skipped() {
        let html = page(&format!(
            r#"<div x-show="openTab === 1"><div class="grid grid-cols-2">{}</div></div>"#,
            card("A", "BNP", "5"),
        ));
        let parsed =
            parse_district_page(&html, &[seat("x_1", "X-1"), seat("x_9", "X-9")]).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].seat_name, "X-1");
    }

    #[test]
    fn cards_without_name_or_party_dropped_and_bad_votes_zero() {
        let html = page(&format!(
            r#"<div x-show="openTab === 1"><div class="grid grid-cols-2">{}{}{}</div></div>"#,
            card("", "BNP", "5"),
            card("No Party", "  ", "5"),
            card("Pending", "Gano Forum", "counting"),
        ));
        let parsed = parse_district_page(&html, &[seat("x_1", "X-1")]).unwrap();
        assert_eq!(parsed[0].candidates.len(), 1);
        assert_eq!(parsed[0].candidates[0].name, "Pending");
        assert_eq!(parsed[0].candidates[0].votes, 0);
    }

    #[test]
    fn seat_without_cards_omitted() {
        let html = page(r#"<div x-show="openTab === 1"><p>Results not yet published.</p></div>"#);
        let parsed = parse_district_page(&html, &[seat("x_1", "X-1")]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn cards_outside_grid_ignored() {
        let html = page(&format!(
            r#"<div x-show="openTab === 1">{}</div>"#,
            card("Loose", "BNP", "5"),
        ));
        let parsed = parse_district_page(&html, &[seat("x_1", "X-1")]).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn entities_are_decoded() {
        let html = page(&format!(
            r#"<div x-show="openTab === 1"><div class="grid grid-cols-2">{}</div></div>"#,
            card("Ali &amp; Sons", "BNP", "5"),
        ));
        let parsed = parse_district_page(&html, &[seat("x_1", "X-1")]).unwrap();
        assert_eq!(parsed[0].candidates[0].name, "Ali & Sons");
    }
}
