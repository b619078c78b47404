use crate::divisions::{find_division, Division};
use crate::error::ElectionError;
use crate::simulation::{MAX_PERCENTAGE, MIN_PERCENTAGE};

pub const MAX_SEARCH_LENGTH: usize = 100;

/// Table filter on whether a seat was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerFilter {
    /// Seats with a winner.
    Winner,
    /// Tied seats.
    NonWinner,
}

impl WinnerFilter {
    pub fn matches(self, has_winner: bool) -> bool {
        match self {
            Self::Winner => has_winner,
            Self::NonWinner => !has_winner,
        }
    }
}

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ElectionError> {
    if input.len() > max_len {
        return Err(ElectionError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ElectionError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a free-text table search: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, ElectionError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a vote shift percentage: finite and within -50..=50.
pub fn validate_percentage(pct: f64) -> Result<f64, ElectionError> {
    if !pct.is_finite() {
        return Err(ElectionError::InvalidInput(
            "percentage must be a finite number".to_string(),
        ));
    }
    if !(MIN_PERCENTAGE..=MAX_PERCENTAGE).contains(&pct) {
        return Err(ElectionError::InvalidInput(format!(
            "percentage must be between {} and {}",
            MIN_PERCENTAGE, MAX_PERCENTAGE
        )));
    }
    Ok(pct)
}

/// Validate a division given by id or name (case-insensitive).
/// Returns the canonical division.
pub fn validate_division_filter(
    input: &str,
    divisions: &[Division],
) -> Result<Division, ElectionError> {
    if input.trim().is_empty() {
        return Err(ElectionError::InvalidInput(
            "division is empty".to_string(),
        ));
    }
    find_division(divisions, input).cloned().ok_or_else(|| {
        let names: Vec<&str> = divisions.iter().map(|d| d.name.as_str()).collect();
        ElectionError::InvalidInput(format!(
            "unknown division '{}'. Valid divisions: {}",
            input.trim(),
            names.join(", ")
        ))
    })
}

/// Validate a winner filter: `winner` or `non-winner`, case-insensitive.
pub fn validate_winner_filter(input: &str) -> Result<WinnerFilter, ElectionError> {
    match input.trim().to_lowercase().as_str() {
        "winner" | "winners" => Ok(WinnerFilter::Winner),
        "non-winner" | "non-winners" | "nonwinner" => Ok(WinnerFilter::NonWinner),
        _ => Err(ElectionError::InvalidInput(format!(
            "unknown winner filter '{}'. Valid values: winner, non-winner",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divisions::load_divisions;

    #[test]
    fn search_sanitized() {
        assert_eq!(validate_search("  Dhaka\t-1\n").unwrap(), "Dhaka-1");
        assert!(validate_search("   ").is_err());
        assert!(validate_search(&"a".repeat(101)).is_err());
        assert_eq!(validate_search(&"a".repeat(100)).unwrap().len(), 100);
    }

    #[test]
    fn search_length_is_bytes() {
        // 34 Bengali characters, 3 bytes each
        let s = "ঢ".repeat(34);
        assert!(validate_search(&s).is_err());
    }

    #[test]
    fn percentage_bounds() {
        assert_eq!(validate_percentage(10.0).unwrap(), 10.0);
        assert_eq!(validate_percentage(-50.0).unwrap(), -50.0);
        assert_eq!(validate_percentage(50.0).unwrap(), 50.0);
        assert!(validate_percentage(50.5).is_err());
        assert!(validate_percentage(-51.0).is_err());
        assert!(validate_percentage(f64::NAN).is_err());
        assert!(validate_percentage(f64::INFINITY).is_err());
    }

    #[test]
    fn division_by_name_or_id() {
        let divisions = load_divisions().unwrap();
        assert_eq!(validate_division_filter("dhaka", &divisions).unwrap().id, "284613");
        assert_eq!(validate_division_filter("286633", &divisions).unwrap().name, "Sylhet");
        let err = validate_division_filter("Kolkata", &divisions).unwrap_err();
        assert!(err.to_string().contains("Valid divisions: Barisal"));
        assert!(validate_division_filter("  ", &divisions).is_err());
    }

    #[test]
    fn winner_filter_values() {
        assert_eq!(validate_winner_filter("Winner").unwrap(), WinnerFilter::Winner);
        assert_eq!(validate_winner_filter("non-winner").unwrap(), WinnerFilter::NonWinner);
        assert!(validate_winner_filter("loser").is_err());
        assert!(WinnerFilter::Winner.matches(true));
        assert!(WinnerFilter::NonWinner.matches(false));
        assert!(!WinnerFilter::NonWinner.matches(true));
    }
}
