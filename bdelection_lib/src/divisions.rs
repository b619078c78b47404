//! The fixed table of administrative divisions crawled by the scraper.
//!
//! Compiled in from `seed_data/divisions.yml` with `include_str!`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for division table operations.
#[derive(Error, Debug)]
pub enum DivisionError {
    #[error("Failed to parse division YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate division id in division file: {0}")]
    DuplicateId(String),
}

/// A top-level administrative division (e.g. Dhaka, Sylhet).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct DivisionFile {
    divisions: Vec<Division>,
}

/// Parse divisions from YAML content, preserving file order.
pub fn parse_divisions(yaml_content: &str) -> Result<Vec<Division>, DivisionError> {
    let file: DivisionFile = serde_yml::from_str(yaml_content)?;

    let mut out: Vec<Division> = Vec::with_capacity(file.divisions.len());
    for division in file.divisions {
        if out.iter().any(|d| d.id == division.id) {
            return Err(DivisionError::DuplicateId(division.id));
        }
        out.push(division);
    }
    Ok(out)
}

/// Load the division table embedded at compile time.
pub fn load_divisions() -> Result<Vec<Division>, DivisionError> {
    parse_divisions(include_str!("../../seed_data/divisions.yml"))
}

/// Find a division by id or by case-insensitive name.
pub fn find_division<'a>(divisions: &'a [Division], query: &str) -> Option<&'a Division> {
    let query = query.trim();
    divisions
        .iter()
        .find(|d| d.id == query || d.name.eq_ignore_ascii_case(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_has_eight_divisions() {
        let divisions = load_divisions().unwrap();
        assert_eq!(divisions.len(), 8);
        assert_eq!(divisions[0].id, "283793");
        assert_eq!(divisions[0].name, "Barisal");
        assert_eq!(divisions[7].name, "Sylhet");
    }

    #[test]
    fn find_by_id_and_name() {
        let divisions = load_divisions().unwrap();
        assert_eq!(find_division(&divisions, "284613").unwrap().name, "Dhaka");
        assert_eq!(find_division(&divisions, " chattogram ").unwrap().id, "284038");
        assert!(find_division(&divisions, "Chittagong").is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let yaml = r#"
divisions:
  - id: "1"
    name: A
  - id: "1"
    name: B
"#;
        let result = parse_divisions(yaml);
        assert!(matches!(result, Err(DivisionError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn invalid_yaml_rejected() {
        assert!(matches!(
            parse_divisions("divisions: 5"),
            Err(DivisionError::YamlParse(_))
        ));
    }
}
