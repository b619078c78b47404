//! District records returned by `/api/districts/division/{id}`.

use serde::{Deserialize, Deserializer, Serialize};

/// District identifier. The site emits these as numbers or strings
/// depending on the endpoint, so both are accepted and kept as text.
pub type DistrictID = String;

/// A district within a division.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct District {
    #[serde(deserialize_with = "string_or_number")]
    pub id: DistrictID,
    pub name: String,
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
