//! Seat records returned by `/api/districts/district/{id}/seats`.

use serde::{Deserialize, Serialize};

use super::district::string_or_number;

/// Seat slug as used by the site, e.g. `dhaka_1`.
pub type SeatSlug = String;

/// A parliamentary seat (constituency) within a district.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    #[serde(deserialize_with = "string_or_number")]
    pub id: SeatSlug,
    pub name: String,
}

impl Seat {
    /// Seat number used by the results page tabs (`openTab === N`).
    ///
    /// This is the second `_`-separated segment of the slug, or the whole
    /// slug when that segment is missing or empty.
    pub fn number(&self) -> &str {
        self.id
            .split('_')
            .nth(1)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.id)
    }
}
