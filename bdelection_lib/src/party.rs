//! Party-name normalization.
//!
//! Maps free-text party strings scraped from candidate cards to canonical
//! keys via substring matching against a keyword table. The default table is
//! compiled in from `seed_data/parties.yml`, following the same
//! `include_str!` pattern as `divisions.rs`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Error types for party table operations.
#[derive(Error, Debug)]
pub enum PartyTableError {
    #[error("Failed to parse party table YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Duplicate party key in party table: {0}")]
    DuplicateKey(PartyKey),
    #[error("Party {0} has no needles")]
    NoNeedles(PartyKey),
}

/// Canonical party keys the report cares about.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartyKey {
    Bnp,
    Jamaat,
    Ncp,
}

impl PartyKey {
    /// JAMAAT and NCP are counted together as one alliance.
    pub fn is_alliance(self) -> bool {
        matches!(self, Self::Jamaat | Self::Ncp)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bnp => "BNP",
            Self::Jamaat => "JAMAAT",
            Self::Ncp => "NCP",
        }
    }

    /// Which side of the BNP versus alliance contest this party counts for.
    pub fn side(self) -> Side {
        if self.is_alliance() {
            Side::Alliance
        } else {
            Side::Bnp
        }
    }
}

impl fmt::Display for PartyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two competitors of the report. Serialized as the `Party` labels of
/// the detail document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    #[serde(rename = "BNP (overall)")]
    Bnp,
    #[serde(rename = "NCP/Jamaat Alliance (overall)")]
    Alliance,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bnp => "BNP (overall)",
            Self::Alliance => "NCP/Jamaat Alliance (overall)",
        }
    }

    /// Short name used in tables and the report's winner column.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Bnp => "BNP",
            Self::Alliance => "NCP/Jamaat Alliance",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Result of classifying a raw party string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyMatch {
    /// The key name when matched, otherwise the cleaned raw string.
    pub canonical: String,
    pub key: Option<PartyKey>,
}

/// One row of the keyword table.
#[derive(Deserialize, Debug, Clone)]
pub struct PartyRule {
    pub key: PartyKey,
    pub needles: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct PartyTableFile {
    parties: Vec<PartyRule>,
}

/// Ordered keyword table. The first rule with a matching needle wins.
#[derive(Debug, Clone)]
pub struct PartyTable {
    rules: Vec<PartyRule>,
}

impl PartyTable {
    /// Parse a party table from YAML content.
    ///
    /// Needles are normalized on load so matching stays a plain substring test.
    pub fn from_yaml(yaml_content: &str) -> Result<Self, PartyTableError> {
        let file: PartyTableFile = serde_yml::from_str(yaml_content)?;
        let mut rules: Vec<PartyRule> = Vec::with_capacity(file.parties.len());
        for mut rule in file.parties {
            if rules.iter().any(|r| r.key == rule.key) {
                return Err(PartyTableError::DuplicateKey(rule.key));
            }
            rule.needles = rule
                .needles
                .iter()
                .map(|n| normalize(n))
                .filter(|n| !n.is_empty())
                .collect();
            if rule.needles.is_empty() {
                return Err(PartyTableError::NoNeedles(rule.key));
            }
            rules.push(rule);
        }
        Ok(Self { rules })
    }

    /// Load the party table embedded at compile time.
    pub fn load() -> Result<Self, PartyTableError> {
        Self::from_yaml(include_str!("../../seed_data/parties.yml"))
    }

    pub fn rules(&self) -> &[PartyRule] {
        &self.rules
    }

    pub fn classify(&self, raw: &str) -> PartyMatch {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return PartyMatch {
                canonical: clean(raw),
                key: None,
            };
        }
        for rule in &self.rules {
            if rule.needles.iter().any(|n| normalized.contains(n.as_str())) {
                return PartyMatch {
                    canonical: rule.key.to_string(),
                    key: Some(rule.key),
                };
            }
        }
        PartyMatch {
            canonical: clean(raw),
            key: None,
        }
    }

    pub fn key_of(&self, raw: &str) -> Option<PartyKey> {
        self.classify(raw).key
    }
}

/// Collapse whitespace runs to a single space and trim.
pub fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `clean`, lowercase, then NFKD; the form needles are matched against.
///
/// Compatibility decomposition folds full-width and other presentation forms
/// (`ＢＮＰ`) onto their plain letters.
pub fn normalize(s: &str) -> String {
    clean(s).to_lowercase().nfkd().collect()
}
