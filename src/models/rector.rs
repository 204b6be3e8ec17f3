// file: src/models/rector.rs
// description: rector history entry with term year parsing
// reference: dataset_rektor.json layout

use crate::matcher::patterns::TERM_RANGE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectorRecord {
    #[serde(rename = "nama", default)]
    pub name: String,

    /// Free-text period, e.g. "2024–2029".
    #[serde(rename = "periode", default)]
    pub term: String,

    #[serde(rename = "keterangan", default)]
    pub note: String,
}

impl RectorRecord {
    pub fn new(name: impl Into<String>, term: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            term: term.into(),
            note: note.into(),
        }
    }

    /// Start and end year when the term is written as a year range.
    pub fn term_years(&self) -> Option<(i32, i32)> {
        let caps = TERM_RANGE.captures(&self.term)?;
        let start = caps.get(1)?.as_str().parse().ok()?;
        let end = caps.get(2)?.as_str().parse().ok()?;
        Some((start, end))
    }

    /// Whether this rector's term covers `year`.
    pub fn serves_in(&self, year: i32) -> bool {
        match self.term_years() {
            Some((start, end)) => start <= year && year <= end,
            None => self.term.contains(&year.to_string()),
        }
    }

    pub fn noted_as_current(&self) -> bool {
        self.note.to_lowercase().contains("sekarang")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_years_with_en_dash_and_hyphen() {
        let dash = RectorRecord::new("A", "2024–2029", "");
        assert_eq!(dash.term_years(), Some((2024, 2029)));

        let hyphen = RectorRecord::new("B", "2019 - 2024", "");
        assert_eq!(hyphen.term_years(), Some((2019, 2024)));

        let free = RectorRecord::new("C", "periode pertama", "");
        assert_eq!(free.term_years(), None);
    }

    #[test]
    fn test_serves_in() {
        let rector = RectorRecord::new("A", "2024–2029", "");
        assert!(rector.serves_in(2024));
        assert!(rector.serves_in(2027));
        assert!(!rector.serves_in(2030));

        let single = RectorRecord::new("B", "sejak 1998", "");
        assert!(single.serves_in(1998));
        assert!(!single.serves_in(1999));
    }

    #[test]
    fn test_deserialize_list() {
        let json = r#"[{"nama": "Prof. Suharnomo", "periode": "2024–2029", "keterangan": "Rektor saat ini."}]"#;
        let rectors: Vec<RectorRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(rectors[0].name, "Prof. Suharnomo");
        assert_eq!(rectors[0].note, "Rektor saat ini.");
    }
}
