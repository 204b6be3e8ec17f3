// file: src/matcher/resolver.rs
// description: best-match selection over lecturer and rector datasets
// reference: linear fuzzy scan with identifier short-circuit

use crate::config::RouterConfig;
use crate::matcher::fuzzy::partial_ratio;
use crate::models::{LecturerRecord, MatchResult, RectorRecord, Resolution};
use tracing::debug;

/// Keeps the earliest candidate with the strictly highest score above the
/// threshold.
struct BestMatch<R> {
    threshold: u8,
    best: Option<MatchResult<R>>,
}

impl<R: Clone> BestMatch<R> {
    fn new(threshold: u8) -> Self {
        Self {
            threshold,
            best: None,
        }
    }

    fn offer(&mut self, record: &R, score: u8) {
        if score <= self.threshold {
            return;
        }
        let beats = self.best.as_ref().is_none_or(|b| score > b.score);
        if beats {
            self.best = Some(MatchResult::new(record.clone(), score));
        }
    }

    fn finish(self) -> Resolution<R> {
        match self.best {
            Some(m) => Resolution::Found(m),
            None => Resolution::NoMatch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LecturerResolver {
    threshold: u8,
}

impl LecturerResolver {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.lecturer_threshold)
    }

    /// Resolve a lowercased query against the lecturer directory.
    ///
    /// An identification number found verbatim in the query wins immediately,
    /// in collection order, regardless of fuzzy candidates seen so far.
    pub fn resolve(&self, query: &str, lecturers: &[LecturerRecord]) -> Resolution<LecturerRecord> {
        if lecturers.is_empty() {
            return Resolution::DatasetUnavailable;
        }

        let mut best = BestMatch::new(self.threshold);

        for lecturer in lecturers {
            let score = partial_ratio(query, &lecturer.name.to_lowercase());
            best.offer(lecturer, score);

            if lecturer.id_mentioned_in(query) {
                debug!("Lecturer id {} mentioned in query", lecturer.id_number);
                return Resolution::Found(MatchResult::exact(lecturer.clone()));
            }
        }

        best.finish()
    }
}

impl Default for LecturerResolver {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct RectorResolver {
    threshold: u8,
    term_match_score: u8,
    current_keywords: Vec<String>,
}

impl RectorResolver {
    pub fn new(threshold: u8, term_match_score: u8, current_keywords: Vec<String>) -> Self {
        Self {
            threshold,
            term_match_score,
            current_keywords,
        }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(
            config.rector_threshold,
            config.term_match_score,
            config.current_keywords.clone(),
        )
    }

    /// Resolve a lowercased query against the rector history.
    ///
    /// `reference_year` decides who counts as the current rector when the
    /// query asks for one.
    pub fn resolve(
        &self,
        query: &str,
        rectors: &[RectorRecord],
        reference_year: i32,
    ) -> Resolution<RectorRecord> {
        if rectors.is_empty() {
            return Resolution::DatasetUnavailable;
        }

        if self.asks_for_current(query)
            && let Some(current) = Self::current_rector(rectors, reference_year)
        {
            debug!("Resolved current rector for {}: {}", reference_year, current.name);
            return Resolution::Found(MatchResult::exact(current.clone()));
        }

        let mut best = BestMatch::new(self.threshold);

        for rector in rectors {
            let name_score = partial_ratio(query, &rector.name.to_lowercase());
            let term = rector.term.to_lowercase();
            let term_score = if !term.is_empty() && query.contains(&term) {
                self.term_match_score
            } else {
                0
            };
            best.offer(rector, name_score.max(term_score));
        }

        best.finish()
    }

    fn asks_for_current(&self, query: &str) -> bool {
        self.current_keywords.iter().any(|k| query.contains(k.as_str()))
    }

    /// First rector serving in `year` (or noted as current), else the one
    /// whose term ends last.
    fn current_rector(rectors: &[RectorRecord], year: i32) -> Option<&RectorRecord> {
        rectors
            .iter()
            .find(|r| r.serves_in(year) || r.noted_as_current())
            .or_else(|| {
                rectors
                    .iter()
                    .filter_map(|r| r.term_years().map(|(_, end)| (end, r)))
                    .fold(None, |latest: Option<(i32, &RectorRecord)>, (end, r)| match latest {
                        Some((best_end, _)) if best_end >= end => latest,
                        _ => Some((end, r)),
                    })
                    .map(|(_, r)| r)
            })
    }
}

impl Default for RectorResolver {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lecturers() -> Vec<LecturerRecord> {
        vec![
            LecturerRecord::new("Dr. Budi Santoso", "198501012010121001"),
            LecturerRecord::new("Prof. Sri Wahyuni", "197203151998032002"),
            LecturerRecord::new("Agus Prasetyo", "198811202015041003"),
        ]
    }

    fn rectors() -> Vec<RectorRecord> {
        vec![
            RectorRecord::new("Prof. Sudharto P. Hadi", "2010–2014", "Rektor ke-11."),
            RectorRecord::new("Prof. Yos Johan Utama", "2015–2024", "Menjabat dua periode."),
            RectorRecord::new("Prof. Suharnomo", "2024–2029", "Rektor UNDIP saat ini."),
        ]
    }

    #[test]
    fn test_lecturer_id_wins_over_name() {
        let resolver = LecturerResolver::default();
        let query = "dosen budi santoso, nip 197203151998032002 itu siapa";
        let result = resolver.resolve(query, &lecturers()).into_match().unwrap();

        assert_eq!(result.record.name, "Prof. Sri Wahyuni");
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_lecturer_fuzzy_name() {
        let resolver = LecturerResolver::default();
        let result = resolver
            .resolve("nip dosen agus prasetya berapa?", &lecturers())
            .into_match()
            .unwrap();

        assert_eq!(result.record.id_number, "198811202015041003");
        assert!(result.score > 75);
    }

    #[test]
    fn test_lecturer_no_match_below_threshold() {
        let resolver = LecturerResolver::default();
        let result = resolver.resolve("dosen fisika kuantum", &lecturers());
        assert_eq!(result, Resolution::NoMatch);
    }

    #[test]
    fn test_lecturer_empty_dataset_is_unavailable() {
        let resolver = LecturerResolver::default();
        assert_eq!(
            resolver.resolve("dosen budi", &[]),
            Resolution::DatasetUnavailable
        );
    }

    #[test]
    fn test_lecturer_tie_keeps_first() {
        let resolver = LecturerResolver::default();
        let twins = vec![
            LecturerRecord::new("Budi Santoso", "111"),
            LecturerRecord::new("Budi Santoso", "222"),
        ];
        let result = resolver.resolve("dosen budi santoso", &twins).into_match().unwrap();
        assert_eq!(result.record.id_number, "111");
    }

    #[test]
    fn test_rector_current_by_year() {
        let resolver = RectorResolver::default();
        let result = resolver
            .resolve("siapa rektor undip sekarang?", &rectors(), 2026)
            .into_match()
            .unwrap();

        assert_eq!(result.record.name, "Prof. Suharnomo");
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_rector_current_falls_back_to_latest_term() {
        let resolver = RectorResolver::default();
        let history = vec![
            RectorRecord::new("A", "2000–2005", ""),
            RectorRecord::new("B", "2010–2015", ""),
            RectorRecord::new("C", "2005–2010", ""),
        ];
        let result = resolver
            .resolve("rektor saat ini siapa", &history, 2040)
            .into_match()
            .unwrap();
        assert_eq!(result.record.name, "B");
    }

    #[test]
    fn test_rector_term_substring_scores_term_match() {
        let resolver = RectorResolver::default();
        let result = resolver
            .resolve("rektor periode 2015–2024 siapa?", &rectors(), 2026)
            .into_match()
            .unwrap();

        assert_eq!(result.record.name, "Prof. Yos Johan Utama");
        assert!(result.score >= 90);
    }

    #[test]
    fn test_rector_by_name() {
        let resolver = RectorResolver::default();
        let result = resolver
            .resolve("kapan prof. sudharto p. hadi jadi rektor", &rectors(), 2026)
            .into_match()
            .unwrap();
        assert_eq!(result.record.term, "2010–2014");
    }

    #[test]
    fn test_rector_unknown_is_no_match() {
        let resolver = RectorResolver::default();
        let result = resolver.resolve("rektor pertama kali", &rectors(), 2026);
        assert_eq!(result, Resolution::NoMatch);
    }

    #[test]
    fn test_rector_empty_dataset_is_unavailable() {
        let resolver = RectorResolver::default();
        assert_eq!(
            resolver.resolve("rektor sekarang", &[], 2026),
            Resolution::DatasetUnavailable
        );
    }
}
