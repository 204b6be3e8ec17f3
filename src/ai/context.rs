// file: src/ai/context.rs
// description: dataset context block prepended to fallback questions
// reference: keyword-summed partial matches over the lecturer directory

use crate::matcher::{keywords, partial_ratio};
use crate::models::LecturerRecord;

#[derive(Debug, Clone)]
pub struct ContextBuilder {
    min_score: u8,
    limit: usize,
}

impl ContextBuilder {
    pub fn new(min_score: u8, limit: usize) -> Self {
        Self { min_score, limit }
    }

    /// Lecturers related to the question, best first. Each keyword whose
    /// partial score reaches `min_score` adds that score to the lecturer.
    pub fn related_lecturers<'a>(
        &self,
        question: &str,
        lecturers: &'a [LecturerRecord],
    ) -> Vec<(&'a LecturerRecord, u32)> {
        let terms = keywords(question);
        if terms.is_empty() || self.limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(&LecturerRecord, u32)> = lecturers
            .iter()
            .filter_map(|lecturer| {
                let name = lecturer.name.to_lowercase();
                let total: u32 = terms
                    .iter()
                    .map(|term| partial_ratio(term, &name))
                    .filter(|&score| score >= self.min_score)
                    .map(u32::from)
                    .sum();
                (total > 0).then_some((lecturer, total))
            })
            .collect();

        // stable: equal totals keep dataset order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(self.limit);
        scored
    }

    /// The question, prefixed with a context block when anything relates.
    pub fn augment(&self, question: &str, lecturers: &[LecturerRecord]) -> String {
        let related = self.related_lecturers(question, lecturers);
        if related.is_empty() {
            return question.to_string();
        }

        let mut prompt = String::from("Data dosen yang mungkin relevan:\n");
        for (lecturer, _) in related {
            prompt.push_str(&format!("- {} (NIP: {})\n", lecturer.name, lecturer.id_number));
        }
        prompt.push_str("\nPertanyaan: ");
        prompt.push_str(question);
        prompt
    }
}
