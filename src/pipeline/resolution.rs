// file: src/pipeline/resolution.rs
// description: rector lookup, then lecturer lookup, then AI fallback
// reference: dataset-first answering with a fail-closed completion fallback

use crate::ai::{ContextBuilder, FallbackResponder};
use crate::composer::ResponseComposer;
use crate::config::RouterConfig;
use crate::dataset::DatasetStore;
use crate::matcher::{LecturerResolver, RectorResolver, normalize_query};
use crate::models::Resolution;
use crate::pipeline::access::HumanVerified;
use crate::utils::Validator;
use chrono::{Datelike, Local};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const LECTURER_UNAVAILABLE_MESSAGE: &str =
    "⚠️ Data dosen tidak tersedia saat ini. Silakan hubungi admin.";
pub const RECTOR_UNAVAILABLE_MESSAGE: &str =
    "⚠️ Data rektor tidak tersedia saat ini. Silakan hubungi admin.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    RectorDataset,
    LecturerDataset,
    DatasetUnavailable,
    AiFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub reply: String,
    pub source: AnswerSource,
}

impl Answer {
    fn new(reply: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            reply: reply.into(),
            source,
        }
    }
}

pub struct ResolutionRouter {
    datasets: Arc<DatasetStore>,
    composer: ResponseComposer,
    fallback: FallbackResponder,
    lecturers: LecturerResolver,
    rectors: RectorResolver,
    context: ContextBuilder,
    config: RouterConfig,
    reference_year: Option<i32>,
}

impl ResolutionRouter {
    pub fn new(
        datasets: Arc<DatasetStore>,
        composer: ResponseComposer,
        fallback: FallbackResponder,
        config: RouterConfig,
    ) -> Self {
        Self {
            datasets,
            composer,
            fallback,
            lecturers: LecturerResolver::from_config(&config),
            rectors: RectorResolver::from_config(&config),
            context: ContextBuilder::new(config.context_min_score, config.context_limit),
            config,
            reference_year: None,
        }
    }

    /// Pin the year used to decide who the current rector is.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn datasets(&self) -> &Arc<DatasetStore> {
        &self.datasets
    }

    pub fn fallback(&self) -> &FallbackResponder {
        &self.fallback
    }

    pub async fn respond(&self, _access: HumanVerified, message: &str) -> Answer {
        let message = self.cap_question(message);
        let query = normalize_query(message);
        debug!("Resolving question: {}", Validator::truncate_text(&query, 80));

        if Self::mentions_any(&query, &self.config.rector_keywords) {
            let rectors = self.datasets.rectors.snapshot().await;
            let records = rectors.as_ref().map(|s| s.records.as_slice()).unwrap_or(&[]);

            match self.rectors.resolve(&query, records, self.year()) {
                Resolution::Found(m) => {
                    info!("Answered from rector dataset (score {})", m.score);
                    return Answer::new(
                        self.composer.compose_rector(&m.record),
                        AnswerSource::RectorDataset,
                    );
                }
                Resolution::DatasetUnavailable => {
                    warn!("Rector dataset unavailable");
                    return Answer::new(RECTOR_UNAVAILABLE_MESSAGE, AnswerSource::DatasetUnavailable);
                }
                Resolution::NoMatch => debug!("No rector match, falling back to AI"),
            }
        } else if Self::mentions_any(&query, &self.config.lecturer_keywords) {
            let lecturers = self.datasets.lecturers.snapshot().await;
            let records = lecturers.as_ref().map(|s| s.records.as_slice()).unwrap_or(&[]);

            match self.lecturers.resolve(&query, records) {
                Resolution::Found(m) => {
                    info!("Answered from lecturer dataset (score {})", m.score);
                    return Answer::new(
                        self.composer.compose_lecturer(&m.record),
                        AnswerSource::LecturerDataset,
                    );
                }
                Resolution::DatasetUnavailable => {
                    warn!("Lecturer dataset unavailable");
                    return Answer::new(
                        LECTURER_UNAVAILABLE_MESSAGE,
                        AnswerSource::DatasetUnavailable,
                    );
                }
                Resolution::NoMatch => debug!("No lecturer match, falling back to AI"),
            }
        }

        Answer::new(self.ask_fallback(message).await, AnswerSource::AiFallback)
    }

    async fn ask_fallback(&self, message: &str) -> String {
        if !self.config.augment_fallback {
            return self.fallback.answer(message).await;
        }

        let lecturers = self.datasets.lecturers.snapshot().await;
        let records = lecturers.as_ref().map(|s| s.records.as_slice()).unwrap_or(&[]);
        let prompt = self.context.augment(message, records);
        self.fallback.answer(&prompt).await
    }

    /// Only the first `max_question_chars` characters take part in
    /// resolution.
    fn cap_question<'a>(&self, message: &'a str) -> &'a str {
        match message.char_indices().nth(self.config.max_question_chars) {
            Some((end, _)) => {
                warn!(
                    "Question truncated to {} characters",
                    self.config.max_question_chars
                );
                &message[..end]
            }
            None => message,
        }
    }

    fn year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Local::now().year())
    }

    fn mentions_any(query: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| query.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CompletionClient;
    use crate::composer::RandomPhrasing;
    use crate::error::{ChatbotError, Result};
    use crate::models::{LecturerRecord, RectorRecord};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const SENTINEL: &str = "<<ai-sentinel>>";

    #[derive(Default)]
    struct StubClient {
        fail: bool,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(&self, _system_prompt: &str, user_message: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(user_message.to_string());
            if self.fail {
                Err(ChatbotError::RemoteService("connection refused".to_string()))
            } else {
                Ok(SENTINEL.to_string())
            }
        }
    }

    fn seeded_store() -> DatasetStore {
        DatasetStore::from_records(
            vec![
                LecturerRecord::new("Dr. Budi Santoso", "198501012010121001"),
                LecturerRecord::new("Prof. Sri Wahyuni", "197203151998032002"),
            ],
            vec![
                RectorRecord::new("Prof. Yos Johan Utama", "2015–2024", "Menjabat dua periode."),
                RectorRecord::new("Prof. Suharnomo", "2024–2029", "Rektor UNDIP saat ini."),
            ],
        )
    }

    fn router_with(
        store: DatasetStore,
        client: Arc<StubClient>,
        config: RouterConfig,
    ) -> ResolutionRouter {
        ResolutionRouter::new(
            Arc::new(store),
            ResponseComposer::new(Arc::new(RandomPhrasing::seeded(3))),
            FallbackResponder::new(Some(client), "persona"),
            config,
        )
        .with_reference_year(2026)
    }

    fn router(client: Arc<StubClient>) -> ResolutionRouter {
        router_with(seeded_store(), client, RouterConfig::default())
    }

    #[tokio::test]
    async fn test_current_rector_from_dataset() {
        let client = Arc::new(StubClient::default());
        let answer = router(client.clone())
            .respond(HumanVerified::trusted_local(), "siapa rektor UNDIP sekarang?")
            .await;

        assert_eq!(answer.source, AnswerSource::RectorDataset);
        assert!(answer.reply.contains("Prof. Suharnomo"));
        assert!(answer.reply.contains("2024–2029"));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lecturer_by_id_number() {
        let client = Arc::new(StubClient::default());
        let answer = router(client)
            .respond(HumanVerified::trusted_local(), "NIP 198501012010121001")
            .await;

        assert_eq!(answer.source, AnswerSource::LecturerDataset);
        assert!(answer.reply.contains("198501012010121001"));
        assert!(answer.reply.contains("Dr. Budi Santoso"));
    }

    #[tokio::test]
    async fn test_no_keywords_goes_to_ai() {
        let client = Arc::new(StubClient::default());
        let answer = router(client.clone())
            .respond(HumanVerified::trusted_local(), "Kapan jadwal wisuda semester ini?")
            .await;

        assert_eq!(answer, Answer::new(SENTINEL, AnswerSource::AiFallback));
        assert_eq!(
            *client.prompts.lock().unwrap(),
            vec!["Kapan jadwal wisuda semester ini?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unknown_rector_falls_through_to_ai() {
        let client = Arc::new(StubClient::default());
        let answer = router(client)
            .respond(HumanVerified::trusted_local(), "rektor pertama undip siapa ya")
            .await;
        assert_eq!(answer.source, AnswerSource::AiFallback);
        assert_eq!(answer.reply, SENTINEL);
    }

    #[tokio::test]
    async fn test_unknown_lecturer_falls_through_to_ai() {
        let client = Arc::new(StubClient::default());
        let answer = router(client)
            .respond(HumanVerified::trusted_local(), "dosen pembimbing skripsi gimana?")
            .await;
        assert_eq!(answer.source, AnswerSource::AiFallback);
    }

    #[tokio::test]
    async fn test_rector_keyword_takes_precedence_over_lecturer() {
        let client = Arc::new(StubClient::default());
        let answer = router(client)
            .respond(
                HumanVerified::trusted_local(),
                "dosen yang jadi rektor sekarang siapa?",
            )
            .await;
        assert_eq!(answer.source, AnswerSource::RectorDataset);
    }

    #[tokio::test]
    async fn test_missing_datasets_return_warnings() {
        let client = Arc::new(StubClient::default());
        let empty = DatasetStore::from_records(vec![], vec![]);
        let router = router_with(empty, client.clone(), RouterConfig::default());

        let rector = router
            .respond(HumanVerified::trusted_local(), "rektor sekarang")
            .await;
        assert_eq!(rector.reply, RECTOR_UNAVAILABLE_MESSAGE);

        let lecturer = router
            .respond(HumanVerified::trusted_local(), "nip dosen budi")
            .await;
        assert_eq!(lecturer.reply, LECTURER_UNAVAILABLE_MESSAGE);
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_failure_is_apology() {
        let client = Arc::new(StubClient {
            fail: true,
            ..StubClient::default()
        });
        let answer = router(client)
            .respond(HumanVerified::trusted_local(), "halo bot")
            .await;
        assert_eq!(answer.reply, crate::ai::APOLOGY_MESSAGE);
        assert_eq!(answer.source, AnswerSource::AiFallback);
    }

    #[tokio::test]
    async fn test_augmented_fallback_prepends_context() {
        let client = Arc::new(StubClient::default());
        let config = RouterConfig {
            augment_fallback: true,
            ..RouterConfig::default()
        };
        let router = router_with(seeded_store(), client.clone(), config);

        router
            .respond(HumanVerified::trusted_local(), "pak budi santoso ngajar apa?")
            .await;

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("Dr. Budi Santoso (NIP: 198501012010121001)"));
        assert!(prompts[0].ends_with("pak budi santoso ngajar apa?"));
    }

    #[tokio::test]
    async fn test_long_question_is_capped_before_resolution() {
        let client = Arc::new(StubClient::default());
        let config = RouterConfig {
            max_question_chars: 20,
            ..RouterConfig::default()
        };
        let router = router_with(seeded_store(), client.clone(), config);

        // the identifier sits past the cap, so it must not be seen
        let question = format!("{}nip 198501012010121001", "x".repeat(40));
        let answer = router
            .respond(HumanVerified::trusted_local(), &question)
            .await;

        assert_eq!(answer.source, AnswerSource::AiFallback);
        assert_eq!(*client.prompts.lock().unwrap(), vec!["x".repeat(20)]);
    }

    #[tokio::test]
    async fn test_cap_respects_multibyte_characters() {
        let client = Arc::new(StubClient::default());
        let config = RouterConfig {
            max_question_chars: 3,
            ..RouterConfig::default()
        };
        let router = router_with(seeded_store(), client.clone(), config);

        router
            .respond(HumanVerified::trusted_local(), "–––––")
            .await;
        assert_eq!(*client.prompts.lock().unwrap(), vec!["–––".to_string()]);
    }
}
