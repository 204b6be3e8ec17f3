// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod ai;
pub mod composer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod utils;

pub use ai::{ChatCompletionClient, CompletionClient, ContextBuilder, FallbackResponder};
pub use composer::{FixedPhrasing, PhrasingStrategy, RandomPhrasing, ResponseComposer};
pub use config::{AdminConfig, AiConfig, Config, DatasetConfig, RouterConfig, ServerConfig};
pub use dataset::{Dataset, DatasetStatus, DatasetStore, LoadState};
pub use error::{ChatbotError, Result};
pub use matcher::{LecturerResolver, RectorResolver, partial_ratio};
pub use models::{LecturerRecord, MatchResult, RectorRecord, Resolution};
pub use pipeline::{Answer, AnswerSource, HumanVerified, QuestionCounter, ResolutionRouter};
pub use server::{AdminCredentials, AppState, SessionStore, hash_password};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _resolver = LecturerResolver::from_config(&config.router);
        let _composer = ResponseComposer::new(std::sync::Arc::new(FixedPhrasing(0)));
    }
}
