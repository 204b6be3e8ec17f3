// file: src/ai/fallback.rs
// description: fail-closed wrapper turning completion failures into apologies
// reference: remote failures degrade to user-visible text

use crate::ai::client::{ChatCompletionClient, CompletionClient};
use crate::config::AiConfig;
use crate::error::Result;
use crate::utils::OperationTimer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "⚠️ AI service tidak tersedia. Coba lagi nanti.";
pub const APOLOGY_MESSAGE: &str = "⚠️ Maaf bro, ada error pas kita ngehubungin Server🙏";

const SLOW_COMPLETION: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct FallbackResponder {
    client: Option<Arc<dyn CompletionClient>>,
    system_prompt: String,
}

impl FallbackResponder {
    pub fn new(client: Option<Arc<dyn CompletionClient>>, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let client = ChatCompletionClient::from_config(config)?
            .map(|c| Arc::new(c) as Arc<dyn CompletionClient>);

        if client.is_none() {
            warn!("No AI API key configured, fallback answers are disabled");
        }

        Ok(Self::new(client, config.system_prompt.clone()))
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Completion text for `user_message`; never fails.
    pub async fn answer(&self, user_message: &str) -> String {
        let Some(client) = &self.client else {
            return SERVICE_UNAVAILABLE_MESSAGE.to_string();
        };

        let timer = OperationTimer::new("ai_fallback");
        let result = client.complete(&self.system_prompt, user_message).await;
        timer.warn_if_slow(SLOW_COMPLETION, "completion request");

        match result {
            Ok(text) => {
                timer.finish();
                text
            }
            Err(e) => {
                error!("AI fallback failed: {}", e);
                APOLOGY_MESSAGE.to_string()
            }
        }
    }
}
