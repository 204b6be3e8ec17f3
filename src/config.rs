// file: src/config.rs
// description: application configuration management with toml and env support
// reference: https://docs.rs/config

use crate::error::{ChatbotError, Result};
use crate::server::session::DEFAULT_MAX_SESSIONS;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const DEFAULT_SYSTEM_PROMPT: &str = "Lo sekarang jadi chatbot akademik Universitas Diponegoro (UNDIP). \
Jawaban lo wajib pake bahasa santai, gaul, ala anak muda jaman sekarang 🤙, \
tapi tetep sopan, singkat, jelas, dan gak keluar konteks akademik.";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub datasets: DatasetConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session_lifetime_minutes: i64,
    #[serde(default)]
    pub permissive_cors: bool,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub lecturer_path: PathBuf,
    pub rector_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub thinking: bool,
    pub system_prompt: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.bigmodel.cn/api/paas/v4".to_string(),
            api_key: None,
            model: "glm-4.5".to_string(),
            temperature: 0.7,
            max_tokens: 800,
            timeout_secs: 30,
            thinking: true,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Keyword sets and scoring knobs for the resolution router.
///
/// Both observed router variants (plain fallback and context-augmented
/// fallback) are expressible here through `augment_fallback`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    pub rector_keywords: Vec<String>,
    pub lecturer_keywords: Vec<String>,
    pub current_keywords: Vec<String>,
    pub lecturer_threshold: u8,
    pub rector_threshold: u8,
    pub term_match_score: u8,
    pub augment_fallback: bool,
    pub context_limit: usize,
    pub context_min_score: u8,
    /// Longer questions are cut to this many characters before matching.
    pub max_question_chars: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            rector_keywords: to_strings(&["rektor", "pimpinan", "kepala", "pemimpin", "rector"]),
            lecturer_keywords: to_strings(&["dosen", "nip", "lecturer"]),
            current_keywords: to_strings(&["sekarang", "saat ini", "current"]),
            lecturer_threshold: 75,
            rector_threshold: 70,
            term_match_score: 90,
            augment_fallback: false,
            context_limit: 5,
            context_min_score: 80,
            max_question_chars: 500,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    /// `<salt>$<hex digest>` as printed by `hash-password`. Login is disabled
    /// when unset.
    pub password_hash: Option<String>,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Built-in defaults, then the TOML file, then `CAMPUS_QA__*` variables.
    /// An explicit `path` must exist; without one `config/default.toml` is
    /// read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| ChatbotError::Config(e.to_string()))?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CAMPUS_QA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                session_lifetime_minutes: 120,
                permissive_cors: true,
                max_sessions: DEFAULT_MAX_SESSIONS,
            },
            datasets: DatasetConfig {
                lecturer_path: PathBuf::from("data/dataset_dosen.json"),
                rector_path: PathBuf::from("data/dataset_rektor.json"),
            },
            ai: AiConfig::default(),
            router: RouterConfig::default(),
            admin: AdminConfig {
                username: "admin".to_string(),
                password_hash: None,
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_port(self.server.port)?;
        Validator::validate_url(&self.ai.base_url)?;

        if self.server.session_lifetime_minutes <= 0 {
            return Err(ChatbotError::Config(
                "session_lifetime_minutes must be greater than 0".to_string(),
            ));
        }

        if self.ai.timeout_secs == 0 {
            return Err(ChatbotError::Config(
                "ai.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.router.max_question_chars == 0 {
            return Err(ChatbotError::Config(
                "router.max_question_chars must be greater than 0".to_string(),
            ));
        }

        let thresholds = [
            self.router.lecturer_threshold,
            self.router.rector_threshold,
            self.router.term_match_score,
            self.router.context_min_score,
        ];
        if thresholds.iter().any(|&t| t > 100) {
            return Err(ChatbotError::Config(
                "router scores must be within 0..=100".to_string(),
            ));
        }

        if let Some(hash) = &self.admin.password_hash {
            Validator::validate_password_hash(hash)?;
        }

        Ok(())
    }
}
