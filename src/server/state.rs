// file: src/server/state.rs
// description: shared application state for the HTTP handlers

use crate::ai::FallbackResponder;
use crate::composer::ResponseComposer;
use crate::config::Config;
use crate::dataset::{DatasetStatus, DatasetStore, LoadState};
use crate::error::Result;
use crate::pipeline::{QuestionCounter, ResolutionRouter};
use crate::server::auth::AdminCredentials;
use crate::server::session::SessionStore;
use crate::utils::{HealthCheck, HealthReport};
use std::sync::Arc;

pub struct AppState {
    pub resolver: ResolutionRouter,
    pub sessions: SessionStore,
    pub questions: QuestionCounter,
    pub admin: AdminCredentials,
}

impl AppState {
    pub fn new(resolver: ResolutionRouter, sessions: SessionStore, admin: AdminCredentials) -> Self {
        Self {
            resolver,
            sessions,
            questions: QuestionCounter::new(),
            admin,
        }
    }

    /// Load both datasets and wire the resolver from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let datasets = Arc::new(DatasetStore::new(&config.datasets));
        datasets.load_all().await;

        let resolver = ResolutionRouter::new(
            datasets,
            ResponseComposer::default(),
            FallbackResponder::from_config(&config.ai)?,
            config.router.clone(),
        );

        Ok(Self::new(
            resolver,
            SessionStore::with_lifetime_minutes(config.server.session_lifetime_minutes)
                .with_max_sessions(config.server.max_sessions),
            AdminCredentials::from_config(&config.admin),
        ))
    }

    pub fn datasets(&self) -> &DatasetStore {
        self.resolver.datasets()
    }

    pub async fn health(&self) -> HealthReport {
        let lecturers = self.datasets().lecturers.status().await;
        let rectors = self.datasets().rectors.status().await;

        let ai = if self.resolver.fallback().is_available() {
            HealthCheck::healthy("ai_fallback")
        } else {
            HealthCheck::degraded("ai_fallback", "No API key configured".to_string())
        };

        HealthReport::new(
            vec![
                dataset_check("dataset_dosen", &lecturers),
                dataset_check("dataset_rektor", &rectors),
                ai,
            ],
            env!("CARGO_PKG_VERSION").to_string(),
        )
    }
}

fn dataset_check(component: &str, status: &DatasetStatus) -> HealthCheck {
    match status.status {
        LoadState::Loaded => HealthCheck::healthy(component),
        LoadState::NotLoaded => HealthCheck::unhealthy(component, status.message.clone()),
    }
}
