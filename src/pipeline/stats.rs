// file: src/pipeline/stats.rs
// description: per-day question counter shown on the admin panel
// reference: https://docs.rs/chrono

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Default)]
pub struct QuestionCounter {
    days: Mutex<BTreeMap<NaiveDate, u64>>,
}

impl QuestionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self) -> u64 {
        self.record_on(Local::now().date_naive()).await
    }

    pub async fn record_on(&self, date: NaiveDate) -> u64 {
        let mut days = self.days.lock().await;
        let count = days.entry(date).or_insert(0);
        *count += 1;
        *count
    }

    pub async fn today(&self) -> u64 {
        self.count_on(Local::now().date_naive()).await
    }

    pub async fn count_on(&self, date: NaiveDate) -> u64 {
        self.days.lock().await.get(&date).copied().unwrap_or(0)
    }

    /// Most recent days first, at most `limit` entries.
    pub async fn history(&self, limit: usize) -> Vec<DailyCount> {
        self.days
            .lock()
            .await
            .iter()
            .rev()
            .take(limit)
            .map(|(date, count)| DailyCount {
                date: *date,
                count: *count,
            })
            .collect()
    }
}
