#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use case_catalog::{CaseStudy, CatalogSource, SourceError};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

pub fn study(id: i64, name: &str, industry: &str) -> CaseStudy {
    CaseStudy::new(id, name).with_industry(industry)
}

/// Ten records across three industries, in display order.
pub fn ten_records() -> Vec<CaseStudy> {
    vec![
        study(1, "Acme Co", "Retail"),
        study(2, "Nimbus Cloud", "SaaS"),
        study(3, "Orchard & Vine", "Food"),
        study(4, "Pebble Goods", "Retail"),
        study(5, "Quartz Analytics", "SaaS"),
        study(6, "Acme Co!", "Retail"),
        study(7, "Rivet Works", ""),
        study(8, "Saffron Kitchen", "Food"),
        study(9, "Tidal Labs", "SaaS"),
        study(10, "   ", ""),
    ]
}

/// Replays queued responses in order; once drained it keeps failing.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    responses: Arc<Mutex<VecDeque<std::result::Result<Vec<CaseStudy>, SourceError>>>>,
    calls: Arc<Mutex<usize>>,
}

impl ScriptedSource {
    pub fn with_responses(responses: Vec<std::result::Result<Vec<CaseStudy>, SourceError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Default::default()
        }
    }

    pub async fn calls(&self) -> usize {
        *self.calls.lock().await
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    fn describe(&self) -> String {
        "scripted".into()
    }

    async fn fetch(&self) -> std::result::Result<Vec<CaseStudy>, SourceError> {
        *self.calls.lock().await += 1;
        let mut guard = self.responses.lock().await;
        guard
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Unavailable("script exhausted".into())))
    }
}

/// Holds `fetch` open until the gate is opened.
#[derive(Clone)]
pub struct GatedSource {
    gate: Arc<Notify>,
    records: Vec<CaseStudy>,
}

impl GatedSource {
    pub fn new(records: Vec<CaseStudy>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                gate: gate.clone(),
                records,
            },
            gate,
        )
    }
}

#[async_trait]
impl CatalogSource for GatedSource {
    fn describe(&self) -> String {
        "gated".into()
    }

    async fn fetch(&self) -> std::result::Result<Vec<CaseStudy>, SourceError> {
        self.gate.notified().await;
        Ok(self.records.clone())
    }
}

/// Yield until `cond` holds, so spawned tasks on a current-thread runtime
/// get to run.
pub async fn settle_until(mut cond: impl FnMut() -> bool) -> Result<()> {
    for _ in 0..1000 {
        if cond() {
            return Ok(());
        }
        tokio::task::yield_now().await;
    }
    anyhow::bail!("condition never held")
}
