//! Advice synthesizer
//!
//! Wraps the rule chain with the artificial "thinking" latency and keeps the
//! append-only history of everything asked and answered.

use crate::advice::rules::{compose_advice, AdviceContext, AdviceKind};
use crate::config::AdviceConfig;
use crate::entries::types::ProjectEntry;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;

/// One answered question
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdviceRecord {
    pub query: String,
    pub response: String,
    pub kind: AdviceKind,
    pub timestamp: DateTime<Utc>,
}

/// Answers free-text questions against the current entries.
///
/// `synthesize` takes `&mut self`, so a single instance can never have two
/// syntheses in flight.
pub struct AdviceSynthesizer<R: Rng = StdRng> {
    latency: Duration,
    rng: R,
    history: Vec<AdviceRecord>,
}

impl AdviceSynthesizer<StdRng> {
    /// Build from configuration; a configured seed pins fallback selection
    pub fn from_config(config: &AdviceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, Duration::from_millis(config.latency_ms))
    }
}

impl<R: Rng> AdviceSynthesizer<R> {
    pub fn with_rng(rng: R, latency: Duration) -> Self {
        Self {
            latency,
            rng,
            history: Vec::new(),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Produce a response for `query`, record it, and return it.
    ///
    /// Resolves after the configured latency. Never fails: unmatched or
    /// under-populated queries get generic advice.
    pub async fn synthesize(&mut self, query: &str, entries: &[ProjectEntry]) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let ctx = AdviceContext::new(query, entries);
        let (kind, response) = compose_advice(&ctx, &mut self.rng);

        tracing::info!(
            kind = %kind,
            worlds = ctx.worlds.len(),
            characters = ctx.characters.len(),
            "Synthesized advice"
        );

        self.history.push(AdviceRecord {
            query: query.to_string(),
            response: response.clone(),
            kind,
            timestamp: Utc::now(),
        });

        response
    }

    /// Every answered question, oldest first
    pub fn history(&self) -> &[AdviceRecord] {
        &self.history
    }
}
