//! Engine run metrics.
//!
//! A run always records per-stage timings and counts; they are cheap next to
//! the regex work and feed the verbose API and the CLI report.

use crate::{Diagnostic, Extraction, Stage};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time, normalization included.
    pub total: Duration,
    /// Time spent normalizing the statement.
    pub normalize: Duration,
    /// One entry per stage, in cascade order.
    pub stages: Vec<StageMetrics>,
}

/// Timing and counts for a single stage.
#[derive(Debug, Clone)]
pub struct StageMetrics {
    pub stage: Stage,
    pub duration: Duration,
    /// Rules of this stage that passed trigger gating.
    pub rules_active: usize,
    /// Matches found, including discarded ones.
    pub matches: usize,
    /// Distinct years this stage contributed.
    pub produced: usize,
    /// Working text handed to the next stage.
    pub residual: String,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The statement after normalization.
    pub normalized: String,
    /// Every match in the order it was found.
    pub extractions: Vec<Extraction>,
    /// Matches that contributed no years.
    pub diagnostics: Vec<Diagnostic>,
    /// Names of rules that passed trigger gating, in cascade order.
    pub active_rules: Vec<&'static str>,
    pub metrics: RunMetrics,
}
