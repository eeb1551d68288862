//! Extraction pipeline for executing strategies in order.
//!
//! The pipeline takes a platform's strategies and runs them one after the
//! other, in priority order, until one produces a usable candidate. When all
//! of them fail, the most specific failure is reported.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};
use vidsaver_core::{ErrorKind, ExtractionResult};

use crate::context::ExtractContext;
use crate::error::ExtractError;
use crate::normalize::{finalize_candidate, to_extraction_result};
use crate::strategy::{ExtractStrategy, ExtractTarget, ExtractedMedia, StrategyInfo, StrategyKind};

// ============================================================================
// Extract Attempt
// ============================================================================

/// Record of a single strategy attempt.
#[derive(Debug, Clone)]
pub struct ExtractAttempt {
    /// The strategy ID that was attempted.
    pub strategy_id: String,
    /// The kind of strategy.
    pub kind: StrategyKind,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Media URL found, on success.
    pub candidate_url: Option<String>,
    /// Error message if the attempt failed.
    pub error: Option<String>,
    /// Error category if the attempt failed.
    pub error_kind: Option<ErrorKind>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl ExtractAttempt {
    /// Creates a successful attempt record.
    pub fn success(
        strategy_id: impl Into<String>,
        kind: StrategyKind,
        candidate_url: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: true,
            candidate_url: Some(candidate_url.into()),
            error: None,
            error_kind: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        strategy_id: impl Into<String>,
        kind: StrategyKind,
        error: &ExtractError,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: false,
            candidate_url: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
            duration,
        }
    }
}

// ============================================================================
// Extract Outcome
// ============================================================================

/// The outcome of a pipeline execution.
#[derive(Debug)]
pub struct ExtractOutcome {
    /// The first success, or the most specific failure.
    pub result: Result<ExtractedMedia, ExtractError>,
    /// All attempts made.
    pub attempts: Vec<ExtractAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl ExtractOutcome {
    /// Returns true if extraction succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of strategies that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the successful strategy ID, if any.
    pub fn successful_strategy(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|r| r.strategy_id.as_str())
    }

    /// Returns all errors that occurred.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }

    /// The canonical result record.
    pub fn extraction_result(&self) -> ExtractionResult {
        to_extraction_result(&self.result)
    }
}

// ============================================================================
// Failure Tracking
// ============================================================================

/// Keeps the failure to report on exhaustion.
///
/// Higher precedence wins; on a tie the later failure replaces the earlier
/// one, since later strategies read more authoritative sources.
#[derive(Debug, Default)]
struct BestFailure(Option<ExtractError>);

impl BestFailure {
    fn offer(&mut self, error: ExtractError) {
        match &self.0 {
            Some(current) if current.precedence() > error.precedence() => {}
            _ => self.0 = Some(error),
        }
    }

    fn into_error(self) -> ExtractError {
        self.0.unwrap_or(ExtractError::AllStrategiesFailed)
    }
}

// ============================================================================
// Extract Pipeline
// ============================================================================

/// A pipeline of strategies tried in order.
pub struct ExtractPipeline {
    strategies: Vec<Box<dyn ExtractStrategy>>,
}

impl ExtractPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Creates a pipeline with the given strategies.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>) -> Self {
        let mut pipeline = Self { strategies };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Sorts strategies by priority (highest first). Stable, so equal
    /// priorities keep insertion order.
    fn sort_by_priority(&mut self) {
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the number of strategies in the pipeline.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy IDs in execution order.
    pub fn strategy_ids(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    /// Returns information about all strategies.
    pub fn strategy_info(&self, ctx: &ExtractContext) -> Vec<StrategyInfo> {
        self.strategies
            .iter()
            .map(|s| StrategyInfo::from_strategy(s.as_ref(), ctx))
            .collect()
    }

    /// Runs one strategy under its time budget and finalizes its candidate.
    async fn run_one(
        strategy: &dyn ExtractStrategy,
        ctx: &ExtractContext,
        target: &ExtractTarget,
    ) -> Result<ExtractedMedia, ExtractError> {
        let budget = strategy.timeout(ctx);
        let candidate = tokio::time::timeout(budget, strategy.extract(ctx, target))
            .await
            .map_err(|_| ExtractError::timed_out(budget))??;
        let candidate = finalize_candidate(candidate)?;
        Ok(ExtractedMedia::new(candidate, strategy.id(), strategy.kind()))
    }

    /// Execute the pipeline, trying strategies in order until one succeeds.
    #[instrument(skip(self, ctx, target), fields(platform = %target.platform, url = %target.cleaned_url, strategies = self.strategies.len()))]
    pub async fn execute(&self, ctx: &ExtractContext, target: &ExtractTarget) -> ExtractOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        if self.strategies.is_empty() {
            return ExtractOutcome {
                result: Err(ExtractError::StrategyNotAvailable(
                    "No strategies configured".to_string(),
                )),
                attempts,
                duration: start.elapsed(),
            };
        }

        info!(count = self.strategies.len(), "Executing extraction pipeline");
        let mut best = BestFailure::default();

        for strategy in &self.strategies {
            let strategy_id = strategy.id();
            let kind = strategy.kind();

            let attempt_start = Instant::now();
            debug!(strategy = %strategy_id, kind = %kind, "Executing strategy");

            match Self::run_one(strategy.as_ref(), ctx, target).await {
                Ok(media) => {
                    let duration = attempt_start.elapsed();
                    info!(
                        strategy = %strategy_id,
                        duration = ?duration,
                        "Strategy succeeded"
                    );

                    attempts.push(ExtractAttempt::success(
                        strategy_id,
                        kind,
                        media.candidate.url.clone(),
                        duration,
                    ));

                    return ExtractOutcome {
                        result: Ok(media),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(
                        strategy = %strategy_id,
                        error = %error,
                        duration = ?duration,
                        "Strategy failed"
                    );

                    attempts.push(ExtractAttempt::failure(strategy_id, kind, &error, duration));
                    best.offer(error);
                }
            }
        }

        let error = best.into_error();
        warn!(error_kind = %error.kind(), "All strategies failed");
        ExtractOutcome {
            result: Err(error),
            attempts,
            duration: start.elapsed(),
        }
    }
}

impl Default for ExtractPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
