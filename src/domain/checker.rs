//! Concurrent DNS availability checker

use crate::domain::resolver::{classify, resolver_for, NameResolver, ResolveFailure};
use crate::domain::DomainValidator;
use crate::error::Result;
use crate::types::{
    BatchReport, BatchSummary, CheckConfig, CheckOutcome, CheckResult, MetricsSnapshot, PerformanceMetrics,
};
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout, Instant};

/// Domain availability checker with bounded concurrency
///
/// Cloning is cheap; clones share the worker semaphore, the resolver and
/// the metrics.
#[derive(Clone)]
pub struct AvailabilityChecker {
    config: CheckConfig,
    resolver: Arc<dyn NameResolver>,
    semaphore: Arc<Semaphore>,
    validator: DomainValidator,
    metrics: Arc<PerformanceMetrics>,
}

impl AvailabilityChecker {
    /// Create a checker with default configuration and the hickory backend
    pub fn new() -> Self {
        let config = CheckConfig::default();
        let resolver = resolver_for(&config);
        Self::build(config, resolver)
    }

    /// Create a checker with custom configuration
    pub fn with_config(config: CheckConfig) -> Result<Self> {
        config.validate()?;
        let resolver = resolver_for(&config);
        Ok(Self::build(config, resolver))
    }

    /// Create a checker around a caller-supplied resolver
    pub fn with_resolver(config: CheckConfig, resolver: Arc<dyn NameResolver>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, resolver))
    }

    fn build(config: CheckConfig, resolver: Arc<dyn NameResolver>) -> Self {
        tracing::debug!(
            max_workers = config.max_workers,
            timeout_secs = config.timeout.as_secs(),
            retry_attempts = config.retry_attempts,
            resolver = %resolver.backend(),
            "Availability checker configured"
        );

        Self {
            semaphore: Arc::new(Semaphore::new(config.max_workers)),
            config,
            resolver,
            validator: DomainValidator::new(),
            metrics: Arc::new(PerformanceMetrics::new()),
        }
    }

    /// Check a single candidate; never fails
    ///
    /// Malformed names are `UNKNOWN` without touching the network. Only
    /// inconclusive lookups are retried.
    pub async fn check_one(&self, candidate: &str) -> CheckResult {
        let start_time = Instant::now();
        self.metrics.increment_domains_checked();

        let validated = match self.validator.validate(candidate) {
            Ok(validated) => validated,
            Err(e) => {
                self.metrics.increment_errors();
                tracing::debug!(domain = %candidate, error = %e, "Skipping malformed candidate");
                return CheckResult::indeterminate(candidate);
            }
        };

        let mut outcome = CheckOutcome::Indeterminate;
        for attempt in 1..=self.config.retry_attempts {
            if attempt > 1 {
                self.metrics.increment_retries();
                sleep(self.config.retry_backoff * (attempt as u32 - 1)).await;
            }

            outcome = self.lookup(&validated.full_domain).await;
            if outcome != CheckOutcome::Indeterminate {
                break;
            }
        }

        let duration = start_time.elapsed();
        self.metrics.record_check(candidate, duration);
        if outcome == CheckOutcome::Indeterminate {
            self.metrics.increment_errors();
        }

        tracing::debug!(
            domain = %candidate,
            status = %outcome.status(),
            duration_ms = %duration.as_millis(),
            "Domain check completed"
        );

        CheckResult::new(candidate, outcome)
    }

    async fn lookup(&self, name: &str) -> CheckOutcome {
        let result = match timeout(self.config.timeout, self.resolver.resolve(name)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveFailure::Timeout),
        };

        if let Err(e) = &result {
            tracing::debug!(domain = %name, error = %e, "Lookup did not resolve");
        }

        classify(result)
    }

    /// Check every candidate, sorted by domain
    pub async fn check_batch(&self, candidates: &[String]) -> Vec<CheckResult> {
        self.check_batch_with_progress(candidates, |_| {}).await
    }

    /// [`check_batch`](Self::check_batch) with a callback per finished check,
    /// called in completion order
    pub async fn check_batch_with_progress<F>(&self, candidates: &[String], mut on_result: F) -> Vec<CheckResult>
    where
        F: FnMut(&CheckResult),
    {
        let batch_start = Instant::now();

        let mut pending: FuturesUnordered<_> = candidates
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, candidate)| {
                let checker = self.clone();
                let handle = tokio::spawn(async move {
                    let _permit = match checker.semaphore.clone().acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            tracing::warn!(domain = %candidate, error = %e, "Worker pool closed");
                            return CheckResult::indeterminate(candidate);
                        }
                    };
                    checker.check_one(&candidate).await
                });
                async move { (idx, handle.await) }
            })
            .collect();

        let mut slots: Vec<Option<CheckResult>> = vec![None; candidates.len()];
        while let Some((idx, joined)) = pending.next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    self.metrics.increment_errors();
                    tracing::warn!(domain = %candidates[idx], error = %e, "Check task failed");
                    CheckResult::indeterminate(&candidates[idx])
                }
            };
            on_result(&result);
            slots[idx] = Some(result);
        }

        let mut results: Vec<CheckResult> = slots
            .into_iter()
            .zip(candidates)
            .map(|(slot, candidate)| slot.unwrap_or_else(|| CheckResult::indeterminate(candidate)))
            .collect();
        results.sort_by(|a, b| a.domain.cmp(&b.domain));

        let summary = summarize(&results);
        let batch_duration = batch_start.elapsed();
        tracing::info!(
            domains_requested = %candidates.len(),
            available = %summary.available,
            taken = %summary.taken,
            unknown = %summary.unknown,
            batch_duration_ms = %batch_duration.as_millis(),
            "Batch domain check completed"
        );

        results
    }

    /// Batch check plus grouping, summary and timing
    pub async fn check_report(&self, candidates: &[String]) -> BatchReport {
        self.check_report_with_progress(candidates, |_| {}).await
    }

    /// [`check_report`](Self::check_report) with a per-result callback
    pub async fn check_report_with_progress<F>(&self, candidates: &[String], on_result: F) -> BatchReport
    where
        F: FnMut(&CheckResult),
    {
        let start_time = Instant::now();
        let results = self.check_batch_with_progress(candidates, on_result).await;
        BatchReport::new(results, start_time.elapsed(), Utc::now())
    }

    /// Get checker configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_stats()
    }
}

impl Default for AvailabilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Count results per status
pub fn summarize(results: &[CheckResult]) -> BatchSummary {
    BatchSummary::from_results(results)
}
