//! Core types and structures for domain-finder

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::DomainFinderError;

/// Classified outcome of probing a single candidate name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Resolution succeeded; the name is registered
    Registered { ip: IpAddr },
    /// The resolver answered NXDOMAIN
    Available,
    /// Timeout, transient failure, malformed input or anything unclassified
    Indeterminate,
}

impl CheckOutcome {
    pub fn status(&self) -> CheckStatus {
        match self {
            CheckOutcome::Registered { .. } => CheckStatus::Taken,
            CheckOutcome::Available => CheckStatus::Available,
            CheckOutcome::Indeterminate => CheckStatus::Unknown,
        }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            CheckOutcome::Registered { ip } => Some(*ip),
            _ => None,
        }
    }
}

/// Wire-level status category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Available,
    Taken,
    Unknown,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Available => write!(f, "AVAILABLE"),
            CheckStatus::Taken => write!(f, "TAKEN"),
            CheckStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Result of checking one candidate name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CheckRecord", try_from = "CheckRecord")]
pub struct CheckResult {
    pub domain: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn new(domain: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            domain: domain.into(),
            outcome,
        }
    }

    pub fn indeterminate(domain: impl Into<String>) -> Self {
        Self::new(domain, CheckOutcome::Indeterminate)
    }

    pub fn status(&self) -> CheckStatus {
        self.outcome.status()
    }

    pub fn ip(&self) -> Option<IpAddr> {
        self.outcome.ip()
    }
}

/// Flat `{domain, status, ip}` record used on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub domain: String,
    pub status: CheckStatus,
    pub ip: Option<String>,
}

impl From<CheckResult> for CheckRecord {
    fn from(result: CheckResult) -> Self {
        Self {
            status: result.status(),
            ip: result.ip().map(|ip| ip.to_string()),
            domain: result.domain,
        }
    }
}

impl TryFrom<CheckRecord> for CheckResult {
    type Error = DomainFinderError;

    fn try_from(record: CheckRecord) -> Result<Self, Self::Error> {
        let outcome = match (record.status, record.ip) {
            (CheckStatus::Taken, Some(ip)) => {
                let ip = ip.parse::<IpAddr>().map_err(|e| {
                    DomainFinderError::parse(format!("invalid ip for {}: {}", record.domain, e), Some(ip))
                })?;
                CheckOutcome::Registered { ip }
            }
            (CheckStatus::Taken, None) => {
                return Err(DomainFinderError::parse(
                    format!("TAKEN record for {} has no ip", record.domain),
                    None,
                ))
            }
            (status, Some(ip)) => {
                return Err(DomainFinderError::parse(
                    format!("{} record for {} must not carry an ip", status, record.domain),
                    Some(ip),
                ))
            }
            (CheckStatus::Available, None) => CheckOutcome::Available,
            (CheckStatus::Unknown, None) => CheckOutcome::Indeterminate,
        };

        Ok(Self {
            domain: record.domain,
            outcome,
        })
    }
}

/// Per-category counts over a list of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub available: usize,
    pub taken: usize,
    pub unknown: usize,
}

impl BatchSummary {
    /// Single pass aggregation; never touches the input
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            match result.status() {
                CheckStatus::Available => summary.available += 1,
                CheckStatus::Taken => summary.taken += 1,
                CheckStatus::Unknown => summary.unknown += 1,
            }
            summary
        })
    }
}

/// Full report of a batch run, grouped by status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<CheckResult>,
    pub available: Vec<String>,
    pub taken: Vec<String>,
    pub unknown: Vec<String>,
    pub summary: BatchSummary,
    pub duration_seconds: f64,
    pub checked_at: DateTime<Utc>,
}

impl BatchReport {
    pub fn new(results: Vec<CheckResult>, duration: Duration, checked_at: DateTime<Utc>) -> Self {
        let mut available = Vec::new();
        let mut taken = Vec::new();
        let mut unknown = Vec::new();

        for result in &results {
            let bucket = match result.status() {
                CheckStatus::Available => &mut available,
                CheckStatus::Taken => &mut taken,
                CheckStatus::Unknown => &mut unknown,
            };
            bucket.push(result.domain.clone());
        }

        Self {
            summary: BatchSummary::from_results(&results),
            results,
            available,
            taken,
            unknown,
            duration_seconds: duration.as_secs_f64(),
            checked_at,
        }
    }
}

/// Which resolution facility backs the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverBackend {
    /// hickory-resolver, with structured NXDOMAIN detection
    #[default]
    Hickory,
    /// The operating system resolver (getaddrinfo)
    System,
}

impl std::fmt::Display for ResolverBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverBackend::Hickory => write!(f, "hickory"),
            ResolverBackend::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for ResolverBackend {
    type Err = DomainFinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hickory" => Ok(ResolverBackend::Hickory),
            "system" => Ok(ResolverBackend::System),
            other => Err(DomainFinderError::config(format!(
                "unknown resolver '{}' (expected 'hickory' or 'system')",
                other
            ))),
        }
    }
}

/// Configuration for name generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of base names
    pub count: usize,
    /// Characters per base name, excluding the TLD
    pub length: usize,
    /// Template over `C`, `V` and literal characters
    pub pattern: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Every base name is emitted once per TLD
    pub tlds: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 50,
            length: 4,
            pattern: None,
            prefix: None,
            suffix: None,
            tlds: vec!["com".to_string()],
        }
    }
}

impl GenerationConfig {
    pub fn new(count: usize, length: usize) -> Self {
        Self {
            count,
            length,
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_tlds<I, S>(mut self, tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tlds = tlds.into_iter().map(Into::into).collect();
        self
    }
}

/// Configuration for availability checking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Maximum lookups in flight at once (1-20)
    pub max_workers: usize,
    /// Hard upper bound for a single lookup attempt (1-10s)
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Total attempts per candidate, first one included (1-5)
    pub retry_attempts: usize,
    /// Base delay between attempts; grows linearly with the attempt number
    #[serde(rename = "retry_backoff_ms", with = "duration_millis")]
    pub retry_backoff: Duration,
    pub resolver: ResolverBackend,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_workers: 5,
            timeout: Duration::from_secs(3),
            retry_attempts: 1,
            retry_backoff: Duration::from_millis(250),
            resolver: ResolverBackend::Hickory,
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Lock-free counters shared by every check of a checker
#[derive(Debug, Default)]
pub struct PerformanceMetrics {
    domains_checked: AtomicU64,
    errors_encountered: AtomicU64,
    retries: AtomicU64,
    total_check_time_ms: AtomicU64,
    slowest: Mutex<Option<(String, Duration)>>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_domains_checked(&self) {
        self.domains_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.errors_encountered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_retries(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_check(&self, domain: &str, duration: Duration) {
        self.total_check_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);

        let mut slowest = self.slowest.lock();
        if slowest.as_ref().map_or(true, |(_, d)| duration > *d) {
            *slowest = Some((domain.to_string(), duration));
        }
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            domains_checked: self.domains_checked.load(Ordering::Relaxed),
            errors_encountered: self.errors_encountered.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            total_check_time_ms: self.total_check_time_ms.load(Ordering::Relaxed),
            slowest: self.slowest.lock().clone(),
        }
    }
}

/// Point-in-time copy of [`PerformanceMetrics`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub domains_checked: u64,
    pub errors_encountered: u64,
    pub retries: u64,
    pub total_check_time_ms: u64,
    pub slowest: Option<(String, Duration)>,
}

impl MetricsSnapshot {
    pub fn avg_check_time_ms(&self) -> f64 {
        if self.domains_checked == 0 {
            0.0
        } else {
            self.total_check_time_ms as f64 / self.domains_checked as f64
        }
    }
}
