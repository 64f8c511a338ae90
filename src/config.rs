//! Configuration loading, layering and validation
//!
//! Precedence, lowest first: built-in defaults, JSON config file, environment
//! (after `.env` is loaded by [`crate::init`]), then whatever the caller
//! applies on top (CLI flags). [`CheckConfig::validate`] runs last.

use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::config_error;
use crate::error::{DomainFinderError, Result};
use crate::types::{CheckConfig, ResolverBackend};

pub const MAX_WORKERS_RANGE: RangeInclusive<usize> = 1..=20;
pub const TIMEOUT_SECS_RANGE: RangeInclusive<u64> = 1..=10;
pub const RETRY_ATTEMPTS_RANGE: RangeInclusive<usize> = 1..=5;
pub const RETRY_BACKOFF_MS_RANGE: RangeInclusive<u64> = 0..=10_000;

pub const ENV_MAX_WORKERS: &str = "DOMAIN_FINDER_MAX_WORKERS";
pub const ENV_TIMEOUT: &str = "DOMAIN_FINDER_TIMEOUT";
pub const ENV_RETRY_ATTEMPTS: &str = "DOMAIN_FINDER_RETRY_ATTEMPTS";
pub const ENV_RETRY_BACKOFF_MS: &str = "DOMAIN_FINDER_RETRY_BACKOFF_MS";
pub const ENV_RESOLVER: &str = "DOMAIN_FINDER_RESOLVER";

impl CheckConfig {
    /// Reject values outside the documented ranges
    pub fn validate(&self) -> Result<()> {
        if !MAX_WORKERS_RANGE.contains(&self.max_workers) {
            return Err(config_error!(
                "max_workers must be between {} and {}, got {}",
                MAX_WORKERS_RANGE.start(),
                MAX_WORKERS_RANGE.end(),
                self.max_workers
            ));
        }

        // Sub-second timeouts are below the documented granularity
        if self.timeout.subsec_nanos() != 0 || !TIMEOUT_SECS_RANGE.contains(&self.timeout.as_secs()) {
            return Err(config_error!(
                "timeout must be a whole number of seconds between {} and {}, got {:?}",
                TIMEOUT_SECS_RANGE.start(),
                TIMEOUT_SECS_RANGE.end(),
                self.timeout
            ));
        }

        if !RETRY_ATTEMPTS_RANGE.contains(&self.retry_attempts) {
            return Err(config_error!(
                "retry_attempts must be between {} and {}, got {}",
                RETRY_ATTEMPTS_RANGE.start(),
                RETRY_ATTEMPTS_RANGE.end(),
                self.retry_attempts
            ));
        }

        let backoff_ms = self.retry_backoff.as_millis() as u64;
        if !RETRY_BACKOFF_MS_RANGE.contains(&backoff_ms) {
            return Err(config_error!(
                "retry_backoff_ms must be at most {}, got {}",
                RETRY_BACKOFF_MS_RANGE.end(),
                backoff_ms
            ));
        }

        Ok(())
    }

    /// Load a JSON config file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainFinderError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DomainFinderError::parse(
                format!("{}: {}", path.display(), e),
                Some(content),
            )
        })
    }

    /// Apply `DOMAIN_FINDER_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = parse_override::<usize, _>(&lookup, ENV_MAX_WORKERS)? {
            self.max_workers = workers;
        }
        if let Some(secs) = parse_override::<u64, _>(&lookup, ENV_TIMEOUT)? {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_override::<usize, _>(&lookup, ENV_RETRY_ATTEMPTS)? {
            self.retry_attempts = attempts;
        }
        if let Some(ms) = parse_override::<u64, _>(&lookup, ENV_RETRY_BACKOFF_MS)? {
            self.retry_backoff = Duration::from_millis(ms);
        }
        if let Some(resolver) = lookup(ENV_RESOLVER) {
            self.resolver = resolver.parse::<ResolverBackend>()?;
        }
        Ok(self)
    }

    /// Defaults, then the optional file, then the environment
    pub fn resolve(file: Option<&Path>) -> Result<Self> {
        let base = match file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading check configuration");
                Self::load(path)?
            }
            None => Self::default(),
        };
        base.apply_env()
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_attempts(mut self, retry_attempts: usize) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverBackend) -> Self {
        self.resolver = resolver;
        self
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| config_error!("{}={:?}: {}", key, raw, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        let config = CheckConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_workers, 5);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retry_attempts, 1);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(CheckConfig::default().with_max_workers(0).validate().is_err());
        assert!(CheckConfig::default().with_max_workers(21).validate().is_err());
        assert!(CheckConfig::default().with_max_workers(20).validate().is_ok());

        assert!(CheckConfig::default().with_timeout(Duration::from_secs(0)).validate().is_err());
        assert!(CheckConfig::default().with_timeout(Duration::from_secs(11)).validate().is_err());
        assert!(CheckConfig::default().with_timeout(Duration::from_millis(1500)).validate().is_err());
        assert!(CheckConfig::default().with_timeout(Duration::from_secs(10)).validate().is_ok());

        assert!(CheckConfig::default().with_retry_attempts(0).validate().is_err());
        assert!(CheckConfig::default().with_retry_attempts(6).validate().is_err());
        assert!(CheckConfig::default().with_retry_attempts(5).validate().is_ok());

        assert!(CheckConfig::default()
            .with_retry_backoff(Duration::from_secs(11))
            .validate()
            .is_err());
    }

    #[test]
    fn test_overrides() {
        let config = CheckConfig::default()
            .apply_overrides(lookup_from(&[
                (ENV_MAX_WORKERS, "12"),
                (ENV_TIMEOUT, " 7 "),
                (ENV_RETRY_ATTEMPTS, "3"),
                (ENV_RETRY_BACKOFF_MS, "50"),
                (ENV_RESOLVER, "system"),
            ]))
            .unwrap();

        assert_eq!(config.max_workers, 12);
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_backoff, Duration::from_millis(50));
        assert_eq!(config.resolver, ResolverBackend::System);
    }

    #[test]
    fn test_override_rejects_garbage() {
        let err = CheckConfig::default()
            .apply_overrides(lookup_from(&[(ENV_MAX_WORKERS, "many")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_WORKERS));

        assert!(CheckConfig::default()
            .apply_overrides(lookup_from(&[(ENV_RESOLVER, "bind9")]))
            .is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_workers": 10, "retry_attempts": 2, "retry_backoff_ms": 100}}"#).unwrap();

        let config = CheckConfig::load(file.path()).unwrap();
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.retry_attempts, 2);
        assert_eq!(config.retry_backoff, Duration::from_millis(100));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_load_file_errors() {
        let missing = CheckConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(missing, DomainFinderError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "max_workers = 3").unwrap();
        let bad = CheckConfig::load(file.path()).unwrap_err();
        assert!(matches!(bad, DomainFinderError::Parse { .. }));
    }
}
