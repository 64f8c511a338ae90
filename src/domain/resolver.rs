//! Name resolution backends and outcome classification
//!
//! Each backend reduces its native error type to a [`ResolveFailure`]; the
//! mapping from failure to [`CheckOutcome`] lives in [`classify`] alone.

use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

use crate::error::{DomainFinderError, Result};
use crate::types::{CheckConfig, CheckOutcome, ResolverBackend};

/// Why a lookup produced no address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// Authoritative NXDOMAIN
    #[error("name does not exist")]
    NameNotFound,
    /// The name exists but has no A/AAAA records
    #[error("name has no address records")]
    NoAddresses,
    #[error("lookup timed out")]
    Timeout,
    #[error("lookup failed: {0}")]
    Other(String),
}

/// Async address lookup for a single name
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve `name` to one address
    async fn resolve(&self, name: &str) -> std::result::Result<IpAddr, ResolveFailure>;

    /// Get the backend name
    fn backend(&self) -> ResolverBackend;
}

/// Map a lookup result onto a check outcome
///
/// Only an explicit NXDOMAIN counts as available; everything ambiguous is
/// indeterminate.
pub fn classify(result: std::result::Result<IpAddr, ResolveFailure>) -> CheckOutcome {
    match result {
        Ok(ip) => CheckOutcome::Registered { ip },
        Err(ResolveFailure::NameNotFound) => CheckOutcome::Available,
        Err(ResolveFailure::NoAddresses | ResolveFailure::Timeout | ResolveFailure::Other(_)) => {
            CheckOutcome::Indeterminate
        }
    }
}

/// Build the resolver selected by `config.resolver`
pub fn resolver_for(config: &CheckConfig) -> Arc<dyn NameResolver> {
    match config.resolver {
        ResolverBackend::Hickory => Arc::new(HickoryResolver::new(config.timeout)),
        ResolverBackend::System => Arc::new(SystemResolver::new()),
    }
}

/// hickory-resolver backed lookups
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    /// Use the system resolv.conf, falling back to hickory's default upstreams
    pub fn new(timeout: Duration) -> Self {
        match Self::from_system_conf(timeout) {
            Ok(resolver) => resolver,
            Err(e) => {
                tracing::warn!("Failed to read system DNS configuration: {}. Using default upstreams.", e);
                Self::with_config(ResolverConfig::default(), Self::options(ResolverOpts::default(), timeout))
            }
        }
    }

    /// Strict variant of [`new`](Self::new) that fails without system config
    pub fn from_system_conf(timeout: Duration) -> Result<Self> {
        let (config, opts) = hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| DomainFinderError::resolver(e.to_string()))?;
        Ok(Self::with_config(config, Self::options(opts, timeout)))
    }

    pub fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }

    fn options(mut opts: ResolverOpts, timeout: Duration) -> ResolverOpts {
        // Retries are driven by the checker, not by the stub resolver
        opts.timeout = timeout;
        opts.attempts = 1;
        opts
    }
}

#[async_trait]
impl NameResolver for HickoryResolver {
    async fn resolve(&self, name: &str) -> std::result::Result<IpAddr, ResolveFailure> {
        let lookup = self
            .resolver
            .lookup_ip(absolute_name(name))
            .await
            .map_err(|e| failure_from_hickory(&e))?;
        lookup.iter().next().ok_or(ResolveFailure::NoAddresses)
    }

    fn backend(&self) -> ResolverBackend {
        ResolverBackend::Hickory
    }
}

/// Root-anchored form of `name`, so resolv.conf search domains are never appended
pub fn absolute_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Reduce a hickory error to a failure using its structured kind
pub fn failure_from_hickory(err: &ResolveError) -> ResolveFailure {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                ResolveFailure::NameNotFound
            } else {
                ResolveFailure::NoAddresses
            }
        }
        ResolveErrorKind::Timeout => ResolveFailure::Timeout,
        _ => ResolveFailure::Other(err.to_string()),
    }
}

/// Operating system resolver (getaddrinfo on a blocking thread)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NameResolver for SystemResolver {
    async fn resolve(&self, name: &str) -> std::result::Result<IpAddr, ResolveFailure> {
        let mut addrs = tokio::net::lookup_host((name, 0))
            .await
            .map_err(|e| classify_system_error(&e))?;
        addrs.next().map(|addr| addr.ip()).ok_or(ResolveFailure::NoAddresses)
    }

    fn backend(&self) -> ResolverBackend {
        ResolverBackend::System
    }
}

/// Messages getaddrinfo uses for EAI_NONAME, per platform
const NOT_FOUND_MESSAGES: &[&str] = &[
    "name or service not known",
    "nodename nor servname provided",
    "no such host is known",
];

/// EAI_NODATA: the name exists but carries no address records
const NO_DATA_MESSAGES: &[&str] = &["no address associated with hostname", "no data of requested type"];

/// WSAHOST_NOT_FOUND
const WINDOWS_HOST_NOT_FOUND: i32 = 11001;

/// getaddrinfo exposes no NXDOMAIN category through `io::Error`, so this
/// falls back to the platform error text.
pub fn classify_system_error(err: &io::Error) -> ResolveFailure {
    if err.kind() == io::ErrorKind::TimedOut {
        return ResolveFailure::Timeout;
    }

    if cfg!(windows) && err.raw_os_error() == Some(WINDOWS_HOST_NOT_FOUND) {
        return ResolveFailure::NameNotFound;
    }

    let message = err.to_string().to_lowercase();
    if NO_DATA_MESSAGES.iter().any(|pattern| message.contains(pattern)) {
        ResolveFailure::NoAddresses
    } else if NOT_FOUND_MESSAGES.iter().any(|pattern| message.contains(pattern)) {
        ResolveFailure::NameNotFound
    } else {
        ResolveFailure::Other(err.to_string())
    }
}
