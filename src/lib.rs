//! Domain Finder - pronounceable domain name generation and DNS availability checking
//!
//! Candidate names are generated from consonant/vowel alphabets and then
//! probed concurrently through a DNS resolver. A name that resolves is taken,
//! an NXDOMAIN answer means available, and anything else is unknown.

pub mod config;
pub mod domain;
pub mod error;
pub mod names;
pub mod types;

// Re-export commonly used types
pub use error::{DomainFinderError, Result};
pub use types::{
    BatchReport, BatchSummary, CheckConfig, CheckOutcome, CheckResult, CheckStatus, GenerationConfig,
    MetricsSnapshot, PerformanceMetrics, ResolverBackend,
};

// Re-export main functionality
pub use domain::{summarize, AvailabilityChecker};
pub use names::NameGenerator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generate candidate names with the thread-local RNG
pub fn generate(config: &GenerationConfig) -> Vec<String> {
    NameGenerator::new().generate(config)
}

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
