//! Candidate name syntax checks
//!
//! Used by the checker to short-circuit names no resolver could answer for.
//! A rejected name is reported as `UNKNOWN`, never as available.

use crate::error::{DomainFinderError, Result};
use crate::validation_error;
use regex::Regex;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Domain name validator
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

impl DomainValidator {
    /// Create a new domain validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate name (LDH labels, at least one dot)
    pub fn validate(&self, domain: &str) -> Result<ValidatedDomain> {
        let normalized = self.normalize(domain);

        self.validate_format(&normalized)?;
        self.validate_length(&normalized)?;
        self.validate_characters(&normalized)?;

        let (name, tld) = self.split_tld(&normalized)?;
        for label in normalized.split('.') {
            self.validate_label(label)?;
        }

        Ok(ValidatedDomain {
            name,
            tld,
            full_domain: normalized,
        })
    }

    pub fn is_valid(&self, domain: &str) -> bool {
        self.validate(domain).is_ok()
    }

    /// Normalize domain name; a single trailing root dot is accepted
    pub fn normalize(&self, domain: &str) -> String {
        let domain = domain.trim().to_lowercase();
        match domain.strip_suffix('.') {
            Some(stripped) => stripped.to_string(),
            None => domain,
        }
    }

    fn validate_format(&self, domain: &str) -> Result<()> {
        if domain.is_empty() {
            return Err(DomainFinderError::validation("Domain name cannot be empty"));
        }

        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(DomainFinderError::validation("Domain cannot start or end with dot"));
        }

        if domain.contains("..") {
            return Err(DomainFinderError::validation("Domain cannot contain consecutive dots"));
        }

        Ok(())
    }

    fn validate_length(&self, domain: &str) -> Result<()> {
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(validation_error!("Domain name too long (max {} characters)", MAX_DOMAIN_LEN));
        }
        Ok(())
    }

    fn validate_characters(&self, domain: &str) -> Result<()> {
        let valid_chars = Regex::new(r"^[a-z0-9.-]+$")
            .map_err(|e| DomainFinderError::internal(e.to_string()))?;

        if !valid_chars.is_match(domain) {
            return Err(DomainFinderError::validation("Domain contains invalid characters"));
        }

        Ok(())
    }

    fn split_tld(&self, domain: &str) -> Result<(String, String)> {
        match domain.rsplit_once('.') {
            Some((name, tld)) if !name.is_empty() && !tld.is_empty() => {
                Ok((name.to_string(), tld.to_string()))
            }
            _ => Err(DomainFinderError::validation("Domain must have a name and a TLD")),
        }
    }

    fn validate_label(&self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(DomainFinderError::validation("Domain label cannot be empty"));
        }

        if label.len() > MAX_LABEL_LEN {
            return Err(validation_error!("Domain label too long (max {} characters)", MAX_LABEL_LEN));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainFinderError::validation("Domain label cannot start or end with hyphen"));
        }

        Ok(())
    }
}

/// Domain validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDomain {
    pub name: String,
    pub tld: String,
    pub full_domain: String,
}

/// Parse a newline-separated domain list; blank lines and `#` comments are skipped
pub fn parse_domain_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
