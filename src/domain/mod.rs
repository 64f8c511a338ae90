//! Domain availability checking module

pub mod checker;
pub mod resolver;
pub mod validator;

// Re-export main functionality
pub use checker::{summarize, AvailabilityChecker};
pub use resolver::{classify, resolver_for, HickoryResolver, NameResolver, ResolveFailure, SystemResolver};
pub use validator::{parse_domain_list, DomainValidator, ValidatedDomain};
