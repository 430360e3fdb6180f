//! Error types for Affinity Core
//!
//! This module defines all error types used throughout the affinity engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.
//!
//! Failures fall into two families:
//! - [`LookupError`]: something the caller referenced does not resolve (NotFound)
//! - [`TeamError`]: the caller supplied arguments the engine refuses to work with (InvalidArgument)
//!
//! All failures are deterministic given the same inputs; none of them is transient.

use thiserror::Error;

use crate::catalog::{Category, Element};
use crate::types::MemberId;

/// Result type alias for affinity operations
pub type Result<T> = std::result::Result<T, AffinityError>;

/// Main error type for affinity operations
#[derive(Error, Debug)]
pub enum AffinityError {
    /// Lookup errors (member or matrix entry not found)
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Team-level precondition violations
    #[error("Team error: {0}")]
    Team(#[from] TeamError),

    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML encode errors
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<AffinityError>,
    },
}

/// Errors raised when a referenced member, category or matrix entry does not resolve
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("No affinity entry for pair ({0}, {1})")]
    PairNotFound(Category, Category),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Errors raised when a request violates a precondition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("A team needs at least 2 members, got {0}")]
    TooFewMembers(usize),

    #[error("Pool of {pool} members cannot fill a team of {target}")]
    PoolTooSmall { pool: usize, target: usize },

    #[error("Target team size must be at least 2, got {0}")]
    TargetTooSmall(usize),

    #[error("Member {id} declares element {declared} but {category} belongs to {expected}")]
    InconsistentProfile {
        id: MemberId,
        category: Category,
        declared: Element,
        expected: Element,
    },

    #[error("Duplicate member: {0}")]
    DuplicateMember(MemberId),

    #[error("Invalid birth date: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },
}

impl AffinityError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root(&self) -> &AffinityError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the error belongs to the NotFound family
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::Lookup(_))
    }

    /// True when the error belongs to the InvalidArgument family
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.root(), Self::Team(_))
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}
