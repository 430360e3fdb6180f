//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AffinityError, Result};

/// Pairs scoring below this are conflicts
pub const DEFAULT_CONFLICT_THRESHOLD: u8 = 40;

/// Conflicts scoring below this are critical
pub const DEFAULT_CRITICAL_THRESHOLD: u8 = 30;

/// How many top pairs a team report lists
pub const DEFAULT_BEST_PAIR_COUNT: usize = 3;

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overall score strictly below which a pair is flagged as a conflict
    pub conflict_threshold: u8,

    /// Overall score strictly below which a conflict is CRITICAL rather than HIGH
    pub critical_threshold: u8,

    /// Number of best pairs kept in a team result
    pub best_pair_count: usize,

    /// Score organization-wide conflict scans on the rayon thread pool
    pub parallel_scan: bool,

    /// Maximum number of cached team results (0 disables the cache)
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            conflict_threshold: DEFAULT_CONFLICT_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            best_pair_count: DEFAULT_BEST_PAIR_COUNT,
            parallel_scan: false,
            cache_capacity: 128,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conflict_threshold(mut self, threshold: u8) -> Self {
        self.conflict_threshold = threshold;
        self
    }

    pub fn with_critical_threshold(mut self, threshold: u8) -> Self {
        self.critical_threshold = threshold;
        self
    }

    pub fn with_best_pair_count(mut self, count: usize) -> Self {
        self.best_pair_count = count;
        self
    }

    pub fn with_parallel_scan(mut self, enabled: bool) -> Self {
        self.parallel_scan = enabled;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Reject configurations whose thresholds contradict each other
    pub fn validate(&self) -> Result<()> {
        if self.conflict_threshold > 100 {
            return Err(AffinityError::Config(format!(
                "conflict_threshold must be in 0..=100, got {}",
                self.conflict_threshold
            )));
        }
        if self.critical_threshold > self.conflict_threshold {
            return Err(AffinityError::Config(format!(
                "critical_threshold ({}) exceeds conflict_threshold ({})",
                self.critical_threshold, self.conflict_threshold
            )));
        }
        if self.best_pair_count == 0 {
            return Err(AffinityError::Config(
                "best_pair_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
