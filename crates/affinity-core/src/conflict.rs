//! Conflict Scanner
//!
//! Scores every unordered pair of an organization's active members and
//! reports the ones below the conflict threshold.
//!
//! The scan is O(n²) in the number of members and is not capped.
//! For large rosters run it off the request path; with `parallel_scan`
//! enabled the pairwise loop is spread over the rayon pool, producing the
//! same output as the sequential path.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::affinity::AffinityMatrix;
use crate::catalog::Category;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::members::Member;
use crate::types::{MemberId, Severity};

/// One low-affinity member pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictAlert {
    pub member_a: MemberId,
    pub member_b: MemberId,
    pub category_a: Category,
    pub category_b: Category,
    pub overall_score: u8,
    pub severity: Severity,
    pub message: String,
}

/// Severity tier for a pair score, or `None` when the pair is not a conflict
pub fn classify(score: u8, conflict_threshold: u8, critical_threshold: u8) -> Option<Severity> {
    if score >= conflict_threshold {
        None
    } else if score < critical_threshold {
        Some(Severity::Critical)
    } else {
        Some(Severity::High)
    }
}

/// Organization-scale conflict detection
#[derive(Debug, Clone, Copy)]
pub struct ConflictScanner<'a> {
    matrix: &'a AffinityMatrix,
    conflict_threshold: u8,
    critical_threshold: u8,
    parallel: bool,
}

impl<'a> ConflictScanner<'a> {
    pub fn new(matrix: &'a AffinityMatrix, config: &EngineConfig) -> Self {
        Self {
            matrix,
            conflict_threshold: config.conflict_threshold,
            critical_threshold: config.critical_threshold,
            parallel: config.parallel_scan,
        }
    }

    /// Scan all pairs. Alerts come back CRITICAL first, then by ascending score;
    /// equal keys keep discovery order.
    pub fn scan(&self, members: &[Member]) -> Result<Vec<ConflictAlert>> {
        let n = members.len();

        let rows: Vec<Vec<ConflictAlert>> = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(|i| self.scan_row(members, i))
                .collect::<Result<_>>()?
        } else {
            (0..n)
                .map(|i| self.scan_row(members, i))
                .collect::<Result<_>>()?
        };

        let mut alerts: Vec<ConflictAlert> = rows.into_iter().flatten().collect();
        alerts.sort_by_key(|a| (a.severity, a.overall_score));

        tracing::debug!(
            members = n,
            pairs = n * n.saturating_sub(1) / 2,
            alerts = alerts.len(),
            parallel = self.parallel,
            "conflict scan finished"
        );
        Ok(alerts)
    }

    /// Alerts for pairs (i, j) with j > i
    fn scan_row(&self, members: &[Member], i: usize) -> Result<Vec<ConflictAlert>> {
        let a = &members[i];
        let mut row = Vec::new();

        for b in &members[i + 1..] {
            let entry = self.matrix.lookup(a.category, b.category)?;
            let score = entry.overall_score;

            if let Some(severity) = classify(score, self.conflict_threshold, self.critical_threshold) {
                row.push(ConflictAlert {
                    member_a: a.id,
                    member_b: b.id,
                    category_a: a.category,
                    category_b: b.category,
                    overall_score: score,
                    severity,
                    message: format!(
                        "{} conflict: {} ({}) and {} ({}) score {}",
                        severity,
                        a.label(),
                        a.category,
                        b.label(),
                        b.category,
                        score
                    ),
                });
            }
        }
        Ok(row)
    }
}
