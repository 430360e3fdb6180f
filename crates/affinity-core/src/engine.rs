//! Affinity Engine - the facade presentation and API layers call into
//!
//! Wires the shared [`AffinityMatrix`], a [`MemberDirectory`] and the
//! [`EngineConfig`] together and exposes the five engine operations.
//!
//! Member-id sets are canonicalized (sorted ascending, duplicates dropped)
//! before any aggregation, scan or optimization. That makes every result
//! independent of the order ids were passed in, and turns the aggregator's
//! and optimizer's "first found wins" tie-break into "lowest id wins".

use std::sync::Arc;

use crate::affinity::{AffinityEntry, AffinityMatrix};
use crate::cache::{team_key, TeamCache};
use crate::catalog::Category;
use crate::config::EngineConfig;
use crate::conflict::{ConflictAlert, ConflictScanner};
use crate::error::{Result, TeamError};
use crate::members::{InMemoryDirectory, Member, MemberDirectory, MemberResolver};
use crate::optimizer::GreedyOptimizer;
use crate::team::{TeamAffinityResult, TeamAggregator};
use crate::types::MemberId;

/// The affinity engine
#[derive(Debug)]
pub struct AffinityEngine<D> {
    matrix: Arc<AffinityMatrix>,
    directory: D,
    config: EngineConfig,
    cache: TeamCache,
}

impl<D: MemberDirectory> AffinityEngine<D> {
    /// Engine over the process-wide matrix with default configuration
    pub fn new(directory: D) -> Self {
        let config = EngineConfig::default();
        Self {
            matrix: AffinityMatrix::shared(),
            cache: TeamCache::new(config.cache_capacity),
            directory,
            config,
        }
    }

    /// Engine over the process-wide matrix with a validated configuration
    pub fn with_config(directory: D, config: EngineConfig) -> Result<Self> {
        Self::with_matrix(AffinityMatrix::shared(), directory, config)
    }

    /// Engine over an explicitly built matrix
    pub fn with_matrix(
        matrix: Arc<AffinityMatrix>,
        directory: D,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matrix,
            cache: TeamCache::new(config.cache_capacity),
            directory,
            config,
        })
    }

    pub fn matrix(&self) -> &AffinityMatrix {
        &self.matrix
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &TeamCache {
        &self.cache
    }

    /// Affinity between two categories
    pub fn lookup_affinity(&self, c1: Category, c2: Category) -> Result<&AffinityEntry> {
        self.matrix.lookup(c1, c2)
    }

    /// Affinity between two members
    pub fn lookup_member_affinity(&self, a: MemberId, b: MemberId) -> Result<&AffinityEntry> {
        MemberResolver::new(&self.matrix, &self.directory).resolve(a, b)
    }

    /// Aggregate the team formed by `ids`
    pub fn aggregate_team(&self, ids: &[MemberId]) -> Result<TeamAffinityResult> {
        let key = team_key(ids);
        if key.len() < 2 {
            return Err(TeamError::TooFewMembers(key.len()).into());
        }

        // Read before fetching: a write racing the fetch leaves the entry tagged stale
        let generation = self.directory.generation();
        if let Some(generation) = generation {
            if let Some(hit) = self.cache.get(&key, generation) {
                tracing::debug!(
                    team_size = key.len(),
                    generation,
                    "team result served from cache"
                );
                return Ok(hit);
            }
        }

        let members = self.directory.get_members(&key)?;
        let result = self.aggregator().aggregate(&members)?;
        if let Some(generation) = generation {
            self.cache.insert(&key, generation, result.clone());
        }
        Ok(result)
    }

    /// Conflicts among the given (active) members
    pub fn scan_conflicts(&self, active_ids: &[MemberId]) -> Result<Vec<ConflictAlert>> {
        let key = team_key(active_ids);
        let members = self.directory.get_members(&key)?;
        ConflictScanner::new(&self.matrix, &self.config).scan(&members)
    }

    /// Conflicts among every active member of the directory
    pub fn scan_organization(&self) -> Result<Vec<ConflictAlert>> {
        let mut members = self.directory.active_members();
        members.sort_by_key(|m| m.id);
        tracing::info!(members = members.len(), "scanning organization for conflicts");
        ConflictScanner::new(&self.matrix, &self.config).scan(&members)
    }

    /// Greedily assemble a team of up to `target_size` members from `pool_ids`
    pub fn optimize_team(
        &self,
        target_size: usize,
        pool_ids: &[MemberId],
    ) -> Result<TeamAffinityResult> {
        let key = team_key(pool_ids);
        if target_size < 2 {
            return Err(TeamError::TargetTooSmall(target_size).into());
        }
        if key.len() < target_size {
            return Err(TeamError::PoolTooSmall {
                pool: key.len(),
                target: target_size,
            }
            .into());
        }

        let pool: Vec<Member> = self.directory.get_members(&key)?;
        GreedyOptimizer::new(&self.matrix, &self.config).find_optimal_team(target_size, &pool)
    }

    /// Drop cached results involving a member.
    ///
    /// Writes to a directory that reports a generation are picked up without
    /// this; it is for directories that change behind the engine's back.
    pub fn invalidate_member(&self, id: MemberId) {
        self.cache.invalidate_member(id);
    }

    fn aggregator(&self) -> TeamAggregator<'_> {
        TeamAggregator::new(&self.matrix, &self.config)
    }
}

impl AffinityEngine<InMemoryDirectory> {
    /// Insert or replace a member, dropping cached teams that contain it
    pub fn upsert_member(&self, member: Member) -> Result<Option<Member>> {
        let id = member.id;
        let previous = self.directory.insert(member)?;
        self.cache.invalidate_member(id);
        Ok(previous)
    }

    /// Toggle a member's active flag, dropping cached teams that contain it
    pub fn set_member_active(&self, id: MemberId, active: bool) -> Result<()> {
        self.directory.set_active(id, active)?;
        self.cache.invalidate_member(id);
        Ok(())
    }

    /// Remove a member, dropping cached teams that contain it
    pub fn remove_member(&self, id: MemberId) -> Result<Member> {
        let removed = self.directory.remove(id)?;
        self.cache.invalidate_member(id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AffinityLevel, ElementHarmony};

    fn id(n: u128) -> MemberId {
        MemberId::from_u128(n)
    }

    fn engine(categories: &[Category]) -> AffinityEngine<InMemoryDirectory> {
        let directory = InMemoryDirectory::from_members(
            categories
                .iter()
                .enumerate()
                .map(|(i, &c)| Member::new(id(i as u128 + 1), format!("m{}", i + 1), c)),
        )
        .unwrap();
        AffinityEngine::new(directory)
    }

    #[test]
    fn test_lookup_affinity_scenarios() {
        let engine = engine(&[]);

        let b = engine.lookup_affinity(Category::Aries, Category::Gemini).unwrap();
        assert_eq!(b.overall_score, 92);
        assert_eq!(b.element_harmony, ElementHarmony::Harmonious);
        assert_eq!(b.conflict_potential, 8);

        let d = engine.lookup_affinity(Category::Cancer, Category::Aries).unwrap();
        assert_eq!(d.overall_score, 45);
        assert_eq!(d.level, AffinityLevel::Challenging);
    }

    #[test]
    fn test_lookup_member_affinity() {
        let engine = engine(&[Category::Aries, Category::Aries]);
        let entry = engine.lookup_member_affinity(id(1), id(2)).unwrap();
        assert_eq!(entry.overall_score, 85);
        assert_eq!(entry.level, AffinityLevel::Excellent);

        assert!(engine
            .lookup_member_affinity(id(1), id(42))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_aggregate_validates_before_lookup() {
        let engine = engine(&[Category::Leo]);
        // Unknown id, but the size check comes first
        let err = engine.aggregate_team(&[id(99)]).unwrap_err();
        assert!(err.is_invalid_argument());

        // Duplicates collapse to a single member
        let err = engine.aggregate_team(&[id(1), id(1)]).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = engine.aggregate_team(&[id(1), id(99)]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_aggregate_order_independent() {
        let engine = engine(&[
            Category::Aries,
            Category::Taurus,
            Category::Gemini,
            Category::Cancer,
        ]);
        let forward = engine.aggregate_team(&[id(1), id(2), id(3), id(4)]).unwrap();
        engine.cache().clear();
        let backward = engine.aggregate_team(&[id(4), id(3), id(2), id(1)]).unwrap();
        assert_eq!(forward, backward);
        assert!(forward.is_balanced());
    }

    #[test]
    fn test_aggregate_uses_cache_and_invalidation() {
        let engine = engine(&[Category::Aries, Category::Gemini]);
        engine.aggregate_team(&[id(1), id(2)]).unwrap();
        assert_eq!(engine.cache().len(), 1);

        engine.invalidate_member(id(2));
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_upsert_member_invalidates_cache() {
        let engine = engine(&[Category::Aries, Category::Gemini]);
        let before = engine.aggregate_team(&[id(1), id(2)]).unwrap();
        assert_eq!(before.average_score, 92.0);

        engine
            .upsert_member(Member::new(id(2), "m2", Category::Cancer))
            .unwrap();
        assert!(engine.cache().is_empty());

        let after = engine.aggregate_team(&[id(1), id(2)]).unwrap();
        assert_eq!(after.average_score, 45.0);
    }

    #[test]
    fn test_remove_through_directory_is_not_served_from_cache() {
        let engine = engine(&[Category::Aries, Category::Gemini]);
        engine.aggregate_team(&[id(1), id(2)]).unwrap();

        engine.directory().remove(id(2)).unwrap();
        let err = engine.aggregate_team(&[id(1), id(2)]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_member_invalidates_cache() {
        let engine = engine(&[Category::Aries, Category::Gemini, Category::Leo]);
        engine.aggregate_team(&[id(1), id(2)]).unwrap();
        engine.aggregate_team(&[id(1), id(3)]).unwrap();

        engine.remove_member(id(2)).unwrap();
        assert!(engine.aggregate_team(&[id(1), id(2)]).unwrap_err().is_not_found());
        assert!(engine.remove_member(id(2)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_shared_directory_write_refreshes_team() {
        let directory = Arc::new(
            InMemoryDirectory::from_members(vec![
                Member::new(id(1), "m1", Category::Aries),
                Member::new(id(2), "m2", Category::Gemini),
            ])
            .unwrap(),
        );
        let engine = AffinityEngine::new(Arc::clone(&directory));
        assert_eq!(engine.aggregate_team(&[id(1), id(2)]).unwrap().average_score, 92.0);

        directory
            .insert(Member::new(id(2), "m2", Category::Cancer))
            .unwrap();

        let pair = engine.lookup_member_affinity(id(1), id(2)).unwrap();
        let team = engine.aggregate_team(&[id(1), id(2)]).unwrap();
        assert_eq!(pair.overall_score, 45);
        assert_eq!(team.average_score, 45.0);
    }

    #[test]
    fn test_directory_without_generation_bypasses_cache() {
        struct Fixed(Vec<Member>);

        impl MemberDirectory for Fixed {
            fn get_member(&self, id: MemberId) -> Result<Member> {
                self.0
                    .iter()
                    .find(|m| m.id == id)
                    .cloned()
                    .ok_or_else(|| crate::error::LookupError::MemberNotFound(id).into())
            }

            fn active_members(&self) -> Vec<Member> {
                self.0.clone()
            }
        }

        let engine = AffinityEngine::new(Fixed(vec![
            Member::new(id(1), "m1", Category::Aries),
            Member::new(id(2), "m2", Category::Gemini),
        ]));
        engine.aggregate_team(&[id(1), id(2)]).unwrap();
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_scan_organization_skips_inactive() {
        let engine = engine(&[Category::Aries, Category::Cancer]);
        engine.set_member_active(id(2), false).unwrap();
        assert!(engine.scan_organization().unwrap().is_empty());
        assert!(engine.scan_conflicts(&[id(1), id(2)]).unwrap().is_empty());
    }

    #[test]
    fn test_optimize_validates_before_lookup() {
        let engine = engine(&[Category::Aries, Category::Leo]);
        let err = engine.optimize_team(3, &[id(1), id(2)]).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = engine.optimize_team(2, &[id(1), id(77)]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_optimize_prefers_lowest_id_on_ties() {
        // Three Aries: every pair is 85
        let engine = engine(&[Category::Aries, Category::Aries, Category::Aries]);
        let result = engine.optimize_team(2, &[id(3), id(2), id(1)]).unwrap();
        assert_eq!(result.member_ids, vec![id(1), id(2)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_critical_threshold(90);
        let result = AffinityEngine::with_config(InMemoryDirectory::new(), config);
        assert!(result.is_err());
    }
}
