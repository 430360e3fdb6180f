//! End-to-end engine scenarios
//!
//! Drives the engine through a roster file the way the CLI does.

use std::sync::Arc;

use affinity_core::{
    AffinityEngine, AffinityEntry, AffinityLevel, AffinityMatrix, Category, Element,
    ElementHarmony, ElementScorer, EngineConfig, InMemoryDirectory, Member, MemberId, PairScorer,
    Severity,
};

fn id(n: u128) -> MemberId {
    MemberId::from_u128(n)
}

fn roster(categories: &[Category]) -> InMemoryDirectory {
    InMemoryDirectory::from_members(
        categories
            .iter()
            .enumerate()
            .map(|(i, &c)| Member::new(id(i as u128 + 1), format!("member-{}", i + 1), c)),
    )
    .unwrap()
}

/// Pins every cross-category pair to a fixed score
struct FixedScorer(u8);

impl PairScorer for FixedScorer {
    fn score(&self, c1: Category, c2: Category) -> AffinityEntry {
        let mut entry = ElementScorer::new().score(c1, c2);
        if c1 != c2 {
            entry.overall_score = self.0;
        }
        entry
    }
}

fn engine_with_score(score: u8, categories: &[Category]) -> AffinityEngine<InMemoryDirectory> {
    let matrix = Arc::new(AffinityMatrix::build_with(&FixedScorer(score)));
    AffinityEngine::with_matrix(matrix, roster(categories), EngineConfig::default()).unwrap()
}

#[test]
fn e2e_same_category_pair_is_excellent() {
    let engine = AffinityEngine::new(roster(&[Category::Aries, Category::Aries]));
    let entry = engine.lookup_member_affinity(id(1), id(2)).unwrap();

    assert_eq!(entry.overall_score, 85);
    assert_eq!(entry.level, AffinityLevel::Excellent);
}

#[test]
fn e2e_fire_air_pair_is_harmonious() {
    let engine = AffinityEngine::new(roster(&[Category::Aries, Category::Gemini]));
    let entry = engine.lookup_member_affinity(id(2), id(1)).unwrap();

    assert_eq!(entry.overall_score, 92);
    assert_eq!(entry.element_harmony, ElementHarmony::Harmonious);
    assert_eq!(entry.conflict_potential, 8);
}

#[test]
fn e2e_earth_water_pair_is_harmonious() {
    let engine = AffinityEngine::new(roster(&[Category::Taurus, Category::Cancer]));
    let entry = engine.lookup_member_affinity(id(1), id(2)).unwrap();

    assert_eq!(entry.overall_score, 90);
    assert_eq!(entry.element_harmony, ElementHarmony::Harmonious);
}

#[test]
fn e2e_fire_water_pair_is_challenging_but_not_a_conflict() {
    let engine = AffinityEngine::new(roster(&[Category::Aries, Category::Cancer]));
    let entry = engine.lookup_member_affinity(id(1), id(2)).unwrap();
    assert_eq!(entry.overall_score, 45);
    assert_eq!(entry.level, AffinityLevel::Challenging);
    assert_eq!(entry.element_harmony, ElementHarmony::Challenging);

    let team = engine.aggregate_team(&[id(1), id(2)]).unwrap();
    assert!(!team.has_conflicts());
    assert!(engine.scan_organization().unwrap().is_empty());
}

#[test]
fn e2e_one_member_per_element_is_balanced() {
    let engine = AffinityEngine::new(roster(&[
        Category::Sagittarius,
        Category::Capricorn,
        Category::Aquarius,
        Category::Pisces,
    ]));
    let team = engine.aggregate_team(&[id(1), id(2), id(3), id(4)]).unwrap();

    assert_eq!(team.element_histogram.len(), 4);
    for element in Element::ALL {
        assert_eq!(team.element_histogram.count(element), 1);
    }
    assert!(team.is_balanced());
    assert_eq!(team.pair_count(), 6);
}

#[test]
fn e2e_conflict_boundary_39_40_41() {
    let categories = [Category::Aries, Category::Taurus];

    let at_41 = engine_with_score(41, &categories);
    assert!(!at_41.aggregate_team(&[id(1), id(2)]).unwrap().has_conflicts());
    assert!(at_41.scan_organization().unwrap().is_empty());

    let at_40 = engine_with_score(40, &categories);
    assert!(!at_40.aggregate_team(&[id(1), id(2)]).unwrap().has_conflicts());
    assert!(at_40.scan_organization().unwrap().is_empty());

    let at_39 = engine_with_score(39, &categories);
    assert!(at_39.aggregate_team(&[id(1), id(2)]).unwrap().has_conflicts());
    let alerts = at_39.scan_organization().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::High);
}

#[test]
fn e2e_critical_alerts_sort_first() {
    // Two Aries share 85; every cross-category pair is 20
    let engine = engine_with_score(20, &[Category::Aries, Category::Aries, Category::Leo]);
    let alerts = engine.scan_organization().unwrap();

    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
    assert!(alerts.iter().all(|a| a.overall_score == 20));
    assert_eq!(alerts[0].member_a, id(1));
    assert_eq!(alerts[1].member_a, id(2));
}

#[test]
fn e2e_roster_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");

    roster(&[Category::Leo, Category::Libra, Category::Pisces])
        .to_file(&path)
        .unwrap();

    let engine = AffinityEngine::new(InMemoryDirectory::from_file(&path).unwrap());
    let best = engine.optimize_team(2, &[id(1), id(2), id(3)]).unwrap();

    assert_eq!(best.member_ids, vec![id(1), id(2)]);
    assert_eq!(best.average_score, 92.0);
}

#[test]
fn e2e_config_file_drives_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("affinity.toml");
    std::fs::write(&path, "conflict_threshold = 50\ncritical_threshold = 30\n").unwrap();

    let config = EngineConfig::from_file(&path).unwrap();
    let engine =
        AffinityEngine::with_config(roster(&[Category::Aries, Category::Cancer]), config).unwrap();

    // 45 is below the raised threshold
    let alerts = engine.scan_organization().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::High);
}

#[test]
fn e2e_roster_edits_through_shared_directory_reach_cached_teams() {
    let directory = Arc::new(roster(&[Category::Aries, Category::Gemini, Category::Leo]));
    let engine = AffinityEngine::new(Arc::clone(&directory));

    assert_eq!(engine.aggregate_team(&[id(1), id(2)]).unwrap().average_score, 92.0);
    assert_eq!(engine.aggregate_team(&[id(1), id(3)]).unwrap().average_score, 78.0);

    directory.remove(id(2)).unwrap();
    assert!(engine
        .aggregate_team(&[id(1), id(2)])
        .unwrap_err()
        .is_not_found());

    directory
        .insert(Member::new(id(3), "member-3", Category::Cancer))
        .unwrap();
    let team = engine.aggregate_team(&[id(1), id(3)]).unwrap();
    let pair = engine.lookup_member_affinity(id(1), id(3)).unwrap();
    assert_eq!(f64::from(pair.overall_score), team.average_score);
    assert_eq!(team.average_score, 45.0);
}
