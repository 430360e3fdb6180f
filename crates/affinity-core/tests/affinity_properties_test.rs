//! Property tests over the matrix, the aggregator and the optimizer

use affinity_core::{
    AffinityEngine, AffinityMatrix, Category, InMemoryDirectory, Member, MemberId,
};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn engine(categories: &[Category]) -> AffinityEngine<InMemoryDirectory> {
    let directory = InMemoryDirectory::from_members(
        categories
            .iter()
            .enumerate()
            .map(|(i, &c)| Member::new(MemberId::from_u128(i as u128 + 1), "", c)),
    )
    .unwrap();
    AffinityEngine::new(directory)
}

fn ids(n: usize) -> Vec<MemberId> {
    (1..=n as u128).map(MemberId::from_u128).collect()
}

proptest! {
    #[test]
    fn lookup_is_symmetric(a in category(), b in category()) {
        let matrix = AffinityMatrix::shared();
        prop_assert_eq!(matrix.lookup(a, b).unwrap(), matrix.lookup(b, a).unwrap());
    }

    #[test]
    fn entry_scores_are_consistent(a in category(), b in category()) {
        let matrix = AffinityMatrix::shared();
        let entry = matrix.lookup(a, b).unwrap();

        prop_assert!(entry.overall_score <= 100);
        prop_assert!(entry.work_score <= 100);
        prop_assert_eq!(entry.conflict_potential, 100 - entry.overall_score);
        if a == b {
            prop_assert_eq!(entry.overall_score, 85);
        }
    }

    #[test]
    fn histogram_always_has_four_elements(
        categories in prop::collection::vec(category(), 2..10)
    ) {
        let engine = engine(&categories);
        let team = engine.aggregate_team(&ids(categories.len())).unwrap();

        prop_assert_eq!(team.element_histogram.len(), 4);
        prop_assert_eq!(team.element_histogram.total(), categories.len());
        prop_assert_eq!(team.pair_count(), categories.len() * (categories.len() - 1) / 2);
    }

    #[test]
    fn aggregation_ignores_input_order(
        categories in prop::collection::vec(category(), 2..8)
    ) {
        let engine = engine(&categories);
        let forward = ids(categories.len());
        let mut backward = forward.clone();
        backward.reverse();

        let first = engine.aggregate_team(&forward).unwrap();
        engine.cache().clear();
        let second = engine.aggregate_team(&backward).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn optimizer_respects_target_size(
        categories in prop::collection::vec(category(), 2..10),
        target in 2usize..10,
    ) {
        prop_assume!(target <= categories.len());
        let engine = engine(&categories);
        let pool = ids(categories.len());
        let team = engine.optimize_team(target, &pool).unwrap();

        prop_assert_eq!(team.team_size, target);
        let mut chosen = team.member_ids.clone();
        chosen.sort();
        chosen.dedup();
        prop_assert_eq!(chosen.len(), team.team_size);

        if target == pool.len() {
            for id in &pool {
                prop_assert!(team.contains(*id));
            }
        }
    }
}
