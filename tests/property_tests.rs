//! Property-based tests for treegp
//!
//! Uses proptest to verify invariants and properties of the library.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use treegp::prelude::*;
use treegp::tree::generate::Strategy;

fn pset() -> PrimitiveSet {
    builtins::arithmetic(["x"]).unwrap()
}

proptest! {
    // ==================== Generation Properties ====================

    #[test]
    fn generated_trees_are_well_formed(
        seed in any::<u64>(),
        min in 0usize..4,
        extra in 0usize..4
    ) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = generate(&pset, Strategy::HalfAndHalf, min, min + extra, &mut rng).unwrap();

        prop_assert!(PrimitiveTree::from_nodes(tree.nodes().to_vec()).is_ok());
        prop_assert!(tree.height() <= min + extra);
    }

    #[test]
    fn full_trees_hit_sampled_depth_exactly(seed in any::<u64>(), depth in 0usize..6) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = generate(&pset, Strategy::Full, depth, depth, &mut rng).unwrap();

        prop_assert_eq!(tree.height(), depth);
    }

    #[test]
    fn subtree_spans_tile_the_root(seed in any::<u64>()) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = generate(&pset, Strategy::Grow, 1, 5, &mut rng).unwrap();

        // Every node's span nests inside the root's span.
        let root = tree.subtree(0);
        prop_assert_eq!(root.clone(), 0..tree.size());
        for index in 0..tree.size() {
            let span = tree.subtree(index);
            prop_assert!(span.start >= root.start && span.end <= root.end);
            prop_assert!(!span.is_empty());
        }
    }

    // ==================== Operator Properties ====================

    #[test]
    fn crossover_children_are_well_formed(seed in any::<u64>()) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let a = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng).unwrap();
        let b = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng).unwrap();

        let (c, d) = SubtreeCrossover::new().crossover(&a, &b, &mut rng);
        prop_assert!(PrimitiveTree::from_nodes(c.nodes().to_vec()).is_ok());
        prop_assert!(PrimitiveTree::from_nodes(d.nodes().to_vec()).is_ok());
        prop_assert_eq!(a.size() + b.size(), c.size() + d.size());
    }

    #[test]
    fn height_limit_is_never_exceeded(seed in any::<u64>(), ceiling in 1usize..8) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let a = generate(&pset, Strategy::HalfAndHalf, 1, 6, &mut rng).unwrap();
        let b = generate(&pset, Strategy::HalfAndHalf, 1, 6, &mut rng).unwrap();

        let crossover = HeightLimit::new(SubtreeCrossover::new(), ceiling);
        let (c, d) = crossover.crossover(&a, &b, &mut rng);
        prop_assert!(c.height() <= ceiling.max(a.height()));
        prop_assert!(d.height() <= ceiling.max(b.height()));

        let mutation = HeightLimit::new(UniformMutation::default(), ceiling);
        let m = mutation.mutate(&a, &pset, &mut rng).unwrap();
        prop_assert!(m.height() <= ceiling.max(a.height()));
    }

    #[test]
    fn mutants_are_well_formed(seed in any::<u64>()) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng).unwrap();

        let mutant = UniformMutation::default().mutate(&tree, &pset, &mut rng).unwrap();
        prop_assert!(PrimitiveTree::from_nodes(mutant.nodes().to_vec()).is_ok());
    }

    // ==================== Evaluation Properties ====================

    #[test]
    fn protected_division_is_total(left in -1e6f64..1e6, right in -1e6f64..1e6) {
        let quotient = builtins::protected_div(left, right);
        prop_assert!(!quotient.is_nan());
        if right == 0.0 {
            prop_assert_eq!(quotient, 1.0);
        }
    }

    #[test]
    fn evaluation_is_pure(seed in any::<u64>(), x in -10.0f64..10.0) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng).unwrap();

        let program = compile(&tree, &pset).unwrap();
        let first = program.call(&[x]);
        let second = program.call(&[x]);
        // Same inputs, same bits.
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    // ==================== Selection Properties ====================

    #[test]
    fn tournament_picks_an_existing_index(
        seed in any::<u64>(),
        size in 1usize..10,
        count in 1usize..20
    ) {
        let pset = pset();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = Population::generate(count, &pset, Strategy::Full, 1, 2, &mut rng).unwrap();
        population
            .evaluate(&pset, &LeastSquaresRegression::cubic(), &[Direction::Minimize])
            .unwrap();

        let selection = TournamentSelection::new(size);
        for _ in 0..10 {
            let pick = selection.select(population.as_slice(), &mut rng);
            prop_assert!(pick < population.len());
        }
    }
}
