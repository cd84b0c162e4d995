//! Random tree generation
//!
//! The Full and Grow strategies of Koza-style tree initialization, plus the
//! ramped half-and-half mix. Generation is iterative and emits the prefix
//! sequence directly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::primitives::set::{PrimitiveKind, PrimitiveSet};
use crate::tree::prefix::{Node, PrimitiveTree};

/// Tree generation strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Every leaf sits at the sampled depth; function nodes everywhere above
    Full,
    /// Leaves may appear anywhere between the minimum and sampled depth
    Grow,
    /// Per call, choose Full or Grow with equal probability
    HalfAndHalf,
}

/// Generate a random tree with depth in `[min_depth, max_depth]`
///
/// The target depth is sampled once for the whole tree. `Full` places
/// terminals exactly at the target depth; `Grow` additionally places them
/// early (never above `min_depth` while functions exist), weighted by the
/// vocabulary's terminal ratio.
pub fn generate<R: Rng>(
    pset: &PrimitiveSet,
    strategy: Strategy,
    min_depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Result<PrimitiveTree, GenerateError> {
    if min_depth > max_depth {
        return Err(GenerateError::InvalidDepthRange {
            min: min_depth,
            max: max_depth,
        });
    }
    let strategy = match strategy {
        Strategy::HalfAndHalf => {
            if rng.gen::<bool>() {
                Strategy::Full
            } else {
                Strategy::Grow
            }
        }
        other => other,
    };
    let target = rng.gen_range(min_depth..=max_depth);

    let mut nodes = Vec::new();
    // Work stack of depths still to fill; popping yields prefix order.
    let mut depths = vec![0usize];
    while let Some(depth) = depths.pop() {
        let terminal = match strategy {
            Strategy::Full => depth >= target,
            Strategy::Grow => {
                depth >= target
                    || pset.functions().is_empty()
                    || (depth >= min_depth && rng.gen::<f64>() < pset.terminal_ratio())
            }
            Strategy::HalfAndHalf => unreachable!("resolved above"),
        };
        if terminal {
            nodes.push(pick_terminal(pset, depth, rng)?);
        } else {
            if pset.functions().is_empty() {
                return Err(GenerateError::EmptyPrimitiveSet {
                    kind: "function",
                    depth,
                });
            }
            let symbol = rng.gen_range(0..pset.functions().len());
            let arity = pset.functions()[symbol].arity();
            nodes.push(Node::Function { symbol, arity });
            for _ in 0..arity {
                depths.push(depth + 1);
            }
        }
    }
    Ok(PrimitiveTree::from_nodes_unchecked(nodes))
}

/// Pick a terminal uniformly over arguments and terminal primitives
///
/// Ephemeral constants draw their value here, once per placement, and the
/// drawn value is frozen into the node.
fn pick_terminal<R: Rng>(
    pset: &PrimitiveSet,
    depth: usize,
    rng: &mut R,
) -> Result<Node, GenerateError> {
    let arguments = pset.argument_count();
    let total = pset.terminal_count();
    if total == 0 {
        return Err(GenerateError::EmptyPrimitiveSet {
            kind: "terminal",
            depth,
        });
    }
    let choice = rng.gen_range(0..total);
    if choice < arguments {
        Ok(Node::Argument(choice))
    } else {
        match pset.terminals()[choice - arguments].kind() {
            PrimitiveKind::Constant(v) => Ok(Node::Constant(*v)),
            PrimitiveKind::Ephemeral(generator) => Ok(Node::Constant(generator(rng))),
            PrimitiveKind::Function(_) => {
                unreachable!("terminal table holds only arity-0 primitives")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::builtins;
    use crate::primitives::set::{Primitive, PrimitiveSet};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_depth_is_exact() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let tree = generate(&pset, Strategy::Full, 3, 3, &mut rng).unwrap();
            assert_eq!(tree.height(), 3);
        }
    }

    #[test]
    fn test_grow_depth_within_bounds() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let tree = generate(&pset, Strategy::Grow, 1, 4, &mut rng).unwrap();
            assert!(tree.height() <= 4);
            assert!(tree.size() >= 1);
        }
    }

    #[test]
    fn test_generated_trees_are_well_formed() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for strategy in [Strategy::Full, Strategy::Grow, Strategy::HalfAndHalf] {
            for _ in 0..50 {
                let tree = generate(&pset, strategy, 0, 5, &mut rng).unwrap();
                assert!(PrimitiveTree::from_nodes(tree.nodes().to_vec()).is_ok());
            }
        }
    }

    #[test]
    fn test_depth_zero_is_single_terminal() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let tree = generate(&pset, Strategy::Grow, 0, 0, &mut rng).unwrap();
        assert_eq!(tree.size(), 1);
        assert!(tree.root().is_terminal());
    }

    #[test]
    fn test_no_terminals_fails() {
        let mut pset = PrimitiveSet::new();
        pset.register(Primitive::function("neg", 1, |args| -args[0]))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let err = generate(&pset, Strategy::Full, 1, 2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::EmptyPrimitiveSet { kind: "terminal", .. }
        ));
    }

    #[test]
    fn test_no_functions_full_fails() {
        let pset = PrimitiveSet::with_arguments(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        let err = generate(&pset, Strategy::Full, 2, 3, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::EmptyPrimitiveSet { kind: "function", .. }
        ));
    }

    #[test]
    fn test_no_functions_grow_places_terminal() {
        let pset = PrimitiveSet::with_arguments(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let tree = generate(&pset, Strategy::Grow, 2, 3, &mut rng).unwrap();
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn test_inverted_range() {
        let pset = builtins::arithmetic(["x"]).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let err = generate(&pset, Strategy::Full, 3, 1, &mut rng).unwrap_err();
        assert_eq!(err, GenerateError::InvalidDepthRange { min: 3, max: 1 });
    }

    #[test]
    fn test_generation_is_deterministic() {
        let pset = builtins::arithmetic(["x"]).unwrap();

        let mut rng1 = StdRng::seed_from_u64(318);
        let mut rng2 = StdRng::seed_from_u64(318);
        let a = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng1).unwrap();
        let b = generate(&pset, Strategy::HalfAndHalf, 1, 4, &mut rng2).unwrap();
        assert_eq!(a, b);
    }
}
