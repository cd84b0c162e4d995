//! Reference arithmetic vocabulary
//!
//! The standard symbolic-regression primitives: arithmetic, protected
//! division, negation, and trigonometry, plus a small-integer ephemeral
//! constant.

use rand::Rng;

use crate::error::RegistryError;
use crate::primitives::set::{Primitive, PrimitiveSet};

/// Protected division: returns 1 when the denominator is zero
pub fn protected_div(left: f64, right: f64) -> f64 {
    if right == 0.0 {
        1.0
    } else {
        left / right
    }
}

/// Addition primitive (arity 2)
pub fn add() -> Primitive {
    Primitive::function("add", 2, |args| args[0] + args[1])
}

/// Subtraction primitive (arity 2)
pub fn sub() -> Primitive {
    Primitive::function("sub", 2, |args| args[0] - args[1])
}

/// Multiplication primitive (arity 2)
pub fn mul() -> Primitive {
    Primitive::function("mul", 2, |args| args[0] * args[1])
}

/// Protected-division primitive (arity 2)
pub fn div() -> Primitive {
    Primitive::function("div", 2, |args| protected_div(args[0], args[1]))
}

/// Negation primitive (arity 1)
pub fn neg() -> Primitive {
    Primitive::function("neg", 1, |args| -args[0])
}

/// Sine primitive (arity 1)
pub fn sin() -> Primitive {
    Primitive::function("sin", 1, |args| args[0].sin())
}

/// Cosine primitive (arity 1)
pub fn cos() -> Primitive {
    Primitive::function("cos", 1, |args| args[0].cos())
}

/// Ephemeral constant drawing a uniform integer in `[low, high]`
pub fn uniform_int(name: impl Into<String>, low: i64, high: i64) -> Primitive {
    Primitive::ephemeral(name, move |rng| rng.gen_range(low..=high) as f64)
}

/// Build the reference symbolic-regression set
///
/// One argument per name, the seven arithmetic/trig functions above, and a
/// `rand101` ephemeral integer constant in `[-1, 1]`.
pub fn arithmetic<I, N>(arguments: I) -> Result<PrimitiveSet, RegistryError>
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    let mut pset = PrimitiveSet::with_arguments(arguments)?;
    pset.register(add())?;
    pset.register(sub())?;
    pset.register(mul())?;
    pset.register(div())?;
    pset.register(neg())?;
    pset.register(sin())?;
    pset.register(cos())?;
    pset.register(uniform_int("rand101", -1, 1))?;
    Ok(pset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::set::PrimitiveKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_protected_div_by_zero() {
        assert_eq!(protected_div(1.0, 0.0), 1.0);
        assert_eq!(protected_div(-42.5, 0.0), 1.0);
        assert_eq!(protected_div(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_protected_div_regular() {
        assert_eq!(protected_div(6.0, 2.0), 3.0);
        assert_eq!(protected_div(1.0, -4.0), -0.25);
    }

    #[test]
    fn test_arithmetic_set_contents() {
        let pset = arithmetic(["x"]).unwrap();
        assert_eq!(pset.argument_count(), 1);
        assert_eq!(pset.functions().len(), 7);
        assert_eq!(pset.terminals().len(), 1);
        assert!(pset.lookup("div", 2).is_ok());
        assert!(pset.lookup("rand101", 0).is_ok());
    }

    #[test]
    fn test_uniform_int_range() {
        let p = uniform_int("rand101", -1, 1);
        let PrimitiveKind::Ephemeral(generator) = p.kind() else {
            panic!("expected ephemeral");
        };

        let mut rng = StdRng::seed_from_u64(318);
        for _ in 0..100 {
            let v = generator(&mut rng);
            assert!(v == -1.0 || v == 0.0 || v == 1.0);
        }
    }
}
