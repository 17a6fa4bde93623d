//! The builtin operator table the evaluator folds over (§4.1). Names match
//! the VHDL/nvc builtin identifiers verbatim (`"eq"`, `"add"`, ...), so
//! `BuiltinOp` round-trips through `FromStr`/`Display` without a manual
//! lookup table — the same trick `global::operators`'s enums use for their
//! own wire-name mapping.

use crate::tree::Literal;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BuiltinOp {
    Eq,
    Neq,
    Leq,
    Geq,
    Lt,
    Gt,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Rem,
    Neg,
    Abs,
    Exp,
    Not,
    And,
    Or,
    Succ,
    Pred,
    Ascending,
}

/// Two's-complement `TRUE`/`FALSE` encoding used for folded boolean
/// results, matching `Literal::as_bool`'s convention (§3).
fn bool_lit(b: bool) -> Literal {
    Literal::Enum(if b { 1 } else { 0 })
}

/// Apply `op` to already-folded literal arguments, producing a folded
/// result or `None` if the combination can't be (or shouldn't be) folded
/// at compile time (§4.1: overflow never traps here, division by zero is
/// left un-folded for the backend to check at run time).
pub fn apply(op: BuiltinOp, args: &[Literal]) -> Option<Literal> {
    use BuiltinOp::*;
    match (op, args) {
        (Eq, [a, b]) => cmp_eq(a, b).map(bool_lit),
        (Neq, [a, b]) => cmp_eq(a, b).map(|r| bool_lit(!r)),
        (Lt, [a, b]) => cmp_ord(a, b).map(|o| bool_lit(o.is_lt())),
        (Leq, [a, b]) => cmp_ord(a, b).map(|o| bool_lit(o.is_le())),
        (Gt, [a, b]) => cmp_ord(a, b).map(|o| bool_lit(o.is_gt())),
        (Geq, [a, b]) => cmp_ord(a, b).map(|o| bool_lit(o.is_ge())),

        (Add, [a, b]) => numeric_binop(a, b, i64::wrapping_add, |x, y| x + y),
        (Sub, [a, b]) => numeric_binop(a, b, i64::wrapping_sub, |x, y| x - y),
        (Mul, [a, b]) => numeric_binop(a, b, i64::wrapping_mul, |x, y| x * y),
        (Div, [a, b]) => match (a, b) {
            (Literal::Int(_), Literal::Int(0)) => None,
            (Literal::Int(x), Literal::Int(y)) => Some(Literal::Int(x.wrapping_div(*y))),
            (Literal::Real(x), Literal::Real(y)) if *y != 0.0 => Some(Literal::Real(x / y)),
            _ => None,
        },
        (Mod, [Literal::Int(x), Literal::Int(y)]) if *y != 0 => {
            // VHDL `mod` carries the sign of the divisor, unlike `%`/`rem_euclid`.
            let r = x.wrapping_rem(*y);
            let r = if r != 0 && (r < 0) != (*y < 0) { r + y } else { r };
            Some(Literal::Int(r))
        }
        (Rem, [Literal::Int(x), Literal::Int(y)]) if *y != 0 => {
            Some(Literal::Int(x.wrapping_rem(*y)))
        }
        (Exp, [Literal::Int(x), Literal::Int(y)]) if *y >= 0 => {
            Some(Literal::Int(x.wrapping_pow(*y as u32)))
        }
        (Exp, [Literal::Real(x), Literal::Int(y)]) => Some(Literal::Real(x.powi(*y as i32))),

        (Neg, [Literal::Int(x)]) => Some(Literal::Int(x.wrapping_neg())),
        (Neg, [Literal::Real(x)]) => Some(Literal::Real(-x)),
        (Abs, [Literal::Int(x)]) => Some(Literal::Int(x.wrapping_abs())),
        (Abs, [Literal::Real(x)]) => Some(Literal::Real(x.abs())),

        (Not, [a]) => a.as_bool().map(|b| bool_lit(!b)),
        (And, [a, b]) => match (a.as_bool(), b.as_bool()) {
            (Some(a), Some(b)) => Some(bool_lit(a && b)),
            _ => None,
        },
        (Or, [a, b]) => match (a.as_bool(), b.as_bool()) {
            (Some(a), Some(b)) => Some(bool_lit(a || b)),
            _ => None,
        },

        (Succ, [Literal::Int(x)]) => Some(Literal::Int(x.wrapping_add(1))),
        (Succ, [Literal::Enum(x)]) => Some(Literal::Enum(x.wrapping_add(1))),
        (Pred, [Literal::Int(x)]) => Some(Literal::Int(x.wrapping_sub(1))),
        (Pred, [Literal::Enum(x)]) => Some(Literal::Enum(x.wrapping_sub(1))),

        // `ascending(dim, range_source)`: folds only when the direction is
        // already statically known, i.e. the caller passed a constant-folded
        // boolean marker rather than a live dynamic-range descriptor.
        (Ascending, [_, b]) => b.as_bool().map(bool_lit),

        _ => None,
    }
}

fn cmp_eq(a: &Literal, b: &Literal) -> Option<bool> {
    match (a, b) {
        (Literal::Int(x), Literal::Int(y)) => Some(x == y),
        (Literal::Real(x), Literal::Real(y)) => Some(x == y),
        (Literal::Enum(x), Literal::Enum(y)) => Some(x == y),
        (Literal::Str(x), Literal::Str(y)) => Some(x == y),
        _ => None,
    }
}

fn cmp_ord(a: &Literal, b: &Literal) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (Literal::Int(x), Literal::Int(y)) => x.partial_cmp(y),
        (Literal::Real(x), Literal::Real(y)) => x.partial_cmp(y),
        (Literal::Enum(x), Literal::Enum(y)) => x.partial_cmp(y),
        (Literal::Str(x), Literal::Str(y)) => x.partial_cmp(y),
        _ => None,
    }
}

fn numeric_binop(
    a: &Literal,
    b: &Literal,
    int_op: fn(i64, i64) -> i64,
    real_op: fn(f64, f64) -> f64,
) -> Option<Literal> {
    match (a, b) {
        (Literal::Int(x), Literal::Int(y)) => Some(Literal::Int(int_op(*x, *y))),
        (Literal::Real(x), Literal::Real(y)) => Some(Literal::Real(real_op(*x, *y))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_round_trips_through_display_and_parse() {
        for op in [BuiltinOp::Add, BuiltinOp::Leq, BuiltinOp::Ascending] {
            let name = op.to_string();
            assert_eq!(name.parse::<BuiltinOp>().unwrap(), op);
        }
    }

    #[test]
    fn integer_add_wraps_instead_of_panicking() {
        let result = apply(BuiltinOp::Add, &[Literal::Int(i64::MAX), Literal::Int(1)]);
        assert_eq!(result, Some(Literal::Int(i64::MIN)));
    }

    #[test]
    fn division_by_zero_does_not_fold() {
        assert_eq!(apply(BuiltinOp::Div, &[Literal::Int(10), Literal::Int(0)]), None);
    }

    #[test]
    fn real_comparison() {
        assert_eq!(
            apply(BuiltinOp::Lt, &[Literal::Real(1.0), Literal::Real(2.0)]),
            Some(Literal::Enum(1))
        );
    }
}
