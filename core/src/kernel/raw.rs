//! # Raw expressions
//!
//! The form produced by the parser, before normalization. It may contain
//! `Not` anywhere; connectives are binary.

use super::{Expr, Symbol};
use std::fmt;

/// A formula as written.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RawExpr {
    /// A variable with its polarity. `false` means negated.
    Atom(Symbol, bool),
    Not(Box<RawExpr>),
    And(Box<RawExpr>, Box<RawExpr>),
    Or(Box<RawExpr>, Box<RawExpr>),
}

impl RawExpr {
    /// Positive literal.
    pub fn atom(name: impl Into<Symbol>) -> Self {
        RawExpr::Atom(name.into(), true)
    }

    pub fn not(e: RawExpr) -> Self {
        RawExpr::Not(Box::new(e))
    }

    pub fn and(a: RawExpr, b: RawExpr) -> Self {
        RawExpr::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: RawExpr, b: RawExpr) -> Self {
        RawExpr::Or(Box::new(a), Box::new(b))
    }

    /// `a > b`, sugar for `~a | b`.
    pub fn implies(a: RawExpr, b: RawExpr) -> Self {
        RawExpr::or(RawExpr::not(a), b)
    }

    /// `a = b`, sugar for `(~a | b) & (a | ~b)`.
    pub fn iff(a: RawExpr, b: RawExpr) -> Self {
        let ab = RawExpr::implies(a.clone(), b.clone());
        let ba = RawExpr::or(a, RawExpr::not(b));
        RawExpr::and(ab, ba)
    }

    /// One step of De Morgan.
    ///
    /// `And` and `Or` are swapped with their children wrapped in `Not`,
    /// atoms flip polarity, and `Not` is unwrapped. Nothing is normalized.
    pub fn negate(&self) -> Self {
        match self {
            RawExpr::Atom(name, polarity) => RawExpr::Atom(name.clone(), !polarity),
            RawExpr::Not(e) => (**e).clone(),
            RawExpr::And(a, b) => {
                RawExpr::or(RawExpr::not((**a).clone()), RawExpr::not((**b).clone()))
            }
            RawExpr::Or(a, b) => {
                RawExpr::and(RawExpr::not((**a).clone()), RawExpr::not((**b).clone()))
            }
        }
    }

    /// Push negations to the atoms, flatten, deduplicate and collapse
    /// singletons.
    pub fn normalize(&self) -> Expr {
        match self {
            RawExpr::Atom(name, polarity) => Expr::atom(name.clone(), *polarity),
            RawExpr::Not(e) => e.normalize().negate(),
            RawExpr::And(a, b) => Expr::junction2(true, a.normalize(), b.normalize()),
            RawExpr::Or(a, b) => Expr::junction2(false, a.normalize(), b.normalize()),
        }
    }
}

impl fmt::Display for RawExpr {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RawExpr::Atom(name, true) => write!(out, "{}", name),
            RawExpr::Atom(name, false) => write!(out, "~{}", name),
            RawExpr::Not(e) => write!(out, "~({})", e),
            RawExpr::And(a, b) => write!(out, "({} & {})", a, b),
            RawExpr::Or(a, b) => write!(out, "({} | {})", a, b),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_negate_one_level() {
        let e = RawExpr::and(RawExpr::atom("a"), RawExpr::atom("b"));
        assert_eq!(
            e.negate(),
            RawExpr::or(
                RawExpr::not(RawExpr::atom("a")),
                RawExpr::not(RawExpr::atom("b"))
            )
        );
        assert_eq!(RawExpr::not(e.clone()).negate(), e);
    }

    #[test]
    fn test_display() {
        let e = RawExpr::implies(RawExpr::atom("a"), RawExpr::atom("a"));
        assert_eq!("(~(a) | a)", e.to_string());
    }
}
