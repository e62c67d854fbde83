//! # Coalescence
//!
//! Decides whether a formula is provable by growing a set of *tokens*,
//! places known to be derivable, until the goal `{formula}` is one of them.
//!
//! Tokens start from the identity axioms `{a, ~a}` found in the formula
//! (`spawn`). They are combined upward through the formula's connectives
//! (`fire`) and, when that stalls, widened by weakening (`project`).
//! The search gives up once a fixpoint is reached with tokens as large as
//! `max_dim`, one slot per distinct variable plus one.

use crate::{
    kernel::{Expr, ExprView::*, Place},
    logdebug, logtrace,
};
use fnv::{FnvHashMap as HM, FnvHashSet as HS};
use smallvec::SmallVec;
use std::{collections::BTreeSet, fmt};

/// Outcome of the search.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// `{formula}` was derived. The token set is the basis for
    /// `proof::extract`.
    Provable(TokenSet),
    NotProvable(NotProvable),
}

/// Why a formula was not proved.
///
/// This is an ordinary answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotProvable {
    /// No literal of the formula has its negation in the formula.
    NoComplementaryPair,
    /// A fixpoint was reached while tokens already had `max_dim` elements.
    Exhausted { max_dim: usize, rounds: usize },
}

/// Counters about one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of `fire` passes.
    pub rounds: usize,
    /// Number of `project` passes.
    pub projections: usize,
    /// Bound on the size of tokens.
    pub max_dim: usize,
}

/// The places derived by a successful search.
#[derive(Debug, Clone)]
pub struct TokenSet {
    goal: Expr,
    tokens: BTreeSet<Place>,
    stats: Stats,
}

/// Run the search on `formula`.
pub fn coalesce(formula: &Expr) -> Verdict {
    Coalescer::new(formula).run()
}

/// State of the search for one formula.
///
/// It indexes the goal formula once; the token set itself is threaded
/// through `spawn`, `fire` and `project`.
pub struct Coalescer<'a> {
    goal: &'a Expr,
    /// For each subexpression, its parents at every position where it occurs.
    parents: HM<&'a Expr, SmallVec<[&'a Expr; 2]>>,
    /// Distinct subexpressions of the goal.
    subexprs: Vec<&'a Expr>,
    max_dim: usize,
}

impl<'a> Coalescer<'a> {
    /// Index `goal`.
    pub fn new(goal: &'a Expr) -> Self {
        let mut parents: HM<&'a Expr, SmallVec<[&'a Expr; 2]>> = HM::default();
        for lineage in goal.lineage() {
            if let [e, parent, ..] = lineage[..] {
                let ps = parents.entry(e).or_default();
                if !ps.contains(&parent) {
                    ps.push(parent);
                }
            }
        }

        let subexprs: Vec<&'a Expr> = {
            let mut seen = HS::default();
            goal.subexprs().filter(|e| seen.insert(*e)).collect()
        };

        let max_dim = goal.names().len() + 1;
        logdebug!(
            "coalesce `{}`: {} distinct subexprs, max_dim={}",
            goal,
            subexprs.len(),
            max_dim
        );

        Self {
            goal,
            parents,
            subexprs,
            max_dim,
        }
    }

    /// Bound on the size of tokens.
    #[inline]
    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    /// Parents of `e` in the goal, over all positions of `e`.
    pub fn parents(&self, e: &Expr) -> &[&'a Expr] {
        match self.parents.get(e) {
            Some(ps) => &ps[..],
            None => &[],
        }
    }

    /// Identity axioms `{a, ~a}` for each literal `a` of the goal whose
    /// negation is also a literal of the goal.
    pub fn spawn(&self) -> BTreeSet<Place> {
        let atoms: HS<&Expr> = self.goal.atoms().collect();
        atoms
            .iter()
            .filter_map(|&a| {
                let na = a.negate();
                if atoms.contains(&na) {
                    Some(vec![a.clone(), na].into_iter().collect::<Place>())
                } else {
                    None
                }
            })
            .collect()
    }

    /// One expansion pass. Returns the places derived from `tokens` that
    /// were not already in it.
    ///
    /// For a token `P`, an element `e` and a parent `p` of `e`, with
    /// `rest = P - {e}`, `rest ∪ {p}` is derived if `rest ∪ {c}` is a token
    /// for every child `c` of `p` (conjunction) or for some child
    /// (disjunction). Premises are checked against `tokens` only.
    pub fn fire(&self, tokens: &BTreeSet<Place>) -> BTreeSet<Place> {
        let mut fresh = BTreeSet::new();
        for token in tokens {
            for e in token {
                let parents = self.parents(e);
                if parents.is_empty() {
                    continue;
                }
                let rest = token.without(e);
                for &parent in parents {
                    let derived = rest.with(parent);
                    if tokens.contains(&derived) || fresh.contains(&derived) {
                        continue;
                    }
                    let ok = match parent.view() {
                        EAnd(cs) => cs.iter().all(|c| tokens.contains(&rest.with(c))),
                        EOr(cs) => cs.iter().any(|c| tokens.contains(&rest.with(c))),
                        EAtom(..) => false,
                    };
                    if ok {
                        logtrace!("fire: {:?} => {:?}", token, derived);
                        fresh.insert(derived);
                    }
                }
            }
        }
        fresh
    }

    /// Weakening pass: `P ∪ {a}` for every token `P` and every
    /// subexpression `a` of the goal. Returns only the new places.
    pub fn project(&self, tokens: &BTreeSet<Place>) -> BTreeSet<Place> {
        let mut fresh = BTreeSet::new();
        for token in tokens {
            for &a in &self.subexprs {
                if token.contains(a) {
                    continue;
                }
                let p = token.with(a);
                if !tokens.contains(&p) {
                    fresh.insert(p);
                }
            }
        }
        fresh
    }

    /// Run to completion.
    pub fn run(&self) -> Verdict {
        let goal = Place::singleton(self.goal.clone());
        let mut tokens = self.spawn();
        if tokens.is_empty() {
            logdebug!("coalesce: no complementary pair in `{}`", self.goal);
            return Verdict::NotProvable(NotProvable::NoComplementaryPair);
        }

        let mut stats = Stats {
            max_dim: self.max_dim,
            ..Stats::default()
        };
        // did the last `fire` pass derive nothing?
        let mut stalled = false;

        while !tokens.contains(&goal) {
            if stalled {
                let cur_dim = tokens.iter().map(Place::len).max().unwrap_or(0);
                if cur_dim >= self.max_dim {
                    logdebug!(
                        "coalesce: exhausted at dim {} after {} rounds ({} tokens)",
                        cur_dim,
                        stats.rounds,
                        tokens.len()
                    );
                    return Verdict::NotProvable(NotProvable::Exhausted {
                        max_dim: self.max_dim,
                        rounds: stats.rounds,
                    });
                }
                let projected = self.project(&tokens);
                logdebug!(
                    "coalesce: project at dim {}, {} new tokens",
                    cur_dim,
                    projected.len()
                );
                stats.projections += 1;
                tokens.extend(projected);
            }

            stats.rounds += 1;
            let fresh = self.fire(&tokens);
            logtrace!("coalesce: round {}, {} new tokens", stats.rounds, fresh.len());
            stalled = fresh.is_empty();
            tokens.extend(fresh);
        }

        logdebug!(
            "coalesce: proved `{}` in {} rounds ({} tokens)",
            self.goal,
            stats.rounds,
            tokens.len()
        );
        Verdict::Provable(TokenSet {
            goal: self.goal.clone(),
            tokens,
            stats,
        })
    }
}

impl Verdict {
    pub fn is_provable(&self) -> bool {
        matches!(self, Verdict::Provable(_))
    }

    pub fn tokens(&self) -> Option<&TokenSet> {
        match self {
            Verdict::Provable(t) => Some(t),
            Verdict::NotProvable(_) => None,
        }
    }

    pub fn into_tokens(self) -> Option<TokenSet> {
        match self {
            Verdict::Provable(t) => Some(t),
            Verdict::NotProvable(_) => None,
        }
    }
}

impl TokenSet {
    /// Build a token set from places obtained elsewhere, for example to
    /// check them with `proof::extract`.
    pub fn new<I>(goal: Expr, tokens: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        let max_dim = goal.names().len() + 1;
        TokenSet {
            goal,
            tokens: tokens.into_iter().collect(),
            stats: Stats {
                max_dim,
                ..Stats::default()
            },
        }
    }

    /// The formula that was proved.
    pub fn goal(&self) -> &Expr {
        &self.goal
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, p: &Place) -> bool {
        self.tokens.contains(p)
    }

    /// Tokens, in a deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.tokens.iter()
    }
}

impl fmt::Display for NotProvable {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotProvable::NoComplementaryPair => {
                write!(out, "no literal occurs together with its negation")
            }
            NotProvable::Exhausted { max_dim, rounds } => write!(
                out,
                "search exhausted at dimension {} after {} rounds",
                max_dim, rounds
            ),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(
            out,
            "{} rounds, {} projections, max_dim={}",
            self.rounds, self.projections, self.max_dim
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kernel::RawExpr;

    fn a() -> RawExpr {
        RawExpr::atom("a")
    }
    fn b() -> RawExpr {
        RawExpr::atom("b")
    }

    #[test]
    fn test_spawn_axiom() {
        let e = RawExpr::implies(a(), a()).normalize();
        let c = Coalescer::new(&e);
        let spawned = c.spawn();
        let expected: Place = vec![Expr::atom("a", true), Expr::atom("a", false)]
            .into_iter()
            .collect();
        assert_eq!(spawned.len(), 1);
        assert!(spawned.contains(&expected));
    }

    #[test]
    fn test_spawn_empty() {
        let e = RawExpr::or(a(), b()).normalize();
        assert!(Coalescer::new(&e).spawn().is_empty());
        assert!(matches!(
            coalesce(&e),
            Verdict::NotProvable(NotProvable::NoComplementaryPair)
        ));
    }

    #[test]
    fn test_parents_over_positions() {
        // a occurs in two conjunctions
        let e = RawExpr::or(
            RawExpr::and(a(), b()),
            RawExpr::and(a(), RawExpr::not(b())),
        )
        .normalize();
        let c = Coalescer::new(&e);
        assert_eq!(c.parents(&Expr::atom("a", true)).len(), 2);
        assert_eq!(c.parents(&Expr::atom("b", true)).len(), 1);
        assert!(c.parents(&e).is_empty());
        assert_eq!(c.max_dim(), 3);
    }

    #[test]
    fn test_fire_or() {
        let e = RawExpr::implies(a(), a()).normalize();
        let c = Coalescer::new(&e);
        let tokens = c.spawn();
        let fresh = c.fire(&tokens);
        // {a | ~a, ~a} and {a | ~a, a}
        assert_eq!(fresh.len(), 2);
        assert!(fresh.iter().all(|p| p.contains(&e) && p.len() == 2));
        let mut all = tokens;
        all.extend(fresh);
        assert!(c.fire(&all).contains(&Place::singleton(e.clone())));
    }

    #[test]
    fn test_fire_is_monotone_and_and_needs_all() {
        // a & ~a: the conjunction needs both {a, ~a} and {~a}
        let e = RawExpr::and(a(), RawExpr::not(a())).normalize();
        let c = Coalescer::new(&e);
        let tokens = c.spawn();
        assert!(c.fire(&tokens).is_empty());
    }

    #[test]
    fn test_project_adds_one() {
        let e = RawExpr::and(a(), RawExpr::not(a())).normalize();
        let c = Coalescer::new(&e);
        let tokens = c.spawn();
        let projected = c.project(&tokens);
        assert_eq!(projected.len(), 1);
        assert!(projected.iter().all(|p| p.len() == 3 && p.contains(&e)));
    }

    #[test]
    fn test_contradiction_exhausts() {
        let e = RawExpr::and(a(), RawExpr::not(a())).normalize();
        match coalesce(&e) {
            Verdict::NotProvable(NotProvable::Exhausted { max_dim, .. }) => assert_eq!(max_dim, 2),
            v => panic!("unexpected verdict {:?}", v),
        }
    }

    #[test]
    fn test_stats() {
        let e = RawExpr::implies(a(), a()).normalize();
        let tokens = coalesce(&e).into_tokens().unwrap();
        assert_eq!(tokens.stats().rounds, 2);
        assert_eq!(tokens.stats().projections, 0);
        assert_eq!(tokens.goal(), &e);
        assert!(tokens.contains(&Place::singleton(e.clone())));
    }
}
