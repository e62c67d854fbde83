//! # Canonical expressions
//!
//! An `Expr` is always in normal form: negations only occur on atoms,
//! conjunctions and disjunctions are flattened, their children are
//! deduplicated and sorted, and each has at least two children.
//! There is no way to build an `Expr` that violates this, so the
//! engine never has to check it.

use super::{RawExpr, Ref, Symbol};
use smallvec::{smallvec, SmallVec};
use std::{collections::BTreeSet, fmt};

/// A normalized propositional formula.
///
/// The expression is refcounted and is thus cheaply clonable.
/// Equality, ordering and hashing are structural.
#[derive(Clone)]
pub struct Expr(pub(super) Ref<ExprView>);

/// Small vector of exprs, sorted and without duplicates when it
/// is the children of a node.
pub type Exprs = SmallVec<[Expr; 3]>;

/// The public view of an expression's root.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ExprView {
    /// A variable with its polarity. `false` means negated.
    EAtom(Symbol, bool),
    EAnd(Exprs),
    EOr(Exprs),
}

pub use ExprView::*;

impl Expr {
    /// View the expression's root.
    #[inline]
    pub fn view(&self) -> &ExprView {
        &self.0
    }

    #[inline]
    fn make_(v: ExprView) -> Self {
        Expr(Ref::new(v))
    }

    /// Make a literal.
    pub fn atom(name: impl Into<Symbol>, polarity: bool) -> Self {
        Expr::make_(EAtom(name.into(), polarity))
    }

    /// Conjunction of the given expressions.
    ///
    /// Returns `None` if `children` is empty. A single (deduplicated) child
    /// is returned as is.
    pub fn and<I>(children: I) -> Option<Self>
    where
        I: IntoIterator<Item = Expr>,
    {
        Self::junction_iter_(true, children)
    }

    /// Disjunction of the given expressions.
    ///
    /// Returns `None` if `children` is empty.
    pub fn or<I>(children: I) -> Option<Self>
    where
        I: IntoIterator<Item = Expr>,
    {
        Self::junction_iter_(false, children)
    }

    fn junction_iter_<I>(conj: bool, children: I) -> Option<Self>
    where
        I: IntoIterator<Item = Expr>,
    {
        let mut v: Exprs = smallvec![];
        for c in children {
            push_flat_(&mut v, conj, c);
        }
        if v.is_empty() {
            None
        } else {
            Some(Self::junction_(conj, v))
        }
    }

    /// Binary conjunction (`conj`) or disjunction, used by normalization.
    pub(super) fn junction2(conj: bool, a: Expr, b: Expr) -> Self {
        let mut v: Exprs = smallvec![];
        push_flat_(&mut v, conj, a);
        push_flat_(&mut v, conj, b);
        Self::junction_(conj, v)
    }

    // precondition: `v` is not empty and already flattened
    fn junction_(conj: bool, mut v: Exprs) -> Self {
        debug_assert!(!v.is_empty());
        v.sort_unstable();
        v.dedup();
        if v.len() == 1 {
            v.swap_remove(0)
        } else if conj {
            Expr::make_(EAnd(v))
        } else {
            Expr::make_(EOr(v))
        }
    }

    /// The De Morgan dual of this expression.
    ///
    /// This swaps `And` and `Or` and flips every atom, all the way down,
    /// which is the only negation that stays in normal form. It coincides
    /// with `self.to_raw().negate().normalize()`.
    pub fn negate(&self) -> Self {
        match self.view() {
            EAtom(name, polarity) => Expr::make_(EAtom(name.clone(), !polarity)),
            EAnd(cs) => Expr::make_(EOr(negate_all_(cs))),
            EOr(cs) => Expr::make_(EAnd(negate_all_(cs))),
        }
    }

    /// Is this a literal?
    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self.view(), EAtom(..))
    }

    /// View as a literal.
    pub fn as_atom(&self) -> Option<(&Symbol, bool)> {
        match self.view() {
            EAtom(name, polarity) => Some((name, *polarity)),
            _ => None,
        }
    }

    /// Immediate children. Empty for literals.
    pub fn children(&self) -> &[Expr] {
        match self.view() {
            EAtom(..) => &[],
            EAnd(cs) | EOr(cs) => &cs[..],
        }
    }

    /// Is `e` one of the immediate children of `self`?
    pub fn has_child(&self, e: &Expr) -> bool {
        self.children().binary_search(e).is_ok()
    }

    /// Lazy preorder traversal of the expression and all its descendants.
    ///
    /// A subexpression occurring at several positions is yielded once per
    /// position.
    pub fn subexprs(&self) -> Subexprs {
        Subexprs { st: vec![self] }
    }

    /// For each position in the tree, the chain of ancestors from the
    /// subexpression at that position up to `self`.
    ///
    /// Element `0` is the subexpression, element `1` (if any) its parent at
    /// this position, and the last element is `self`.
    pub fn lineage(&self) -> Lineage {
        Lineage {
            st: vec![smallvec![self]],
        }
    }

    /// The literals occurring in the expression (once per position).
    pub fn atoms(&self) -> impl Iterator<Item = &Expr> {
        self.subexprs().filter(|e| e.is_atom())
    }

    /// Distinct variable names.
    pub fn names(&self) -> BTreeSet<Symbol> {
        self.atoms()
            .filter_map(|e| e.as_atom().map(|(name, _)| name.clone()))
            .collect()
    }

    /// Convert back to the raw form, as a chain of binary connectives.
    pub fn to_raw(&self) -> RawExpr {
        match self.view() {
            EAtom(name, polarity) => RawExpr::Atom(name.clone(), *polarity),
            EAnd(cs) => raw_chain_(cs, RawExpr::and),
            EOr(cs) => raw_chain_(cs, RawExpr::or),
        }
    }

    // print, with parenthesis around compound expressions if `nested`
    fn pp_(&self, out: &mut fmt::Formatter, nested: bool) -> fmt::Result {
        let (op, cs) = match self.view() {
            EAtom(name, true) => return write!(out, "{}", name),
            EAtom(name, false) => return write!(out, "~{}", name),
            EAnd(cs) => (" & ", cs),
            EOr(cs) => (" | ", cs),
        };
        if nested {
            write!(out, "(")?;
        }
        for (i, c) in cs.iter().enumerate() {
            if i > 0 {
                write!(out, "{}", op)?;
            }
            c.pp_(out, true)?;
        }
        if nested {
            write!(out, ")")?;
        }
        Ok(())
    }
}

// add `c` to the children of a new junction, flattening nested ones.
fn push_flat_(v: &mut Exprs, conj: bool, c: Expr) {
    if let (true, EAnd(cs)) | (false, EOr(cs)) = (conj, c.view()) {
        v.extend(cs.iter().cloned());
        return;
    }
    v.push(c);
}

fn negate_all_(cs: &Exprs) -> Exprs {
    // children of an `And` are never `And`, so their duals are never `Or`:
    // no flattening needed, only re-sorting.
    let mut v: Exprs = cs.iter().map(|c| c.negate()).collect();
    v.sort_unstable();
    v
}

fn raw_chain_(cs: &Exprs, f: fn(RawExpr, RawExpr) -> RawExpr) -> RawExpr {
    // junctions have at least two children
    cs[1..]
        .iter()
        .fold(cs[0].to_raw(), |acc, c| f(acc, c.to_raw()))
}

/// Iterator over subexpressions, in preorder.
pub struct Subexprs<'a> {
    st: Vec<&'a Expr>, // stack for traversal
}

impl<'a> Iterator for Subexprs<'a> {
    type Item = &'a Expr;
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.st.pop()?;
        // push in reverse so that the first child is explored first
        self.st.extend(e.children().iter().rev());
        Some(e)
    }
}

type Path<'a> = SmallVec<[&'a Expr; 8]>;

/// Iterator over the lineage of each position, in preorder.
pub struct Lineage<'a> {
    /// Paths from the root, not yet explored.
    st: Vec<Path<'a>>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = Vec<&'a Expr>;
    fn next(&mut self) -> Option<Self::Item> {
        let path = self.st.pop()?;
        let e: &'a Expr = *path.last()?;
        for c in e.children().iter().rev() {
            let mut p = path.clone();
            p.push(c);
            self.st.push(p);
        }
        Some(path.into_iter().rev().collect())
    }
}

mod impls {
    use super::*;
    use std::cmp::Ordering;

    impl fmt::Display for Expr {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            self.pp_(out, false)
        }
    }

    impl fmt::Debug for Expr {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            self.pp_(out, true)
        }
    }

    impl fmt::Debug for ExprView {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            match self {
                EAtom(name, polarity) => write!(out, "EAtom({}, {})", name, polarity),
                EAnd(cs) => write!(out, "EAnd({:?})", cs),
                EOr(cs) => write!(out, "EOr({:?})", cs),
            }
        }
    }

    impl Eq for Expr {}
    impl PartialEq for Expr {
        fn eq(&self, other: &Self) -> bool {
            Ref::ptr_eq(&self.0, &other.0) || self.view() == other.view()
        }
    }

    impl PartialOrd for Expr {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Expr {
        fn cmp(&self, other: &Self) -> Ordering {
            if Ref::ptr_eq(&self.0, &other.0) {
                Ordering::Equal
            } else {
                self.view().cmp(other.view())
            }
        }
    }

    impl std::hash::Hash for Expr {
        fn hash<H: std::hash::Hasher>(&self, h: &mut H) {
            self.view().hash(h)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn a() -> Expr {
        Expr::atom("a", true)
    }
    fn b() -> Expr {
        Expr::atom("b", true)
    }

    #[test]
    fn test_and_flattens() {
        let ab = Expr::and([a(), b()]).unwrap();
        let c = Expr::atom("c", false);
        let e = Expr::and([c.clone(), ab.clone()]).unwrap();
        assert_eq!(e.children().len(), 3);
        assert_eq!(e, Expr::and([b(), c, a()]).unwrap());
    }

    #[test]
    fn test_singleton_collapses() {
        assert_eq!(Expr::or([a(), a()]).unwrap(), a());
        assert!(Expr::and(Vec::new()).is_none());
    }

    #[test]
    fn test_negate_dual() {
        let e = Expr::or([a().negate(), b()]).unwrap();
        let ne = e.negate();
        assert!(matches!(ne.view(), EAnd(..)));
        assert!(ne.has_child(&a()));
        assert!(ne.has_child(&b().negate()));
        assert_eq!(ne.negate(), e);
    }

    #[test]
    fn test_subexprs_preorder() {
        let e = Expr::or([a().negate(), a()]).unwrap();
        let subs: Vec<_> = e.subexprs().collect();
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0], &e);
        // restartable
        assert_eq!(e.subexprs().count(), 3);
    }

    #[test]
    fn test_lineage_anchors_positions() {
        // `a` occurs under two different conjunctions
        let l = Expr::and([a(), b()]).unwrap();
        let r = Expr::and([a(), b().negate()]).unwrap();
        let e = Expr::or([l.clone(), r.clone()]).unwrap();
        let parents_of_a: Vec<&Expr> = e
            .lineage()
            .filter(|lin| lin[0] == &a())
            .map(|lin| lin[1])
            .collect();
        assert_eq!(parents_of_a.len(), 2);
        assert!(parents_of_a.contains(&&l));
        assert!(parents_of_a.contains(&&r));
        for lin in e.lineage() {
            assert_eq!(*lin.last().unwrap(), &e);
        }
    }

    #[test]
    fn test_names() {
        let e = Expr::or([a().negate(), a(), b()]).unwrap();
        assert_eq!(e.names().len(), 2);
        assert_eq!(e.atoms().count(), 3);
    }

    #[test]
    fn test_display() {
        let e = Expr::or([Expr::and([a(), b()]).unwrap(), a().negate()]).unwrap();
        assert_eq!("~a | (a & b)", e.to_string());
    }

    #[test]
    fn test_send_sync() {
        fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<Expr>();
    }
}
