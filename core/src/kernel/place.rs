//! # Places
//!
//! A place is a sequent: a finite set of formulas that are jointly
//! derivable. Places are plain values, compared as sets.

use super::Expr;
use smallvec::SmallVec;
use std::fmt;

/// A set of expressions, kept sorted and without duplicates.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Place(SmallVec<[Expr; 4]>);

impl Place {
    /// The empty place.
    pub fn new() -> Self {
        Place(SmallVec::new())
    }

    /// `{e}`.
    pub fn singleton(e: Expr) -> Self {
        let mut v = SmallVec::new();
        v.push(e);
        Place(v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Elements, in order.
    pub fn iter(&self) -> std::slice::Iter<Expr> {
        self.0.iter()
    }

    pub fn contains(&self, e: &Expr) -> bool {
        self.0.binary_search(e).is_ok()
    }

    /// Insert `e`, returns `true` if it was not present.
    pub fn insert(&mut self, e: Expr) -> bool {
        match self.0.binary_search(&e) {
            Ok(_) => false,
            Err(i) => {
                self.0.insert(i, e);
                true
            }
        }
    }

    /// Remove `e`, returns `true` if it was present.
    pub fn remove(&mut self, e: &Expr) -> bool {
        match self.0.binary_search(e) {
            Ok(i) => {
                self.0.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// `self ∪ {e}`.
    pub fn with(&self, e: &Expr) -> Self {
        let mut p = self.clone();
        p.insert(e.clone());
        p
    }

    /// `self - {e}`.
    pub fn without(&self, e: &Expr) -> Self {
        let mut p = self.clone();
        p.remove(e);
        p
    }

    /// Is every element of `other` in `self`?
    pub fn is_superset(&self, other: &Place) -> bool {
        other.len() <= self.len() && other.iter().all(|e| self.contains(e))
    }

    /// Elements of `self` that are not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Place) -> impl Iterator<Item = &'a Expr> + 'a {
        self.0.iter().filter(move |e| !other.contains(e))
    }

    /// A literal of this place whose negation is also in this place.
    pub fn complementary_pair(&self) -> Option<(&Expr, Expr)> {
        self.0
            .iter()
            .filter(|e| e.is_atom())
            .find_map(|e| {
                let ne = e.negate();
                if self.contains(&ne) {
                    Some((e, ne))
                } else {
                    None
                }
            })
    }

    /// Does this place hold a literal together with its negation?
    ///
    /// Such a place is an identity axiom.
    pub fn is_axiom(&self) -> bool {
        self.complementary_pair().is_some()
    }
}

impl std::iter::FromIterator<Expr> for Place {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        let mut v: SmallVec<[Expr; 4]> = iter.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Place(v)
    }
}

impl<'a> IntoIterator for &'a Place {
    type Item = &'a Expr;
    type IntoIter = std::slice::Iter<'a, Expr>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

mod impls {
    use super::*;

    impl fmt::Display for Place {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            for (i, e) in self.0.iter().enumerate() {
                if i > 0 {
                    write!(out, ", ")?;
                }
                write!(out, "{:?}", e)?;
            }
            Ok(())
        }
    }

    impl fmt::Debug for Place {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            write!(out, "{{{}}}", self)
        }
    }
}
