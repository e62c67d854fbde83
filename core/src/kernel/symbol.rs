//! # Symbols.
//!
//! Names of propositional variables.

use std::sync::Arc;

/// A variable name.
///
/// Cheap to clone; compared and hashed by content.
#[derive(Clone, Ord, PartialOrd, Hash, Eq, PartialEq)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// New symbol from this string.
    pub fn from_str(s: &str) -> Self {
        Symbol(Arc::from(s))
    }

    pub fn name(&self) -> &str {
        &*self.0
    }
}

mod impls {
    use super::*;
    use std::fmt;

    impl fmt::Debug for Symbol {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            write!(out, "{}", self.name())
        }
    }

    impl fmt::Display for Symbol {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            write!(out, "{}", self.name())
        }
    }

    impl std::borrow::Borrow<str> for Symbol {
        fn borrow(&self) -> &str {
            &*self.0
        }
    }

    impl<'a> From<&'a str> for Symbol {
        fn from(s: &str) -> Self {
            Symbol::from_str(s)
        }
    }

    impl From<String> for Symbol {
        fn from(s: String) -> Self {
            Symbol(Arc::from(s))
        }
    }
}
