//! # Coalescence core library.
//!
//! A decision procedure for classical propositional validity, and
//! extraction of proof certificates from its search state.
//!
//! It contains:
//! - formulas in negation normal form, and places (sequents) (in `kernel`)
//! - the coalescence search itself (in `algo`)
//! - proof graphs and their printers (in `proof`)
//! - a small syntax for formulas (in `syntax`)

// unsafe needs to be visible
#![deny(unsafe_code)]

pub mod algo;
pub mod error;
pub mod kernel;
pub mod position;
pub mod proof;
pub mod syntax;

pub use algo::{coalesce, Coalescer, NotProvable, Stats, TokenSet, Verdict};
pub use error::{Error, ErrorKind, Result};
pub use kernel::ExprView::*;
pub use kernel::{Expr, ExprView, Place, RawExpr, Symbol};
pub use proof::{extract, print_proof, proof_to_dot, prove, NodeIdx, Proof, Rule};
pub use syntax::{parse_expr, parse_formula};

pub(crate) mod macros {
    #[allow(unused_macros)]
    #[macro_export]
    macro_rules! ignore{
        () => { () };
        ($t :expr) => {{
            #[allow(unused_value)]
            let _ = $t;
        } };
        ($t0: expr, $($t:expr),*) => {{
            #[allow(unused_value)]
            let _ = $t0;
            $crate::ignore!($($t),*)
        }}
    }

    #[macro_export]
    macro_rules! logtrace{
        ($($t:expr),*) => {{
            {
                #[cfg(feature="logging")]
                log::trace!($($t),*)
            }

            {
                #[cfg(not(feature="logging"))]
                $crate::ignore!($($t),*)
            }
        }}
    }

    #[macro_export]
    macro_rules! logdebug{
        ($($t:expr),*) => {{
            {
                #[cfg(feature="logging")]
                log::debug!($($t),*)
            }

            {
                #[cfg(not(feature="logging"))]
                $crate::ignore!($($t),*)
            }
        }}
    }

    #[macro_export]
    macro_rules! logerr{
        ($($t:expr),*) => {{
            {
                #[cfg(feature="logging")]
                log::error!($($t),*);
            }

            {
                #[cfg(not(feature="logging"))]
                $crate::ignore!($($t),*);
            }
        }}
    }
}
