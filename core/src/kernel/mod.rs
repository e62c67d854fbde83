//! Kernel: formulas and sequents.

pub type Ref<T> = std::sync::Arc<T>;

pub mod expr;
pub mod place;
pub mod raw;
pub mod symbol;

pub use expr::{Expr, ExprView, Exprs, Lineage, Subexprs};
pub use place::Place;
pub use raw::RawExpr;
pub use symbol::Symbol;
pub use ExprView::*;
