//! Algorithms that work on formulas of the kernel.

pub mod coalesce;

pub use coalesce::{coalesce, Coalescer, NotProvable, Stats, TokenSet, Verdict};
