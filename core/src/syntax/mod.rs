//! A basic syntax for parsing formulas.
//!
//! ```text
//! f ::= name | ~f | !f | ¬f | (f)
//!     | f & f | f | f | f > f | f -> f | f = f | f <-> f
//! ```
//!
//! `a > b` stands for `~a | b` and `a = b` for `(~a | b) & (a | ~b)`.
//! `#` starts a comment that runs to the end of the line.

pub mod lexer;
pub mod parser;

use lexer::{Lexer, Tok};
pub use parser::{parse_expr, parse_formula, Parser};
