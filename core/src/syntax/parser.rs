//! # Formula parser
//!
//! Recursive descent over the tokens of `Lexer`. Binary connectives all
//! have the same precedence and associate to the right, so `a & b | c`
//! reads as `a & (b | c)`. Negation binds tighter than any connective.

use {
    super::{Lexer, Tok},
    crate::{kernel::RawExpr, Error, Expr, Result},
};

/// Parse the string into a raw expression.
pub fn parse_expr(s: &str) -> Result<RawExpr> {
    let mut p = Parser::new(s);
    p.parse_top()
}

/// Parse the string, and normalize the result.
pub fn parse_formula(s: &str) -> Result<Expr> {
    Ok(parse_expr(s)?.normalize())
}

/// Parser for formulas.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

macro_rules! perror {
    ($self: ident, $fmt: literal) => {
        Error::new_parse(format!($fmt), $self.lexer.cur_pos())
    };
    ($self: ident, $fmt: literal, $($arg:expr ),*) => {
        Error::new_parse(format!($fmt, $($arg),*), $self.lexer.cur_pos())
    };
}

impl<'a> Parser<'a> {
    /// New parser for `src`.
    pub fn new(src: &'a str) -> Self {
        Self {
            lexer: Lexer::new(src),
        }
    }

    /// Parse a whole formula, and check that nothing remains.
    pub fn parse_top(&mut self) -> Result<RawExpr> {
        if self.lexer.cur() == Tok::EOF {
            return Err(perror!(self, "expected a formula, got empty input"));
        }
        let e = self.parse_bin()?;
        match self.lexer.cur() {
            Tok::EOF => Ok(e),
            Tok::RPAREN => Err(perror!(self, "unmatched `)`")),
            t => Err(perror!(self, "expected a connective or end of input, got {:?}", t)),
        }
    }

    // unary (op bin)?
    fn parse_bin(&mut self) -> Result<RawExpr> {
        let lhs = self.parse_unary()?;
        let mk: fn(RawExpr, RawExpr) -> RawExpr = match self.lexer.cur() {
            Tok::AND => RawExpr::and,
            Tok::OR => RawExpr::or,
            Tok::IMPLIES => RawExpr::implies,
            Tok::IFF => RawExpr::iff,
            _ => return Ok(lhs),
        };
        self.lexer.consume_cur();
        let rhs = self.parse_bin()?;
        Ok(mk(lhs, rhs))
    }

    fn parse_unary(&mut self) -> Result<RawExpr> {
        match self.lexer.cur() {
            Tok::NOT => {
                self.lexer.consume_cur();
                let e = self.parse_unary()?;
                Ok(RawExpr::not(e))
            }
            Tok::LPAREN => {
                self.lexer.consume_cur();
                let e = self.parse_bin()?;
                self.lexer.eat(Tok::RPAREN, "to close `(`")?;
                Ok(e)
            }
            Tok::SYM(s) => {
                self.lexer.consume_cur();
                Ok(RawExpr::atom(s))
            }
            Tok::EOF => Err(perror!(self, "unexpected end of input, expected a formula")),
            Tok::ERROR(c) => Err(perror!(self, "invalid character {:?}", c)),
            t => Err(perror!(self, "expected a formula, got {:?}", t)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{position::Position, ErrorKind};

    fn a() -> RawExpr {
        RawExpr::atom("a")
    }
    fn b() -> RawExpr {
        RawExpr::atom("b")
    }
    fn c() -> RawExpr {
        RawExpr::atom("c")
    }

    #[test]
    fn test_parse_atoms() {
        assert_eq!(parse_expr("a").unwrap(), a());
        assert_eq!(parse_expr("  (a) ").unwrap(), a());
        assert_eq!(parse_expr("~a").unwrap(), RawExpr::not(a()));
        assert_eq!(parse_expr("¬!a").unwrap(), RawExpr::not(RawExpr::not(a())));
    }

    #[test]
    fn test_parse_sugar() {
        assert_eq!(parse_expr("a > b").unwrap(), RawExpr::implies(a(), b()));
        assert_eq!(parse_expr("a -> b").unwrap(), RawExpr::implies(a(), b()));
        assert_eq!(parse_expr("a = b").unwrap(), RawExpr::iff(a(), b()));
        assert_eq!(parse_expr("a <-> b").unwrap(), RawExpr::iff(a(), b()));
    }

    #[test]
    fn test_right_assoc() {
        assert_eq!(
            parse_expr("a & b | c").unwrap(),
            RawExpr::and(a(), RawExpr::or(b(), c()))
        );
        assert_eq!(
            parse_expr("(a & b) | c").unwrap(),
            RawExpr::or(RawExpr::and(a(), b()), c())
        );
        assert_eq!(
            parse_expr("a > b > c").unwrap(),
            RawExpr::implies(a(), RawExpr::implies(b(), c()))
        );
        // negation binds tighter
        assert_eq!(
            parse_expr("~a | b").unwrap(),
            RawExpr::or(RawExpr::not(a()), b())
        );
    }

    #[test]
    fn test_parse_formula() {
        let e1 = parse_formula("a > a").unwrap();
        let e2 = parse_formula("a | ~a").unwrap();
        assert_eq!(e1, e2);
        assert_eq!(e1.to_string(), "~a | a");
        let e3 = parse_formula("# some comment\n~(a & b)").unwrap();
        assert_eq!(e3, parse_formula("~a | ~b").unwrap());
    }

    #[test]
    fn test_parse_errors() {
        for s in &["", "a &", "(a | b", "a b", "a | )", "a $ b", "& a", "a)"] {
            let e = parse_expr(s).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::Parse, "for {:?}", s);
        }
    }

    #[test]
    fn test_parse_error_pos() {
        let e = parse_expr("a &\n (b | )").unwrap_err();
        match &e.msg {
            crate::error::ErrorMsg::EParse { pos, .. } => {
                assert_eq!(*pos, Position { line: 2, col: 7 })
            }
            m => panic!("unexpected message {:?}", m),
        }
        assert!(e.to_string().starts_with("parse error at 2:7"));
    }
}
