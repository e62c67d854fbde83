//! # Lexing for formulas

pub use crate::position::Position;
use crate::{Error, Result};

/// A token of the language. This is zero-copy.
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) enum Tok<'a> {
    LPAREN,
    RPAREN,
    /// `~`, `!` or `¬`
    NOT,
    AND,
    OR,
    /// `>` or `->`
    IMPLIES,
    /// `=` or `<->`
    IFF,
    SYM(&'a str),
    ERROR(char),
    EOF,
}

/// Lexer for formulas.
pub(super) struct Lexer<'a> {
    src: &'a str,
    /// Index in `src`
    i: usize,
    /// Position is `src`
    pos: Position,
    /// Position of the start of the current token
    tok_pos: Position,
    is_done: bool,
    cur_: Option<Tok<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            i: 0,
            pos: Position::START,
            tok_pos: Position::START,
            is_done: false,
            cur_: None,
        }
    }

    /// Position of the current token.
    pub fn cur_pos(&self) -> Position {
        self.tok_pos
    }

    // consume `n` bytes of ascii, on a single line
    fn skip_ascii_(&mut self, n: usize) {
        self.i += n;
        self.pos.col += n;
    }

    /// Skip the rest of the line.
    fn rest_of_line(&mut self) {
        let bytes = self.src.as_bytes();
        while self.i < bytes.len() && bytes[self.i] != b'\n' {
            self.i += 1;
            self.pos.col += 1;
        }
    }

    fn next_(&mut self) -> Tok<'a> {
        use Tok::*;
        assert!(!self.is_done);

        let bytes = self.src.as_bytes();

        // skip whitespace
        while self.i < bytes.len() {
            let c = bytes[self.i];
            if c == b'#' {
                self.rest_of_line();
            } else if c == b' ' || c == b'\t' || c == b'\r' {
                self.skip_ascii_(1);
            } else if c == b'\n' {
                self.pos = self.pos.advance('\n');
                self.i += 1;
            } else {
                break;
            }
        }

        self.tok_pos = self.pos;
        if self.i >= bytes.len() {
            self.is_done = true;
            return EOF;
        }

        let rest = &self.src[self.i..];
        let c = bytes[self.i];
        if c == b'(' {
            self.skip_ascii_(1);
            LPAREN
        } else if c == b')' {
            self.skip_ascii_(1);
            RPAREN
        } else if c == b'~' || c == b'!' {
            self.skip_ascii_(1);
            NOT
        } else if c == b'&' {
            self.skip_ascii_(1);
            AND
        } else if c == b'|' {
            self.skip_ascii_(1);
            OR
        } else if c == b'>' {
            self.skip_ascii_(1);
            IMPLIES
        } else if c == b'=' {
            self.skip_ascii_(1);
            IFF
        } else if rest.starts_with("->") {
            self.skip_ascii_(2);
            IMPLIES
        } else if rest.starts_with("<->") {
            self.skip_ascii_(3);
            IFF
        } else if rest.starts_with('¬') {
            self.i += '¬'.len_utf8();
            self.pos = self.pos.advance('¬');
            NOT
        } else if c.is_ascii_alphabetic() {
            let mut j = self.i + 1;
            while j < bytes.len() {
                let c2 = bytes[j];
                if c2.is_ascii_alphanumeric() || c2 == b'_' {
                    j += 1
                } else {
                    break;
                }
            }
            let slice = &self.src[self.i..j];
            self.skip_ascii_(j - self.i);
            SYM(slice)
        } else {
            // Error token!
            let c = rest.chars().next().unwrap_or('\u{FFFD}');
            self.i += c.len_utf8();
            self.pos = self.pos.advance(c);
            ERROR(c)
        }
    }

    /// get next token.
    pub fn next(&mut self) -> Tok<'a> {
        let t = self.next_();
        self.cur_ = Some(t);
        t
    }

    /// Current token.
    pub fn cur(&mut self) -> Tok<'a> {
        if let Some(c) = self.cur_ {
            c
        } else {
            self.next()
        }
    }

    pub fn consume_cur(&mut self) -> Tok<'a> {
        let t = self.cur();
        if t != Tok::EOF {
            self.next();
        }
        t
    }

    /// Expect the token `t`, and consume it; or return an error.
    ///
    /// The error message should be a position in the grammar,
    /// like "after `(`"
    pub fn eat(&mut self, t: Tok, errmsg: &str) -> Result<()> {
        let t2 = self.cur();
        if t2 == t {
            self.consume_cur();
            Ok(())
        } else {
            Err(Error::new_parse(
                format!("expected {:?} {}, got {:?}", t, errmsg, t2),
                self.tok_pos,
            ))
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Tok<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done {
            None
        } else {
            Some(self.next())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lexer1() {
        use Tok::*;
        let lexer = Lexer::new(" foo & ~bar13 | (x_1 > !y) ");
        let toks = lexer.collect::<Vec<_>>();
        assert_eq!(
            toks,
            vec![
                SYM("foo"),
                AND,
                NOT,
                SYM("bar13"),
                OR,
                LPAREN,
                SYM("x_1"),
                IMPLIES,
                NOT,
                SYM("y"),
                RPAREN,
                EOF
            ]
        );
    }

    #[test]
    fn test_lexer2() {
        use Tok::*;
        let lexer = Lexer::new("a->b<->¬c # comment ) (\n = d$");
        let toks = lexer.collect::<Vec<_>>();
        assert_eq!(
            vec![
                SYM("a"),
                IMPLIES,
                SYM("b"),
                IFF,
                NOT,
                SYM("c"),
                IFF,
                SYM("d"),
                ERROR('$'),
            ],
            toks[..9].to_vec()
        );
    }

    #[test]
    fn test_lex_positions() {
        let mut lexer = Lexer::new("a &\n  ¬b");
        assert_eq!(lexer.cur(), Tok::SYM("a"));
        assert_eq!(lexer.cur_pos(), Position { line: 1, col: 1 });
        lexer.next();
        assert_eq!(lexer.cur_pos(), Position { line: 1, col: 3 });
        lexer.next();
        assert_eq!(lexer.cur(), Tok::NOT);
        assert_eq!(lexer.cur_pos(), Position { line: 2, col: 3 });
        lexer.next();
        assert_eq!(lexer.cur(), Tok::SYM("b"));
        assert_eq!(lexer.cur_pos(), Position { line: 2, col: 4 });
    }

    #[test]
    fn test_lex_empty() {
        // always at least one token
        let lexer = Lexer::new("");
        let toks: Vec<_> = lexer.collect();
        assert_eq!(vec![Tok::EOF], toks);
    }
}
