use std::fmt;

/// Position in formula text. 1 based.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line={}, col={}]", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Position {
    /// Start of a text.
    pub const START: Position = Position { line: 1, col: 1 };

    /// Position after reading `c`.
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Position {
                line: self.line + 1,
                col: 1,
            }
        } else {
            Position {
                col: self.col + 1,
                ..self
            }
        }
    }
}
