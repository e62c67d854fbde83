//! Errors for Coalescence.
//!
//! Not being provable is *not* an error: see `algo::Verdict`. Errors are
//! reserved for malformed input text and for engine defects.

use crate::position::Position;
use std::fmt;

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can be returned from the parser or the proof extractor.
#[derive(Debug, Clone)]
pub struct Error(Box<ErrorImpl>);

#[derive(Debug, Clone)]
pub struct ErrorImpl {
    pub kind: ErrorKind,
    pub msg: ErrorMsg,
    pub source: Option<Error>,
}

/// What went wrong, coarsely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The formula text could not be parsed.
    Parse,
    /// The engine reported success but no certificate could be built.
    ///
    /// This is a bug in the engine, never an expected outcome; callers
    /// must not retry.
    Inconsistency,
    /// Anything else.
    Other,
}

/// An error message.
#[derive(Debug, Clone)]
pub enum ErrorMsg {
    EDyn(String),
    EParse { pos: Position, msg: String },
}

mod impls {
    use super::*;

    impl std::ops::Deref for Error {
        type Target = ErrorImpl;
        fn deref(&self) -> &Self::Target {
            &*self.0
        }
    }

    impl fmt::Display for Error {
        fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
            if self.kind == ErrorKind::Inconsistency {
                write!(out, "internal inconsistency: ")?;
            }
            match &self.msg {
                ErrorMsg::EDyn(s) => write!(out, "{}", &s),
                ErrorMsg::EParse { pos, msg } => write!(out, "parse error at {}: {}", pos, msg),
            }
        }
    }

    impl std::error::Error for Error {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match &self.source {
                None => None,
                Some(p) => Some(&*p),
            }
        }
    }
}

impl Error {
    /// Build a new error.
    pub fn new_string(msg: String) -> Self {
        Error(Box::new(ErrorImpl {
            kind: ErrorKind::Other,
            msg: ErrorMsg::EDyn(msg),
            source: None,
        }))
    }

    /// New parse error at the given position.
    pub fn new_parse(msg: String, pos: Position) -> Self {
        Error(Box::new(ErrorImpl {
            kind: ErrorKind::Parse,
            msg: ErrorMsg::EParse { pos, msg },
            source: None,
        }))
    }

    /// New internal inconsistency: the engine and the extractor disagree.
    pub fn new_inconsistency(msg: String) -> Self {
        Error(Box::new(ErrorImpl {
            kind: ErrorKind::Inconsistency,
            msg: ErrorMsg::EDyn(msg),
            source: None,
        }))
    }

    /// Kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.0.kind
    }

    /// Is this an engine defect?
    pub fn is_inconsistency(&self) -> bool {
        self.0.kind == ErrorKind::Inconsistency
    }

    /// Change the source of this error.
    pub fn set_source(&mut self, src: Self) {
        // append at the end of the `source` linked list.
        if let Some(e2) = &mut self.0.source {
            e2.set_source(src)
        } else {
            self.0.source = Some(src);
        }
    }

    pub fn with_source(mut self, src: Self) -> Self {
        self.set_source(src);
        self
    }

    /// Display the error, along with its source if any.
    pub fn to_string_with_src(&self) -> String {
        use std::fmt::Write;

        let mut s = String::new();
        let mut e = self;
        loop {
            // writing into a `String` cannot fail
            let _ = write!(&mut s, "{}", e);
            if let Some(src) = &e.0.source {
                s.push_str("\nin ");
                e = src;
            } else {
                break;
            }
        }
        s
    }
}

/// Build an `Error` from a format string.
#[macro_export]
macro_rules! errorstr {
    ($($t:tt)*) => {
        $crate::Error::new_string(format!($($t)*))
    };
}
