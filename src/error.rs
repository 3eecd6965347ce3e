//! Failures surfaced by the interpreter.
//!
//! Every failure is fatal to the run that raised it: the executor wipes its
//! whole state (program included) before handing the error back.

use std::fmt;
use std::io;

/// A bracket-balance violation found by [`Program::validate`](crate::program::Program::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// A `]` with no open `[` before it, at this 0-based program index.
    UnmatchedClose { index: usize },
    /// At least one `[` was never closed.
    UnmatchedOpen,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::UnmatchedClose { index } => {
                write!(f, "mismatched ']' at instruction {}.", index + 1)
            }
            Mismatch::UnmatchedOpen => write!(f, "mismatched '['."),
        }
    }
}

impl std::error::Error for Mismatch {}

#[derive(Debug)]
pub enum Error {
    /// The accumulated program has unbalanced brackets.
    BracketMismatch(Mismatch),
    /// A `<` at this 0-based program index tried to move the cursor below zero.
    CursorUnderflow { instruction: usize },
    /// The host input or output port failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BracketMismatch(m) => write!(f, "{m}"),
            Error::CursorUnderflow { instruction } => {
                write!(f, "cell pointer out of bounds. (instruction {})", instruction + 1)
            }
            Error::Io(e) => write!(f, "host i/o failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Mismatch> for Error {
    fn from(m: Mismatch) -> Self {
        Error::BracketMismatch(m)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
