//! Host I/O ports.
//!
//! The executor never touches stdin or stdout directly. Whoever constructs it
//! hands in an [`InputPort`] for `,` and an [`OutputPort`] for `.`, which is
//! what lets several interpreters run side by side and lets tests script
//! input and capture output.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Supplies one input symbol per `,`.
pub trait InputPort {
    /// Block until a symbol is available. `Ok(None)` means end of input.
    fn next_symbol(&mut self) -> io::Result<Option<char>>;
}

/// Accepts one byte per `.`.
pub trait OutputPort {
    fn emit(&mut self, byte: u8) -> io::Result<()>;

    /// Called once at the end of every run.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pop the first character of the next whitespace-delimited token out of
/// `pending`, discarding the rest of that token.
fn take_token_head(pending: &mut VecDeque<char>) -> Option<char> {
    while let Some(c) = pending.pop_front() {
        if c.is_whitespace() {
            continue;
        }
        while pending.front().is_some_and(|c| !c.is_whitespace()) {
            pending.pop_front();
        }
        return Some(c);
    }
    None
}

/// Token-oriented input over any buffered reader.
///
/// Each request skips whitespace and yields the first character of the next
/// token; typing `abc` answers one `,` with `a`.
pub struct TokenInput<R> {
    reader: R,
    pending: VecDeque<char>,
}

impl<R: BufRead> TokenInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> InputPort for TokenInput<R> {
    fn next_symbol(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(c) = take_token_head(&mut self.pending) {
                return Ok(Some(c));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.chars());
        }
    }
}

/// [`TokenInput`] semantics over process stdin.
///
/// Locks stdin for one line at a time, so an interactive session reading its
/// own command lines from the same stream is never starved.
#[derive(Default)]
pub struct ConsoleInput {
    pending: VecDeque<char>,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputPort for ConsoleInput {
    fn next_symbol(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(c) = take_token_head(&mut self.pending) {
                return Ok(Some(c));
            }
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.chars());
        }
    }
}

/// Scripted input, one symbol per request.
impl InputPort for VecDeque<char> {
    fn next_symbol(&mut self) -> io::Result<Option<char>> {
        Ok(self.pop_front())
    }
}

/// Byte output over any writer.
pub struct WriterOutput<W> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputPort for WriterOutput<W> {
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        self.writer.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Captured output.
impl OutputPort for Vec<u8> {
    fn emit(&mut self, byte: u8) -> io::Result<()> {
        self.push(byte);
        Ok(())
    }
}
