use std::io::{self, Write};

use crate::executor::{Executor, RunMode};
use crate::port::{InputPort, OutputPort};

/// Whether the session should keep reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A line-at-a-time interactive session over one executor.
///
/// A line is either a session command (`show`, `reset`, `exit`, `quit`) or
/// source, which is submitted in the session's [`RunMode`]. Failures are
/// reported and the session keeps going with whatever state the executor
/// was left in (after a failure, a fresh one).
pub struct Repl<I, O> {
    executor: Executor<I, O>,
    mode: RunMode,
    commands: usize,
    verbose: bool,
}

impl<I: InputPort, O: OutputPort> Repl<I, O> {
    pub fn new(executor: Executor<I, O>, mode: RunMode) -> Self {
        Self {
            executor,
            mode,
            commands: 0,
            verbose: false,
        }
    }

    /// Report step counts on stderr after each run.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn prompt(&self) -> String {
        format!("[{}]: ", self.commands)
    }

    /// Handle one input line, writing session messages to `out`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        self.commands += 1;

        match line {
            "show" => writeln!(out, "> {}", self.executor.status())?,
            "exit" | "quit" => return Ok(Flow::Exit),
            "reset" => {
                self.executor.reset();
                writeln!(out, "Interpreter memory reset.")?;
            }
            source => match self.executor.submit(source, self.mode) {
                Ok(steps) => {
                    if self.verbose {
                        eprintln!("ran {steps} steps");
                    }
                }
                Err(e) => {
                    // Program output may have been cut mid-line.
                    writeln!(out)?;
                    writeln!(out, "Error: {e}")?;
                }
            },
        }
        Ok(Flow::Continue)
    }

    pub fn executor(&self) -> &Executor<I, O> {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut Executor<I, O> {
        &mut self.executor
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn repl(mode: RunMode) -> Repl<VecDeque<char>, Vec<u8>> {
        Repl::new(Executor::new(VecDeque::new(), Vec::new()), mode)
    }

    fn feed(repl: &mut Repl<VecDeque<char>, Vec<u8>>, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            repl.handle(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_reports_cell() {
        let mut r = repl(RunMode::Resume);
        let out = feed(&mut r, &["+", ">++", "show"]);
        assert_eq!(out, "> Cell #: 1; Cell value: 2;\n");
    }

    #[test]
    fn test_resume_session_builds_on_previous_lines() {
        let mut r = repl(RunMode::Resume);
        feed(&mut r, &["+++", "[>+<-]", ">."]);
        assert_eq!(r.executor_mut().output_mut(), &vec![3u8]);
    }

    #[test]
    fn test_reset_first_session_starts_over_each_line() {
        let mut r = repl(RunMode::ResetFirst);
        feed(&mut r, &["+++", "+"]);
        assert_eq!(r.executor().tape().read(), 1);
    }

    #[test]
    fn test_reset_command() {
        let mut r = repl(RunMode::Resume);
        let out = feed(&mut r, &["+++", "reset", "show"]);
        assert_eq!(out, "Interpreter memory reset.\n> Cell #: 0; Cell value: 0;\n");
        assert!(r.executor().program().is_empty());
    }

    #[test]
    fn test_error_is_reported_and_session_continues() {
        let mut r = repl(RunMode::Resume);
        let out = feed(&mut r, &["+", "<", "show"]);
        assert_eq!(
            out,
            "\nError: cell pointer out of bounds. (instruction 2)\n> Cell #: 0; Cell value: 0;\n"
        );
    }

    #[test]
    fn test_unbalanced_line_wipes_session() {
        let mut r = repl(RunMode::Resume);
        let out = feed(&mut r, &["+++", "["]);
        assert_eq!(out, "\nError: mismatched '['.\n");
        assert!(r.executor().program().is_empty());
        assert_eq!(r.executor().tape().read(), 0);
    }

    #[test]
    fn test_exit_and_quit() {
        let mut r = repl(RunMode::Resume);
        let mut out = Vec::new();
        assert_eq!(r.handle("exit", &mut out).unwrap(), Flow::Exit);
        assert_eq!(r.handle(" quit ", &mut out).unwrap(), Flow::Exit);
    }

    #[test]
    fn test_prompt_counts_commands_not_blank_lines() {
        let mut r = repl(RunMode::Resume);
        assert_eq!(r.prompt(), "[0]: ");
        feed(&mut r, &["+", "", "   ", "show"]);
        assert_eq!(r.prompt(), "[2]: ");
    }
}
