use std::fmt;

use crate::error::{Error, Mismatch, Result};
use crate::port::{InputPort, OutputPort};
use crate::program::{Instruction, Program};
use crate::tape::{Cell, Tape};

/// How [`Executor::run`] treats state left over from earlier runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RunMode {
    /// Clear tape, instruction pointer and loop stack, then run from the top.
    ResetFirst,
    /// Continue from the current instruction pointer with tape and loop
    /// stack intact.
    #[default]
    Resume,
}

/// Snapshot of the interpreter for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub cursor: usize,
    pub value: Cell,
    pub instruction_pointer: usize,
    pub program_len: usize,
    pub loop_depth: usize,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell #: {}; Cell value: {};", self.cursor, self.value)
    }
}

/// Drives a [`Program`] against a [`Tape`], one symbol at a time.
///
/// The executor exclusively owns its program, tape, instruction pointer and
/// loop-return stack, plus the host ports it was built with. Any failure
/// wipes all of that state (the program included) before the error is
/// returned.
pub struct Executor<I, O> {
    program: Program,
    tape: Tape,
    ip: usize,
    /// Instruction pointers of the `[`s whose loops are currently open.
    loop_stack: Vec<usize>,
    input: I,
    output: O,
}

impl<I: InputPort, O: OutputPort> Executor<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            program: Program::new(),
            tape: Tape::new(),
            ip: 0,
            loop_stack: Vec::new(),
            input,
            output,
        }
    }

    /// Replace the program. Tape and execution state are left alone.
    pub fn load(&mut self, source: &str) {
        self.program.replace(source);
    }

    /// Replace the program with one built elsewhere, e.g. by
    /// [`Program::from_lines`].
    pub fn load_program(&mut self, program: Program) {
        self.program = program;
    }

    pub fn append(&mut self, source: &str) {
        self.program.append(source);
    }

    /// Return to the freshly constructed state, discarding the program too.
    pub fn reset(&mut self) {
        self.program.clear();
        self.reset_execution();
    }

    fn reset_execution(&mut self) {
        self.tape.reset();
        self.ip = 0;
        self.loop_stack.clear();
    }

    /// Validate the whole accumulated program, then dispatch until the
    /// instruction pointer runs off the end.
    ///
    /// Returns the number of symbols dispatched, inert ones included. Does
    /// not return if the program loops forever.
    pub fn run(&mut self, mode: RunMode) -> Result<usize> {
        if let Err(m) = self.program.validate() {
            self.reset();
            return Err(m.into());
        }
        if mode == RunMode::ResetFirst {
            self.reset_execution();
        }

        let mut steps: usize = 0;
        while self.ip < self.program.len() {
            if let Err(e) = self.dispatch() {
                self.reset();
                return Err(e);
            }
            steps += 1;
        }

        if let Err(e) = self.output.flush() {
            self.reset();
            return Err(e.into());
        }
        Ok(steps)
    }

    /// Feed a chunk of source the way an interactive session does.
    ///
    /// In [`RunMode::Resume`] the chunk is appended and execution continues
    /// where the last chunk stopped. In [`RunMode::ResetFirst`] everything
    /// from earlier chunks is discarded and the chunk runs on its own.
    pub fn submit(&mut self, source: &str, mode: RunMode) -> Result<usize> {
        match mode {
            RunMode::Resume => self.append(source),
            RunMode::ResetFirst => {
                self.reset();
                self.load(source);
            }
        }
        self.run(mode)
    }

    /// Dispatch a single symbol without validating the program first.
    ///
    /// Returns `Ok(false)` once halted.
    pub fn step(&mut self) -> Result<bool> {
        if self.is_halted() {
            return Ok(false);
        }
        match self.dispatch() {
            Ok(()) => Ok(true),
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    fn dispatch(&mut self) -> Result<()> {
        let Some(symbol) = self.program.get(self.ip) else {
            return Ok(());
        };

        match Instruction::from_symbol(symbol) {
            Some(Instruction::Increment) => self.tape.increment(),
            Some(Instruction::Decrement) => self.tape.decrement(),
            Some(Instruction::Right) => self.tape.advance(),
            Some(Instruction::Left) => {
                self.tape
                    .retreat()
                    .map_err(|_| Error::CursorUnderflow { instruction: self.ip })?;
            }
            Some(Instruction::Output) => {
                // Low byte of the cell is the character code.
                self.output.emit(self.tape.read() as u8)?;
            }
            Some(Instruction::Input) => {
                // Emitted output must be visible before input blocks.
                self.output.flush()?;
                if let Some(c) = self.input.next_symbol()? {
                    self.tape.write(c as Cell);
                }
            }
            Some(Instruction::LoopOpen) => {
                if self.tape.read() != 0 {
                    self.loop_stack.push(self.ip);
                } else {
                    self.ip = self
                        .program
                        .matching_close(self.ip)
                        .ok_or(Mismatch::UnmatchedOpen)?;
                }
            }
            Some(Instruction::LoopClose) => {
                let open = self
                    .loop_stack
                    .pop()
                    .ok_or(Mismatch::UnmatchedClose { index: self.ip })?;
                // The uniform increment below lands back on the `[`.
                self.ip = open.wrapping_sub(1);
            }
            None => {}
        }

        self.ip = self.ip.wrapping_add(1);
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.ip >= self.program.len()
    }

    pub fn status(&self) -> Status {
        Status {
            cursor: self.tape.cursor(),
            value: self.tape.read(),
            instruction_pointer: self.ip,
            program_len: self.program.len(),
            loop_depth: self.loop_stack.len(),
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn loop_depth(&self) -> usize {
        self.loop_stack.len()
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_ports(self) -> (I, O) {
        (self.input, self.output)
    }
}
