use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use fudge::executor::{Executor, RunMode};
use fudge::port::{ConsoleInput, WriterOutput};
use fudge::program::Program;
use fudge::repl::{Flow, Repl};
use rayon::prelude::*;

#[derive(Parser)]
#[command(name = "fudge", about = "Interpreter for the eight-symbol tape language")]
struct Cli {
    /// Run the program in this file.
    #[arg(short, long, conflicts_with = "repl")]
    file: Option<PathBuf>,

    /// Start an interactive session on stdin.
    #[arg(short, long)]
    repl: bool,

    /// Whether each interactive line continues the previous ones or starts over.
    #[arg(long, value_enum, default_value_t = RunMode::Resume)]
    mode: RunMode,

    /// Check bracket balance of these files without running them.
    #[arg(long, num_args = 1.., conflicts_with_all = ["file", "repl"])]
    check: Vec<PathBuf>,

    /// Report step counts on stderr.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.check.is_empty() {
        return check_files(&cli.check);
    }
    if let Some(ref path) = cli.file {
        return run_file(path, cli.verbose);
    }
    if cli.repl {
        return run_repl(cli.mode, cli.verbose);
    }

    Cli::command().print_help()?;
    Ok(())
}

fn run_file(path: &Path, verbose: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("unable to read source file {}", path.display()))?;

    let mut executor = Executor::new(ConsoleInput::new(), WriterOutput::new(io::stdout().lock()));
    executor.load_program(Program::from_lines(&source));
    let steps = executor
        .run(RunMode::ResetFirst)
        .with_context(|| format!("{} aborted", path.display()))?;

    if verbose {
        eprintln!("{}: halted after {steps} steps", path.display());
    }
    Ok(())
}

fn run_repl(mode: RunMode, verbose: bool) -> Result<()> {
    let executor = Executor::new(ConsoleInput::new(), WriterOutput::new(io::stdout()));
    let mut repl = Repl::new(executor, mode).verbose(verbose);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "[REPL]: interactive session started ({mode:?} mode).")?;
    loop {
        writeln!(stdout)?;
        write!(stdout, "{}", repl.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        if repl.handle(&line, &mut stdout)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Validate every file independently, in parallel, then report in order.
fn check_files(paths: &[PathBuf]) -> Result<()> {
    let results: Vec<Result<()>> = paths.par_iter().map(|p| check_file(p)).collect();

    let mut failed = 0;
    for (path, result) in paths.iter().zip(&results) {
        match result {
            Ok(()) => println!("{}: ok", path.display()),
            Err(e) => {
                failed += 1;
                println!("{}: {e:#}", path.display());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} files failed the bracket check", paths.len());
    }
    Ok(())
}

fn check_file(path: &Path) -> Result<()> {
    let source = fs::read_to_string(path).context("unable to read source file")?;
    Program::from_lines(&source).validate()?;
    Ok(())
}
