pub mod error;
pub mod tape;
pub mod program;
pub mod port;
pub mod executor;
pub mod repl;
