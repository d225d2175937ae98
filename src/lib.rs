pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod compdb;
pub mod error;
pub mod invocation;

pub use cli::Cli;
pub use error::{AppError, AppResult};

/// Main library entry point, returning the process exit code.
pub fn run(cli: Cli) -> AppResult<i32> {
    commands::check::run_check(cli)
}
