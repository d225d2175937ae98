use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iwyu-hook")]
#[command(about = "Runs include-what-you-use on files using flags from compile_commands.json")]
#[command(version)]
pub struct Cli {
    /// Build directory containing compile_commands.json
    #[arg(short = 'p', long, default_value = "build/default")]
    pub build_dir: PathBuf,

    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,

    /// Source or header files to analyze
    #[arg(help = "Files to analyze")]
    pub files: Vec<PathBuf>,
}
