use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the pbl binary.
#[derive(Parser, Debug, Default)]
#[command(name = "pbl", version, about = "Polybabel - compile Java sources to JavaScript")]
pub struct CliArgs {
    /// Directory containing the source files. Defaults to `src`.
    #[arg(short = 'i', long = "in", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory the compiled files are written to. Defaults to `dist`.
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub output: Option<PathBuf>,
}
