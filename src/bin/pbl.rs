#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use polybabel::cli::args::CliArgs;
use polybabel::cli::config::resolve_compiler_options;
use polybabel::cli::driver;
use polybabel::cli::reporter::Reporter;

fn main() -> Result<ExitCode> {
    // No-op unless PBL_LOG or RUST_LOG is set.
    polybabel::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let options = resolve_compiler_options(&args, &cwd)?;

    let start_time = std::time::Instant::now();
    let result = driver::compile(&options)?;
    let elapsed = start_time.elapsed();

    if !result.diagnostics.is_empty() {
        let mut reporter = Reporter::new(Reporter::color_from_env(std::io::stderr().is_terminal()));
        for (file, text) in &result.sources {
            reporter.add_source(file.as_str(), text.as_str());
        }
        eprintln!("{}", reporter.render(&result.diagnostics));
    }

    if result.has_errors() {
        eprintln!("Compilation failed with {} error(s).", result.error_count());
        return Ok(ExitCode::FAILURE);
    }

    println!("Compiled in {} ms.", elapsed.as_millis());
    Ok(ExitCode::SUCCESS)
}
