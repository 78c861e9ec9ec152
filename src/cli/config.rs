use anyhow::{Context, Result};
use pbl_common::diagnostics::diagnostic_messages;
use pbl_common::format_message;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::args::CliArgs;

/// Project config files, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".polybabelrc", "polybabel.json"];

pub const DEFAULT_INPUT_DIR: &str = "src";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Contents of `.polybabelrc` or `polybabel.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default, rename = "in")]
    pub input: Option<PathBuf>,
    #[serde(default, rename = "out")]
    pub output: Option<PathBuf>,
}

/// Directories for one compilation run, resolved against the working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

pub fn parse_config(source: &str) -> Result<ProjectConfig> {
    let config = serde_json::from_str(source)?;
    Ok(config)
}

/// The first config file in `dir` with any content. An empty
/// `.polybabelrc` defers to `polybabel.json`.
#[must_use]
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| std::fs::read_to_string(path).is_ok_and(|text| !text.trim().is_empty()))
}

pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&source).with_context(|| {
        format_message(
            diagnostic_messages::INVALID_CONFIG_FILE,
            &[&path.display().to_string(), "expected a JSON object"],
        )
    })
}

/// Flags win over the config file, which wins over the defaults.
pub fn resolve_compiler_options(args: &CliArgs, cwd: &Path) -> Result<CompilerOptions> {
    let config = match find_config(cwd) {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading project config");
            load_config(&path)?
        }
        None => ProjectConfig::default(),
    };

    let input = args
        .input
        .clone()
        .or(config.input)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    let output = args
        .output
        .clone()
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Ok(CompilerOptions {
        input_dir: cwd.join(input),
        output_dir: cwd.join(output),
    })
}
