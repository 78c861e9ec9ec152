use clap::Parser;
use std::path::Path;

use super::args::CliArgs;

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["pbl"]).expect("default args should parse");
    assert!(args.input.is_none());
    assert!(args.output.is_none());
}

#[test]
fn parses_long_flags() {
    let args = CliArgs::try_parse_from(["pbl", "--in", "java", "--out", "build/js"]).expect("flags should parse");
    assert_eq!(args.input.as_deref(), Some(Path::new("java")));
    assert_eq!(args.output.as_deref(), Some(Path::new("build/js")));
}

#[test]
fn parses_short_flags() {
    let args = CliArgs::try_parse_from(["pbl", "-i", "java", "-o", "out"]).expect("short flags should parse");
    assert_eq!(args.input.as_deref(), Some(Path::new("java")));
    assert_eq!(args.output.as_deref(), Some(Path::new("out")));
}

#[test]
fn rejects_unknown_flags() {
    assert!(CliArgs::try_parse_from(["pbl", "--target", "es5"]).is_err());
}
