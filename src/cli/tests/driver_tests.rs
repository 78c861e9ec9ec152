use super::config::CompilerOptions;
use super::driver::compile;
use std::path::Path;

fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, CompilerOptions) {
    let dir = tempfile::tempdir().expect("temp dir");
    for (name, text) in files {
        let path = dir.path().join("src").join(name);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        std::fs::write(path, text).expect("write source");
    }
    let options = CompilerOptions {
        input_dir: dir.path().join("src"),
        output_dir: dir.path().join("dist"),
    };
    (dir, options)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|error| panic!("cannot read {}: {error}", path.display()))
}

#[test]
fn writes_one_module_per_source_file() {
    let (_dir, options) = project(&[
        ("app/Main.java", "package app;\npublic class Main { }\n"),
        ("app/util/Helper.java", "package app.util;\npublic class Helper { }\n"),
    ]);
    let result = compile(&options).expect("compile");

    assert!(!result.has_errors(), "{:?}", result.diagnostics);
    assert_eq!(result.files_read.len(), 2);
    assert_eq!(result.emitted_files.len(), 2);
    assert!(read(&options.output_dir.join("app/Main.js")).contains("module.exports = Main;"));
    assert!(read(&options.output_dir.join("app/util/Helper.js")).contains("class Helper {"));
}

#[test]
fn errors_prevent_output() {
    let (_dir, options) = project(&[
        ("app/Main.java", "package app;\nclass Main { int f() { return foo; } }\n"),
        ("app/Other.java", "package app;\nclass Other { }\n"),
    ]);
    let result = compile(&options).expect("compile");

    assert_eq!(result.error_count(), 1, "{:?}", result.diagnostics);
    assert_eq!(result.diagnostics[0].file, "app/Main.java");
    assert!(result.emitted_files.is_empty());
    assert!(!options.output_dir.exists());
}

#[test]
fn parse_failures_are_reported_per_file() {
    let (_dir, options) = project(&[
        ("app/Broken.java", "package app;\nclass Broken {\n"),
        ("app/Main.java", "package app;\nclass Main { }\n"),
    ]);
    let result = compile(&options).expect("compile");

    assert_eq!(result.error_count(), 1, "{:?}", result.diagnostics);
    assert_eq!(result.diagnostics[0].file, "app/Broken.java");
}

#[test]
fn cross_file_references_resolve() {
    let (_dir, options) = project(&[
        (
            "app/Main.java",
            "package app;\nimport app.util.Helper;\npublic class Main {\n  int f() { return new Helper().size(); }\n}\n",
        ),
        (
            "app/util/Helper.java",
            "package app.util;\npublic class Helper {\n  public int size() { return 1; }\n}\n",
        ),
    ]);
    let result = compile(&options).expect("compile");

    assert!(!result.has_errors(), "{:?}", result.diagnostics);
    let main = read(&options.output_dir.join("app/Main.js"));
    assert!(main.contains("const Helper = require('./app/util/Helper');"), "{main}");
    assert!(main.contains("return new Helper().size();"), "{main}");
}
