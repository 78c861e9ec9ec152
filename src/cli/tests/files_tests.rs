use super::files::{output_path, relative_file_name, resolve_files_deep};
use std::path::Path;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(path, "").expect("write file");
}

#[test]
fn finds_nested_sources_in_sorted_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    touch(dir.path(), "b/Second.java");
    touch(dir.path(), "a/deep/First.java");
    touch(dir.path(), "Main.java");
    touch(dir.path(), "notes.txt");

    let files: Vec<String> = resolve_files_deep(dir.path())
        .expect("walk")
        .iter()
        .map(|path| relative_file_name(dir.path(), path))
        .collect();
    assert_eq!(files, vec!["Main.java", "a/deep/First.java", "b/Second.java"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = resolve_files_deep(&dir.path().join("missing")).expect_err("should fail");
    assert!(error.to_string().contains("does not exist"), "{error}");
}

#[test]
fn output_path_swaps_the_extension() {
    assert_eq!(
        output_path(Path::new("dist"), "app/Main.java"),
        Path::new("dist").join("app").join("Main.js")
    );
}
