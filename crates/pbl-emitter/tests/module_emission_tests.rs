use crate::test_support::{assert_emits, translate};

#[test]
fn test_imports_become_requires() {
    let output = translate(
        "package app;\n\
         import lib.Helper;\n\
         import static util.Maths.max;\n\
         public class Main { }\n",
    );
    assert!(
        output.starts_with(
            "const Helper = require('./lib/Helper');\n\
             const { max } = require('./util/Maths');\n\
             \n\
             class Main {\n"
        ),
        "{output}"
    );
}

#[test]
fn test_grouped_imports_require_each_class() {
    let output = translate("package app;\nimport lib.{ Helper, Other };\nclass Main { }\n");
    assert_emits(
        &output,
        "const Helper = require('./lib/Helper');\nconst Other = require('./lib/Other');\n",
    );
}

#[test]
fn test_library_and_wildcard_imports_are_skipped() {
    let output = translate("package app;\nimport java.util.List;\nimport lib.*;\nclass Main { }\n");
    assert!(!output.contains("require"), "{output}");
}

#[test]
fn test_public_class_is_exported() {
    let output = translate("package app;\nclass Helper { }\npublic class Main { }\n");
    assert!(output.ends_with("\n\nmodule.exports = Main;\n"), "{output}");
}

#[test]
fn test_first_class_is_exported_when_none_is_public() {
    let output = translate("package app;\nclass First { }\nclass Second { }\n");
    assert_emits(&output, "module.exports = First;");
}
