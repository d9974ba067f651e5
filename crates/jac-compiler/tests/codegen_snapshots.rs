//! Snapshot tests for the generated Python text of a handful of small,
//! representative modules. Golden output for the constructs whose exact
//! rendering matters (class headers, `has`-to-`__init__` synthesis,
//! declaration/definition warnings) rather than mechanical round trips.

use jac_compiler::config::CompilerConfig;
use jac_compiler::schedule::{self, Schedule};
use jac_runtime::hooks::HookRegistry;
use jac_compiler::typecheck::NullTypeChecker;

fn generate(source: &str, file_name: &str) -> String {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, source).expect("write source");
    let mut checker = NullTypeChecker;
    let config = CompilerConfig::default();
    schedule::run(Schedule::PyCodeGen, &path, &config, &HookRegistry::full(), &mut checker)
        .expect("compiles")
        .py_source
}

#[test]
fn empty_object_lowers_to_a_pass_bodied_class() {
    let py = generate("object Foo {}\n", "foo.jac");
    insta::assert_snapshot!(py, @r"
    class Foo:
        pass
    ");
}

#[test]
fn has_members_synthesize_an_init() {
    let py = generate("object Point {\n    has x: int = 0;\n    has y: int = 0;\n}\n", "point.jac");
    insta::assert_snapshot!(py, @r"
    class Point:
        def __init__(self):
            self.x: int = 0
            self.y: int = 0
    ");
}

#[test]
fn decl_def_split_is_unsupported_and_warns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("split.jac");
    std::fs::write(&path, "node Foo {\n    can greet();\n}\n").expect("write source");
    let mut checker = NullTypeChecker;
    let config = CompilerConfig::default();
    let outcome = schedule::run(Schedule::PyCodeGen, &path, &config, &HookRegistry::full(), &mut checker)
        .expect("compiles");
    assert!(outcome.diagnostics.warnings().iter().any(|w| w.message.contains("declaration/definition")));
}
