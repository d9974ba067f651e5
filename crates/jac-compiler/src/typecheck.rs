//! Optional type-check delegation (`SPEC_FULL.md` §6.4).
//!
//! Type checking is not reimplemented here: the reference pipeline this
//! compiler follows hands its generated Python, plus the original source
//! map, to an external checker (a `mypy`-like tool) and folds that tool's
//! findings back into diagnostics against the Jac source. [`TypeChecker`] is
//! the seam a caller plugs a real checker into; [`NullTypeChecker`] is the
//! default when no checker is configured, matching the `py_code_gen`
//! schedule (type checking skipped entirely) rather than `py_code_gen_typed`.

/// One checker finding against a generated file.
#[derive(Debug, Clone)]
pub struct TypeCheckReport {
    /// The generated file the finding concerns.
    pub filename: String,
    /// Human-readable messages from the checker, one per finding.
    pub messages: Vec<String>,
    /// Whether the checker considers any of `messages` fatal to the build,
    /// as opposed to advisory.
    pub is_serious: bool,
}

impl TypeCheckReport {
    /// A report with no findings.
    #[must_use]
    pub fn clean(filename: impl Into<String>) -> Self {
        Self { filename: filename.into(), messages: Vec::new(), is_serious: false }
    }
}

/// The seam an external type checker plugs into. `check` receives the
/// generated Python text for one module and reports back; it never sees the
/// Jac AST, matching the reference pipeline's use of an out-of-process tool
/// driven purely off generated text and a source map.
pub trait TypeChecker {
    /// Runs the checker against `py_source`, generated for `filename`.
    fn check(&mut self, filename: &str, py_source: &str) -> TypeCheckReport;
}

/// Reports every file clean without running a checker. Backs the
/// `py_code_gen` schedule, where type checking is skipped entirely rather
/// than run and ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTypeChecker;

impl TypeChecker for NullTypeChecker {
    fn check(&mut self, filename: &str, _py_source: &str) -> TypeCheckReport { TypeCheckReport::clean(filename) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_checker_reports_clean() {
        let mut checker = NullTypeChecker;
        let report = checker.check("a.py", "x = 1");
        assert!(report.messages.is_empty());
        assert!(!report.is_serious);
    }
}
