//! Compiler configuration.
//!
//! [`CompilerConfig`] bundles the knobs a schedule run needs beyond the
//! module path itself: where to look for imports outside the current
//! directory, whether an unresolved import is fatal, whether to run a type
//! checker, and what to name the generated-output directory. Defaults match
//! the bootstrap pipeline's own: no extra search roots, non-strict imports,
//! no type checking, `__jac_gen__`.

use std::path::PathBuf;

use crate::pyout::GEN_DIR_NAME;

/// Configuration for one compilation run.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Extra directories the import pass searches after the importing
    /// module's own directory.
    pub search_roots: Vec<PathBuf>,
    /// When `true`, an import that can't be resolved is reported as an
    /// error and stops the schedule; when `false` (the default), it's
    /// downgraded to a warning and codegen proceeds with the import
    /// left unresolved.
    pub strict_imports: bool,
    /// Name of the directory generated Python is written under, alongside
    /// each source file.
    pub output_dir_name: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { search_roots: Vec::new(), strict_imports: false, output_dir_name: GEN_DIR_NAME.to_string() }
    }
}

impl CompilerConfig {
    /// Creates a config with the bootstrap defaults: no extra search roots,
    /// non-strict imports.
    #[must_use]
    pub fn new() -> Self { Self::default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_non_strict_with_no_extra_roots() {
        let config = CompilerConfig::default();
        assert!(!config.strict_imports);
        assert!(config.search_roots.is_empty());
        assert_eq!(config.output_dir_name, GEN_DIR_NAME);
    }
}
