//! The `PyOut` pass: writes generated Python text to disk.
//!
//! Generated output is colocated with its source file under a `__jac_gen__`
//! directory, one level down — `foo/bar.jac` generates `foo/__jac_gen__/bar.py`
//! — mirroring how the reference pipeline keeps generated artifacts
//! alongside the source tree they came from rather than in a separate build
//! root, so relative imports between sibling Jac modules keep working
//! untranslated.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CompileError;

/// The subdirectory name every generated module is written under, alongside
/// its source file.
pub const GEN_DIR_NAME: &str = "__jac_gen__";

/// Returns the path `write_generated` would write `source_path`'s output to
/// under the default `__jac_gen__` directory name, without touching the
/// filesystem.
#[must_use]
pub fn output_path_for(source_path: &Path) -> PathBuf { output_path_in(source_path, GEN_DIR_NAME) }

/// Like [`output_path_for`], but writing under `gen_dir_name` instead of the
/// default, per [`crate::config::CompilerConfig::output_dir_name`].
#[must_use]
pub fn output_path_in(source_path: &Path, gen_dir_name: &str) -> PathBuf {
    let parent = source_path.parent().unwrap_or_else(|| Path::new("."));
    let stem = source_path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "module".to_string());
    parent.join(gen_dir_name).join(format!("{stem}.py"))
}

/// Writes `py_source` to the `gen_dir_name` directory beside `source_path`,
/// creating the directory if needed, and returns the path written to.
///
/// # Errors
///
/// Returns [`CompileError::OutputIo`] if the directory can't be created or
/// the file can't be written.
pub fn write_generated_in(source_path: &Path, py_source: &str, gen_dir_name: &str) -> Result<PathBuf, CompileError> {
    let out_path = output_path_in(source_path, gen_dir_name);
    let gen_dir = out_path.parent().expect("output_path_in always nests under a directory");
    fs::create_dir_all(gen_dir).map_err(|source| CompileError::OutputIo { path: gen_dir.to_path_buf(), source })?;
    fs::write(&out_path, py_source).map_err(|source| CompileError::OutputIo { path: out_path.clone(), source })?;
    Ok(out_path)
}

/// [`write_generated_in`] under the default `__jac_gen__` directory name.
///
/// # Errors
///
/// Returns [`CompileError::OutputIo`] if the directory can't be created or
/// the file can't be written.
pub fn write_generated(source_path: &Path, py_source: &str) -> Result<PathBuf, CompileError> {
    write_generated_in(source_path, py_source, GEN_DIR_NAME)
}

/// Removes a source file's generated output under `gen_dir_name`, if
/// present.
///
/// # Errors
///
/// Returns [`CompileError::OutputIo`] if the file exists but can't be
/// removed. Absence is not an error.
pub fn clean_generated_in(source_path: &Path, gen_dir_name: &str) -> Result<(), CompileError> {
    let out_path = output_path_in(source_path, gen_dir_name);
    match fs::remove_file(&out_path) {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CompileError::OutputIo { path: out_path, source }),
    }
}

/// [`clean_generated_in`] under the default `__jac_gen__` directory name.
/// Backs the CLI's `clean` subcommand.
///
/// # Errors
///
/// Returns [`CompileError::OutputIo`] if the file exists but can't be
/// removed. Absence is not an error.
pub fn clean_generated(source_path: &Path) -> Result<(), CompileError> {
    clean_generated_in(source_path, GEN_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_nests_under_gen_dir_with_py_extension() {
        let path = output_path_for(Path::new("/proj/src/foo.jac"));
        assert_eq!(path, PathBuf::from("/proj/src/__jac_gen__/foo.py"));
    }

    #[test]
    fn write_then_clean_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source_path = dir.path().join("mod.jac");
        let out = write_generated(&source_path, "x = 1\n").expect("write succeeds");
        assert!(out.exists());
        clean_generated(&source_path).expect("clean succeeds");
        assert!(!out.exists());
    }

    #[test]
    fn clean_is_a_no_op_when_nothing_was_generated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source_path = dir.path().join("never_compiled.jac");
        clean_generated(&source_path).expect("clean tolerates absence");
    }
}
