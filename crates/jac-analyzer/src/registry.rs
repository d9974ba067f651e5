//! The module registry: a process-wide cache of parsed modules, keyed by
//! canonical file path, that the Import pass consults before re-parsing a
//! file it has already seen.
//!
//! Guarded by a [`parking_lot::Mutex`] so a future concurrent driver can
//! share one registry across files compiled in parallel, matching the
//! target runtime's own module-cache behavior (`sys.modules`): importing
//! the same file twice reuses the first parse.

use std::path::{Path, PathBuf};

use jac_ast::ast::AST;
use jac_ast::nodes::NodeID;
use jac_source::types::FileID;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

/// A single parsed module, cached by canonical path.
#[derive(Debug)]
pub struct ModuleEntry {
    /// The file this module was parsed from.
    pub file_id: FileID,
    /// The module's AST.
    pub ast: AST,
    /// The `Module` node at the root of `ast`.
    pub root: NodeID,
    /// Bumped every time this entry is replaced; lets a caller notice a
    /// cached reference has gone stale.
    pub generation: u32,
}

#[derive(Default)]
struct RegistryState {
    modules: FxHashMap<PathBuf, ModuleEntry>,
    in_progress: FxHashSet<PathBuf>,
    next_generation: u32,
}

/// Whether a path has already been parsed, is mid-parse on the current
/// import chain, or hasn't been seen at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    /// Already parsed and registered; reuse the cached entry.
    Cached,
    /// Currently being parsed further up the same import chain. Not an
    /// error — the Import pass should lower the import and move on without
    /// recursing again.
    InProgress,
    /// Never seen before; the Import pass should parse it.
    Unseen,
}

/// The shared cache of parsed modules, keyed by [`jac_source::types::canonical_key`].
#[derive(Default)]
pub struct ModuleRegistry {
    state: Mutex<RegistryState>,
}

impl ModuleRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Reports the import state of `path` without taking any action.
    #[must_use]
    pub fn state_of(&self, path: &Path) -> ImportState {
        let state = self.state.lock();
        if state.modules.contains_key(path) {
            ImportState::Cached
        } else if state.in_progress.contains(path) {
            ImportState::InProgress
        } else {
            ImportState::Unseen
        }
    }

    /// Marks `path` as mid-parse, so a cycle back to it is recognized
    /// rather than re-entered.
    pub fn begin(&self, path: PathBuf) {
        let _ = self.state.lock().in_progress.insert(path);
    }

    /// Registers a finished parse, replacing any previous entry for `path`
    /// and clearing its in-progress marker.
    pub fn finish(&self, path: PathBuf, file_id: FileID, ast: AST, root: NodeID) {
        let mut state = self.state.lock();
        let generation = state.next_generation;
        state.next_generation += 1;
        let _ = state.in_progress.remove(&path);
        let _ = state.modules.insert(path, ModuleEntry { file_id, ast, root, generation });
    }

    /// Runs `f` against the cached entry for `path`, if one exists.
    pub fn with_module<R>(&self, path: &Path, f: impl FnOnce(&ModuleEntry) -> R) -> Option<R> {
        let state = self.state.lock();
        state.modules.get(path).map(f)
    }

    /// The number of modules currently cached.
    #[must_use]
    pub fn len(&self) -> usize { self.state.lock().modules.len() }

    /// Whether the registry has no cached modules.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
