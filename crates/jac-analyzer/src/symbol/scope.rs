//! Scope management for symbol tables.

use std::fmt;

use jac_source::types::Span;
use rustc_hash::FxHashMap;

use super::types::Symbol;

/// Unique identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeID(u32);

impl ScopeID {
    /// Creates a new `ScopeID` with the given value.
    #[must_use]
    pub const fn new(id: u32) -> Self { Self(id) }

    /// Returns the inner value of the `ScopeID`.
    #[must_use]
    pub const fn value(self) -> u32 { self.0 }
}

impl fmt::Display for ScopeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "scope:{}", self.0) }
}

/// The kind of scope, matching the five constructs the Symbol Table Build
/// pass treats as scope-introducing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The whole-module scope; exactly one per AST, never popped.
    Module,
    /// An architype's member scope (`ArchBlock`).
    Architype,
    /// An ability's own scope (its signature and body share this scope).
    Ability,
    /// A plain block (`if`/loop/`try` bodies) that introduces a new scope.
    Block,
}

/// A lexical scope: the symbols declared directly in it, plus links to its
/// parent and children forming the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Unique identifier for this scope.
    pub id: ScopeID,
    /// The kind of scope.
    pub kind: ScopeKind,
    /// Parent scope ID (`None` for the module scope).
    pub parent: Option<ScopeID>,
    /// Symbols defined directly in this scope.
    pub symbols: FxHashMap<String, Symbol>,
    /// Child scope IDs, in creation order.
    pub children: Vec<ScopeID>,
}

impl Scope {
    /// Creates a new, empty scope with the given ID, kind, and parent.
    #[must_use]
    pub fn new(id: ScopeID, kind: ScopeKind, parent: Option<ScopeID>) -> Self {
        Self { id, kind, parent, symbols: FxHashMap::default(), children: Vec::new() }
    }

    /// Returns the child scope IDs.
    #[must_use]
    pub fn children(&self) -> &[ScopeID] { &self.children }

    /// Gets a symbol from this scope by name. Searches only this scope, not
    /// its parents.
    #[must_use]
    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> { self.symbols.get(name) }

    /// Gets a mutable reference to a symbol from this scope by name.
    pub fn get_symbol_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    /// Inserts a symbol into this scope.
    ///
    /// ## Errors
    ///
    /// Returns the span of the pre-existing declaration if a symbol with
    /// this name already exists in this scope, so the caller can report a
    /// redeclaration diagnostic naming both locations.
    pub fn insert_symbol(&mut self, name: String, symbol: Symbol) -> Result<(), Span> {
        if let Some(existing) = self.symbols.get(&name) {
            return Err(existing.span);
        }

        drop(self.symbols.insert(name, symbol));
        Ok(())
    }

    /// Returns the parent scope ID, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<ScopeID> { self.parent }
}
