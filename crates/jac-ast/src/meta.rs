//! The per-node meta fields every pass reads and writes.
//!
//! Every node carries a closed, typed [`Meta`] bag rather than an open
//! string-keyed map: the set of cross-pass attributes a node can carry is
//! small and known up front (sub-node index, resolved symbol, generated
//! code, incomplete marker), so each gets its own field instead of a
//! dynamically-typed lookup.

use std::collections::BTreeMap;

use crate::nodes::NodeID;

/// An opaque handle into a symbol table, owned by this crate so that
/// `jac-analyzer` (which owns the actual `Symbol` data) can attach resolved
/// symbols to nodes without this crate depending back on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Creates a new `SymbolId` wrapping the given arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self { Self(index) }

    /// Returns the wrapped arena index.
    #[must_use]
    pub const fn index(&self) -> u32 { self.0 }
}

/// Maps a node kind tag to the ordered (document-order) list of descendant
/// nodes of that kind, built once by the sub-node-table pass.
pub type SubNodeTab = BTreeMap<&'static str, Vec<NodeID>>;

/// The typed replacement for the per-node "meta map" design note: one field
/// per well-known cross-pass attribute, rather than a string-keyed bag.
#[derive(Debug, Clone, Default)]
pub struct Meta {
    /// Populated by the sub-node-table pass: kind tag to descendant list.
    pub sub_node_tab: Option<SubNodeTab>,
    /// Populated by the def-use pass (or the symbol-table pass, for
    /// declaring nodes): the symbol this node binds or resolves to.
    pub sym: Option<SymbolId>,
    /// Populated by the code generator: this node's emitted target text.
    pub py_code: Option<String>,
    /// Set by `mark_incomplete` when a pass recognizes a construct it
    /// cannot fully lower.
    pub incomplete: bool,
}

impl Meta {
    /// Returns true once the code generator has emitted text for this node,
    /// per invariant I4 ("every node has a non-absent `py_code` entry").
    #[must_use]
    pub fn has_py_code(&self) -> bool { self.py_code.is_some() }

    /// Flags this node's meta as incomplete. The ergonomic wrapper that also
    /// attaches the accompanying diagnostic lives in `jac-analyzer`, which
    /// owns the diagnostic sink; this just flips the bit a pass checks.
    pub fn mark_incomplete(&mut self) { self.incomplete = true; }
}
