//! The data-spatial hook surface generated Python code calls into.
//!
//! Every data-spatial construct the compiler can't lower to plain Python
//! syntax directly — instantiating an architype, walking an edge, reporting
//! a result back to a caller — lowers instead to a call against this fixed
//! set of hooks, mirroring the pluggy-based `JacFeature`/`JacFeatureSpec`
//! split the reference implementation uses: one typed entry point per
//! data-spatial verb, registered through a plugin manager rather than called
//! directly. [`HookRegistry`] stands in for that plugin manager here: it
//! tells the code generator which hooks the active runtime library backs, so
//! a data-spatial statement whose hook isn't available lowers to a warning
//! and no emitted call instead of a call into nothing.
//!
//! [`HookSpec`] is the Rust-side mirror of `JacFeatureSpec`/
//! `JacFeatureDefaults`: a contract a native or embedded runtime can
//! implement, with [`DefaultHooks`] providing the one hook
//! (`elvis`) that has an obvious default and reporting the rest as
//! unimplemented, matching the reference implementation's plugin-less
//! fallback behavior.

use std::collections::BTreeSet;
use std::fmt;

use crate::errors::RuntimeError;

/// A stable name for one hook in the data-spatial runtime surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookName {
    /// Registers an architype class with its entry/exit ability lists.
    MakeArchitype,
    /// The `??` operator: yields the left side unless it's `None`.
    Elvis,
    /// Appends a value to the current walker's report collection.
    Report,
    /// Removes a reference from the walker's pending-visit queue.
    Ignore,
    /// Queues a reference for the current walker to visit.
    VisitNode,
    /// Halts the current walker.
    Disengage,
    /// Resolves a directional edge reference, optionally filtered by type.
    EdgeRef,
    /// Creates an edge connecting two architype references.
    Connect,
    /// Removes an edge connecting two architype references.
    Disconnect,
    /// Applies a comprehension-style bulk attribute assignment.
    AssignCompr,
    /// Returns the graph's root node.
    GetRoot,
    /// Builds a standalone edge instance ahead of a `connect`.
    BuildEdge,
}

impl HookName {
    /// The generated call's callee name, e.g. `_jac.visit_node`.
    #[must_use]
    pub const fn py_callee(self) -> &'static str {
        match self {
            Self::MakeArchitype => "_jac.make_architype",
            Self::Elvis => "_jac.elvis",
            Self::Report => "_jac.report",
            Self::Ignore => "_jac.ignore",
            Self::VisitNode => "_jac.visit_node",
            Self::Disengage => "_jac.disengage",
            Self::EdgeRef => "_jac.edge_ref",
            Self::Connect => "_jac.connect",
            Self::Disconnect => "_jac.disconnect",
            Self::AssignCompr => "_jac.assign_compr",
            Self::GetRoot => "_jac.get_root",
            Self::BuildEdge => "_jac.build_edge",
        }
    }

    /// Every hook the data-spatial lowering table can call, in the order
    /// `SPEC_FULL.md` §6.2 lists them.
    #[must_use]
    pub const fn all() -> [Self; 12] {
        [
            Self::MakeArchitype,
            Self::Elvis,
            Self::Report,
            Self::Ignore,
            Self::VisitNode,
            Self::Disengage,
            Self::EdgeRef,
            Self::Connect,
            Self::Disconnect,
            Self::AssignCompr,
            Self::GetRoot,
            Self::BuildEdge,
        ]
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.py_callee()) }
}

/// Which hooks the active runtime library backs.
///
/// The code generator consults this before emitting a data-spatial call: a
/// hook present here gets a verbatim call emitted; one absent gets a
/// feature-warning diagnostic and no emitted call, per the "feature warning"
/// branch of the error taxonomy.
#[derive(Debug, Clone)]
pub struct HookRegistry {
    available: BTreeSet<HookName>,
}

impl HookRegistry {
    /// A registry backing every hook in [`HookName::all`] — the full
    /// bootstrap runtime library surface.
    #[must_use]
    pub fn full() -> Self { Self { available: HookName::all().into_iter().collect() } }

    /// A registry backing none of the hooks, for exercising "unsupported in
    /// bootstrap" diagnostics without a real runtime library present.
    #[must_use]
    pub fn empty() -> Self { Self { available: BTreeSet::new() } }

    /// Registers `hook` as backed by the active runtime.
    pub fn register(&mut self, hook: HookName) { let _ = self.available.insert(hook); }

    /// Returns whether `hook` is backed by the active runtime.
    #[must_use]
    pub fn supports(&self, hook: HookName) -> bool { self.available.contains(&hook) }
}

impl Default for HookRegistry {
    fn default() -> Self { Self::full() }
}

/// A dynamically-typed runtime value, standing in for Python's `Any` at the
/// points [`HookSpec`] needs to talk about one without this crate depending
/// on a full object model.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Python's `None`.
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string.
    Str(String),
    /// A list of values.
    List(Vec<Value>),
    /// Anything this value model doesn't represent structurally, carried by
    /// its `repr()`-style text for diagnostics.
    Opaque(String),
}

impl Value {
    /// True for anything except `None` — the truthiness `elvis` checks.
    #[must_use]
    pub const fn is_present(&self) -> bool { !matches!(self, Self::None) }
}

/// The contract a native or embedded runtime implements to back the
/// data-spatial hook surface, mirroring `JacFeatureSpec` at the Rust layer.
///
/// Every method defaults to reporting itself unimplemented, the same
/// fallback the reference implementation gets from `JacFeatureDefaults` when
/// no plugin overrides a hook; [`DefaultHooks`] overrides only `elvis`,
/// whose semantics don't depend on a graph at all.
pub trait HookSpec {
    /// Jac's elvis (`??`) operator: `op1` unless it's `None`.
    ///
    /// # Errors
    ///
    /// Returns an error only if an implementor chooses to; the default never
    /// fails.
    fn elvis(&self, op1: Value, op2: Value) -> Result<Value, RuntimeError> {
        Ok(if op1.is_present() { op1 } else { op2 })
    }

    /// Appends `value` to the current walker's report collection.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn report(&mut self, value: Value) -> Result<(), RuntimeError> {
        Err(unimplemented_hook(HookName::Report, &value))
    }

    /// Queues `target` for the given walker to visit.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn visit_node(&mut self, walker: &Value, target: Value) -> Result<bool, RuntimeError> {
        Err(unimplemented_hook(HookName::VisitNode, walker))
    }

    /// Removes `target` from the walker's pending-visit queue without
    /// visiting it.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn ignore(&mut self, walker: &Value, target: Value) -> Result<bool, RuntimeError> {
        Err(unimplemented_hook(HookName::Ignore, walker))
    }

    /// Halts the given walker entirely.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn disengage(&mut self, walker: &Value) -> Result<bool, RuntimeError> {
        Err(unimplemented_hook(HookName::Disengage, walker))
    }

    /// Resolves edges leading away from `node` in `dir`, optionally filtered
    /// to a single edge-architype name.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn edge_ref(
        &self,
        node: &Value,
        dir: EdgeDir,
        filter_type: Option<&str>,
    ) -> Result<Vec<Value>, RuntimeError> {
        let _ = (dir, filter_type);
        Err(unimplemented_hook(HookName::EdgeRef, node))
    }

    /// Creates an edge of kind `edge_spec` connecting `left` to `right`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn connect(&mut self, left: Value, right: Value, edge_spec: &str) -> Result<Value, RuntimeError> {
        let _ = (right, edge_spec);
        Err(unimplemented_hook(HookName::Connect, &left))
    }

    /// Removes edges matching `op` connecting `left` to `right`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn disconnect(&mut self, left: Value, right: Value, op: &str) -> Result<Value, RuntimeError> {
        let _ = (right, op);
        Err(unimplemented_hook(HookName::Disconnect, &left))
    }

    /// Returns the graph's root node.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn get_root(&self) -> Result<Value, RuntimeError> {
        Err(unimplemented_hook(HookName::GetRoot, &Value::None))
    }

    /// Builds a standalone edge instance of kind `conn_type` and direction
    /// `dir`, optionally assigning its `has` members from `conn_assign`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Generic`] when no runtime backs this hook.
    fn build_edge(
        &mut self,
        dir: EdgeDir,
        conn_type: Option<&str>,
        conn_assign: Option<Value>,
    ) -> Result<Value, RuntimeError> {
        let _ = (dir, conn_type);
        Err(unimplemented_hook(HookName::BuildEdge, &conn_assign.unwrap_or(Value::None)))
    }
}

/// Which way a hook traverses or creates an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDir {
    /// Outgoing edges.
    Out,
    /// Incoming edges.
    In,
    /// Either direction.
    Any,
}

fn unimplemented_hook(hook: HookName, subject: &Value) -> RuntimeError {
    RuntimeError::generic(format!("{hook} has no backing runtime implementation (called with {subject:?})"))
}

/// The bootstrap [`HookSpec`] implementation: only `elvis` has real logic,
/// every other hook reports itself unimplemented. Installed when no richer
/// runtime library is configured, so generated code still runs far enough to
/// surface exactly which data-spatial feature it needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl HookSpec for DefaultHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elvis_prefers_the_present_operand() {
        let hooks = DefaultHooks;
        assert_eq!(hooks.elvis(Value::Int(1), Value::Int(2)).unwrap(), Value::Int(1));
        assert_eq!(hooks.elvis(Value::None, Value::Int(2)).unwrap(), Value::Int(2));
    }

    #[test]
    fn unbacked_hooks_report_themselves_by_name() {
        let mut hooks = DefaultHooks;
        let err = hooks.report(Value::Int(1)).unwrap_err();
        assert!(err.to_string().contains("_jac.report"));
    }

    #[test]
    fn registry_distinguishes_full_from_empty() {
        let full = HookRegistry::full();
        let empty = HookRegistry::empty();
        assert!(full.supports(HookName::VisitNode));
        assert!(!empty.supports(HookName::VisitNode));
    }
}
