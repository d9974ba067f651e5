//! Symbol table implementation.

use jac_ast::meta::SymbolId;
use jac_ast::nodes::{AccessLevel, NodeID};
use jac_source::types::Span;
use rustc_hash::FxHashMap;

use super::BUILTINS;
use super::scope::{Scope, ScopeID, ScopeKind};
use super::types::{Symbol, SymbolKind};

/// The main symbol table: every scope reachable from the module scope, plus
/// the stack of scopes currently open while a pass walks the tree.
#[derive(Debug)]
pub struct SymbolTable {
    /// All scopes indexed by ID.
    scopes: Vec<Scope>,
    /// Current scope stack (for traversal).
    scope_stack: Vec<ScopeID>,
    /// Map from a scope-introducing AST node to the scope it introduces.
    node_to_scope: FxHashMap<NodeID, ScopeID>,
    /// Next scope ID to allocate.
    next_scope_id: u32,
    /// Every symbol's home scope and name, indexed by [`SymbolId`] — lets
    /// the def-use pass go from a `Meta::sym` handle back to the `Symbol`
    /// it names without this crate's `Symbol` needing a back-reference into
    /// `jac_ast`.
    by_id: Vec<(ScopeID, String)>,
}

impl SymbolTable {
    /// Creates a new symbol table with a module scope, seeded with the
    /// builtins.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            scopes: Vec::new(),
            scope_stack: Vec::new(),
            node_to_scope: FxHashMap::default(),
            next_scope_id: 0,
            by_id: Vec::new(),
        };

        let module_scope_id = table.create_scope(ScopeKind::Module, None);
        table.scope_stack.push(module_scope_id);
        table.register_builtins();

        table
    }

    /// Associates a scope-introducing AST node with the scope it introduces.
    pub fn associate_node_with_scope(&mut self, node_id: NodeID, scope_id: ScopeID) {
        let _ = self.node_to_scope.insert(node_id, scope_id);
    }

    /// Creates a new scope with the given kind and parent.
    ///
    /// Returns the ID of the newly created scope.
    pub fn create_scope(&mut self, kind: ScopeKind, parent: Option<ScopeID>) -> ScopeID {
        let id = ScopeID::new(self.next_scope_id);
        self.next_scope_id += 1;

        let scope = Scope::new(id, kind, parent);

        if let Some(parent_id) = parent
            && let Some(parent_scope) = self.scopes.get_mut(parent_id.value() as usize)
        {
            parent_scope.children.push(id);
        }

        self.scopes.push(scope);
        id
    }

    /// Gets the current (innermost open) scope ID.
    #[must_use]
    pub fn current_scope(&self) -> Option<ScopeID> { self.scope_stack.last().copied() }

    /// Defines a symbol in the current scope.
    ///
    /// ## Errors
    ///
    /// Returns the pre-existing declaration's span if the name is already
    /// bound in the current scope.
    pub fn define_symbol(&mut self, name: String, symbol: Symbol) -> Result<(), Span> {
        let Some(scope_id) = self.current_scope() else { return Ok(()) };
        self.insert_into(scope_id, name, symbol)
    }

    /// Inserts `symbol` into `scope_id` directly, bypassing the scope
    /// stack. Assigns the symbol's [`SymbolId`] as part of insertion.
    fn insert_into(&mut self, scope_id: ScopeID, name: String, mut symbol: Symbol) -> Result<(), Span> {
        let Some(scope) = self.scopes.get_mut(scope_id.value() as usize) else { return Ok(()) };
        let id = SymbolId::new(u32::try_from(self.by_id.len()).unwrap_or(u32::MAX));
        symbol.id = id;

        scope.insert_symbol(name.clone(), symbol)?;
        self.by_id.push((scope_id, name));
        Ok(())
    }

    /// Looks up a symbol by the [`SymbolId`] a node's `Meta::sym` carries.
    #[must_use]
    pub fn resolve_id(&self, id: SymbolId) -> Option<&Symbol> {
        let (scope_id, name) = self.by_id.get(id.index() as usize)?;
        self.get_scope(*scope_id)?.get_symbol(name)
    }

    /// Mutable counterpart of [`Self::resolve_id`], for recording a new
    /// reference on the resolved symbol.
    pub fn resolve_id_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        let (scope_id, name) = self.by_id.get(id.index() as usize)?.clone();
        self.get_scope_mut(scope_id)?.get_symbol_mut(&name)
    }

    /// Enters a scope by pushing it onto the scope stack.
    pub fn enter_scope(&mut self, scope_id: ScopeID) { self.scope_stack.push(scope_id); }

    /// Exits the current scope by popping it from the scope stack. The
    /// module scope is never popped; returns `None` once it's the only
    /// scope left open.
    pub fn exit_scope(&mut self) -> Option<ScopeID> {
        if self.scope_stack.len() > 1 { self.scope_stack.pop() } else { None }
    }

    /// Gets the scope associated with a scope-introducing AST node.
    #[must_use]
    pub fn get_node_scope(&self, node_id: NodeID) -> Option<ScopeID> {
        self.node_to_scope.get(&node_id).copied()
    }

    /// Returns the root (module) scope.
    #[must_use]
    pub fn get_root_scope(&self) -> Option<&Scope> { self.scopes.first() }

    /// Gets a reference to a scope by ID.
    #[must_use]
    pub fn get_scope(&self, scope_id: ScopeID) -> Option<&Scope> {
        self.scopes.get(scope_id.value() as usize)
    }

    /// Gets a mutable reference to a scope by ID.
    pub fn get_scope_mut(&mut self, scope_id: ScopeID) -> Option<&mut Scope> {
        self.scopes.get_mut(scope_id.value() as usize)
    }

    /// Looks up a symbol, walking from the current scope outward to the
    /// module scope. This is the DefUse pass's resolution order.
    #[must_use]
    pub fn lookup_in_scope_chain(&self, name: &str) -> Option<&Symbol> {
        for &scope_id in self.scope_stack.iter().rev() {
            if let Some(scope) = self.scopes.get(scope_id.value() as usize)
                && let Some(symbol) = scope.get_symbol(name)
            {
                return Some(symbol);
            }
        }
        None
    }

    /// Looks up a symbol by name, searching every scope in the table. Useful
    /// for tests and introspection; normal resolution should use
    /// [`Self::lookup_in_scope_chain`].
    #[must_use]
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().find_map(|scope| scope.get_symbol(name))
    }

    /// Returns the module (root) scope ID.
    #[must_use]
    pub fn module_scope(&self) -> Option<ScopeID> { self.scopes.first().map(|scope| scope.id) }

    /// Returns the total number of scopes in the table.
    #[must_use]
    pub const fn scope_count(&self) -> usize { self.scopes.len() }

    /// Returns an iterator over all scopes and their IDs.
    pub fn scopes(&self) -> impl Iterator<Item = (ScopeID, &Scope)> {
        self.scopes.iter().map(|scope| (scope.id, scope))
    }

    /// Registers the builtins in the module scope. They have no real
    /// declaring node, so they're anchored to a sentinel `NodeID` no parsed
    /// program can ever produce.
    fn register_builtins(&mut self) {
        let builtin_node_id = NodeID::new(u32::MAX, 0);
        let builtin_span = Span::synthetic();

        if let Some(module_scope_id) = self.module_scope() {
            for &builtin_name in BUILTINS {
                let symbol = Symbol::new(
                    builtin_name.to_string(),
                    SymbolKind::Builtin,
                    AccessLevel::Public,
                    builtin_node_id,
                    builtin_span,
                    module_scope_id,
                );

                drop(self.insert_into(module_scope_id, builtin_name.to_string(), symbol));
            }
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self { Self::new() }
}
