//! The AST arena: a bump-allocated, generation-counted node store.
//!
//! Nodes are addressed by [`NodeID`], a pair of an arena index and a
//! generation counter. Removing a node bumps its slot's generation so any
//! `NodeID` captured before the removal can never be mistaken for whatever
//! later reuses that slot.

use bumpalo::Bump;
use jac_source::types::Span;

use crate::nodes::{ASTNode, AnyNode, Node, NodeID, NodeKind};
use crate::visitor::{Visitor, VisitorError, VisitorResult};

#[derive(Debug, Clone, Copy)]
struct SlotMetadata {
    generation: u32,
    occupied: bool,
}

impl SlotMetadata {
    const fn new(occupied: bool) -> Self { Self { generation: 1, occupied } }

    const fn increment_generation(&mut self) { self.generation = self.generation.wrapping_add(1); }
}

/// An arena for allocating AST nodes.
#[derive(Debug)]
pub struct AST {
    /// Bump allocator backing interned strings (`alloc_str`).
    allocator: Bump,
    nodes: Vec<Option<Node>>,
    metadata: Vec<SlotMetadata>,
    free_list: Vec<u32>,
    root: Option<NodeID>,
}

impl AST {
    /// Creates a new empty AST arena.
    #[must_use]
    pub fn new() -> Self {
        Self { allocator: Bump::new(), nodes: Vec::new(), metadata: Vec::new(), free_list: Vec::new(), root: None }
    }

    /// Creates a new AST arena with the given initial node capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            allocator: Bump::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            metadata: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            root: None,
        }
    }

    /// Sets the root node of the AST (the module node).
    pub const fn set_root(&mut self, root: NodeID) { self.root = Some(root); }

    /// Returns the root node of the AST, if any.
    #[must_use]
    pub const fn root(&self) -> Option<NodeID> { self.root }

    /// Allocates a new node in the arena, reusing a freed slot when one is
    /// available.
    pub fn alloc_node(&mut self, kind: NodeKind, data: AnyNode, span: Span) -> NodeID {
        let (index, generation) = if let Some(free_index) = self.free_list.pop() {
            let metadata = &self.metadata[free_index as usize];
            (free_index, metadata.generation)
        } else {
            let index = self.nodes.len() as u32;
            self.nodes.push(None);
            self.metadata.push(SlotMetadata::new(true));
            (index, 1)
        };

        let node = Node { kind, data, span, parent: None };
        self.nodes[index as usize] = Some(node);
        self.metadata[index as usize].occupied = true;

        NodeID::new(index, generation)
    }

    /// Gets a reference to a node by id, validating the generation counter.
    #[must_use]
    pub fn get_node(&self, id: NodeID) -> Option<&Node> {
        let index = id.index() as usize;
        if index >= self.nodes.len() || self.metadata[index].generation != id.generation() {
            return None;
        }
        self.nodes[index].as_ref()
    }

    /// Gets a mutable reference to a node by id, validating the generation
    /// counter.
    pub fn get_node_mut(&mut self, id: NodeID) -> Option<&mut Node> {
        let index = id.index() as usize;
        if index >= self.nodes.len() || self.metadata[index].generation != id.generation() {
            return None;
        }
        self.nodes[index].as_mut()
    }

    /// Returns whether a node with this id currently exists in the arena.
    #[must_use]
    pub fn node_exists(&self, id: NodeID) -> bool {
        self.get_node(id).is_some()
    }

    /// Sets the parent of a node.
    pub fn set_parent(&mut self, child: NodeID, parent: NodeID) -> bool {
        let Some(node) = self.get_node_mut(child) else { return false };
        node.parent = Some(parent);
        true
    }

    /// Gets the parent of a node, if any.
    #[must_use]
    pub fn get_parent(&self, id: NodeID) -> Option<NodeID> {
        self.get_node(id)?.parent
    }

    /// Allocates a string in the arena's bump allocator.
    #[must_use]
    pub fn alloc_str(&self, s: &str) -> &str { self.allocator.alloc_str(s) }

    /// Returns the number of live nodes currently stored in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize { self.nodes.iter().filter(|n| n.is_some()).count() }

    /// Removes a node, bumping its slot's generation so stale `NodeID`s
    /// referring to it become invalid.
    pub fn remove(&mut self, id: NodeID) -> bool {
        let index = id.index() as usize;
        if index >= self.nodes.len()
            || self.metadata[index].generation != id.generation()
            || self.nodes[index].is_none()
        {
            return false;
        }

        self.nodes[index] = None;
        self.metadata[index].increment_generation();
        self.metadata[index].occupied = false;
        self.free_list.push(id.index());

        true
    }

    /// Dispatches a node to a `Visitor<T>` implementation.
    pub fn visit_as<T>(&mut self, node_id: NodeID) -> Option<T>
    where Self: Visitor<T> {
        <Self as Visitor<T>>::visit(self, node_id)
    }

    /// Visits a node via a `Visitor<T>`, converting a missed dispatch into a
    /// `VisitorError`.
    ///
    /// # Errors
    ///
    /// Returns [`VisitorError::NodeNotFound`] if `node_id` isn't in the
    /// arena, or [`VisitorError::TypeMismatch`] if the visitor declined the
    /// node's actual kind.
    pub fn get_node_as<T>(&mut self, node_id: NodeID) -> VisitorResult<T>
    where
        Self: Visitor<T>,
        T: 'static,
    {
        let node = self.get_node(node_id).ok_or(VisitorError::NodeNotFound(node_id))?;
        let actual = format!("{:?}", node.kind);

        <Self as Visitor<T>>::visit(self, node_id).ok_or(VisitorError::TypeMismatch {
            node_id,
            expected: std::any::type_name::<T>().to_string(),
            actual,
        })
    }

    /// Pre-order traversal: visits `node_id`, then each child, recursively.
    /// Stops early (returning `false`) the moment `visit_fn` returns `false`.
    pub fn traverse_pre_order<F>(&self, node_id: NodeID, visit_fn: &mut F) -> bool
    where F: FnMut(NodeID) -> bool {
        if !visit_fn(node_id) {
            return false;
        }

        let Some(node) = self.get_node(node_id) else { return false };

        for child_id in node.data.children() {
            if !self.traverse_pre_order(child_id, visit_fn) {
                return false;
            }
        }

        true
    }

    /// Post-order traversal: visits each child recursively, then `node_id`.
    pub fn traverse_post_order<F>(&self, node_id: NodeID, visit_fn: &mut F) -> bool
    where F: FnMut(NodeID) -> bool {
        let Some(node) = self.get_node(node_id) else { return false };

        for child_id in node.data.children() {
            if !self.traverse_post_order(child_id, visit_fn) {
                return false;
            }
        }

        visit_fn(node_id)
    }

    /// Finds every node of the given kind reachable from `start_node`.
    #[must_use]
    pub fn find_nodes_of_kind(&self, start_node: NodeID, node_kind: NodeKind) -> Vec<NodeID> {
        let mut result = Vec::new();
        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if let Some(node) = self.get_node(node_id)
                && node.kind == node_kind
            {
                result.push(node_id);
            }
            true
        });
        result
    }

    /// Collects every node reachable from `start_node`, pre-order.
    #[must_use]
    pub fn collect_nodes_pre_order(&self, start_node: NodeID) -> Vec<NodeID> {
        let mut result = Vec::new();
        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            result.push(node_id);
            true
        });
        result
    }

    /// Collects every node reachable from `start_node`, post-order.
    #[must_use]
    pub fn collect_nodes_post_order(&self, start_node: NodeID) -> Vec<NodeID> {
        let mut result = Vec::new();
        let _ = self.traverse_post_order(start_node, &mut |node_id| {
            result.push(node_id);
            true
        });
        result
    }

    /// Maps `f` over every node reachable from `start_node`, pre-order.
    pub fn map_pre_order<F, T>(&self, start_node: NodeID, f: F) -> Vec<T>
    where F: FnMut(NodeID) -> T {
        let mut results = Vec::new();
        let mut func = f;
        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            results.push(func(node_id));
            true
        });
        results
    }

    /// Maps `f` over every node reachable from `start_node`, post-order.
    pub fn map_post_order<F, T>(&self, start_node: NodeID, f: F) -> Vec<T>
    where F: FnMut(NodeID) -> T {
        let mut results = Vec::new();
        let mut func = f;
        let _ = self.traverse_post_order(start_node, &mut |node_id| {
            results.push(func(node_id));
            true
        });
        results
    }

    /// Filters nodes reachable from `start_node` by a predicate, pre-order.
    pub fn filter_nodes<F>(&self, start_node: NodeID, mut pred: F) -> Vec<NodeID>
    where F: FnMut(NodeID) -> bool {
        let mut results = Vec::new();
        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if pred(node_id) {
                results.push(node_id);
            }
            true
        });
        results
    }

    /// Finds the first node reachable from `start_node` matching a predicate.
    pub fn find_node<F>(&self, start_node: NodeID, mut pred: F) -> Option<NodeID>
    where F: FnMut(NodeID) -> bool {
        let mut result = None;
        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if pred(node_id) {
                result = Some(node_id);
                false
            } else {
                true
            }
        });
        result
    }

    /// Visits a node and its descendants with a callback over `&Node`,
    /// stopping early if the callback returns `false`.
    pub fn visit_with<F>(&self, node_id: NodeID, mut visitor: F) -> bool
    where F: FnMut(&Node) -> bool {
        let Some(node) = self.get_node(node_id) else { return false };

        if !visitor(node) {
            return false;
        }

        for child_id in node.data.children() {
            if !self.visit_with(child_id, |n| visitor(n)) {
                return false;
            }
        }

        true
    }
}

impl Clone for AST {
    fn clone(&self) -> Self {
        Self {
            allocator: Bump::new(),
            nodes: self.nodes.clone(),
            metadata: self.metadata.clone(),
            free_list: self.free_list.clone(),
            root: self.root,
        }
    }
}

impl Default for AST {
    fn default() -> Self { Self::new() }
}

impl Drop for AST {
    fn drop(&mut self) {
        for node in &mut self.nodes {
            *node = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use jac_source::types::Span;

    use super::*;
    use crate::nodes::{NameTok, NodeKind};

    fn leaf(ast: &mut AST, text: &str) -> NodeID {
        let id = NodeID::new(ast.node_count() as u32, 1);
        let node = NameTok::new(text.to_string(), id, Span::synthetic());
        ast.alloc_node(NodeKind::Token, AnyNode::NameTok(node), Span::synthetic())
    }

    #[test]
    fn removed_node_invalidates_its_old_id() {
        let mut ast = AST::new();
        let id = leaf(&mut ast, "x");
        assert!(ast.node_exists(id));

        assert!(ast.remove(id));
        assert!(!ast.node_exists(id));

        let reused = leaf(&mut ast, "y");
        assert_eq!(reused.index(), id.index());
        assert_ne!(reused.generation(), id.generation());
    }

    #[test]
    fn pre_order_traversal_visits_parent_before_children() {
        let mut ast = AST::new();
        let a = leaf(&mut ast, "a");
        let b = leaf(&mut ast, "b");
        let list = crate::nodes::ListExpr::new(vec![a, b], false, NodeID::new(2, 1), Span::synthetic());
        let list_id = ast.alloc_node(NodeKind::Expression, AnyNode::ListExpr(list), Span::synthetic());

        let order = ast.collect_nodes_pre_order(list_id);
        assert_eq!(order, vec![list_id, a, b]);
    }
}
