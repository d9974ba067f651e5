//! The visitor pattern over the node arena: double dispatch through
//! [`Visitable`] to a [`Visitor`]/[`MutVisitor`] implementation, addressed by
//! `NodeID` rather than borrowed references so visitors can hold onto the
//! arena across calls.

use std::fmt::{self, Display, Formatter};

use crate::nodes::NodeID;

/// Implemented by every concrete node type, enabling dispatch to the
/// matching visitor method based on the node's runtime variant.
pub trait Visitable {
    /// Dispatches to the matching method of an immutable visitor.
    ///
    /// # Errors
    ///
    /// Propagates whatever [`VisitorError`] the visitor method returns.
    fn accept<T>(&self, visitor: &mut dyn Visitor<T>, node_id: NodeID) -> VisitorResult<T>;

    /// Dispatches to the matching method of a mutable visitor.
    ///
    /// # Errors
    ///
    /// Propagates whatever [`VisitorError`] the visitor method returns.
    fn accept_mut<T>(&self, visitor: &mut dyn MutVisitor<T>, node_id: NodeID) -> VisitorResult<T>;
}

/// Generates the `visit_*` methods shared by `Visitor<T>` and `MutVisitor<T>`,
/// each defaulting to an "unimplemented" error so a pass only needs to
/// override the handful of node kinds it actually cares about.
macro_rules! visit_default {
    ($($method:ident),* $(,)?) => {
        $(
            /// Visits a node of the matching kind.
            ///
            /// # Errors
            ///
            /// Returns [`VisitorError::Custom`] unless overridden.
            fn $method(&mut self, node_id: NodeID) -> VisitorResult<T> {
                Err(VisitorError::Custom(format!(
                    concat!(stringify!($method), " not implemented for node {}"), node_id,
                )))
            }
        )*
    };
}

/// An immutable visitor over the AST, parameterized by its return type `T`.
pub trait Visitor<T> {
    /// Visits `node_id`, returning `Err` on failure instead of `None`.
    ///
    /// # Errors
    ///
    /// Returns [`VisitorError::Custom`] if [`Visitor::visit`] returns `None`.
    fn try_visit(&mut self, node_id: NodeID) -> VisitorResult<T> {
        self.visit(node_id).ok_or_else(|| VisitorError::Custom(format!("failed to visit node {node_id}")))
    }

    /// Visits an optional node, passing `None` through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`Visitor::try_visit`]'s error for a present node.
    fn try_visit_opt(&mut self, node_id_opt: Option<NodeID>) -> VisitorResult<Option<T>> {
        node_id_opt.map_or_else(|| Ok(None), |node_id| self.try_visit(node_id).map(Some))
    }

    /// Visits every node in `node_ids`, failing fast on the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error any element visit produces.
    fn visit_list(&mut self, node_ids: &[NodeID]) -> VisitorResult<Vec<T>> {
        node_ids.iter().map(|&id| self.try_visit(id)).collect()
    }

    /// The generic entry point: looks up `node_id` and dispatches to the
    /// matching `visit_*` method, or returns `None` if the node is absent.
    fn visit(&mut self, node_id: NodeID) -> Option<T>;

    visit_default!(
        visit_module,
        visit_elements,
        visit_code_block,
        visit_arch_block,
        visit_global_vars,
        visit_test,
        visit_module_code,
        visit_import,
        visit_architype,
        visit_ability,
        visit_ability_spec,
        visit_arch_decl,
        visit_arch_def,
        visit_ability_decl,
        visit_ability_def,
        visit_arch_has,
        visit_if_stmt,
        visit_while_stmt,
        visit_iter_for_stmt,
        visit_in_for_stmt,
        visit_dict_for_stmt,
        visit_try_stmt,
        visit_except_handler,
        visit_raise_stmt,
        visit_assert_stmt,
        visit_return_stmt,
        visit_yield_stmt,
        visit_ctrl_stmt,
        visit_delete_stmt,
        visit_visit_stmt,
        visit_revisit_stmt,
        visit_disengage_stmt,
        visit_sync_stmt,
        visit_report_stmt,
        visit_ignore_stmt,
        visit_expr_stmt,
        visit_binary_expr,
        visit_unary_expr,
        visit_if_else_expr,
        visit_spawn_expr,
        visit_edge_op_ref,
        visit_connect_op,
        visit_unpack_expr,
        visit_multi_string_expr,
        visit_list_expr,
        visit_dict_expr,
        visit_comprehension_expr,
        visit_atom_trailer_expr,
        visit_func_call_expr,
        visit_index_slice_expr,
        visit_kind_ref,
        visit_name_tok,
        visit_keyword_tok,
        visit_literal_tok,
        visit_base_classes,
        visit_module_path,
        visit_module_items,
        visit_module_item,
        visit_name_list,
        visit_func_params,
        visit_param_var,
        visit_has_var,
        visit_assignment_list,
        visit_assignment,
        visit_doc_string,
        visit_event_signature,
        visit_type_spec,
        visit_func_signature,
    );
}

/// A mutable visitor over the AST. Identical interface to [`Visitor`], but
/// takes `&mut self` so a pass can accumulate state (diagnostics, symbol
/// tables, generated code) while it walks.
pub trait MutVisitor<T> {
    /// Visits `node_id`, returning `Err` on failure instead of `None`.
    ///
    /// # Errors
    ///
    /// Returns [`VisitorError::Custom`] if [`MutVisitor::visit`] returns `None`.
    fn try_visit(&mut self, node_id: NodeID) -> VisitorResult<T> {
        self.visit(node_id).ok_or_else(|| VisitorError::Custom(format!("failed to visit node {node_id}")))
    }

    /// Visits an optional node, passing `None` through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`MutVisitor::try_visit`]'s error for a present node.
    fn try_visit_opt(&mut self, node_id_opt: Option<NodeID>) -> VisitorResult<Option<T>> {
        node_id_opt.map_or_else(|| Ok(None), |node_id| self.try_visit(node_id).map(Some))
    }

    /// Visits every node in `node_ids`, failing fast on the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error any element visit produces.
    fn visit_list(&mut self, node_ids: &[NodeID]) -> VisitorResult<Vec<T>> {
        node_ids.iter().map(|&id| self.try_visit(id)).collect()
    }

    /// The generic entry point: looks up `node_id` and dispatches to the
    /// matching `visit_*` method, or returns `None` if the node is absent.
    fn visit(&mut self, node_id: NodeID) -> Option<T>;

    visit_default!(
        visit_module,
        visit_elements,
        visit_code_block,
        visit_arch_block,
        visit_global_vars,
        visit_test,
        visit_module_code,
        visit_import,
        visit_architype,
        visit_ability,
        visit_ability_spec,
        visit_arch_decl,
        visit_arch_def,
        visit_ability_decl,
        visit_ability_def,
        visit_arch_has,
        visit_if_stmt,
        visit_while_stmt,
        visit_iter_for_stmt,
        visit_in_for_stmt,
        visit_dict_for_stmt,
        visit_try_stmt,
        visit_except_handler,
        visit_raise_stmt,
        visit_assert_stmt,
        visit_return_stmt,
        visit_yield_stmt,
        visit_ctrl_stmt,
        visit_delete_stmt,
        visit_visit_stmt,
        visit_revisit_stmt,
        visit_disengage_stmt,
        visit_sync_stmt,
        visit_report_stmt,
        visit_ignore_stmt,
        visit_expr_stmt,
        visit_binary_expr,
        visit_unary_expr,
        visit_if_else_expr,
        visit_spawn_expr,
        visit_edge_op_ref,
        visit_connect_op,
        visit_unpack_expr,
        visit_multi_string_expr,
        visit_list_expr,
        visit_dict_expr,
        visit_comprehension_expr,
        visit_atom_trailer_expr,
        visit_func_call_expr,
        visit_index_slice_expr,
        visit_kind_ref,
        visit_name_tok,
        visit_keyword_tok,
        visit_literal_tok,
        visit_base_classes,
        visit_module_path,
        visit_module_items,
        visit_module_item,
        visit_name_list,
        visit_func_params,
        visit_param_var,
        visit_has_var,
        visit_assignment_list,
        visit_assignment,
        visit_doc_string,
        visit_event_signature,
        visit_type_spec,
        visit_func_signature,
    );
}

/// An error a visitor method can fail with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitorError {
    /// The `NodeID` isn't present in the arena.
    NodeNotFound(NodeID),
    /// The node was found but isn't the kind the caller expected.
    TypeMismatch {
        /// The node that mismatched.
        node_id: NodeID,
        /// The type name the caller asked for.
        expected: String,
        /// The node's actual kind, formatted for display.
        actual: String,
    },
    /// Any other visitor failure, with a human-readable message.
    Custom(String),
}

impl Display for VisitorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::TypeMismatch { node_id, expected, actual } => {
                write!(f, "type mismatch for node {node_id}: expected {expected}, got {actual}")
            }
            Self::Custom(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for VisitorError {}

/// The result type every visitor method returns.
pub type VisitorResult<T> = Result<T, VisitorError>;
