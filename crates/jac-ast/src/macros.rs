//! Declarative macros that generate the boilerplate each node type and the
//! `AnyNode` enum need, following the master-list approach: one line per
//! variant drives the `id`/`parent`/`span` accessors, the visitor dispatch,
//! and the `Display` forwarding, so adding a node kind never means touching
//! more than its own struct plus one macro invocation.

/// Implements `ASTNode`'s identity/location accessors for a concrete node
/// struct that has `id`, `parent`, and `span` fields, plus a `children`
/// closure for nodes that own child nodes (pass `|_: &Self| Vec::new()` for
/// leaves).
macro_rules! impl_node_core {
    ($ty:ty, $kind:expr, $children:expr) => {
        impl $crate::nodes::ASTNode for $ty {
            fn id(&self) -> $crate::nodes::NodeID { self.id }

            fn parent(&self) -> Option<$crate::nodes::NodeID> { self.parent }

            fn with_parent(mut self, parent: $crate::nodes::NodeID) -> Self {
                self.parent = Some(parent);
                self
            }

            fn kind(&self) -> $crate::nodes::NodeKind { $kind }

            fn span(&self) -> jac_source::types::Span { self.span }

            fn children(&self) -> Vec<$crate::nodes::NodeID> { ($children)(self) }
        }
    };
}

/// Generates a `Visitable` impl for a concrete node type that dispatches to
/// one fixed visitor method.
macro_rules! impl_visitable {
    ($ty:ty, $method:ident) => {
        impl $crate::visitor::Visitable for $ty {
            fn accept<T>(
                &self,
                visitor: &mut dyn $crate::visitor::Visitor<T>,
                node_id: $crate::nodes::NodeID,
            ) -> $crate::visitor::VisitorResult<T> {
                visitor.$method(node_id)
            }

            fn accept_mut<T>(
                &self,
                visitor: &mut dyn $crate::visitor::MutVisitor<T>,
                node_id: $crate::nodes::NodeID,
            ) -> $crate::visitor::VisitorResult<T> {
                visitor.$method(node_id)
            }
        }
    };
}

pub(crate) use {impl_node_core, impl_visitable};

/// Master list of every `AnyNode` variant: `EnumVariant(Type) => visitor_method`.
///
/// The single source of truth every enum-wide trait impl below is generated
/// from. Adding a node kind means adding its struct and one line here.
macro_rules! for_each_node_variant {
    ($callback:ident) => {
        $callback! {
            // structural
            Module(Module) => visit_module,
            Elements(Elements) => visit_elements,
            CodeBlock(CodeBlock) => visit_code_block,
            ArchBlock(ArchBlock) => visit_arch_block,
            // top-level
            GlobalVars(GlobalVars) => visit_global_vars,
            Test(Test) => visit_test,
            ModuleCode(ModuleCode) => visit_module_code,
            Import(Import) => visit_import,
            Architype(Architype) => visit_architype,
            Ability(Ability) => visit_ability,
            AbilitySpec(AbilitySpec) => visit_ability_spec,
            ArchDecl(ArchDecl) => visit_arch_decl,
            ArchDef(ArchDef) => visit_arch_def,
            AbilityDecl(AbilityDecl) => visit_ability_decl,
            AbilityDef(AbilityDef) => visit_ability_def,
            ArchHas(ArchHas) => visit_arch_has,
            // statements
            IfStmt(IfStmt) => visit_if_stmt,
            WhileStmt(WhileStmt) => visit_while_stmt,
            IterForStmt(IterForStmt) => visit_iter_for_stmt,
            InForStmt(InForStmt) => visit_in_for_stmt,
            DictForStmt(DictForStmt) => visit_dict_for_stmt,
            TryStmt(TryStmt) => visit_try_stmt,
            ExceptHandler(ExceptHandler) => visit_except_handler,
            RaiseStmt(RaiseStmt) => visit_raise_stmt,
            AssertStmt(AssertStmt) => visit_assert_stmt,
            ReturnStmt(ReturnStmt) => visit_return_stmt,
            YieldStmt(YieldStmt) => visit_yield_stmt,
            CtrlStmt(CtrlStmt) => visit_ctrl_stmt,
            DeleteStmt(DeleteStmt) => visit_delete_stmt,
            VisitStmt(VisitStmt) => visit_visit_stmt,
            RevisitStmt(RevisitStmt) => visit_revisit_stmt,
            DisengageStmt(DisengageStmt) => visit_disengage_stmt,
            SyncStmt(SyncStmt) => visit_sync_stmt,
            ReportStmt(ReportStmt) => visit_report_stmt,
            IgnoreStmt(IgnoreStmt) => visit_ignore_stmt,
            ExprStmt(ExprStmt) => visit_expr_stmt,
            // expressions
            BinaryExpr(BinaryExpr) => visit_binary_expr,
            UnaryExpr(UnaryExpr) => visit_unary_expr,
            IfElseExpr(IfElseExpr) => visit_if_else_expr,
            SpawnExpr(SpawnExpr) => visit_spawn_expr,
            EdgeOpRef(EdgeOpRef) => visit_edge_op_ref,
            ConnectOp(ConnectOp) => visit_connect_op,
            UnpackExpr(UnpackExpr) => visit_unpack_expr,
            MultiStringExpr(MultiStringExpr) => visit_multi_string_expr,
            ListExpr(ListExpr) => visit_list_expr,
            DictExpr(DictExpr) => visit_dict_expr,
            ComprehensionExpr(ComprehensionExpr) => visit_comprehension_expr,
            AtomTrailerExpr(AtomTrailerExpr) => visit_atom_trailer_expr,
            FuncCallExpr(FuncCallExpr) => visit_func_call_expr,
            IndexSliceExpr(IndexSliceExpr) => visit_index_slice_expr,
            // references
            KindRef(KindRef) => visit_kind_ref,
            // tokens
            NameTok(NameTok) => visit_name_tok,
            KeywordTok(KeywordTok) => visit_keyword_tok,
            LiteralTok(LiteralTok) => visit_literal_tok,
            // support (lowering-table supplement)
            BaseClasses(BaseClasses) => visit_base_classes,
            ModulePath(ModulePath) => visit_module_path,
            ModuleItems(ModuleItems) => visit_module_items,
            ModuleItem(ModuleItem) => visit_module_item,
            NameList(NameList) => visit_name_list,
            FuncParams(FuncParams) => visit_func_params,
            ParamVar(ParamVar) => visit_param_var,
            HasVar(HasVar) => visit_has_var,
            AssignmentList(AssignmentList) => visit_assignment_list,
            Assignment(Assignment) => visit_assignment,
            DocString(DocString) => visit_doc_string,
            EventSignature(EventSignature) => visit_event_signature,
            TypeSpec(TypeSpec) => visit_type_spec,
            FuncSignature(FuncSignature) => visit_func_signature,
        }
    };
}

/// Generates the `ASTNode` impl for `AnyNode` that forwards to each variant's
/// own impl.
macro_rules! impl_astnode_for_anynode {
    ($($variant:ident($type:ty) => $visit:ident),* $(,)?) => {
        impl $crate::nodes::ASTNode for $crate::nodes::AnyNode {
            fn id(&self) -> $crate::nodes::NodeID {
                match self { $(Self::$variant(node) => node.id(),)* }
            }

            fn parent(&self) -> Option<$crate::nodes::NodeID> {
                match self { $(Self::$variant(node) => node.parent(),)* }
            }

            fn with_parent(self, parent: $crate::nodes::NodeID) -> Self {
                match self { $(Self::$variant(node) => Self::$variant(node.with_parent(parent)),)* }
            }

            fn kind(&self) -> $crate::nodes::NodeKind {
                match self { $(Self::$variant(node) => node.kind(),)* }
            }

            fn span(&self) -> jac_source::types::Span {
                match self { $(Self::$variant(node) => node.span(),)* }
            }

            fn children(&self) -> Vec<$crate::nodes::NodeID> {
                match self { $(Self::$variant(node) => node.children(),)* }
            }
        }
    };
}

/// Generates the `Visitable` impl for `AnyNode` that dispatches to the
/// matching visitor method.
macro_rules! impl_visitable_for_anynode {
    ($($variant:ident($type:ty) => $visit:ident),* $(,)?) => {
        impl $crate::visitor::Visitable for $crate::nodes::AnyNode {
            fn accept<T>(
                &self,
                visitor: &mut dyn $crate::visitor::Visitor<T>,
                node_id: $crate::nodes::NodeID,
            ) -> $crate::visitor::VisitorResult<T> {
                match self { $(Self::$variant(_) => visitor.$visit(node_id),)* }
            }

            fn accept_mut<T>(
                &self,
                visitor: &mut dyn $crate::visitor::MutVisitor<T>,
                node_id: $crate::nodes::NodeID,
            ) -> $crate::visitor::VisitorResult<T> {
                match self { $(Self::$variant(_) => visitor.$visit(node_id),)* }
            }
        }
    };
}

/// Generates the `Display` impl for `AnyNode` that forwards to each
/// variant's own impl.
macro_rules! impl_display_for_anynode {
    ($($variant:ident($type:ty) => $visit:ident),* $(,)?) => {
        impl std::fmt::Display for $crate::nodes::AnyNode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self { $(Self::$variant(node) => node.fmt(f),)* }
            }
        }
    };
}

/// Generates `AnyNode::meta`/`meta_mut`/`tag`: uniform access to the
/// per-node meta bag and a stable kind tag, without every caller having to
/// match on the full variant list itself.
macro_rules! impl_meta_for_anynode {
    ($($variant:ident($type:ty) => $visit:ident),* $(,)?) => {
        impl $crate::nodes::AnyNode {
            /// Returns this node's cross-pass meta bag.
            #[must_use]
            pub fn meta(&self) -> &$crate::meta::Meta {
                match self { $(Self::$variant(node) => &node.meta,)* }
            }

            /// Returns this node's cross-pass meta bag, mutably.
            pub fn meta_mut(&mut self) -> &mut $crate::meta::Meta {
                match self { $(Self::$variant(node) => &mut node.meta,)* }
            }

            /// This node's variant name, as the kind tag used by the
            /// sub-node table and by diagnostics that name a construct.
            #[must_use]
            pub const fn tag(&self) -> &'static str {
                match self { $(Self::$variant(_) => stringify!($variant),)* }
            }
        }
    };
}

pub(crate) use {
    for_each_node_variant, impl_astnode_for_anynode, impl_display_for_anynode,
    impl_meta_for_anynode, impl_visitable_for_anynode,
};
