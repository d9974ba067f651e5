//! Module-level declarations: globals, tests, imports, architypes and
//! abilities (both inline and declaration/definition-split forms).

use std::fmt;

use jac_source::types::Span;

use super::{ASTNode, NodeID, NodeKind};
use crate::macros::{impl_node_core, impl_visitable};
use crate::meta::Meta;

/// The architype kinds the source language's data-spatial model defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchKind {
    /// A plain object, with no data-spatial behavior.
    Object,
    /// A graph node.
    Node,
    /// A directed edge between two nodes.
    Edge,
    /// A walker that traverses a graph of nodes and edges.
    Walker,
}

impl fmt::Display for ArchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Object => "object",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Walker => "walker",
        };
        write!(f, "{s}")
    }
}

/// Source-level access control. The target language enforces none of these;
/// they exist for the source's own visibility rules and decl/def matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Visible outside the declaring module.
    Public,
    /// Visible only within the declaring architype.
    Private,
    /// Visible within the declaring architype and its subtypes.
    Protected,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Public => "pub",
            Self::Private => "priv",
            Self::Protected => "protect",
        };
        write!(f, "{s}")
    }
}

/// Which language an `Import` pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportLang {
    /// An import of another source-language module, resolved against the
    /// filesystem and recursively compiled.
    Source,
    /// An import of a target-language module, lowered verbatim with no
    /// resolution.
    Target,
}

/// A top-level `glob` variable declaration list (e.g. `glob x = 1, y = 2;`).
#[derive(Debug, Clone)]
pub struct GlobalVars {
    /// The declared names and their initializers.
    pub assignments: NodeID,
    /// Source-level visibility.
    pub access: AccessLevel,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl GlobalVars {
    /// Creates a new global-variable declaration.
    #[must_use]
    pub fn new(assignments: NodeID, access: AccessLevel, id: NodeID, span: Span) -> Self {
        Self { assignments, access, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(GlobalVars, NodeKind::TopLevel, |n: &Self| vec![n.assignments]);
impl_visitable!(GlobalVars, visit_global_vars);

impl fmt::Display for GlobalVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "GlobalVars({})", self.access) }
}

/// A registered `test` block.
#[derive(Debug, Clone)]
pub struct Test {
    /// The test's name, if given explicitly.
    pub name: Option<String>,
    /// The test body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Test {
    /// Creates a new test declaration.
    #[must_use]
    pub fn new(name: Option<String>, body: NodeID, id: NodeID, span: Span) -> Self {
        Self { name, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Test, NodeKind::TopLevel, |n: &Self| vec![n.body]);
impl_visitable!(Test, visit_test);

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Test({name})"),
            None => write!(f, "Test"),
        }
    }
}

/// A free-standing top-level statement outside any architype or ability
/// (module-level code run at import time).
#[derive(Debug, Clone)]
pub struct ModuleCode {
    /// The wrapped statement.
    pub stmt: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ModuleCode {
    /// Creates a new module-level code wrapper.
    #[must_use]
    pub fn new(stmt: NodeID, id: NodeID, span: Span) -> Self {
        Self { stmt, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ModuleCode, NodeKind::TopLevel, |n: &Self| vec![n.stmt]);
impl_visitable!(ModuleCode, visit_module_code);

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ModuleCode") }
}

/// An `import` declaration, either of another source-language module or a
/// verbatim target-language one.
#[derive(Debug, Clone)]
pub struct Import {
    /// Which language is being imported from.
    pub lang: ImportLang,
    /// The dotted module path.
    pub path: NodeID,
    /// An explicit `{a, b as c}` item list, for `from`-style imports.
    pub items: Option<NodeID>,
    /// A module-level alias (`import X as A`).
    pub alias: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Import {
    /// Creates a new import declaration.
    #[must_use]
    pub fn new(
        lang: ImportLang,
        path: NodeID,
        items: Option<NodeID>,
        alias: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { lang, path, items, alias, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Import, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.path];
    kids.extend(n.items);
    kids.extend(n.alias);
    kids
});
impl_visitable!(Import, visit_import);

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Import({:?})", self.lang)
    }
}

/// An `object`/`node`/`edge`/`walker` declaration with an inline body
/// (as opposed to the decl/def-split `ArchDecl`/`ArchDef` pair).
#[derive(Debug, Clone)]
pub struct Architype {
    /// The architype's name.
    pub name: NodeID,
    /// Which data-spatial kind this declares.
    pub arch_kind: ArchKind,
    /// Source-level visibility.
    pub access: AccessLevel,
    /// An optional base-class list.
    pub bases: Option<NodeID>,
    /// An optional leading doc-string.
    pub doc: Option<NodeID>,
    /// The member list.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Architype {
    /// Creates a new inline architype declaration.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: NodeID,
        arch_kind: ArchKind,
        access: AccessLevel,
        bases: Option<NodeID>,
        doc: Option<NodeID>,
        body: NodeID,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, arch_kind, access, bases, doc, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Architype, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.name];
    kids.extend(n.bases);
    kids.extend(n.doc);
    kids.push(n.body);
    kids
});
impl_visitable!(Architype, visit_architype);

impl fmt::Display for Architype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Architype({})", self.arch_kind)
    }
}

/// An ability (`can`) with an inline body.
#[derive(Debug, Clone)]
pub struct Ability {
    /// The ability's name.
    pub name: NodeID,
    /// Source-level visibility.
    pub access: AccessLevel,
    /// The parameter/return or event signature.
    pub signature: NodeID,
    /// An optional leading doc-string.
    pub doc: Option<NodeID>,
    /// The ability body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl Ability {
    /// Creates a new inline ability declaration.
    #[must_use]
    pub fn new(
        name: NodeID,
        access: AccessLevel,
        signature: NodeID,
        doc: Option<NodeID>,
        body: NodeID,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, access, signature, doc, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(Ability, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.name, n.signature];
    kids.extend(n.doc);
    kids.push(n.body);
    kids
});
impl_visitable!(Ability, visit_ability);

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Ability({})", self.access) }
}

/// A specifier attached to a declaration: access level plus an optional
/// event signature, factored out so decl/def matching can compare them
/// without re-parsing the whole declaration.
#[derive(Debug, Clone)]
pub struct AbilitySpec {
    /// The declared visibility.
    pub access: AccessLevel,
    /// An event-driven ability's trigger signature, if this is one.
    pub event: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl AbilitySpec {
    /// Creates a new ability specifier.
    #[must_use]
    pub fn new(access: AccessLevel, event: Option<NodeID>, id: NodeID, span: Span) -> Self {
        Self { access, event, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(AbilitySpec, NodeKind::TopLevel, |n: &Self| n.event.into_iter().collect());
impl_visitable!(AbilitySpec, visit_ability_spec);

impl fmt::Display for AbilitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AbilitySpec({})", self.access)
    }
}

/// A forward architype declaration with no body (`object Foo;`), whose
/// definition may appear later in this file or another.
#[derive(Debug, Clone)]
pub struct ArchDecl {
    /// The architype's name.
    pub name: NodeID,
    /// Which data-spatial kind this declares.
    pub arch_kind: ArchKind,
    /// Source-level visibility.
    pub access: AccessLevel,
    /// An optional base-class list.
    pub bases: Option<NodeID>,
    /// An optional leading doc-string.
    pub doc: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ArchDecl {
    /// Creates a new forward architype declaration.
    #[must_use]
    pub fn new(
        name: NodeID,
        arch_kind: ArchKind,
        access: AccessLevel,
        bases: Option<NodeID>,
        doc: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, arch_kind, access, bases, doc, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ArchDecl, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.name];
    kids.extend(n.bases);
    kids.extend(n.doc);
    kids
});
impl_visitable!(ArchDecl, visit_arch_decl);

impl fmt::Display for ArchDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchDecl({})", self.arch_kind)
    }
}

/// An out-of-line architype body (`:object:Foo { ... }`), matched to its
/// declaration by the decl/def-match pass.
#[derive(Debug, Clone)]
pub struct ArchDef {
    /// The qualified name of the architype being defined.
    pub target_name: NodeID,
    /// An optional leading doc-string.
    pub doc: Option<NodeID>,
    /// The member list.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ArchDef {
    /// Creates a new out-of-line architype definition.
    #[must_use]
    pub fn new(
        target_name: NodeID,
        doc: Option<NodeID>,
        body: NodeID,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { target_name, doc, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ArchDef, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.target_name];
    kids.extend(n.doc);
    kids.push(n.body);
    kids
});
impl_visitable!(ArchDef, visit_arch_def);

impl fmt::Display for ArchDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ArchDef") }
}

/// A forward ability declaration with no body (`can greet() -> str;`).
#[derive(Debug, Clone)]
pub struct AbilityDecl {
    /// The ability's name.
    pub name: NodeID,
    /// Source-level visibility.
    pub access: AccessLevel,
    /// The parameter/return or event signature.
    pub signature: NodeID,
    /// An optional leading doc-string.
    pub doc: Option<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl AbilityDecl {
    /// Creates a new forward ability declaration.
    #[must_use]
    pub fn new(
        name: NodeID,
        access: AccessLevel,
        signature: NodeID,
        doc: Option<NodeID>,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { name, access, signature, doc, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(AbilityDecl, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.name, n.signature];
    kids.extend(n.doc);
    kids
});
impl_visitable!(AbilityDecl, visit_ability_decl);

impl fmt::Display for AbilityDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AbilityDecl") }
}

/// An out-of-line ability body (`:can:greet { ... }`), matched to its
/// declaration by the decl/def-match pass.
#[derive(Debug, Clone)]
pub struct AbilityDef {
    /// The qualified name of the ability being defined.
    pub target_name: NodeID,
    /// The parameter/return or event signature, repeated for verification.
    pub signature: NodeID,
    /// An optional leading doc-string.
    pub doc: Option<NodeID>,
    /// The ability body.
    pub body: NodeID,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl AbilityDef {
    /// Creates a new out-of-line ability definition.
    #[must_use]
    pub fn new(
        target_name: NodeID,
        signature: NodeID,
        doc: Option<NodeID>,
        body: NodeID,
        id: NodeID,
        span: Span,
    ) -> Self {
        Self { target_name, signature, doc, body, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(AbilityDef, NodeKind::TopLevel, |n: &Self| {
    let mut kids = vec![n.target_name, n.signature];
    kids.extend(n.doc);
    kids.push(n.body);
    kids
});
impl_visitable!(AbilityDef, visit_ability_def);

impl fmt::Display for AbilityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "AbilityDef") }
}

/// A `has` member-variable declaration inside an architype body, covering
/// one or more variables declared together (`has x: int, y: str = "";`).
#[derive(Debug, Clone)]
pub struct ArchHas {
    /// Source-level visibility.
    pub access: AccessLevel,
    /// The declared variables.
    pub vars: Vec<NodeID>,
    /// Arena id.
    pub id: NodeID,
    /// Parent node.
    pub parent: Option<NodeID>,
    /// Source span.
    pub span: Span,
    /// Cross-pass meta.
    pub meta: Meta,
}

impl ArchHas {
    /// Creates a new `has` declaration.
    #[must_use]
    pub fn new(access: AccessLevel, vars: Vec<NodeID>, id: NodeID, span: Span) -> Self {
        Self { access, vars, id, parent: None, span, meta: Meta::default() }
    }
}

impl_node_core!(ArchHas, NodeKind::TopLevel, |n: &Self| n.vars.clone());
impl_visitable!(ArchHas, visit_arch_has);

impl fmt::Display for ArchHas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchHas({}, {} vars)", self.access, self.vars.len())
    }
}
