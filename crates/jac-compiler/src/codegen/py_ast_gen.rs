//! The `PyAstGen` pass: lowers a fully-analyzed Jac AST to Python source text.
//!
//! Every node gets its own rendering written to [`jac_ast::meta::Meta::py_code`]
//! on the way back up the tree (`exit`, never `enter` — a node's text always
//! needs its children's text first). Structural nodes that introduce a nested
//! Python indentation level (`CodeBlock`, `ArchBlock`) bump [`PyAstGenPass::indent`]
//! on the way down and drop it again on the way up, after using it to render
//! their own text — everything below renders at the deeper level, the block
//! itself renders at the shallower one.
//!
//! Constructs with no direct Python spelling — edge traversal, walker
//! spawning, the elvis operator — lower to calls against the hook surface in
//! [`jac_runtime::hooks`] instead of inline syntax. A hook the active
//! [`jac_runtime::hooks::HookRegistry`] doesn't back renders as `None` with a
//! feature-warning diagnostic rather than a call into nothing.

use jac_ast::ast::AST;
use jac_ast::nodes::{AccessLevel, AnyNode, EdgeDir as AstEdgeDir, NodeID, ReferenceKind};
use jac_analyzer::pass::Pass;
use jac_runtime::hooks::{EdgeDir as HookEdgeDir, HookName, HookRegistry};
use jac_source::diagnostic::DiagnosticSink;

use crate::codegen::ops::{
    assign_op_text, bin_op_text, comprehension_brackets, ctrl_kind_text, event_kind_text,
    unary_op_text,
};

const PASS_NAME: &str = "py_ast_gen";
const INDENT_UNIT: &str = "    ";

/// Lowers an analyzed AST to Python text, one node's `meta().py_code` at a
/// time.
pub struct PyAstGenPass<'a> {
    hooks: &'a HookRegistry,
    indent: usize,
    test_counter: usize,
}

impl<'a> PyAstGenPass<'a> {
    /// Creates a pass that consults `hooks` to decide which data-spatial
    /// constructs lower to a real call versus a feature-warning placeholder.
    #[must_use]
    pub fn new(hooks: &'a HookRegistry) -> Self { Self { hooks, indent: 0, test_counter: 0 } }

    fn indent_str(&self) -> String { INDENT_UNIT.repeat(self.indent) }

    fn indent_lines(&self, text: &str) -> String {
        let ind = self.indent_str();
        text.lines().map(|l| format!("{ind}{l}")).collect::<Vec<_>>().join("\n")
    }

    /// Renders `hook`'s call, or a warning placeholder when `hook` isn't
    /// backed by the active runtime.
    fn hook_call(
        &self,
        ast: &mut AST,
        node: NodeID,
        sink: &mut DiagnosticSink,
        hook: HookName,
        call_text: String,
    ) -> String {
        if self.hooks.supports(hook) {
            return call_text;
        }
        let span = ast.get_node(node).map(|n| n.span).unwrap_or_default();
        sink.warn(format!("{hook} has no backing runtime; lowering to a no-op placeholder"), span, PASS_NAME);
        mark_incomplete(ast, node);
        "None".to_string()
    }

    /// Emits a warning the first (and every) time a non-public access level
    /// is seen; Python has no access modifiers, so `priv`/`protect` are
    /// recognized syntactically but not enforced in the generated code.
    fn note_access(&self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink, access: AccessLevel) {
        if matches!(access, AccessLevel::Public) {
            return;
        }
        let span = ast.get_node(node).map(|n| n.span).unwrap_or_default();
        sink.warn(format!("access level `{access}` is not enforced in generated Python"), span, PASS_NAME);
    }
}

fn code(ast: &AST, id: NodeID) -> String {
    ast.get_node(id).and_then(|n| n.data.meta().py_code.clone()).unwrap_or_default()
}

fn code_opt(ast: &AST, id: Option<NodeID>) -> Option<String> { id.map(|i| code(ast, i)) }

fn set_code(ast: &mut AST, id: NodeID, text: String) {
    if let Some(entry) = ast.get_node_mut(id) {
        entry.data.meta_mut().py_code = Some(text);
    }
}

/// `ArchDecl`/`ArchDef`/`AbilityDecl`/`AbilityDef` (forward declarations and
/// their out-of-line bodies) have no bootstrap lowering: the generator
/// renders only inline architypes and abilities. Matches `decl_def_warn()`
/// in the lowering table this pass is grounded on.
fn decl_def_warn(ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
    let span = ast.get_node(node).map(|n| n.span).unwrap_or_default();
    sink.warn("declaration/definition splitting is unsupported in bootstrap", span, PASS_NAME);
    mark_incomplete(ast, node);
}

fn mark_incomplete(ast: &mut AST, id: NodeID) {
    if let Some(entry) = ast.get_node_mut(id) {
        entry.data.meta_mut().mark_incomplete();
    }
}

fn sanitize_ident(name: &str) -> String {
    let mut out: String =
        name.chars().map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' }).collect();
    if out.is_empty() || out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out = format!("_{out}");
    }
    out
}

/// Maps the AST's directional enum (the arrow spelling a `-->`/`<--`/`<-->`
/// token parsed to) to the runtime hook surface's own, which names
/// directions by traversal role rather than arrow shape.
fn hook_edge_dir(dir: AstEdgeDir) -> HookEdgeDir {
    match dir {
        AstEdgeDir::Forward => HookEdgeDir::Out,
        AstEdgeDir::Backward => HookEdgeDir::In,
        AstEdgeDir::Any => HookEdgeDir::Any,
    }
}

fn edge_dir_literal(dir: AstEdgeDir) -> &'static str {
    match hook_edge_dir(dir) {
        HookEdgeDir::Out => "\"out\"",
        HookEdgeDir::In => "\"in\"",
        HookEdgeDir::Any => "\"any\"",
    }
}

fn kind_ref_text(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Global => "globals()",
        ReferenceKind::Here => "self",
        ReferenceKind::Visitor => "visitor",
        ReferenceKind::Node => "_jac.Node",
        ReferenceKind::Edge => "_jac.Edge",
        ReferenceKind::Walker => "_jac.Walker",
        ReferenceKind::Object => "_jac.Object",
        ReferenceKind::Func => "Callable",
        ReferenceKind::Ability => "_jac.Ability",
    }
}

impl<'a> Pass for PyAstGenPass<'a> {
    fn name(&self) -> &'static str { PASS_NAME }

    fn enter(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let _ = sink;
        let Some(entry) = ast.get_node(node) else { return };
        if matches!(entry.data, AnyNode::CodeBlock(_) | AnyNode::ArchBlock(_)) {
            self.indent += 1;
        }
    }

    #[allow(clippy::too_many_lines)]
    fn exit(&mut self, ast: &mut AST, node: NodeID, sink: &mut DiagnosticSink) {
        let Some(data) = ast.get_node(node).map(|n| n.data.clone()) else { return };
        let ind = self.indent_str();

        let text = match &data {
            AnyNode::Module(m) => {
                let doc = m.doc.map(|d| format!("{}\n\n", code(ast, d))).unwrap_or_default();
                format!("{doc}{}\n", code(ast, m.body))
            }
            AnyNode::Elements(e) => {
                e.items.iter().map(|&i| code(ast, i)).filter(|s| !s.is_empty()).collect::<Vec<_>>().join("\n\n")
            }
            AnyNode::CodeBlock(c) => {
                if c.statements.is_empty() {
                    format!("{ind}pass")
                } else {
                    c.statements.iter().map(|&s| code(ast, s)).collect::<Vec<_>>().join("\n")
                }
            }
            AnyNode::ArchBlock(b) => {
                let mut init_lines = Vec::new();
                let mut method_blocks = Vec::new();
                for &member in &b.members {
                    match ast.get_node(member).map(|n| n.data.clone()) {
                        Some(AnyNode::ArchHas(_)) => {
                            let lines = code(ast, member);
                            if !lines.is_empty() {
                                init_lines.push(lines);
                            }
                        }
                        _ => method_blocks.push(code(ast, member)),
                    }
                }
                let mut blocks = Vec::new();
                if !init_lines.is_empty() {
                    let body_ind = INDENT_UNIT.repeat(self.indent + 1);
                    let body = init_lines.join("\n");
                    let body = body.lines().map(|l| format!("{body_ind}{l}")).collect::<Vec<_>>().join("\n");
                    blocks.push(format!("{ind}def __init__(self):\n{body}"));
                }
                blocks.extend(method_blocks.into_iter().filter(|s| !s.is_empty()));
                if blocks.is_empty() {
                    format!("{ind}pass")
                } else {
                    blocks.join("\n\n")
                }
            }
            AnyNode::GlobalVars(g) => {
                self.note_access(ast, node, sink, g.access);
                format!("{ind}{}", self.indent_lines(&code(ast, g.assignments)).trim_start())
            }
            AnyNode::Test(t) => {
                self.test_counter += 1;
                let name = t.name.as_deref().map(sanitize_ident).unwrap_or_else(|| format!("unnamed_{}", self.test_counter));
                format!("{ind}def test_{name}():\n{}", code(ast, t.body))
            }
            AnyNode::ModuleCode(m) => code(ast, m.stmt),
            AnyNode::Import(i) => {
                let path = code(ast, i.path);
                match i.items {
                    Some(items) => format!("{ind}from {path} import {}", code(ast, items)),
                    None => {
                        let alias = i.alias.map(|a| format!(" as {}", code(ast, a))).unwrap_or_default();
                        format!("{ind}import {path}{alias}")
                    }
                }
            }
            AnyNode::Architype(a) => {
                self.note_access(ast, node, sink, a.access);
                let name = code(ast, a.name);
                let header = match a.bases {
                    Some(b) => format!("class {name}({}):", code(ast, b)),
                    None => format!("class {name}:"),
                };
                let doc = a.doc.map(|d| format!("{}\n", self.indent_lines(&code(ast, d)))).unwrap_or_default();
                format!("{ind}{header}\n{doc}{}", code(ast, a.body))
            }
            AnyNode::Ability(a) => {
                self.note_access(ast, node, sink, a.access);
                let doc = a.doc.map(|d| format!("{}\n", self.indent_lines(&code(ast, d)))).unwrap_or_default();
                let def = render_ability(ast, node, sink, self.indent, &code(ast, a.name), a.signature, a.body, is_inside_arch_block(ast, node));
                format!("{ind}{doc}{def}")
            }
            AnyNode::AbilitySpec(_) => String::new(),
            AnyNode::ArchDecl(_) | AnyNode::ArchDef(_) | AnyNode::AbilityDecl(_) | AnyNode::AbilityDef(_) => {
                decl_def_warn(ast, node, sink);
                String::new()
            }
            AnyNode::ArchHas(h) => {
                self.note_access(ast, node, sink, h.access);
                h.vars.iter().map(|&v| code(ast, v)).filter(|s| !s.is_empty()).collect::<Vec<_>>().join("\n")
            }
            AnyNode::IfStmt(s) => {
                let cond = code(ast, s.cond);
                let then = code(ast, s.then_branch);
                let mut text = format!("{ind}if {cond}:\n{then}");
                if let Some(eb) = s.else_branch {
                    let eb_code = code(ast, eb);
                    let is_elif = matches!(ast.get_node(eb).map(|n| &n.data), Some(AnyNode::IfStmt(_)));
                    if is_elif {
                        let elif_code = eb_code.replacen(&format!("{ind}if "), &format!("{ind}elif "), 1);
                        text.push('\n');
                        text.push_str(&elif_code);
                    } else {
                        text.push('\n');
                        text.push_str(&format!("{ind}else:\n{eb_code}"));
                    }
                }
                text
            }
            AnyNode::WhileStmt(s) => format!("{ind}while {}:\n{}", code(ast, s.cond), code(ast, s.body)),
            AnyNode::IterForStmt(s) => {
                let step_ind = INDENT_UNIT.repeat(self.indent + 1);
                format!(
                    "{ind}{}\n{ind}while {}:\n{}\n{step_ind}{}",
                    code(ast, s.init),
                    code(ast, s.cond),
                    code(ast, s.body),
                    code(ast, s.step),
                )
            }
            AnyNode::InForStmt(s) => {
                format!("{ind}for {} in {}:\n{}", code(ast, s.target), code(ast, s.iterable), code(ast, s.body))
            }
            AnyNode::DictForStmt(s) => format!(
                "{ind}for {}, {} in {}.items():\n{}",
                code(ast, s.key_target),
                code(ast, s.value_target),
                code(ast, s.iterable),
                code(ast, s.body)
            ),
            AnyNode::TryStmt(s) => {
                let mut text = format!("{ind}try:\n{}", code(ast, s.body));
                for &h in &s.handlers {
                    text.push('\n');
                    text.push_str(&code(ast, h));
                }
                if let Some(f) = s.finally {
                    text.push_str(&format!("\n{ind}finally:\n{}", code(ast, f)));
                }
                text
            }
            AnyNode::ExceptHandler(h) => {
                let clause = match (h.exc_type, h.binding) {
                    (Some(t), Some(b)) => format!(" {} as {}", code(ast, t), code(ast, b)),
                    (Some(t), None) => format!(" {}", code(ast, t)),
                    (None, _) => String::new(),
                };
                format!("{ind}except{clause}:\n{}", code(ast, h.body))
            }
            AnyNode::RaiseStmt(s) => {
                let exc = s.exc.map(|e| format!(" {}", code(ast, e))).unwrap_or_default();
                let cause = s.cause.map(|c| format!(" from {}", code(ast, c))).unwrap_or_default();
                format!("{ind}raise{exc}{cause}")
            }
            AnyNode::AssertStmt(s) => {
                let msg = s.message.map(|m| format!(", {}", code(ast, m))).unwrap_or_default();
                format!("{ind}assert {}{msg}", code(ast, s.cond))
            }
            AnyNode::ReturnStmt(s) => {
                let val = s.value.map(|v| format!(" {}", code(ast, v))).unwrap_or_default();
                format!("{ind}return{val}")
            }
            AnyNode::YieldStmt(s) => {
                let kw = if s.is_from { "yield from" } else { "yield" };
                match s.value {
                    Some(v) => format!("{ind}{kw} {}", code(ast, v)),
                    None => format!("{ind}yield"),
                }
            }
            AnyNode::CtrlStmt(s) => {
                if matches!(s.kind, jac_ast::nodes::CtrlKind::Skip) {
                    sink.warn("`skip` has no Python equivalent; no statement emitted", ast.get_node(node).map(|n| n.span).unwrap_or_default(), PASS_NAME);
                    mark_incomplete(ast, node);
                    String::new()
                } else {
                    format!("{ind}{}", ctrl_kind_text(s.kind))
                }
            }
            AnyNode::DeleteStmt(s) => {
                format!("{ind}del {}", s.targets.iter().map(|&t| code(ast, t)).collect::<Vec<_>>().join(", "))
            }
            AnyNode::VisitStmt(s) => {
                let call = self.hook_call(ast, node, sink, HookName::VisitNode, format!("_jac.visit_node(self, {})", code(ast, s.target)));
                match s.else_body {
                    Some(eb) => format!("{ind}if not {call}:\n{}", code(ast, eb)),
                    None => format!("{ind}{call}"),
                }
            }
            AnyNode::RevisitStmt(s) => {
                let target = s.target.map(|t| code(ast, t)).unwrap_or_else(|| "self".to_string());
                let call = self.hook_call(ast, node, sink, HookName::VisitNode, format!("_jac.visit_node(self, {target})"));
                match s.else_body {
                    Some(eb) => format!("{ind}if not {call}:\n{}", code(ast, eb)),
                    None => format!("{ind}{call}"),
                }
            }
            AnyNode::DisengageStmt(_) => {
                format!("{ind}{}", self.hook_call(ast, node, sink, HookName::Disengage, "_jac.disengage(self)".to_string()))
            }
            AnyNode::SyncStmt(s) => {
                sink.warn("`sync` has no backing runtime hook; lowering to a comment", ast.get_node(node).map(|n| n.span).unwrap_or_default(), PASS_NAME);
                mark_incomplete(ast, node);
                format!("{ind}# sync {} (unsupported)", code(ast, s.target))
            }
            AnyNode::ReportStmt(s) => {
                format!("{ind}{}", self.hook_call(ast, node, sink, HookName::Report, format!("_jac.report({})", code(ast, s.value))))
            }
            AnyNode::IgnoreStmt(s) => {
                format!("{ind}{}", self.hook_call(ast, node, sink, HookName::Ignore, format!("_jac.ignore(self, {})", code(ast, s.target))))
            }
            AnyNode::ExprStmt(s) => self.indent_lines(&code(ast, s.value)),
            AnyNode::BinaryExpr(b) => {
                if matches!(b.op, jac_ast::nodes::BinOp::Elvis) {
                    self.hook_call(ast, node, sink, HookName::Elvis, format!("_jac.elvis({}, {})", code(ast, b.lhs), code(ast, b.rhs)))
                } else {
                    format!("({} {} {})", code(ast, b.lhs), bin_op_text(b.op), code(ast, b.rhs))
                }
            }
            AnyNode::UnaryExpr(u) => format!("({}{})", unary_op_text(u.op), code(ast, u.operand)),
            AnyNode::IfElseExpr(e) => {
                format!("({} if {} else {})", code(ast, e.then_expr), code(ast, e.cond), code(ast, e.else_expr))
            }
            AnyNode::SpawnExpr(s) => {
                let call = self.hook_call(ast, node, sink, HookName::VisitNode, format!("_jac.visit_node(_walker, {})", code(ast, s.target)));
                format!("(lambda _walker=({}): ({call}, _walker)[1])()", code(ast, s.walker))
            }
            AnyNode::EdgeOpRef(e) => {
                let filter = e.filter.map(|f| code(ast, f)).unwrap_or_else(|| "None".to_string());
                self.hook_call(ast, node, sink, HookName::EdgeRef, format!("_jac.edge_ref(self, {}, {filter})", edge_dir_literal(e.dir)))
            }
            AnyNode::ConnectOp(c) => {
                let call = format!(
                    "_jac.connect({}, {}, {})",
                    code(ast, c.left),
                    code(ast, c.right),
                    edge_dir_literal(c.dir)
                );
                self.hook_call(ast, node, sink, HookName::Connect, call)
            }
            AnyNode::UnpackExpr(u) => format!("{}{}", if u.is_dict { "**" } else { "*" }, code(ast, u.value)),
            AnyNode::MultiStringExpr(m) => {
                m.parts.iter().map(|&p| code(ast, p)).collect::<Vec<_>>().join(" ")
            }
            AnyNode::ListExpr(l) => {
                let (open, close) = if l.is_set { ("{", "}") } else { ("[", "]") };
                format!("{open}{}{close}", l.items.iter().map(|&i| code(ast, i)).collect::<Vec<_>>().join(", "))
            }
            AnyNode::DictExpr(d) => {
                let entries = d.entries.iter().map(|&(k, v)| format!("{}: {}", code(ast, k), code(ast, v))).collect::<Vec<_>>().join(", ");
                format!("{{{entries}}}")
            }
            AnyNode::ComprehensionExpr(c) => {
                let (open, close) = comprehension_brackets(c.kind);
                let elem = if matches!(c.kind, jac_ast::nodes::ComprehensionKind::Dict) {
                    let key = c.key.map(|k| code(ast, k)).unwrap_or_default();
                    format!("{key}: {}", code(ast, c.element))
                } else {
                    code(ast, c.element)
                };
                let cond = c.condition.map(|cc| format!(" if {}", code(ast, cc))).unwrap_or_default();
                format!("{open}{elem} for {} in {}{cond}{close}", code(ast, c.target), code(ast, c.iterable))
            }
            AnyNode::AtomTrailerExpr(a) => {
                let mut acc = code(ast, a.atom);
                for &trailer in &a.trailers {
                    let trailer_data = ast.get_node(trailer).map(|n| n.data.clone());
                    match trailer_data {
                        Some(AnyNode::NameTok(_)) => acc = format!("{acc}.{}", code(ast, trailer)),
                        Some(AnyNode::FuncCallExpr(_)) => acc = format!("{acc}({})", code(ast, trailer)),
                        Some(AnyNode::IndexSliceExpr(idx)) => {
                            let start_is_edge_ref = idx
                                .start
                                .and_then(|s| ast.get_node(s).map(|n| matches!(n.data, AnyNode::EdgeOpRef(_))))
                                .unwrap_or(false);
                            if start_is_edge_ref && !idx.is_slice {
                                let edge_ref_id = idx.start.expect("checked above");
                                if let Some(AnyNode::EdgeOpRef(e)) = ast.get_node(edge_ref_id).map(|n| n.data.clone()) {
                                    let filter = e.filter.map(|f| code(ast, f)).unwrap_or_else(|| "None".to_string());
                                    acc = self.hook_call(
                                        ast,
                                        trailer,
                                        sink,
                                        HookName::EdgeRef,
                                        format!("_jac.edge_ref({acc}, {}, {filter})", edge_dir_literal(e.dir)),
                                    );
                                }
                            } else {
                                acc = format!("{acc}[{}]", code(ast, trailer));
                            }
                        }
                        _ => acc = format!("{acc}{}", code(ast, trailer)),
                    }
                }
                acc
            }
            AnyNode::FuncCallExpr(f) => {
                let mut parts: Vec<String> = f.args.iter().map(|&a| code(ast, a)).collect();
                parts.extend(f.kwargs.iter().map(|&(k, v)| format!("{}={}", code(ast, k), code(ast, v))));
                parts.join(", ")
            }
            AnyNode::IndexSliceExpr(i) => {
                if i.is_slice {
                    format!(
                        "{}:{}:{}",
                        code_opt(ast, i.start).unwrap_or_default(),
                        code_opt(ast, i.stop).unwrap_or_default(),
                        code_opt(ast, i.step).unwrap_or_default()
                    )
                } else {
                    code_opt(ast, i.start).unwrap_or_default()
                }
            }
            AnyNode::KindRef(k) => kind_ref_text(k.kind).to_string(),
            AnyNode::NameTok(t) => t.text.clone(),
            AnyNode::KeywordTok(t) => t.text.clone(),
            AnyNode::LiteralTok(t) => literal_text(&t.value),
            AnyNode::BaseClasses(b) => b.bases.iter().map(|&id| code(ast, id)).collect::<Vec<_>>().join(", "),
            AnyNode::ModulePath(p) => p.segments.iter().map(|&s| code(ast, s)).collect::<Vec<_>>().join("."),
            AnyNode::ModuleItems(m) => m.items.iter().map(|&i| code(ast, i)).collect::<Vec<_>>().join(", "),
            AnyNode::ModuleItem(m) => {
                let alias = m.alias.map(|a| format!(" as {}", code(ast, a))).unwrap_or_default();
                format!("{}{alias}", code(ast, m.name))
            }
            AnyNode::NameList(n) => n.names.iter().map(|&i| code(ast, i)).collect::<Vec<_>>().join(", "),
            AnyNode::FuncParams(p) => p.params.iter().map(|&i| code(ast, i)).collect::<Vec<_>>().join(", "),
            AnyNode::ParamVar(p) => {
                let prefix = if p.is_star_star { "**" } else if p.is_star { "*" } else { "" };
                let type_ann = p.type_spec.map(|t| format!(": {}", code(ast, t))).unwrap_or_default();
                let default = p.default.map(|d| format!(" = {}", code(ast, d))).unwrap_or_default();
                format!("{prefix}{}{type_ann}{default}", code(ast, p.name))
            }
            AnyNode::HasVar(h) => {
                let type_ann = h.type_spec.map(|t| format!(": {}", code(ast, t))).unwrap_or_default();
                let default = h.default.map(|d| code(ast, d)).unwrap_or_else(|| "None".to_string());
                format!("self.{}{type_ann} = {default}", code(ast, h.name))
            }
            AnyNode::AssignmentList(l) => l.assignments.iter().map(|&a| code(ast, a)).collect::<Vec<_>>().join("\n"),
            AnyNode::Assignment(a) => {
                let type_ann = a.type_spec.map(|t| format!(": {}", code(ast, t))).unwrap_or_default();
                let target = code(ast, a.target);
                match a.value {
                    Some(v) => format!("{target}{type_ann} {} {}", assign_op_text(a.op), code(ast, v)),
                    None => format!("{target}{type_ann}"),
                }
            }
            AnyNode::DocString(d) => format!("\"\"\"{}\"\"\"", d.text),
            AnyNode::EventSignature(e) => event_kind_text(e.event).to_string(),
            AnyNode::TypeSpec(t) => {
                let mut text = code(ast, t.base);
                if !t.params.is_empty() {
                    text = format!("{text}[{}]", t.params.iter().map(|&p| code(ast, p)).collect::<Vec<_>>().join(", "));
                }
                if t.nullable {
                    text = format!("Optional[{text}]");
                }
                text
            }
            AnyNode::FuncSignature(s) => {
                let ret = s.return_type.map(|r| format!(" -> {}", code(ast, r))).unwrap_or_default();
                format!("({}){ret}", code(ast, s.params))
            }
        };

        if matches!(data, AnyNode::CodeBlock(_) | AnyNode::ArchBlock(_)) {
            self.indent = self.indent.saturating_sub(1);
        }

        set_code(ast, node, text);
    }
}

/// `AbilityDef` always implements an out-of-line architype method; a plain
/// `Ability` is a method only when nested inside an `ArchBlock` and a bare
/// function otherwise (`is_method` distinguishes the two).
#[allow(clippy::too_many_arguments)]
fn render_ability(
    ast: &mut AST,
    node: NodeID,
    sink: &mut DiagnosticSink,
    indent: usize,
    name: &str,
    signature: NodeID,
    body: NodeID,
    is_method: bool,
) -> String {
    let sig_data = ast.get_node(signature).map(|n| n.data.clone());
    let (params_code, ret, event_name) = match sig_data {
        Some(AnyNode::FuncSignature(f)) => {
            (code(ast, f.params), f.return_type.map(|r| format!(" -> {}", code(ast, r))).unwrap_or_default(), None)
        }
        Some(AnyNode::EventSignature(e)) => {
            let span = ast.get_node(node).map(|n| n.span).unwrap_or_default();
            sink.warn(
                "event-driven abilities have no direct Python dispatch; emitting a named stub",
                span,
                PASS_NAME,
            );
            mark_incomplete(ast, node);
            (String::new(), String::new(), Some(event_kind_text(e.event)))
        }
        _ => (String::new(), String::new(), None),
    };

    let full_params = match (is_method, params_code.is_empty()) {
        (true, true) => "self".to_string(),
        (true, false) => format!("self, {params_code}"),
        (false, _) => params_code,
    };

    let def_name = match event_name {
        Some(ev) => format!("_on_{ev}_{name}"),
        None => name.to_string(),
    };

    let body_text = if event_name.is_some() {
        format!("{}pass", INDENT_UNIT.repeat(indent + 1))
    } else {
        code(ast, body)
    };

    format!("def {def_name}({full_params}){ret}:\n{body_text}")
}

fn is_inside_arch_block(ast: &AST, node: NodeID) -> bool {
    ast.get_node(node)
        .and_then(|n| n.parent)
        .and_then(|p| ast.get_node(p))
        .is_some_and(|p| matches!(p.data, AnyNode::ArchBlock(_)))
}


fn literal_text(value: &jac_ast::nodes::LiteralValue) -> String {
    use jac_ast::nodes::LiteralValue;
    match value {
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Float(f) => f.to_string(),
        LiteralValue::Str(s) => format!("{s:?}"),
        LiteralValue::Bool(b) => if *b { "True".to_string() } else { "False".to_string() },
        LiteralValue::Null => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jac_ast::nodes::{LiteralTok, LiteralValue};

    #[test]
    fn literal_text_matches_python_spelling() {
        assert_eq!(literal_text(&LiteralValue::Bool(true)), "True");
        assert_eq!(literal_text(&LiteralValue::Null), "None");
        assert_eq!(literal_text(&LiteralValue::Int(3)), "3");
    }

    #[test]
    fn edge_dir_maps_forward_to_out() {
        assert_eq!(hook_edge_dir(AstEdgeDir::Forward), HookEdgeDir::Out);
        assert_eq!(hook_edge_dir(AstEdgeDir::Backward), HookEdgeDir::In);
    }

    #[test]
    fn sanitize_ident_handles_leading_digit_and_punctuation() {
        assert_eq!(sanitize_ident("1 thing"), "_1_thing");
        assert_eq!(sanitize_ident("ok_name"), "ok_name");
    }

    #[allow(dead_code)]
    fn unused_literal_tok_shape_check(_: LiteralTok) {}
}
