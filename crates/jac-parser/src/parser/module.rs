//! Top-level items: the module itself, imports, architypes, abilities, and
//! their out-of-line declaration/definition forms.

use jac_ast::nodes::{
    AbilityDecl,
    AbilityDef,
    AbilitySpec,
    AccessLevel,
    ArchDecl,
    ArchDef,
    ArchHas,
    Architype,
    GlobalVars,
    Import,
    ImportLang,
    ModuleCode,
    ModuleItem,
    ModuleItems,
    ModulePath,
    NameTok,
    NodeID,
    NodeKind,
    Test,
};
use jac_source::diagnostic::DiagnosticSink;

use super::{ParseError, ParseResult, Parser};
use crate::lexer::TokenKind;

/// Top-level tokens that start a new item; used as a recovery boundary when
/// an item fails to parse partway through.
const ITEM_BOUNDARIES: &[TokenKind] = &[
    TokenKind::Glob,
    TokenKind::Test,
    TokenKind::Import,
    TokenKind::Object,
    TokenKind::Node,
    TokenKind::Edge,
    TokenKind::Walker,
    TokenKind::Can,
    TokenKind::Colon,
    TokenKind::EndOfFile,
];

impl<'src> Parser<'src> {
    pub(super) fn parse_module(&mut self, sink: &mut DiagnosticSink) -> NodeID {
        let start = self.current().span().start;
        let mut items = Vec::new();

        while !self.at(TokenKind::EndOfFile) {
            match self.parse_top_level_item() {
                Ok(item) => items.push(item),
                Err(err) => {
                    sink.push(err.into_diagnostic());
                    self.recover_to(ITEM_BOUNDARIES);
                    let _ = self.eat(TokenKind::Semi);
                }
            }
        }

        let elements_span = self.span_from(start);
        let elements = self.alloc(NodeKind::Structural, elements_span, |id| {
            jac_ast::nodes::AnyNode::Elements(jac_ast::nodes::Elements::new(items.clone(), id, elements_span))
        });
        self.link_children(elements, &items);

        let module_span = self.span_from(start);
        let file_id = self.file_id.to_string();
        let module = self.alloc(NodeKind::Structural, module_span, |id| {
            jac_ast::nodes::AnyNode::Module(jac_ast::nodes::Module::new(
                file_id,
                None,
                elements,
                id,
                module_span,
            ))
        });
        self.link_children(module, &[elements]);
        module
    }

    pub(super) fn parse_top_level_item(&mut self) -> ParseResult<NodeID> {
        match self.peek_kind() {
            TokenKind::Glob => self.parse_global_vars(),
            TokenKind::Test => self.parse_test(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Object | TokenKind::Node | TokenKind::Edge | TokenKind::Walker => {
                self.parse_architype_or_decl()
            }
            TokenKind::Can => self.parse_ability_or_decl(),
            TokenKind::Colon => self.parse_out_of_line_def(),
            _ => self.parse_module_code(),
        }
    }

    pub(super) fn parse_access_level(&mut self) -> AccessLevel {
        if self.eat(TokenKind::Priv).is_some() {
            AccessLevel::Private
        } else if self.eat(TokenKind::Protect).is_some() {
            AccessLevel::Protected
        } else {
            let _ = self.eat(TokenKind::Pub);
            AccessLevel::Public
        }
    }

    pub(super) fn parse_name(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let tok = self.expect(TokenKind::Name)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::Token, span, |id| {
            jac_ast::nodes::AnyNode::NameTok(NameTok::new(tok.lexeme().to_string(), id, span))
        }))
    }

    pub(super) fn parse_global_vars(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Glob)?;
        let access = self.parse_access_level();
        let assignments = self.parse_assignment_list()?;
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::GlobalVars(GlobalVars::new(assignments, access, id, span))
        }))
    }

    pub(super) fn parse_test(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Test)?;
        let name = self.eat(TokenKind::Name).map(|t| t.lexeme().to_string());
        let body = self.parse_code_block()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::Test(Test::new(name, body, id, span))
        }))
    }

    pub(super) fn parse_import(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Import)?;
        let lang = if self.eat(TokenKind::Colon).is_some() {
            let tag = self.expect(TokenKind::Name)?;
            if tag.lexeme() == "py" { ImportLang::Target } else { ImportLang::Source }
        } else {
            ImportLang::Source
        };
        let _ = self.expect(TokenKind::From)?;
        let path = self.parse_module_path()?;

        let (items, alias) = if self.eat(TokenKind::Comma).is_some() {
            (Some(self.parse_module_items()?), None)
        } else if self.eat(TokenKind::As).is_some() {
            (None, Some(self.parse_name()?))
        } else {
            (None, None)
        };
        let _ = self.expect(TokenKind::Semi)?;

        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::Import(Import::new(lang, path, items, alias, id, span))
        }))
    }

    pub(super) fn parse_module_path(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let mut segments = vec![self.parse_name()?];
        while self.eat(TokenKind::Dot).is_some() {
            segments.push(self.parse_name()?);
        }
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::ModulePath(ModulePath::new(segments.clone(), id, span))
        });
        self.link_children(id, &segments);
        Ok(id)
    }

    pub(super) fn parse_module_items(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        while !self.at(TokenKind::RBrace) {
            let item_start = self.current().span().start;
            let name = self.parse_name()?;
            let alias = if self.eat(TokenKind::As).is_some() { Some(self.parse_name()?) } else { None };
            let item_span = self.span_from(item_start);
            let item = self.alloc(NodeKind::Support, item_span, |id| {
                jac_ast::nodes::AnyNode::ModuleItem(ModuleItem::new(name, alias, id, item_span))
            });
            self.link_children(item, &[name]);
            if let Some(a) = alias {
                self.link_children(item, &[a]);
            }
            items.push(item);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let _ = self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Support, span, |id| {
            jac_ast::nodes::AnyNode::ModuleItems(ModuleItems::new(items.clone(), id, span))
        });
        self.link_children(id, &items);
        Ok(id)
    }

    pub(super) fn arch_kind_from_token(&self, kind: TokenKind) -> jac_ast::nodes::ArchKind {
        match kind {
            TokenKind::Object => jac_ast::nodes::ArchKind::Object,
            TokenKind::Node => jac_ast::nodes::ArchKind::Node,
            TokenKind::Edge => jac_ast::nodes::ArchKind::Edge,
            _ => jac_ast::nodes::ArchKind::Walker,
        }
    }

    /// Parses `object Foo {}` / `object Foo(Base) {}` (a full definition) or
    /// `object Foo;` / `object Foo(Base);` (a forward [`ArchDecl`]).
    pub(super) fn parse_architype_or_decl(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let advanced_kind = self.advance().kind();
        let arch_kind = self.arch_kind_from_token(advanced_kind);
        let access = self.parse_access_level();
        let name = self.parse_name()?;
        let bases = if self.eat(TokenKind::LParen).is_some() {
            let mut bases = vec![self.parse_name()?];
            while self.eat(TokenKind::Comma).is_some() {
                bases.push(self.parse_name()?);
            }
            let _ = self.expect(TokenKind::RParen)?;
            let bases_span = self.span_from(start);
            let id = self.alloc(NodeKind::Support, bases_span, |id| {
                jac_ast::nodes::AnyNode::BaseClasses(jac_ast::nodes::BaseClasses::new(
                    bases.clone(),
                    id,
                    bases_span,
                ))
            });
            self.link_children(id, &bases);
            Some(id)
        } else {
            None
        };

        if self.eat(TokenKind::Semi).is_some() {
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::TopLevel, span, |id| {
                jac_ast::nodes::AnyNode::ArchDecl(ArchDecl::new(name, arch_kind, access, bases, None, id, span))
            });
            self.link_children(id, &[name]);
            if let Some(b) = bases {
                self.link_children(id, &[b]);
            }
            return Ok(id);
        }

        let body = self.parse_arch_block()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::Architype(Architype::new(name, arch_kind, access, bases, None, body, id, span))
        });
        self.link_children(id, &[name, body]);
        if let Some(b) = bases {
            self.link_children(id, &[b]);
        }
        Ok(id)
    }

    pub(super) fn parse_arch_block(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) {
            members.push(self.parse_arch_member()?);
        }
        let _ = self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::Structural, span, |id| {
            jac_ast::nodes::AnyNode::ArchBlock(jac_ast::nodes::ArchBlock::new(members.clone(), id, span))
        });
        self.link_children(id, &members);
        Ok(id)
    }

    pub(super) fn parse_arch_member(&mut self) -> ParseResult<NodeID> {
        match self.peek_kind() {
            TokenKind::Has => self.parse_arch_has(),
            TokenKind::Can => self.parse_ability_or_decl(),
            _ => Err(self.unexpected(TokenKind::Has)),
        }
    }

    pub(super) fn parse_arch_has(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Has)?;
        let access = self.parse_access_level();
        let mut vars = vec![self.parse_has_var()?];
        while self.eat(TokenKind::Comma).is_some() {
            vars.push(self.parse_has_var()?);
        }
        let _ = self.expect(TokenKind::Semi)?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::ArchHas(ArchHas::new(access, vars.clone(), id, span))
        });
        self.link_children(id, &vars);
        Ok(id)
    }

    /// Parses `can name(params) -> T { body }` (an [`jac_ast::nodes::Ability`]),
    /// or `can name(params) -> T;` (an [`AbilityDecl`] forward declaration),
    /// or `can name with entry/exit { body }` (an event-driven ability).
    pub(super) fn parse_ability_or_decl(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Can)?;
        let access = self.parse_access_level();
        let name = self.parse_name()?;

        if self.at(TokenKind::With) {
            let signature = self.parse_event_signature()?;
            if self.eat(TokenKind::Semi).is_some() {
                let span = self.span_from(start);
                let id = self.alloc(NodeKind::TopLevel, span, |id| {
                    jac_ast::nodes::AnyNode::AbilityDecl(AbilityDecl::new(name, access, signature, None, id, span))
                });
                self.link_children(id, &[name, signature]);
                return Ok(id);
            }
            let body = self.parse_code_block()?;
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::TopLevel, span, |id| {
                jac_ast::nodes::AnyNode::Ability(jac_ast::nodes::Ability::new(
                    name, access, signature, None, body, id, span,
                ))
            });
            self.link_children(id, &[name, signature, body]);
            return Ok(id);
        }

        let signature = self.parse_func_signature()?;
        if self.eat(TokenKind::Semi).is_some() {
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::TopLevel, span, |id| {
                jac_ast::nodes::AnyNode::AbilityDecl(AbilityDecl::new(name, access, signature, None, id, span))
            });
            self.link_children(id, &[name, signature]);
            return Ok(id);
        }

        let body = self.parse_code_block()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::Ability(jac_ast::nodes::Ability::new(
                name, access, signature, None, body, id, span,
            ))
        });
        self.link_children(id, &[name, signature, body]);
        Ok(id)
    }

    /// Parses an out-of-line definition or specifier introduced by a leading
    /// `:`: `:object:Name { body }` ([`ArchDef`]), `:can:name(params) { body }`
    /// ([`AbilityDef`]), or `:can:name with entry { body }` ([`AbilitySpec`]).
    pub(super) fn parse_out_of_line_def(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let _ = self.expect(TokenKind::Colon)?;
        let tag = self.advance();

        if tag.kind() == TokenKind::Can {
            let _ = self.expect(TokenKind::Colon)?;
            let target_name = self.parse_name()?;

            if self.at(TokenKind::With) {
                let event = self.parse_event_signature()?;
                let access = self.parse_access_level();
                let body = self.parse_code_block()?;
                let span = self.span_from(start);
                let id = self.alloc(NodeKind::TopLevel, span, |id| {
                    jac_ast::nodes::AnyNode::AbilitySpec(AbilitySpec::new(access, Some(event), id, span))
                });
                self.link_children(id, &[target_name, event, body]);
                return Ok(id);
            }

            let signature = self.parse_func_signature()?;
            let body = self.parse_code_block()?;
            let span = self.span_from(start);
            let id = self.alloc(NodeKind::TopLevel, span, |id| {
                jac_ast::nodes::AnyNode::AbilityDef(AbilityDef::new(target_name, signature, None, body, id, span))
            });
            self.link_children(id, &[target_name, signature, body]);
            return Ok(id);
        }

        let arch_kind = self.arch_kind_from_token(tag.kind());
        let _ = self.expect(TokenKind::Colon)?;
        let target_name = self.parse_name()?;
        let body = self.parse_arch_block()?;
        let span = self.span_from(start);
        let _ = arch_kind;
        let id = self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::ArchDef(ArchDef::new(target_name, None, body, id, span))
        });
        self.link_children(id, &[target_name, body]);
        Ok(id)
    }

    pub(super) fn parse_module_code(&mut self) -> ParseResult<NodeID> {
        let start = self.current().span().start;
        let stmt = self.parse_statement()?;
        let span = self.span_from(start);
        let id = self.alloc(NodeKind::TopLevel, span, |id| {
            jac_ast::nodes::AnyNode::ModuleCode(ModuleCode::new(stmt, id, span))
        });
        self.link_children(id, &[stmt]);
        Ok(id)
    }
}
