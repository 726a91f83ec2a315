//! Schema grammar.
//!
//! ```text
//! type         ::= '[' identifier '!'? ']' '!'? | identifier '!'?
//! param        ::= identifier ':' type
//! params       ::= '(' (param (',' param)*)? ')'
//! directive    ::= '@' identifier
//! field        ::= identifier params? ':' type directive*
//! typedef      ::= 'type' identifier '{' field* '}'
//! input        ::= 'input' identifier '{' field* '}'
//! schema       ::= 'schema' '{' field* '}'
//! directivedef ::= 'directive' '@' identifier 'on' identifier (',' identifier)*
//! definition   ::= typedef | input | schema | directivedef
//! document     ::= definition* EOF
//! ```

use super::Parser;
use super::combinators::{
    ParseResult, choice, closing, end_of_input, keyword, maybe, repeat, repeat_separated, sequence,
    token, unopened,
};
use crate::ast::*;
use crate::lexer::TokenKind;

fn identifier() -> impl Fn(&mut Parser) -> ParseResult<TokenNode> {
    token(TokenKind::Text)
}

/// An optional `!`.
fn bang() -> impl Fn(&mut Parser) -> ParseResult<bool> {
    let part = maybe(token(TokenKind::Bang));
    move |p: &mut Parser| Ok(part(p)?.is_some())
}

fn list_type() -> impl Fn(&mut Parser) -> ParseResult<TypeNode> {
    sequence(
        |loc, (_, name, inner, _, outer): (TokenNode, TokenNode, bool, TokenNode, bool)| {
            Ok(TypeNode {
                loc,
                name: name.value,
                required: outer,
                multiple: true,
                non_null_elements: inner,
            })
        },
        (
            token(TokenKind::LeftBracket),
            identifier(),
            bang(),
            closing(TokenKind::RightBracket),
            bang(),
        ),
    )
}

fn named_type() -> impl Fn(&mut Parser) -> ParseResult<TypeNode> {
    sequence(
        |loc, (name, required): (TokenNode, bool)| {
            Ok(TypeNode {
                loc,
                name: name.value,
                required,
                multiple: false,
                non_null_elements: false,
            })
        },
        (identifier(), bang()),
    )
}

fn type_ref() -> impl Fn(&mut Parser) -> ParseResult<TypeNode> {
    sequence(
        |_, (ty, ()): (TypeNode, ())| Ok(ty),
        (
            choice("a type", (list_type(), named_type())),
            unopened(TokenKind::RightBracket),
        ),
    )
}

fn param() -> impl Fn(&mut Parser) -> ParseResult<ParamNode> {
    sequence(
        |loc, (name, _, ty): (TokenNode, TokenNode, TypeNode)| {
            Ok(ParamNode {
                loc,
                name: name.value,
                ty,
            })
        },
        (identifier(), token(TokenKind::Colon), type_ref()),
    )
}

fn params() -> impl Fn(&mut Parser) -> ParseResult<Vec<ParamNode>> {
    sequence(
        |_, (_, params, _): (TokenNode, Vec<ParamNode>, TokenNode)| Ok(params),
        (
            token(TokenKind::LeftParen),
            repeat_separated(param(), token(TokenKind::Comma)),
            token(TokenKind::RightParen),
        ),
    )
}

fn directive() -> impl Fn(&mut Parser) -> ParseResult<DirectiveNode> {
    sequence(
        |loc, (_, name): (TokenNode, TokenNode)| Ok(DirectiveNode { loc, name: name.value }),
        (token(TokenKind::At), identifier()),
    )
}

fn field() -> impl Fn(&mut Parser) -> ParseResult<FieldNode> {
    sequence(
        |loc,
         (name, params, _, ty, directives): (
            TokenNode,
            Option<Vec<ParamNode>>,
            TokenNode,
            TypeNode,
            Vec<DirectiveNode>,
        )| {
            Ok(FieldNode {
                loc,
                name: name.value,
                ty,
                params: params.unwrap_or_default(),
                directives,
            })
        },
        (
            identifier(),
            maybe(params()),
            token(TokenKind::Colon),
            type_ref(),
            repeat(directive()),
        ),
    )
}

fn fields_block() -> impl Fn(&mut Parser) -> ParseResult<Vec<FieldNode>> {
    sequence(
        |_, (_, fields, _): (TokenNode, Vec<FieldNode>, TokenNode)| Ok(fields),
        (
            token(TokenKind::LeftCurly),
            repeat(field()),
            token(TokenKind::RightCurly),
        ),
    )
}

/// `type Name { ... }` or `input Name { ... }`.
fn typedef(word: &'static str, input: bool) -> impl Fn(&mut Parser) -> ParseResult<Definition> {
    sequence(
        move |loc, (_, name, fields): (TokenNode, TokenNode, Vec<FieldNode>)| {
            Ok(Definition::TypeDef(TypeDefNode {
                loc,
                name: name.value,
                fields,
                input,
            }))
        },
        (keyword(word), identifier(), fields_block()),
    )
}

fn schema() -> impl Fn(&mut Parser) -> ParseResult<Definition> {
    sequence(
        |loc, (_, fields): (TokenNode, Vec<FieldNode>)| {
            Ok(Definition::Schema(SchemaNode { loc, fields }))
        },
        (keyword("schema"), fields_block()),
    )
}

fn directive_def() -> impl Fn(&mut Parser) -> ParseResult<Definition> {
    let more_targets = repeat(sequence(
        |_, (_, target): (TokenNode, TokenNode)| Ok(target),
        (token(TokenKind::Comma), identifier()),
    ));

    sequence(
        |loc,
         (_, _, name, _, first, rest): (
            TokenNode,
            TokenNode,
            TokenNode,
            TokenNode,
            TokenNode,
            Vec<TokenNode>,
        )| {
            let targets = std::iter::once(first)
                .chain(rest)
                .map(|t| t.value)
                .collect();
            Ok(Definition::DirectiveDef(DirectiveDefNode {
                loc,
                name: name.value,
                targets,
            }))
        },
        (
            keyword("directive"),
            token(TokenKind::At),
            identifier(),
            keyword("on"),
            identifier(),
            more_targets,
        ),
    )
}

fn definition() -> impl Fn(&mut Parser) -> ParseResult<Definition> {
    choice(
        "a definition ('type', 'input', 'schema' or 'directive')",
        (
            typedef("type", false),
            typedef("input", true),
            schema(),
            directive_def(),
        ),
    )
}

pub(super) fn document() -> impl Fn(&mut Parser) -> ParseResult<DocumentNode> {
    sequence(
        |loc, (definitions, _): (Vec<Definition>, TokenNode)| Ok(DocumentNode { loc, definitions }),
        (repeat(definition()), end_of_input()),
    )
}
