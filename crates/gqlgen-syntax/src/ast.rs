//! Schema syntax tree.
//!
//! Every node owns its children outright. [`Node`] is a borrowed view over
//! any of them that exposes the children in document order, which is all
//! [`traverse`](crate::traverse::traverse) needs.

use crate::error::Loc;
use crate::lexer::{Token, TokenKind};
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    pub loc: Loc,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    TypeDef(TypeDefNode),
    Schema(SchemaNode),
    DirectiveDef(DirectiveDefNode),
}

/// `type Name { ... }` or, with `input` set, `input Name { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefNode {
    pub loc: Loc,
    pub name: String,
    pub fields: Vec<FieldNode>,
    pub input: bool,
}

/// `schema { query: Query, ... }`: root operation bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    pub loc: Loc,
    pub fields: Vec<FieldNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub loc: Loc,
    pub name: String,
    pub ty: TypeNode,
    pub params: Vec<ParamNode>,
    pub directives: Vec<DirectiveNode>,
}

impl FieldNode {
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamNode {
    pub loc: Loc,
    pub name: String,
    pub ty: TypeNode,
}

/// A type reference such as `String`, `Int!`, `[ID]` or `[ID!]!`.
///
/// `required` is the outer `!`; `non_null_elements` is the `!` inside the
/// brackets and is only set when `multiple` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub loc: Loc,
    pub name: String,
    pub required: bool,
    pub multiple: bool,
    pub non_null_elements: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveNode {
    pub loc: Loc,
    pub name: String,
}

/// `directive @name on TARGET, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDefNode {
    pub loc: Loc,
    pub name: String,
    pub targets: Vec<String>,
}

/// A single matched token. The parser's primitives produce these; they are
/// folded into the other nodes and never survive into a finished document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    pub loc: Loc,
    pub kind: TokenKind,
    pub value: String,
}

impl From<Token> for TokenNode {
    fn from(token: Token) -> Self {
        Self {
            loc: token.loc,
            kind: token.kind,
            value: token.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    TypeDef,
    Schema,
    DirectiveDef,
    Field,
    Param,
    Type,
    Directive,
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Document(&'a DocumentNode),
    TypeDef(&'a TypeDefNode),
    Schema(&'a SchemaNode),
    DirectiveDef(&'a DirectiveDefNode),
    Field(&'a FieldNode),
    Param(&'a ParamNode),
    Type(&'a TypeNode),
    Directive(&'a DirectiveNode),
    Token(&'a TokenNode),
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::TypeDef(_) => NodeKind::TypeDef,
            Node::Schema(_) => NodeKind::Schema,
            Node::DirectiveDef(_) => NodeKind::DirectiveDef,
            Node::Field(_) => NodeKind::Field,
            Node::Param(_) => NodeKind::Param,
            Node::Type(_) => NodeKind::Type,
            Node::Directive(_) => NodeKind::Directive,
            Node::Token(_) => NodeKind::Token,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Node::Document(n) => n.loc,
            Node::TypeDef(n) => n.loc,
            Node::Schema(n) => n.loc,
            Node::DirectiveDef(n) => n.loc,
            Node::Field(n) => n.loc,
            Node::Param(n) => n.loc,
            Node::Type(n) => n.loc,
            Node::Directive(n) => n.loc,
            Node::Token(n) => n.loc,
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Node::Document(_) | Node::Schema(_) => None,
            Node::TypeDef(n) => Some(&n.name),
            Node::DirectiveDef(n) => Some(&n.name),
            Node::Field(n) => Some(&n.name),
            Node::Param(n) => Some(&n.name),
            Node::Type(n) => Some(&n.name),
            Node::Directive(n) => Some(&n.name),
            Node::Token(n) => Some(&n.value),
        }
    }

    /// Immediate children in document order. A field lists its type first,
    /// then its parameters, then its directives.
    pub fn children(&self) -> SmallVec<[Node<'a>; 4]> {
        match *self {
            Node::Document(n) => n.definitions.iter().map(Node::from).collect(),
            Node::TypeDef(n) => n.fields.iter().map(Node::Field).collect(),
            Node::Schema(n) => n.fields.iter().map(Node::Field).collect(),
            Node::Field(n) => std::iter::once(Node::Type(&n.ty))
                .chain(n.params.iter().map(Node::Param))
                .chain(n.directives.iter().map(Node::Directive))
                .collect(),
            Node::Param(n) => smallvec::smallvec![Node::Type(&n.ty)],
            Node::DirectiveDef(_) | Node::Type(_) | Node::Directive(_) | Node::Token(_) => {
                SmallVec::new()
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "Document",
            NodeKind::TypeDef => "TypeDef",
            NodeKind::Schema => "Schema",
            NodeKind::DirectiveDef => "DirectiveDef",
            NodeKind::Field => "Field",
            NodeKind::Param => "Param",
            NodeKind::Type => "Type",
            NodeKind::Directive => "Directive",
            NodeKind::Token => "Token",
        };
        write!(f, "{}", name)
    }
}

/// `Kind(name)`, or just `Kind` for nodes without a name.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({})", self.kind(), name),
            None => write!(f, "{}", self.kind()),
        }
    }
}

impl<'a> From<&'a Definition> for Node<'a> {
    fn from(definition: &'a Definition) -> Self {
        match definition {
            Definition::TypeDef(n) => Node::TypeDef(n),
            Definition::Schema(n) => Node::Schema(n),
            Definition::DirectiveDef(n) => Node::DirectiveDef(n),
        }
    }
}

macro_rules! impl_node_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Node<'a> {
                fn from(node: &'a $ty) -> Self {
                    Node::$variant(node)
                }
            }
        )+
    };
}

impl_node_from!(
    DocumentNode => Document,
    TypeDefNode => TypeDef,
    SchemaNode => Schema,
    DirectiveDefNode => DirectiveDef,
    FieldNode => Field,
    ParamNode => Param,
    TypeNode => Type,
    DirectiveNode => Directive,
    TokenNode => Token,
);
