//! # gqlgen Syntax
//!
//! Lexer, parser, syntax tree and traversal for the gqlgen schema language,
//! a small GraphQL-like notation for object types, input types and root
//! operation bindings.
//!
//! ## Overview
//!
//! - **Lexer**: turns schema text into positioned tokens, never failing
//! - **Parser**: builds a [`DocumentNode`] from tokens with composable
//!   recursive-descent rules
//! - **AST**: owned node structs plus a borrowed [`Node`] view over any of them
//! - **Traversal**: pre-order walk with per-node pruning
//! - **Error Handling**: [`ParseError`] with location, rendered against the
//!   source by [`Diagnostic`]
//!
//! ## Architecture
//!
//! ```text
//! Schema text
//!     ↓
//! Lexer (lex)
//!     ↓
//! Vec<Token>
//!     ↓
//! Parser (parse)
//!     ↓
//! DocumentNode
//!     ↓
//! traverse(visitor)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gqlgen_syntax::{lex, parse, Definition};
//!
//! let source = r#"
//!     type Query {
//!         user(id: ID!): User @resolve
//!     }
//!
//!     schema {
//!         query: Query
//!     }
//! "#;
//!
//! let document = parse(lex(source)).expect("valid schema");
//!
//! assert_eq!(document.definitions.len(), 2);
//! assert!(matches!(document.definitions[1], Definition::Schema(_)));
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use gqlgen_syntax::{parse_str, Diagnostic};
//!
//! let source = "type Query { ping: [String }";
//! let err = parse_str(source).unwrap_err();
//!
//! // the innermost failure says what actually went wrong
//! assert!(err.root_cause().to_string().starts_with("mismatched list brackets"));
//! println!("{}", Diagnostic::new(source, &err));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod traverse;

pub use ast::*;
pub use error::{Diagnostic, Loc, ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind, lex};
pub use parser::{parse, parse_str};
pub use traverse::{collect, traverse};
