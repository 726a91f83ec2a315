//! Go source generators.
//!
//! Each generator walks a parsed [`DocumentNode`] with the traversal API and
//! renders its output into a `String`; printing is left to the caller.

mod inputs;
mod list;
mod manifest;
mod naming;
mod types;

pub use inputs::generate as generate_inputs;
pub use list::generate as generate_list;
pub use manifest::generate as generate_manifest;
pub use types::generate as generate_types;

use gqlgen_syntax::{DocumentNode, FieldNode, Node, TypeDefNode, TypeNode, collect};
use naming::{Mapping, go_name, go_type};
use std::fmt::{self, Write};

/// Settings shared by the Go generators.
#[derive(Debug, Clone)]
pub struct GoOptions<'a> {
    pub package: &'a str,
    pub root_types: &'a [String],
    pub resolve_directive: &'a str,
}

impl GoOptions<'_> {
    fn is_root(&self, name: &str) -> bool {
        self.root_types.iter().any(|root| root == name)
    }

    fn write_header(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "package {}", self.package)?;
        writeln!(out)?;
        writeln!(out, "type ID string")
    }
}

/// Every type and input definition, in document order.
fn type_defs(doc: &DocumentNode) -> Vec<&TypeDefNode> {
    collect(doc, |node| match node {
        Node::TypeDef(def) => Some(def),
        _ => None,
    })
}

fn fields_of(def: &TypeDefNode) -> Vec<&FieldNode> {
    collect(def, |node| match node {
        Node::Field(field) => Some(field),
        _ => None,
    })
}

/// One struct member: ``\tName type `json:"name"` ``.
fn write_member(out: &mut String, name: &str, ty: &TypeNode, mapping: Mapping) -> fmt::Result {
    writeln!(
        out,
        "\t{} {} `json:\"{}\"`",
        go_name(name),
        go_type(ty, mapping),
        name
    )
}
