use gqlgen_syntax::{DocumentNode, Node, traverse};
use serde::Serialize;

/// A field whose value is produced by a resolver rather than read off the
/// parent object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub field: String,
}

pub fn entries(doc: &DocumentNode, resolve_directive: &str) -> Vec<ResolverEntry> {
    let mut entries = Vec::new();

    traverse(doc, |node| {
        let Node::TypeDef(def) = node else {
            return true;
        };
        for field in def.fields.iter().filter(|f| f.has_directive(resolve_directive)) {
            entries.push(ResolverEntry {
                type_name: def.name.clone(),
                field: field.name.clone(),
            });
        }
        false
    });

    entries
}

/// Pretty-printed JSON array of every resolved field.
pub fn generate(doc: &DocumentNode, resolve_directive: &str) -> serde_json::Result<String> {
    let entries = entries(doc, resolve_directive);
    tracing::debug!(count = entries.len(), "collected resolver entries");
    serde_json::to_string_pretty(&entries)
}
