use gqlgen_syntax::{DocumentNode, Node, collect};

/// Names of all type and input definitions, one per line.
pub fn generate(doc: &DocumentNode, sort: bool) -> String {
    let mut names: Vec<&str> = collect(doc, |node| match node {
        Node::TypeDef(def) => Some(def.name.as_str()),
        _ => None,
    });

    if sort {
        names.sort_unstable();
    }

    names.iter().map(|name| format!("{}\n", name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlgen_syntax::parse_str;

    const SCHEMA: &str = "type Query { a: B } input Zed { x: Int } type Alpha { y: Int } schema { query: Query }";

    #[test]
    fn test_list_document_order() {
        let doc = parse_str(SCHEMA).unwrap();

        assert_eq!(generate(&doc, false), "Query\nZed\nAlpha\n");
    }

    #[test]
    fn test_list_sorted() {
        let doc = parse_str(SCHEMA).unwrap();

        assert_eq!(generate(&doc, true), "Alpha\nQuery\nZed\n");
    }
}
