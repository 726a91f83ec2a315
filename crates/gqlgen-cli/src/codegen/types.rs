use super::{GoOptions, Mapping, fields_of, type_defs, write_member};
use gqlgen_syntax::DocumentNode;
use std::fmt::{self, Write};

/// Go structs for every output type. Input types and the root operation
/// types are left out, as are fields whose type is a root type.
pub fn generate(doc: &DocumentNode, options: &GoOptions) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(1024);
    options.write_header(&mut out)?;

    for def in type_defs(doc) {
        if def.input || options.is_root(&def.name) {
            continue;
        }

        writeln!(out)?;
        writeln!(out, "type {} struct {{", def.name)?;
        for field in fields_of(def) {
            if options.is_root(&field.ty.name) {
                continue;
            }
            write_member(&mut out, &field.name, &field.ty, Mapping::Pointer)?;
        }
        writeln!(out, "}}")?;
    }

    tracing::debug!(bytes = out.len(), "generated output types");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlgen_syntax::parse_str;

    fn roots() -> Vec<String> {
        vec!["Query".to_string(), "Mutation".to_string()]
    }

    #[test]
    fn test_generate_types() {
        let doc = parse_str(
            r#"
            type Query { user(id: ID!): User }
            type User {
                id: ID!
                name: String
                nicknames: [String]
                age: Int
                managerId: ID
                manager: User
                posts: [Post]
                root: Query
            }
            input NewUser { name: String }
            type Post { title: String! }
            schema { query: Query }
            "#,
        )
        .unwrap();
        let root_types = roots();
        let options = GoOptions {
            package: "model",
            root_types: &root_types,
            resolve_directive: "resolve",
        };

        let expected = "package model\n\
\n\
type ID string\n\
\n\
type User struct {\n\
\tID ID `json:\"id\"`\n\
\tName string `json:\"name\"`\n\
\tNicknames []string `json:\"nicknames\"`\n\
\tAge int `json:\"age\"`\n\
\tManagerID ID `json:\"managerId\"`\n\
\tManager *User `json:\"manager\"`\n\
\tPosts []Post `json:\"posts\"`\n\
}\n\
\n\
type Post struct {\n\
\tTitle string `json:\"title\"`\n\
}\n";

        assert_eq!(generate(&doc, &options).unwrap(), expected);
    }

    #[test]
    fn test_header_only_for_roots() {
        let doc = parse_str("type Query { ping: String }").unwrap();
        let root_types = roots();
        let options = GoOptions {
            package: "api",
            root_types: &root_types,
            resolve_directive: "resolve",
        };

        assert_eq!(
            generate(&doc, &options).unwrap(),
            "package api\n\ntype ID string\n"
        );
    }
}
