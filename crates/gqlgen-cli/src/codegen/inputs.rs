use super::naming::title;
use super::{GoOptions, Mapping, fields_of, type_defs, write_member};
use gqlgen_syntax::DocumentNode;
use std::fmt::{self, Write};

/// Go structs for resolver plumbing, in three runs:
///
/// 1. every input type,
/// 2. every output type, with fields carrying the resolve directive replaced
///    by an embedded `<Type><Field>Link`,
/// 3. a `<Type><Field>Args` struct for every output-type field that takes
///    parameters, root types included.
pub fn generate(doc: &DocumentNode, options: &GoOptions) -> Result<String, fmt::Error> {
    let defs = type_defs(doc);
    let mut out = String::with_capacity(2048);
    options.write_header(&mut out)?;
    writeln!(out)?;

    for def in defs.iter().filter(|def| def.input) {
        writeln!(out, "type {} struct {{", def.name)?;
        for field in fields_of(def) {
            if options.is_root(&field.ty.name) {
                continue;
            }
            write_member(&mut out, &field.name, &field.ty, Mapping::Input)?;
        }
        writeln!(out, "}}")?;
    }

    for def in defs.iter().filter(|def| !def.input && !options.is_root(&def.name)) {
        writeln!(out)?;
        writeln!(out, "type {} struct {{", def.name)?;
        for field in fields_of(def) {
            if options.is_root(&field.ty.name) {
                continue;
            }
            if field.has_directive(options.resolve_directive) {
                writeln!(out, "\t{}{}Link", def.name, title(&field.name))?;
                continue;
            }
            write_member(&mut out, &field.name, &field.ty, Mapping::Value)?;
        }
        writeln!(out, "}}")?;
    }

    for def in defs.iter().filter(|def| !def.input) {
        for field in fields_of(def) {
            if field.params.is_empty() {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "type {}{}Args struct {{", def.name, title(&field.name))?;
            for param in &field.params {
                write_member(&mut out, &param.name, &param.ty, Mapping::Value)?;
            }
            writeln!(out, "}}")?;
        }
    }

    tracing::debug!(bytes = out.len(), "generated input types");
    Ok(out)
}
