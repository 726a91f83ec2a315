use gqlgen_syntax::TypeNode;

/// Upper-cases the first character, leaving the rest alone.
pub fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exported Go identifier for a schema field or parameter name.
///
/// `userId` becomes `UserID`, `id` becomes `ID`, anything else is title-cased.
pub fn go_name(name: &str) -> String {
    if let Some(prefix) = name.strip_suffix("Id") {
        return format!("{}ID", title(prefix));
    }
    if name == "id" {
        return "ID".to_string();
    }
    title(name)
}

/// How a schema type reference turns into a Go type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// Output structs: named types become pointers.
    Pointer,
    /// Input structs: scalars ignore list-ness, named types become pointers.
    Input,
    /// Link-aware structs and argument structs: named types stay values.
    Value,
}

pub fn go_type(ty: &TypeNode, mapping: Mapping) -> String {
    match (ty.name.as_str(), mapping) {
        ("String", Mapping::Input) => "string".to_string(),
        ("Int", Mapping::Input) => "int".to_string(),
        ("String", _) => slice_if("string", ty.multiple),
        ("Int", _) => slice_if("int", ty.multiple),
        ("ID", Mapping::Pointer | Mapping::Value) => "ID".to_string(),
        (name, _) if ty.multiple => format!("[]{}", name),
        ("ID", Mapping::Input) => "ID".to_string(),
        (name, Mapping::Value) => name.to_string(),
        (name, _) => format!("*{}", name),
    }
}

fn slice_if(base: &str, multiple: bool) -> String {
    if multiple {
        format!("[]{}", base)
    } else {
        base.to_string()
    }
}
