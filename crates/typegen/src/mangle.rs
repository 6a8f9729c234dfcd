//! Deterministic name mangling for synthesized types and generated fields.
//!
//! These are pure functions; they never consult the catalog.

/// Type name for a field selection: `P_A`, where `P` is the parent scope
/// with its first rune recased according to `export`, and `A` is the alias
/// in PascalCase. An empty alias names the parent scope itself (the
/// per-operation seed).
pub(crate) fn field_type_name(parent_scope: &str, alias: &str, export: bool) -> String {
    let parent = if export {
        first_upper(parent_scope)
    } else {
        first_lower(parent_scope)
    };

    if alias.is_empty() {
        return parent;
    }

    format!("{parent}_{}", pascal_case(alias))
}

/// Struct field identifier for a wire name, with keyword escaping.
pub(crate) fn field_ident(name: &str) -> String {
    let ident = snake_case(name);
    if is_keyword(&ident) {
        return format!("r#{ident}");
    }
    ident
}

pub(crate) fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = true;
    for c in s.chars() {
        if c == '_' || c == '-' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub(crate) fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '-' {
            out.push('_');
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "as" | "async"
            | "await"
            | "box"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
    )
}
