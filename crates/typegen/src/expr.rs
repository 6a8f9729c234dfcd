/// An ownership-annotated Rust type expression for a generated field.
///
/// Synthesized named types are referenced by canonical name; the catalog
/// owns their definitions. Nullability is optional ownership (`Option`),
/// sequences own their elements (`Vec`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A synthesized named type owned by the catalog.
    Named(String),
    /// A bound leaf type, e.g. `String`, `i64`, `chrono::DateTime<chrono::Utc>`.
    Path(String),
    Option(Box<TypeExpr>),
    Vec(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn path(path: impl Into<String>) -> Self {
        TypeExpr::Path(path.into())
    }

    pub fn option(inner: TypeExpr) -> Self {
        TypeExpr::Option(Box::new(inner))
    }

    pub fn vec(inner: TypeExpr) -> Self {
        TypeExpr::Vec(Box::new(inner))
    }

    pub fn is_option(&self) -> bool {
        matches!(self, TypeExpr::Option(_))
    }

    /// The synthesized type name this expression resolves to, if any,
    /// looking through `Option` and `Vec` wrapping.
    pub fn synthesized_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) => Some(name),
            TypeExpr::Path(_) => None,
            TypeExpr::Option(inner) | TypeExpr::Vec(inner) => inner.synthesized_name(),
        }
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Named(name) | TypeExpr::Path(name) => f.write_str(name),
            TypeExpr::Option(inner) => write!(f, "Option<{inner}>"),
            TypeExpr::Vec(inner) => write!(f, "Vec<{inner}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeExpr;

    #[test]
    fn display_nesting() {
        let expr = TypeExpr::vec(TypeExpr::option(TypeExpr::vec(TypeExpr::option(
            TypeExpr::path("String"),
        ))));
        assert_eq!(expr.to_string(), "Vec<Option<Vec<Option<String>>>>");
    }

    #[test]
    fn synthesized_name_looks_through_wrapping() {
        let expr = TypeExpr::option(TypeExpr::vec(TypeExpr::named("GetUser_User")));
        assert_eq!(expr.synthesized_name(), Some("GetUser_User"));
        assert_eq!(TypeExpr::path("String").synthesized_name(), None);
    }
}
