use async_graphql_parser::types as ast;

/// A GraphQL type reference: a named type or a list, each optionally
/// non-null, nested arbitrarily deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named { name: String, non_null: bool },
    List { of: Box<TypeRef>, non_null: bool },
}

impl TypeRef {
    pub fn named(name: impl Into<String>, non_null: bool) -> Self {
        TypeRef::Named {
            name: name.into(),
            non_null,
        }
    }

    pub fn list(of: TypeRef, non_null: bool) -> Self {
        TypeRef::List {
            of: Box::new(of),
            non_null,
        }
    }

    pub fn non_null(&self) -> bool {
        match self {
            TypeRef::Named { non_null, .. } | TypeRef::List { non_null, .. } => *non_null,
        }
    }

    /// The innermost named type, with all list and non-null wrapping removed.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named { name, .. } => name,
            TypeRef::List { of, .. } => of.base_name(),
        }
    }
}

impl From<&ast::Type> for TypeRef {
    fn from(ty: &ast::Type) -> Self {
        match &ty.base {
            ast::BaseType::Named(name) => TypeRef::named(name.as_str(), !ty.nullable),
            ast::BaseType::List(inner) => TypeRef::list(TypeRef::from(inner.as_ref()), !ty.nullable),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named { name, non_null } => {
                write!(f, "{name}{}", if *non_null { "!" } else { "" })
            }
            TypeRef::List { of, non_null } => {
                write!(f, "[{of}]{}", if *non_null { "!" } else { "" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_from_parsed_field_types() {
        let schema = async_graphql_parser::parse_schema(
            r#"
            type Query {
                tags: [[String]!]!
                user: User
            }
            type User { name: String! }
            "#,
        )
        .unwrap();

        let mut rendered = Vec::new();
        for definition in schema.definitions {
            if let ast::TypeSystemDefinition::Type(typedef) = definition {
                if let ast::TypeKind::Object(object) = typedef.node.kind {
                    for field in object.fields {
                        rendered.push(format!(
                            "{}: {}",
                            field.node.name.node,
                            TypeRef::from(&field.node.ty.node)
                        ));
                    }
                }
            }
        }

        assert_eq!(rendered, ["tags: [[String]!]!", "user: User", "name: String!"]);
    }
}
