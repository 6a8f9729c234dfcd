use std::collections::BTreeMap;

use async_graphql_parser::types::{ServiceDocument, TypeKind, TypeSystemDefinition};

use crate::type_ref::TypeRef;

/// A field-lookup index over a parsed SDL document.
#[derive(Debug)]
pub struct Schema {
    types: BTreeMap<String, TypeDef>,
    pub query_type_name: String,
    pub mutation_type_name: String,
    pub subscription_type_name: String,
}

#[derive(Debug)]
pub struct TypeDef {
    pub kind: TypeDefKind,
    /// field name -> declared type reference
    pub fields: BTreeMap<String, TypeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl Schema {
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Resolves the declared type of `field_name` on `type_name`.
    ///
    /// The `__typename` meta field resolves on every type to `String!`.
    pub fn field_type(&self, type_name: &str, field_name: &str) -> Option<TypeRef> {
        if field_name == "__typename" {
            return Some(TypeRef::named("String", true));
        }
        self.types
            .get(type_name)
            .and_then(|def| def.fields.get(field_name))
            .cloned()
    }

    /// Whether `name` is a leaf type (scalar or enum), i.e. a type selected
    /// without a child selection set.
    pub fn is_leaf(&self, name: &str) -> bool {
        match self.types.get(name) {
            Some(def) => matches!(def.kind, TypeDefKind::Scalar | TypeDefKind::Enum),
            // Builtin scalars don't need declarations in the SDL.
            None => matches!(name, "String" | "Int" | "Float" | "Boolean" | "ID"),
        }
    }
}

impl From<ServiceDocument> for Schema {
    fn from(document: ServiceDocument) -> Self {
        let mut types: BTreeMap<String, TypeDef> = BTreeMap::new();
        let mut query_type_name = None;
        let mut mutation_type_name = None;
        let mut subscription_type_name = None;

        for definition in document.definitions {
            match definition {
                TypeSystemDefinition::Schema(schema_def) => {
                    if let Some(query) = schema_def.node.query {
                        query_type_name = Some(query.node.to_string());
                    }
                    if let Some(mutation) = schema_def.node.mutation {
                        mutation_type_name = Some(mutation.node.to_string());
                    }
                    if let Some(subscription) = schema_def.node.subscription {
                        subscription_type_name = Some(subscription.node.to_string());
                    }
                }
                TypeSystemDefinition::Directive(_) => (),
                TypeSystemDefinition::Type(typedef) => {
                    let type_name = typedef.node.name.node.to_string();

                    let (kind, mut fields) = match typedef.node.kind {
                        TypeKind::Scalar => (TypeDefKind::Scalar, BTreeMap::new()),
                        TypeKind::Enum(_) => (TypeDefKind::Enum, BTreeMap::new()),
                        TypeKind::Union(_) => (TypeDefKind::Union, BTreeMap::new()),
                        TypeKind::Object(object) => (
                            TypeDefKind::Object,
                            object
                                .fields
                                .iter()
                                .map(|field| {
                                    (
                                        field.node.name.node.to_string(),
                                        TypeRef::from(&field.node.ty.node),
                                    )
                                })
                                .collect(),
                        ),
                        TypeKind::Interface(interface) => (
                            TypeDefKind::Interface,
                            interface
                                .fields
                                .iter()
                                .map(|field| {
                                    (
                                        field.node.name.node.to_string(),
                                        TypeRef::from(&field.node.ty.node),
                                    )
                                })
                                .collect(),
                        ),
                        TypeKind::InputObject(input_object) => (
                            TypeDefKind::InputObject,
                            input_object
                                .fields
                                .iter()
                                .map(|field| {
                                    (
                                        field.node.name.node.to_string(),
                                        TypeRef::from(&field.node.ty.node),
                                    )
                                })
                                .collect(),
                        ),
                    };

                    // Type extensions merge into the base definition.
                    if let Some(existing) = types.get_mut(&type_name) {
                        existing.fields.append(&mut fields);
                    } else {
                        types.insert(type_name, TypeDef { kind, fields });
                    }
                }
            }
        }

        Schema {
            types,
            query_type_name: query_type_name.unwrap_or_else(|| "Query".to_owned()),
            mutation_type_name: mutation_type_name.unwrap_or_else(|| "Mutation".to_owned()),
            subscription_type_name: subscription_type_name.unwrap_or_else(|| "Subscription".to_owned()),
        }
    }
}
