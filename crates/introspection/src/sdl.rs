//! Renders an introspected schema back into SDL text.

use std::fmt::Write;

use itertools::Itertools;

use crate::types::{FullType, IntrospectionSchema, TypeKind, TypeRef};

const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

pub(crate) fn render(schema: &IntrospectionSchema) -> String {
    let mut out = String::new();

    render_schema_block(&mut out, schema);

    for ty in &schema.types {
        let Some(name) = ty.name.as_deref() else {
            continue;
        };
        if name.starts_with("__") {
            continue;
        }
        if ty.kind == TypeKind::Scalar && BUILTIN_SCALARS.contains(&name) {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        render_type(&mut out, name, ty);
    }

    out
}

fn render_schema_block(out: &mut String, schema: &IntrospectionSchema) {
    let query = schema.query_type.as_ref().and_then(|ty| ty.name.as_deref());
    let mutation = schema.mutation_type.as_ref().and_then(|ty| ty.name.as_deref());
    let subscription = schema
        .subscription_type
        .as_ref()
        .and_then(|ty| ty.name.as_deref());

    out.push_str("schema {\n");
    if let Some(query) = query {
        writeln!(out, "  query: {query}").unwrap();
    }
    if let Some(mutation) = mutation {
        writeln!(out, "  mutation: {mutation}").unwrap();
    }
    if let Some(subscription) = subscription {
        writeln!(out, "  subscription: {subscription}").unwrap();
    }
    out.push_str("}\n");
}

fn render_type(out: &mut String, name: &str, ty: &FullType) {
    match ty.kind {
        TypeKind::Scalar => {
            writeln!(out, "scalar {name}").unwrap();
        }
        TypeKind::Object | TypeKind::Interface => {
            let keyword = if ty.kind == TypeKind::Object {
                "type"
            } else {
                "interface"
            };
            write!(out, "{keyword} {name}").unwrap();

            let interfaces: Vec<&str> = ty
                .interfaces
                .iter()
                .flatten()
                .filter_map(|interface| interface.name.as_deref())
                .collect();
            if !interfaces.is_empty() {
                write!(out, " implements {}", interfaces.iter().format(" & ")).unwrap();
            }

            out.push_str(" {\n");
            for field in ty.fields.iter().flatten() {
                write!(out, "  {}", field.name).unwrap();
                if !field.args.is_empty() {
                    let args = field.args.iter().format_with(", ", |arg, f| {
                        match &arg.default_value {
                            Some(default) => {
                                f(&format_args!("{}: {} = {default}", arg.name, render_ref(&arg.ty)))
                            }
                            None => f(&format_args!("{}: {}", arg.name, render_ref(&arg.ty))),
                        }
                    });
                    write!(out, "({args})").unwrap();
                }
                writeln!(out, ": {}", render_ref(&field.ty)).unwrap();
            }
            out.push_str("}\n");
        }
        TypeKind::Union => {
            let members = ty
                .possible_types
                .iter()
                .flatten()
                .filter_map(|member| member.name.as_deref())
                .format(" | ");
            writeln!(out, "union {name} = {members}").unwrap();
        }
        TypeKind::Enum => {
            writeln!(out, "enum {name} {{").unwrap();
            for value in ty.enum_values.iter().flatten() {
                writeln!(out, "  {}", value.name).unwrap();
            }
            out.push_str("}\n");
        }
        TypeKind::InputObject => {
            writeln!(out, "input {name} {{").unwrap();
            for field in ty.input_fields.iter().flatten() {
                match &field.default_value {
                    Some(default) => {
                        writeln!(out, "  {}: {} = {default}", field.name, render_ref(&field.ty))
                            .unwrap()
                    }
                    None => writeln!(out, "  {}: {}", field.name, render_ref(&field.ty)).unwrap(),
                }
            }
            out.push_str("}\n");
        }
        // Wrapping kinds never appear at the top level.
        TypeKind::List | TypeKind::NonNull => {}
    }
}

fn render_ref(ty: &TypeRef) -> String {
    match ty.kind {
        TypeKind::NonNull => match &ty.of_type {
            Some(inner) => format!("{}!", render_ref(inner)),
            None => String::new(),
        },
        TypeKind::List => match &ty.of_type {
            Some(inner) => format!("[{}]", render_ref(inner)),
            None => String::new(),
        },
        _ => ty.name.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn renders_an_introspected_schema_as_sdl() {
        let schema: IntrospectionSchema = serde_json::from_value(serde_json::json!({
            "queryType": { "name": "Query" },
            "mutationType": { "name": "Mutation" },
            "subscriptionType": null,
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        {
                            "name": "user",
                            "args": [
                                {
                                    "name": "id",
                                    "type": {
                                        "kind": "NON_NULL",
                                        "name": null,
                                        "ofType": { "kind": "SCALAR", "name": "ID" }
                                    },
                                    "defaultValue": null
                                }
                            ],
                            "type": { "kind": "OBJECT", "name": "User" }
                        },
                        {
                            "name": "tags",
                            "args": [],
                            "type": {
                                "kind": "NON_NULL",
                                "name": null,
                                "ofType": {
                                    "kind": "LIST",
                                    "name": null,
                                    "ofType": {
                                        "kind": "NON_NULL",
                                        "name": null,
                                        "ofType": { "kind": "SCALAR", "name": "String" }
                                    }
                                }
                            }
                        }
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "User",
                    "fields": [
                        { "name": "name", "args": [], "type": {
                            "kind": "NON_NULL", "name": null,
                            "ofType": { "kind": "SCALAR", "name": "String" }
                        } }
                    ],
                    "interfaces": [ { "kind": "INTERFACE", "name": "Node" } ]
                },
                {
                    "kind": "INTERFACE",
                    "name": "Node",
                    "fields": [
                        { "name": "id", "args": [], "type": {
                            "kind": "NON_NULL", "name": null,
                            "ofType": { "kind": "SCALAR", "name": "ID" }
                        } }
                    ]
                },
                { "kind": "UNION", "name": "Entity", "possibleTypes": [
                    { "kind": "OBJECT", "name": "User" }
                ] },
                { "kind": "ENUM", "name": "Role", "enumValues": [
                    { "name": "ADMIN" }, { "name": "USER" }
                ] },
                { "kind": "INPUT_OBJECT", "name": "UserFilter", "inputFields": [
                    { "name": "role", "type": { "kind": "ENUM", "name": "Role" }, "defaultValue": "ADMIN" }
                ] },
                { "kind": "SCALAR", "name": "DateTime" },
                { "kind": "SCALAR", "name": "String" },
                { "kind": "OBJECT", "name": "__Type", "fields": [] }
            ]
        }))
        .unwrap();

        expect![[r#"
            schema {
              query: Query
              mutation: Mutation
            }

            type Query {
              user(id: ID!): User
              tags: [String!]!
            }

            type User implements Node {
              name: String!
            }

            interface Node {
              id: ID!
            }

            union Entity = User

            enum Role {
              ADMIN
              USER
            }

            input UserFilter {
              role: Role = ADMIN
            }

            scalar DateTime
        "#]]
        .assert_eq(&render(&schema));
    }
}
