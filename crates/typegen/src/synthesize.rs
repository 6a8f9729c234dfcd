use async_graphql_parser::types::OperationType;

use crate::{
    analyze,
    binder::LeafBinder,
    catalog::Catalog,
    config::GeneratorConfig,
    error::CodegenResult,
    mangle,
    operations::Documents,
    schema::Schema,
    shape::ShapeBuilder,
};

/// Walks every operation's selection set and synthesizes the closed set of
/// response types. The returned catalog enumerates lexicographically and is
/// immutable from here on.
pub fn synthesize(
    schema: &Schema,
    documents: &Documents,
    config: &GeneratorConfig,
) -> CodegenResult<Catalog> {
    let binder = LeafBinder::new(config);
    let mut builder = ShapeBuilder::new(schema, documents, &binder, config);

    for operation in &documents.operations {
        tracing::debug!("synthesizing response types for operation {}", operation.name);

        let root_type = match operation.ty {
            OperationType::Query => &schema.query_type_name,
            OperationType::Mutation => &schema.mutation_type_name,
            OperationType::Subscription => &schema.subscription_type_name,
        };

        let type_name = mangle::field_type_name(&operation.name, "", config.export_query_type);
        let fields = builder.build_fields(&type_name, root_type, &operation.selection_set)?;
        builder
            .catalog
            .register(&type_name, fields, &config.query_type_module);
    }

    let mut catalog = builder.catalog;
    let embedded = analyze::embedded_types(&catalog);
    catalog.mark_embedded(&embedded);

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use indoc::indoc;

    fn run(schema: &str, queries: &str, config: GeneratorConfig) -> Catalog {
        let schema: Schema = async_graphql_parser::parse_schema(schema).unwrap().into();
        let documents =
            Documents::collect([async_graphql_parser::parse_query(queries).unwrap()]).unwrap();
        synthesize(&schema, &documents, &config).unwrap()
    }

    fn summary(catalog: &Catalog) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for ty in catalog.types() {
            writeln!(
                out,
                "{}{}",
                ty.name,
                if ty.emit_decoder { "" } else { " (embedded)" }
            )
            .unwrap();
            for field in &ty.fields {
                writeln!(
                    out,
                    "  {}: {} [{}]",
                    field.name,
                    field.type_expr,
                    field.wire_tag.tag().unwrap_or("omit"),
                )
                .unwrap();
            }
        }
        out
    }

    const SCHEMA: &str = indoc! {r#"
        type Query {
            user: User
            comments: [Comment!]
        }
        type User {
            name: String!
            profile: Profile
        }
        type Profile {
            id: ID!
        }
        type PrivateProfile {
            id: ID!
            age: Int!
        }
        type PublicProfile {
            id: ID!
            status: String
        }
        type Comment {
            text: String!
        }
    "#};

    #[test]
    fn enumeration_is_lexicographic_across_operations() {
        // opB is declared after opA at the call site; enumeration is sorted
        // by canonical type name regardless.
        let catalog = run(
            SCHEMA,
            indoc! {r#"
                query opA { user { name } }
                query opB { comments { text } }
            "#},
            GeneratorConfig {
                export_query_type: false,
                ..Default::default()
            },
        );

        let names: Vec<_> = catalog.types().map(|ty| ty.name.as_str()).collect();
        assert_eq!(names, ["opA", "opA_User", "opB", "opB_Comments"]);
    }

    #[test]
    fn fragment_spread_with_nested_inline_fragments() {
        let catalog = run(
            SCHEMA,
            indoc! {r#"
                query GetUser {
                    user {
                        ...UserF
                    }
                }
                fragment UserF on User {
                    name
                    profile {
                        ... on PrivateProfile { age }
                        ... on PublicProfile { status }
                    }
                }
            "#},
            GeneratorConfig {
                export_query_type: true,
                ..Default::default()
            },
        );

        expect![[r#"
            GetUser
              user: Option<GetUser_User> [user]
            GetUser_User
              UserF: UserF [omit]
            PrivateProfile
              age: i64 [age]
            PublicProfile
              status: Option<String> [status]
            UserF (embedded)
              name: String [name]
              profile: Option<UserF_Profile> [profile]
            UserF_Profile
              PrivateProfile: Option<PrivateProfile> [omit]
              PublicProfile: Option<PublicProfile> [omit]
        "#]]
        .assert_eq(&summary(&catalog));
    }

    #[test]
    fn shared_fragment_type_across_spread_sites() {
        let catalog = run(
            SCHEMA,
            indoc! {r#"
                query A { user { ...UserF } }
                query B { user { ...UserF } }
                fragment UserF on User { name }
            "#},
            GeneratorConfig {
                export_query_type: true,
                ..Default::default()
            },
        );

        // One shared entry for the fragment, marked embedded.
        let fragment = catalog.get("UserF").unwrap();
        assert!(!fragment.emit_decoder);
        assert_eq!(
            catalog.types().filter(|ty| ty.name == "UserF").count(),
            1
        );

        for op in ["A_User", "B_User"] {
            let ty = catalog.get(op).unwrap();
            assert_eq!(ty.fields[0].type_expr.to_string(), "UserF");
        }
    }

    #[test]
    fn list_wrapped_fragment_embedding() {
        let catalog = run(
            SCHEMA,
            indoc! {r#"
                query List { comments { ...CF } }
                fragment CF on Comment { text }
            "#},
            GeneratorConfig {
                export_query_type: true,
                ..Default::default()
            },
        );

        let op = catalog.get("List").unwrap();
        assert_eq!(
            op.fields[0].type_expr.to_string(),
            "Option<Vec<List_Comments>>"
        );
        let comments = catalog.get("List_Comments").unwrap();
        assert_eq!(comments.fields[0].name, "CF");
        assert!(comments.fields[0].wire_tag.is_omit());
    }
}
