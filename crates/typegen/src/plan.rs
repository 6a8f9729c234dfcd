//! Builds the decode plan for one synthesized type.
//!
//! The plan decodes in three phases: regular fields from the raw key map,
//! fragment spreads by re-running the original bytes against the embedded
//! type, and inline fragments behind a `__typename` match. Spreads may
//! overwrite regular fields that also appear inside the fragment, but both
//! decode the same bytes so the values agree; inline fragments come last
//! because their fields are conditional on the reported type name.

use crate::{
    analyze,
    catalog::SynthesizedType,
    shape::FieldRecord,
    statement::{MatchArm, Statement},
};

/// Builds the statement tree for `ty`'s decode function.
///
/// The generated function receives the raw response value as `data`,
/// assembles `target` and ends with it as the result.
pub fn unmarshal_plan(ty: &SynthesizedType) -> Vec<Statement> {
    let mut statements = vec![
        Statement::VarDecl {
            name: "raw".to_owned(),
            ty: String::new(),
            init: "response_json::object(data)?".to_owned(),
            mutable: false,
        },
        Statement::VarDecl {
            name: "target".to_owned(),
            ty: String::new(),
            init: "Self::default()".to_owned(),
            mutable: true,
        },
    ];

    let buckets = analyze::categorize(&ty.fields);

    for field in &buckets.regular {
        statements.push(decode_regular_field("target", field));
    }

    decode_fragment_spreads(&mut statements, "target", &buckets.fragment_spreads);
    decode_inline_fragments(&mut statements, "target", "raw", &buckets.inline_fragments);

    statements.push(Statement::Return {
        value: "Ok(target)".to_owned(),
    });

    statements
}

/// `if let Some(value) = raw.get("key") { decode into the field }`
///
/// Absent keys leave the field at its zero value; servers are allowed to
/// omit fields.
fn decode_regular_field(path: &str, field: &FieldRecord) -> Statement {
    let key = field.wire_tag.json_key().unwrap_or_default();
    Statement::If {
        condition: format!(r#"let Some(value) = raw.get("{key}")"#),
        body: vec![Statement::ErrorCheck {
            expr: format!("response_json::decode_into(value, &mut {path}.{})", field.ident()),
        }],
    }
}

/// Decodes embedded fragments from the original bytes, then recurses into
/// the fragment's own spread and inline-fragment members: embedded types
/// have no decoder of their own, so the enclosing plan drives them.
fn decode_fragment_spreads(statements: &mut Vec<Statement>, path: &str, spreads: &[&FieldRecord]) {
    for spread in spreads {
        let field_path = format!("{path}.{}", spread.ident());

        statements.push(Statement::ErrorCheck {
            expr: format!("response_json::decode_into(data, &mut {field_path})"),
        });

        if spread.sub_fields.is_empty() {
            continue;
        }

        let sub = analyze::categorize(&spread.sub_fields);
        decode_fragment_spreads(statements, &field_path, &sub.fragment_spreads);
        // The fragment is embedded in the same JSON object, so its inline
        // fragments read `__typename` from the enclosing raw map.
        decode_inline_fragments(statements, &field_path, "raw", &sub.inline_fragments);
    }
}

/// Reads `__typename` once, then matches it against every type condition;
/// a condition that never matches leaves its field absent.
fn decode_inline_fragments(
    statements: &mut Vec<Statement>,
    path: &str,
    raw_expr: &str,
    inline_fragments: &[&FieldRecord],
) {
    if inline_fragments.is_empty() {
        return;
    }

    let type_name_var = format!("type_name_{}", path.replace('.', "_").replace("r#", ""));

    statements.push(Statement::VarDecl {
        name: type_name_var.clone(),
        ty: "String".to_owned(),
        init: "String::new()".to_owned(),
        mutable: true,
    });
    statements.push(Statement::If {
        condition: format!(r#"let Some(value) = {raw_expr}.get("__typename")"#),
        body: vec![Statement::ErrorCheck {
            expr: format!("response_json::decode_into(value, &mut {type_name_var})"),
        }],
    });

    let mut arms: Vec<MatchArm> = inline_fragments
        .iter()
        .map(|fragment| MatchArm {
            pattern: format!(r#""{}""#, fragment.name),
            body: vec![Statement::Assign {
                target: format!("{path}.{}", fragment.ident()),
                value: "Some(response_json::field(data)?)".to_owned(),
            }],
        })
        .collect();
    arms.push(MatchArm {
        pattern: "_".to_owned(),
        body: vec![],
    });

    statements.push(Statement::Match {
        expr: format!("{type_name_var}.as_str()"),
        arms,
    });
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use indoc::indoc;

    use crate::{
        config::GeneratorConfig,
        operations::Documents,
        schema::Schema,
        statement,
        synthesize,
    };

    fn plan_for(schema: &str, queries: &str, type_name: &str) -> String {
        let schema: Schema = async_graphql_parser::parse_schema(schema).unwrap().into();
        let documents =
            Documents::collect([async_graphql_parser::parse_query(queries).unwrap()]).unwrap();
        let config = GeneratorConfig {
            export_query_type: true,
            ..Default::default()
        };
        let catalog = synthesize::synthesize(&schema, &documents, &config).unwrap();
        statement::render(&super::unmarshal_plan(catalog.get(type_name).unwrap()), 0)
    }

    const SCHEMA: &str = indoc! {r#"
        type Query { user: User }
        type User { name: String! profile: Profile }
        type Profile { id: ID! }
        type PrivateProfile { age: Int! }
        type PublicProfile { status: String }
    "#};

    #[test]
    fn regular_fields_then_spread_then_inline() {
        let rendered = plan_for(
            SCHEMA,
            indoc! {r#"
                query GetUser {
                    user {
                        name
                        ...UserF
                        ... on PrivateProfile { age }
                    }
                }
                fragment UserF on User { name }
            "#},
            "GetUser_User",
        );

        expect![[r#"
            let raw = response_json::object(data)?;
            let mut target = Self::default();
            if let Some(value) = raw.get("name") {
                response_json::decode_into(value, &mut target.name)?;
            }
            response_json::decode_into(data, &mut target.user_f)?;
            let mut type_name_target = String::new();
            if let Some(value) = raw.get("__typename") {
                response_json::decode_into(value, &mut type_name_target)?;
            }
            match type_name_target.as_str() {
                "PrivateProfile" => {
                    target.private_profile = Some(response_json::field(data)?);
                }
                _ => {}
            }
            Ok(target)
        "#]]
        .assert_eq(&rendered);
    }

    #[test]
    fn spread_with_nested_members_recurses_under_the_field_path() {
        let rendered = plan_for(
            SCHEMA,
            indoc! {r#"
                query GetUser {
                    user { ...UserF }
                }
                fragment UserF on User {
                    name
                    ...NameF
                    ... on PrivateProfile { age }
                }
                fragment NameF on User { name }
            "#},
            "GetUser_User",
        );

        expect![[r#"
            let raw = response_json::object(data)?;
            let mut target = Self::default();
            response_json::decode_into(data, &mut target.user_f)?;
            response_json::decode_into(data, &mut target.user_f.name_f)?;
            let mut type_name_target_user_f = String::new();
            if let Some(value) = raw.get("__typename") {
                response_json::decode_into(value, &mut type_name_target_user_f)?;
            }
            match type_name_target_user_f.as_str() {
                "PrivateProfile" => {
                    target.user_f.private_profile = Some(response_json::field(data)?);
                }
                _ => {}
            }
            Ok(target)
        "#]]
        .assert_eq(&rendered);
    }
}
