use std::collections::BTreeMap;

use async_graphql_parser::types::{Selection, SelectionSet};

use crate::{
    binder::LeafBinder,
    catalog::Catalog,
    config::GeneratorConfig,
    error::{CodegenError, CodegenResult},
    expr::TypeExpr,
    mangle,
    operations::Documents,
    schema::Schema,
    type_ref::TypeRef,
    wrapping,
};

/// How a field record participates in decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Scalar,
    Object,
    FragmentSpread,
    InlineFragment,
}

/// The JSON key a field decodes from. Fragment-spread and inline-fragment
/// fields are not directly keyed in the response and carry the omit
/// sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireTag {
    Key(String),
    Omit,
}

impl WireTag {
    /// The full tag, flavors included, as recorded for emission.
    pub fn tag(&self) -> Option<&str> {
        match self {
            WireTag::Key(tag) => Some(tag),
            WireTag::Omit => None,
        }
    }

    /// The JSON key the decoder looks up: the tag with serialization
    /// flavors (`,omitempty` / `,omitzero`) stripped.
    pub fn json_key(&self) -> Option<&str> {
        self.tag().map(|tag| tag.split(',').next().unwrap_or(tag))
    }

    pub fn is_omit(&self) -> bool {
        matches!(self, WireTag::Omit)
    }
}

/// One field of a synthesized type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    /// The wire key: the alias for field selections, the fragment name for
    /// spreads, the type-condition name for inline fragments.
    pub name: String,
    pub role: FieldRole,
    pub type_expr: TypeExpr,
    pub wire_tag: WireTag,
    /// For fragment-spread records, the spread type's own records; the
    /// enclosing type's decoder recurses through these since embedded types
    /// do not decode themselves.
    pub sub_fields: Vec<FieldRecord>,
}

impl FieldRecord {
    /// The Rust struct field identifier for this record.
    pub fn ident(&self) -> String {
        mangle::field_ident(&self.name)
    }
}

/// Builds field-record trees from selection sets, registering every
/// synthesized named type into the catalog along the way.
pub(crate) struct ShapeBuilder<'a> {
    schema: &'a Schema,
    documents: &'a Documents,
    binder: &'a LeafBinder,
    config: &'a GeneratorConfig,
    pub(crate) catalog: Catalog,
}

impl<'a> ShapeBuilder<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        documents: &'a Documents,
        binder: &'a LeafBinder,
        config: &'a GeneratorConfig,
    ) -> Self {
        ShapeBuilder {
            schema,
            documents,
            binder,
            config,
            catalog: Catalog::default(),
        }
    }

    /// Builds the records for one selection set. `parent_scope` seeds the
    /// names of nested synthesized types; it is empty inside an inline
    /// fragment, where selections re-enter the enclosing JSON object.
    /// `parent_type` is the GraphQL type the selections apply to.
    pub(crate) fn build_fields(
        &mut self,
        parent_scope: &str,
        parent_type: &str,
        selection_set: &SelectionSet,
    ) -> CodegenResult<Vec<FieldRecord>> {
        let mut records = Vec::with_capacity(selection_set.items.len());
        for selection in &selection_set.items {
            records.push(self.build_field(parent_scope, parent_type, &selection.node)?);
        }

        Ok(collapse(records))
    }

    fn build_field(
        &mut self,
        parent_scope: &str,
        parent_type: &str,
        selection: &Selection,
    ) -> CodegenResult<FieldRecord> {
        match selection {
            Selection::Field(field) => {
                let field = &field.node;
                let name = field.name.node.as_str();
                let alias = field
                    .alias
                    .as_ref()
                    .map(|alias| alias.node.as_str())
                    .unwrap_or(name);

                let declared = self.schema.field_type(parent_type, name).ok_or_else(|| {
                    if self.schema.type_def(parent_type).is_none() {
                        CodegenError::UnknownType {
                            type_name: parent_type.to_owned(),
                            field: name.to_owned(),
                        }
                    } else {
                        CodegenError::UnknownField {
                            type_name: parent_type.to_owned(),
                            field: name.to_owned(),
                        }
                    }
                })?;

                if field.selection_set.node.items.is_empty() {
                    let base = self.binder.resolve(declared.base_name())?;
                    return Ok(FieldRecord {
                        name: alias.to_owned(),
                        role: FieldRole::Scalar,
                        type_expr: wrapping::wrap(base, &declared),
                        wire_tag: self.scalar_wire_tag(alias, &declared),
                        sub_fields: Vec::new(),
                    });
                }

                let type_name =
                    mangle::field_type_name(parent_scope, alias, self.config.export_query_type);
                let children =
                    self.build_fields(&type_name, declared.base_name(), &field.selection_set.node)?;
                self.catalog
                    .register(&type_name, children, &self.config.query_type_module);

                Ok(FieldRecord {
                    name: alias.to_owned(),
                    role: FieldRole::Object,
                    type_expr: wrapping::wrap(TypeExpr::named(&type_name), &declared),
                    wire_tag: WireTag::Key(alias.to_owned()),
                    sub_fields: Vec::new(),
                })
            }
            Selection::FragmentSpread(spread) => {
                let documents = self.documents;
                let name = spread.node.fragment_name.node.as_str();
                let fragment = documents.fragment(name)?;
                let condition = fragment.type_condition.node.on.node.as_str();

                let children =
                    self.build_fields(name, condition, &fragment.selection_set.node)?;
                self.catalog
                    .register(name, children.clone(), &self.config.query_type_module);

                Ok(FieldRecord {
                    name: name.to_owned(),
                    role: FieldRole::FragmentSpread,
                    type_expr: TypeExpr::named(name),
                    wire_tag: WireTag::Omit,
                    sub_fields: children,
                })
            }
            Selection::InlineFragment(inline) => {
                let inline = &inline.node;
                let condition = inline
                    .type_condition
                    .as_ref()
                    .map(|condition| condition.node.on.node.to_string())
                    .unwrap_or_else(|| parent_type.to_owned());

                let children = self.build_fields("", &condition, &inline.selection_set.node)?;
                self.catalog
                    .register(&condition, children, &self.config.query_type_module);

                Ok(FieldRecord {
                    name: condition.clone(),
                    role: FieldRole::InlineFragment,
                    type_expr: TypeExpr::option(TypeExpr::named(&condition)),
                    wire_tag: WireTag::Omit,
                    sub_fields: Vec::new(),
                })
            }
        }
    }

    fn scalar_wire_tag(&self, alias: &str, declared: &TypeRef) -> WireTag {
        let mut tag = alias.to_owned();
        if declared.non_null() {
            if self.config.emit_json_omitempty {
                tag.push_str(",omitempty");
            }
            if self.config.emit_json_omitzero {
                tag.push_str(",omitzero");
            }
        }
        WireTag::Key(tag)
    }
}

/// Collapses duplicate wire names (the later record wins, covering the
/// common case of a fragment repeating a field the enclosing selection also
/// lists) and fixes the order lexicographically.
fn collapse(records: Vec<FieldRecord>) -> Vec<FieldRecord> {
    let mut by_name = BTreeMap::new();
    for record in records {
        by_name.insert(record.name.clone(), record);
    }
    by_name.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(schema: &str, query: &str) -> (Catalog, Vec<FieldRecord>) {
        let schema: Schema = async_graphql_parser::parse_schema(schema).unwrap().into();
        let documents =
            Documents::collect([async_graphql_parser::parse_query(query).unwrap()]).unwrap();
        let config = GeneratorConfig {
            export_query_type: true,
            ..Default::default()
        };
        let binder = LeafBinder::new(&config);

        let mut builder = ShapeBuilder::new(&schema, &documents, &binder, &config);
        let operation = &documents.operations[0];
        let fields = builder
            .build_fields(&operation.name, &schema.query_type_name, &operation.selection_set)
            .unwrap();
        (builder.catalog, fields)
    }

    const SCHEMA: &str = r#"
        type Query { user: User viewer: User! }
        type User { name: String! pic(size: Int): String nick: String }
    "#;

    #[test]
    fn duplicate_aliases_collapse_to_one_record() {
        let (catalog, fields) = build(SCHEMA, "query Q { user { a: name a: name } }");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].role, FieldRole::Object);
        assert_eq!(fields[0].type_expr.to_string(), "Option<Q_User>");

        let user = catalog.get("Q_User").unwrap();
        assert_eq!(user.fields.len(), 1);
        assert_eq!(user.fields[0].name, "a");
        assert_eq!(user.fields[0].type_expr.to_string(), "String");
    }

    #[test]
    fn aliased_fields_stay_distinct() {
        let (catalog, _) = build(
            SCHEMA,
            "query Q { user { small: pic(size: 50) large: pic(size: 500) } }",
        );
        let user = catalog.get("Q_User").unwrap();
        let names: Vec<_> = user.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, ["large", "small"]);
        assert!(user
            .fields
            .iter()
            .all(|field| field.type_expr.to_string() == "Option<String>"));
    }

    #[test]
    fn fragment_spread_records_embed_children() {
        let (catalog, _) = build(
            SCHEMA,
            r#"
            query Q { user { ...UserF } }
            fragment UserF on User { name nick }
            "#,
        );

        let user = catalog.get("Q_User").unwrap();
        let spread = &user.fields[0];
        assert_eq!(spread.role, FieldRole::FragmentSpread);
        assert_eq!(spread.name, "UserF");
        assert!(spread.wire_tag.is_omit());
        assert_eq!(spread.sub_fields.len(), 2);
        assert!(catalog.get("UserF").is_some());
    }

    #[test]
    fn omit_flavors_attach_to_non_null_scalars_only() {
        let schema: Schema = async_graphql_parser::parse_schema(SCHEMA).unwrap().into();
        let documents = Documents::collect([async_graphql_parser::parse_query(
            "query Q { viewer { name nick } }",
        )
        .unwrap()])
        .unwrap();
        let config = GeneratorConfig {
            export_query_type: true,
            emit_json_omitempty: true,
            ..Default::default()
        };
        let binder = LeafBinder::new(&config);
        let mut builder = ShapeBuilder::new(&schema, &documents, &binder, &config);
        let operation = &documents.operations[0];
        builder
            .build_fields(&operation.name, &schema.query_type_name, &operation.selection_set)
            .unwrap();

        let viewer = builder.catalog.get("Q_Viewer").unwrap();
        let name = viewer.fields.iter().find(|field| field.name == "name").unwrap();
        let nick = viewer.fields.iter().find(|field| field.name == "nick").unwrap();
        assert_eq!(name.wire_tag.tag(), Some("name,omitempty"));
        assert_eq!(name.wire_tag.json_key(), Some("name"));
        assert_eq!(nick.wire_tag.tag(), Some("nick"));
    }

    #[test]
    fn unknown_fragment_is_fatal() {
        let schema: Schema = async_graphql_parser::parse_schema(SCHEMA).unwrap().into();
        let documents = Documents::collect([async_graphql_parser::parse_query(
            "query Q { user { ...Missing } } fragment Unused on User { name }",
        )
        .unwrap()])
        .unwrap();
        let config = GeneratorConfig::default();
        let binder = LeafBinder::new(&config);
        let mut builder = ShapeBuilder::new(&schema, &documents, &binder, &config);
        let operation = documents.operations[0].clone();

        let result =
            builder.build_fields(&operation.name, &schema.query_type_name, &operation.selection_set);
        assert!(matches!(result, Err(CodegenError::UnknownFragment(name)) if name == "Missing"));
    }
}
