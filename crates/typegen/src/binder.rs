use std::collections::BTreeMap;

use crate::{
    config::GeneratorConfig,
    error::{CodegenError, CodegenResult},
    expr::TypeExpr,
};

/// Resolves GraphQL leaf types (scalars, enums) to Rust type paths.
///
/// Synthesized object types are generated, never bound; the shape builder
/// consults the binder only when a selection has no child selection set.
#[derive(Debug)]
pub struct LeafBinder {
    bindings: BTreeMap<String, String>,
}

impl LeafBinder {
    pub fn new(config: &GeneratorConfig) -> Self {
        let mut bindings: BTreeMap<String, String> = [
            ("String", "String"),
            ("ID", "String"),
            ("Int", "i64"),
            ("Float", "f64"),
            ("Boolean", "bool"),
        ]
        .into_iter()
        .map(|(graphql, rust)| (graphql.to_owned(), rust.to_owned()))
        .collect();

        for (graphql, rust) in &config.scalar_overrides {
            bindings.insert(graphql.clone(), rust.clone());
        }

        LeafBinder { bindings }
    }

    pub fn resolve(&self, graphql_name: &str) -> CodegenResult<TypeExpr> {
        self.bindings
            .get(graphql_name)
            .map(TypeExpr::path)
            .ok_or_else(|| CodegenError::UnboundLeaf(graphql_name.to_owned()))
    }
}
