//! Response-type synthesis for GraphQL client code generation.
//!
//! Given a parsed schema and a set of operation documents, this crate
//! derives a closed, deterministic catalog of nominal Rust types for every
//! selection scope and a decode plan for each of them:
//!
//! - Field selections with a child selection set synthesize a named type
//!   per scope (`Parent_Alias`); leaf selections bind through the scalar
//!   table.
//! - Fragment spreads synthesize one shared type under the fragment's name,
//!   embedded without a wire key and decoded by re-running the enclosing
//!   object's bytes.
//! - Inline fragments synthesize a type under their type condition,
//!   embedded as an optional field populated only when the response's
//!   `__typename` matches.
//! - List and non-null wrapping of the declared GraphQL types maps onto
//!   `Vec` and `Option`.
//!
//! The catalog enumerates in lexicographic name order and the shape of each
//! type agrees exactly with what its decode plan reads off the wire.

mod analyze;
mod binder;
mod catalog;
mod config;
mod emit;
mod error;
mod expr;
mod mangle;
mod operations;
mod plan;
mod schema;
mod shape;
mod statement;
mod synthesize;
mod type_ref;
mod wrapping;

pub use analyze::{categorize, FieldBuckets};
pub use binder::LeafBinder;
pub use catalog::{Catalog, SynthesizedType};
pub use config::GeneratorConfig;
pub use error::{CodegenError, CodegenResult};
pub use expr::TypeExpr;
pub use operations::{Documents, Operation};
pub use plan::unmarshal_plan;
pub use schema::{Schema, TypeDef, TypeDefKind};
pub use shape::{FieldRecord, FieldRole, WireTag};
pub use statement::{render as render_statements, MatchArm, Statement};
pub use synthesize::synthesize;
pub use type_ref::TypeRef;

/// Synthesizes the type catalog for `documents` against `schema`.
pub fn generate(
    schema: &Schema,
    documents: &Documents,
    config: &GeneratorConfig,
) -> CodegenResult<Catalog> {
    synthesize(schema, documents, config)
}

/// Synthesizes the catalog and renders it as one Rust source file.
pub fn generate_file(
    schema: &Schema,
    documents: &Documents,
    config: &GeneratorConfig,
) -> CodegenResult<String> {
    let catalog = synthesize(schema, documents, config)?;
    Ok(emit::render_file(&catalog, config))
}
