use std::collections::BTreeSet;

use crate::{
    catalog::Catalog,
    shape::{FieldRecord, FieldRole},
};

/// A synthesized type's fields, split by decoding strategy.
#[derive(Debug, Default)]
pub struct FieldBuckets<'a> {
    /// Decoded from their own wire key in the raw map.
    pub regular: Vec<&'a FieldRecord>,
    /// Embedded fragments, decoded by re-running the parent's bytes.
    pub fragment_spreads: Vec<&'a FieldRecord>,
    /// Optional type-condition fields, decoded behind a `__typename` match.
    pub inline_fragments: Vec<&'a FieldRecord>,
}

/// Splits `fields` into the three decoding buckets in one pass.
pub fn categorize(fields: &[FieldRecord]) -> FieldBuckets<'_> {
    let mut buckets = FieldBuckets::default();
    for field in fields {
        match field.role {
            FieldRole::InlineFragment => buckets.inline_fragments.push(field),
            FieldRole::FragmentSpread => buckets.fragment_spreads.push(field),
            FieldRole::Scalar | FieldRole::Object => buckets.regular.push(field),
        }
    }
    buckets
}

/// Collects the names of types embedded via fragment spread anywhere in the
/// catalog. These types do not get their own decoder: the same response
/// bytes are re-run against them by every embedding type, which also keeps
/// nested fragment and type-condition handling in one place.
pub(crate) fn embedded_types(catalog: &Catalog) -> BTreeSet<String> {
    let mut embedded = BTreeSet::new();
    for ty in catalog.types() {
        for field in &ty.fields {
            if field.role == FieldRole::FragmentSpread {
                if let Some(name) = field.type_expr.synthesized_name() {
                    embedded.insert(name.to_owned());
                }
            }
        }
    }
    embedded
}
