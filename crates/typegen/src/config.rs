use std::collections::BTreeMap;

/// Generation options, typically read from the tool configuration file.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Capitalize the first rune of parent-scope seeds so synthesized
    /// response types are public-looking; when unset they are lowercased.
    pub export_query_type: bool,
    /// Append `,omitempty` to the wire tag of non-null fields.
    pub emit_json_omitempty: bool,
    /// Append `,omitzero` to the wire tag of non-null fields.
    pub emit_json_omitzero: bool,
    /// Module path the generated types live under, recorded on every
    /// synthesized type for the emitter.
    pub query_type_module: String,
    /// Leaf bindings from GraphQL scalar/enum names to Rust type paths,
    /// extending the builtin scalar table.
    pub scalar_overrides: BTreeMap<String, String>,
}
