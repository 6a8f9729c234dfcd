//! Renders the catalog into one Rust source file: struct definitions with
//! serde attributes derived from the wire tags, then a decode impl for
//! every type that owns its own decoding.

use std::fmt::Write;

use crate::{catalog::Catalog, config::GeneratorConfig, plan, shape::FieldRecord, statement};

pub fn render_file(catalog: &Catalog, config: &GeneratorConfig) -> String {
    let mut out = String::new();

    out.push_str("// Code generated by graphql-typegen. DO NOT EDIT.\n");
    if !config.query_type_module.is_empty() {
        writeln!(out, "// Module: {}", config.query_type_module).unwrap();
    }
    out.push('\n');
    out.push_str("#![allow(non_camel_case_types, dead_code, unused_variables, clippy::all)]\n\n");
    out.push_str("use graphql_typegen_response as response_json;\n");

    for ty in catalog.types() {
        out.push('\n');
        render_struct(&mut out, ty);

        if ty.emit_decoder {
            out.push('\n');
            render_decode_impl(&mut out, ty);
        }
    }

    out
}

fn render_struct(out: &mut String, ty: &crate::catalog::SynthesizedType) {
    if ty.emit_decoder {
        out.push_str("#[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]\n");
    } else {
        // Embedded fragment types decode their keyed fields through serde;
        // the enclosing type's decoder fills in the rest.
        out.push_str(
            "#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]\n",
        );
        out.push_str("#[serde(default)]\n");
    }

    writeln!(out, "pub struct {} {{", ty.name).unwrap();
    for field in &ty.fields {
        render_field(out, field);
    }
    out.push_str("}\n");
}

fn render_field(out: &mut String, field: &FieldRecord) {
    match field.wire_tag.tag() {
        None => out.push_str("    #[serde(skip)]\n"),
        Some(tag) => {
            let key = field.wire_tag.json_key().unwrap_or_default();
            if tag.contains(",omitempty") || tag.contains(",omitzero") {
                writeln!(
                    out,
                    "    #[serde(rename = \"{key}\", skip_serializing_if = \"response_json::is_default\")]"
                )
                .unwrap();
            } else {
                writeln!(out, "    #[serde(rename = \"{key}\")]").unwrap();
            }
        }
    }
    writeln!(out, "    pub {}: {},", field.ident(), field.type_expr).unwrap();
}

fn render_decode_impl(out: &mut String, ty: &crate::catalog::SynthesizedType) {
    let statements = plan::unmarshal_plan(ty);

    writeln!(out, "impl {} {{", ty.name).unwrap();
    out.push_str(
        "    pub fn decode(data: &serde_json::value::RawValue) -> Result<Self, response_json::DecodeError> {\n",
    );
    out.push_str(&statement::render(&statements, 2));
    out.push_str("    }\n");
    out.push_str("}\n\n");

    writeln!(out, "impl<'de> serde::Deserialize<'de> for {} {{", ty.name).unwrap();
    out.push_str("    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>\n");
    out.push_str("    where\n");
    out.push_str("        D: serde::Deserializer<'de>,\n");
    out.push_str("    {\n");
    out.push_str(
        "        let data: Box<serde_json::value::RawValue> = serde::Deserialize::deserialize(deserializer)?;\n",
    );
    out.push_str("        Self::decode(&data).map_err(serde::de::Error::custom)\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}
