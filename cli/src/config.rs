use std::{collections::BTreeMap, path::PathBuf};

use graphql_typegen::GeneratorConfig;

pub const DEFAULT_CONFIG_FILE: &str = "graphql-typegen.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("'schema' and 'endpoint' both specified; use schema to load from local files, endpoint to load over introspection")]
    SchemaAndEndpoint,
    #[error("neither 'schema' nor 'endpoint' specified; use schema to load from local files, endpoint to load over introspection")]
    NoSchemaSource,
    #[error("'queries' must name at least one operation document")]
    NoQueries,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Local SDL files.
    #[serde(default)]
    pub schema: Vec<PathBuf>,
    /// Remote schema source, mutually exclusive with `schema`.
    pub endpoint: Option<Endpoint>,
    /// Operation documents: files, or directories scanned for `*.graphql`.
    pub queries: Vec<PathBuf>,
    /// The generated source file.
    pub output: PathBuf,
    #[serde(default)]
    pub options: Options,
    /// GraphQL leaf type name -> Rust type path.
    #[serde(default)]
    pub scalars: BTreeMap<String, String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoint {
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub export_query_type: bool,
    pub emit_json_omitempty: bool,
    pub emit_json_omitzero: bool,
    pub query_type_module: String,
}

impl Config {
    pub fn load(path: &std::path::Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&expand_env(&content))?;

        if !config.schema.is_empty() && config.endpoint.is_some() {
            return Err(ConfigError::SchemaAndEndpoint);
        }
        if config.schema.is_empty() && config.endpoint.is_none() {
            return Err(ConfigError::NoSchemaSource);
        }
        if config.queries.is_empty() {
            return Err(ConfigError::NoQueries);
        }

        Ok(config)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            export_query_type: self.options.export_query_type,
            emit_json_omitempty: self.options.emit_json_omitempty,
            emit_json_omitzero: self.options.emit_json_omitzero,
            query_type_module: self.options.query_type_module.clone(),
            scalar_overrides: self.scalars.clone(),
        }
    }
}

/// Replaces `${VAR}` references with the environment's values; unset
/// variables expand to the empty string.
fn expand_env(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let name = &rest[start + 2..start + 2 + end];
                if let Ok(value) = std::env::var(name) {
                    out.push_str(&value);
                }
                rest = &rest[start + 2 + end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
