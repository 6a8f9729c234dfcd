use serde_json::value::RawValue;

/// The GraphQL-over-HTTP response envelope.
#[derive(Debug, serde::Deserialize)]
pub struct Response {
    /// Left deferred so generated decoders receive the original bytes.
    pub data: Option<Box<RawValue>>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<ErrorLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(u64),
}

pub(crate) fn format_errors(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
