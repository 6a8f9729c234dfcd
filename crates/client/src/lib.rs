//! Minimal HTTP transport for generated GraphQL clients: build the request
//! body, POST it, parse the response envelope, and hand the `data` payload
//! to the generated decoders.

mod response;

pub use response::{ErrorLocation, GraphqlError, PathSegment, Response};

use http::HeaderMap;
use serde::{de::DeserializeOwned, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("failed to send request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("failed to decode response data: {0}")]
    Decode(#[from] graphql_typegen_response::DecodeError),
    #[error("graphql errors: {}", response::format_errors(.0))]
    Graphql(Vec<GraphqlError>),
    #[error("response contains neither data nor errors")]
    EmptyResponse,
}

pub struct Client {
    endpoint: String,
    http: reqwest::Client,
    headers: HeaderMap,
}

impl Client {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Client {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_header(mut self, key: &'static str, value: impl AsRef<str>) -> Self {
        if let Ok(value) = value.as_ref().parse() {
            self.headers.insert(key, value);
        }
        self
    }

    /// Executes one operation and decodes the `data` payload into `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: impl Serialize,
    ) -> Result<T, ClientError> {
        let body = serde_json::json!({
            "operationName": operation_name,
            "query": query,
            "variables": variables,
        });

        let bytes = self
            .http
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .bytes()
            .await?;

        decode_response(&bytes)
    }
}

/// Parses a response envelope and decodes `data` into `T`.
///
/// Any reported GraphQL error takes precedence over the payload; a response
/// carrying neither is malformed.
pub fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    let envelope: Response = serde_json::from_slice(bytes)?;

    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            return Err(ClientError::Graphql(errors));
        }
    }

    let data = envelope.data.ok_or(ClientError::EmptyResponse)?;
    Ok(graphql_typegen_response::unmarshal_data(data.get().as_bytes())?)
}
