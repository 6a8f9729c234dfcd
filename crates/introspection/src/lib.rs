//! Remote schema acquisition: run the standard introspection query against
//! an endpoint and render the result as SDL, so the rest of the pipeline
//! only ever deals with schema text.

mod query;
mod sdl;
mod types;

pub use types::{
    EnumValue, FieldValue, FullType, InputValue, IntrospectionSchema, NamedRef, TypeKind, TypeRef,
};

#[derive(thiserror::Error, Debug)]
pub enum IntrospectionError {
    #[error("introspection request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not decode introspection response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("introspection query returned errors: {0}")]
    Graphql(String),
    #[error("introspection response carries no schema")]
    MissingSchema,
}

/// Fetches `url`'s schema over introspection and returns it rendered as SDL.
pub async fn introspect(
    url: &str,
    headers: &[(impl AsRef<str>, impl AsRef<str>)],
) -> Result<String, IntrospectionError> {
    let mut request = reqwest::Client::new().post(url).json(&serde_json::json!({
        "operationName": "IntrospectionQuery",
        "query": query::INTROSPECTION_QUERY,
    }));

    for (name, value) in headers {
        request = request.header(name.as_ref(), value.as_ref());
    }

    let bytes = request.send().await?.bytes().await?;
    let payload: types::Envelope = serde_json::from_slice(&bytes)?;

    if let Some(errors) = payload.errors {
        if !errors.is_empty() {
            let messages = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(IntrospectionError::Graphql(messages));
        }
    }

    let schema = payload
        .data
        .and_then(|data| data.schema)
        .ok_or(IntrospectionError::MissingSchema)?;

    Ok(sdl::render(&schema))
}
