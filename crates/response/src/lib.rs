//! Runtime support for decoding GraphQL responses into generated types.
//!
//! Generated decoders work in two passes: the response object is first
//! split into a raw map of deferred values keyed by wire tag, then each
//! field dispatches on its key. The raw bytes stay available throughout
//! because fragment spreads and inline fragments re-examine the *whole*
//! object rather than a single key.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("decode graphql data: decode json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("decode graphql data: expected a JSON object, found '{found}'")]
    ExpectedObject { found: char },
}

/// Decodes a GraphQL `data` payload into `T`.
///
/// This is the entry point callers hand raw response bytes to; generated
/// `Deserialize` impls take over from here.
pub fn unmarshal_data<T: DeserializeOwned>(data: &[u8]) -> Result<T, DecodeError> {
    Ok(serde_json::from_slice(data)?)
}

/// Splits a response object into deferred values keyed by wire tag.
///
/// `null` and empty input decode as an empty map: a missing object leaves
/// every field at its zero value, which is how absent data is represented
/// throughout.
pub fn object(data: &RawValue) -> Result<BTreeMap<String, &RawValue>, DecodeError> {
    let text = data.get().trim();
    if text.is_empty() || text == "null" {
        return Ok(BTreeMap::new());
    }
    if !text.starts_with('{') {
        return Err(DecodeError::ExpectedObject {
            found: text.chars().next().unwrap_or(' '),
        });
    }
    Ok(serde_json::from_str(text)?)
}

/// Decodes one deferred value.
pub fn field<T: DeserializeOwned>(value: &RawValue) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(value.get())?)
}

/// Decodes one deferred value into an existing slot, replacing it whole.
pub fn decode_into<T: DeserializeOwned>(value: &RawValue, target: &mut T) -> Result<(), DecodeError> {
    *target = field(value)?;
    Ok(())
}

/// Serialization predicate for `,omitempty` / `,omitzero` wire tags.
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}
