//! Purpose: Unwrap the `{"data": ...}` response envelope used by the Bento API.
//! Exports: `single_attributes`, `collection_attributes`.
//! Role: Shared by fetch/create operations that return resource fields only.
//! Invariants: Entry metadata (`id`, `type`) is dropped; `attributes` is returned untouched.
//! Invariants: Collections keep the server's order and length.

use crate::core::error::Error;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ResourceEnvelope {
    data: Resource,
}

#[derive(Deserialize)]
struct CollectionEnvelope {
    data: Vec<Resource>,
}

#[derive(Deserialize)]
struct Resource {
    attributes: Value,
}

/// Returns `data.attributes` from a single-resource envelope.
pub fn single_attributes(envelope: Value) -> Result<Value, Error> {
    let envelope: ResourceEnvelope = serde_json::from_value(envelope).map_err(|err| {
        Error::request("unexpected response envelope: expected data.attributes").with_source(err)
    })?;
    Ok(envelope.data.attributes)
}

/// Returns the `attributes` of every entry in `data`, in order.
pub fn collection_attributes(envelope: Value) -> Result<Vec<Value>, Error> {
    let envelope: CollectionEnvelope = serde_json::from_value(envelope).map_err(|err| {
        Error::request("unexpected response envelope: expected data[].attributes")
            .with_source(err)
    })?;
    Ok(envelope
        .data
        .into_iter()
        .map(|resource| resource.attributes)
        .collect())
}
