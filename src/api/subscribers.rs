//! Purpose: Single-subscriber lookup and creation.
//! Exports: Methods on `BentoClient` (`get_subscriber`, `create_subscriber`).
//! Role: Thin projections over `/fetch/subscribers`.
//! Invariants: Lookups send email/uuid as query params; creates send `{"subscriber": {...}}`.

use super::client::ApiResult;
use super::envelope::single_attributes;
use super::{BentoClient, Query};
use serde::Serialize;
use serde_json::Value;

const SUBSCRIBERS_ENDPOINT: &str = "/fetch/subscribers";

#[derive(Serialize)]
struct CreateSubscriberRequest<'a> {
    subscriber: SubscriberEmail<'a>,
}

#[derive(Serialize)]
struct SubscriberEmail<'a> {
    email: &'a str,
}

impl BentoClient {
    /// Fetches one subscriber by email and/or uuid and returns its attributes.
    ///
    /// The API expects at least one of the two; that is left to the server to enforce.
    pub fn get_subscriber(&self, email: Option<&str>, uuid: Option<&str>) -> ApiResult<Value> {
        let query = Query::new()
            .with_opt("email", email)
            .with_opt("uuid", uuid);
        let envelope = self.get(SUBSCRIBERS_ENDPOINT, query)?;
        single_attributes(envelope)
    }

    pub fn create_subscriber(&self, email: &str) -> ApiResult<Value> {
        let body = CreateSubscriberRequest {
            subscriber: SubscriberEmail { email },
        };
        let envelope = self.post_json(SUBSCRIBERS_ENDPOINT, &body)?;
        single_attributes(envelope)
    }
}
