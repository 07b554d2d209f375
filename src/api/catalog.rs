//! Purpose: Site catalog endpoints: broadcasts, custom fields, tags.
//! Exports: Methods on `BentoClient` (`get_broadcasts`, `get_fields`, `create_field`, `get_tags`, `create_tag`).
//! Role: List and create the named resources a site defines.
//! Invariants: Lists return `attributes` per entry in server order; creates return one `attributes`.

use super::client::ApiResult;
use super::envelope::{collection_attributes, single_attributes};
use super::{BentoClient, Query};
use serde::Serialize;
use serde_json::Value;

const BROADCASTS_ENDPOINT: &str = "/fetch/broadcasts";
const FIELDS_ENDPOINT: &str = "/fetch/fields";
const TAGS_ENDPOINT: &str = "/fetch/tags";

#[derive(Serialize)]
struct CreateFieldRequest<'a> {
    field: FieldKey<'a>,
}

#[derive(Serialize)]
struct FieldKey<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct CreateTagRequest<'a> {
    tag: TagName<'a>,
}

#[derive(Serialize)]
struct TagName<'a> {
    name: &'a str,
}

impl BentoClient {
    pub fn get_broadcasts(&self) -> ApiResult<Vec<Value>> {
        self.list(BROADCASTS_ENDPOINT)
    }

    pub fn get_fields(&self) -> ApiResult<Vec<Value>> {
        self.list(FIELDS_ENDPOINT)
    }

    pub fn create_field(&self, key: &str) -> ApiResult<Value> {
        let body = CreateFieldRequest {
            field: FieldKey { key },
        };
        single_attributes(self.post_json(FIELDS_ENDPOINT, &body)?)
    }

    pub fn get_tags(&self) -> ApiResult<Vec<Value>> {
        self.list(TAGS_ENDPOINT)
    }

    pub fn create_tag(&self, name: &str) -> ApiResult<Value> {
        let body = CreateTagRequest {
            tag: TagName { name },
        };
        single_attributes(self.post_json(TAGS_ENDPOINT, &body)?)
    }

    fn list(&self, endpoint: &str) -> ApiResult<Vec<Value>> {
        collection_attributes(self.get(endpoint, Query::new())?)
    }
}
