//! Purpose: Site and segment statistics endpoints.
//! Exports: Methods on `BentoClient` (`get_site_stats`, `get_segment_stats`).
//! Role: Read aggregate counters for a site or one of its segments.
//! Invariants: Responses are returned as the raw envelope, never unwrapped.

use super::client::ApiResult;
use super::{BentoClient, Query};
use serde_json::Value;

impl BentoClient {
    /// Site-wide counters (subscribers, unsubscribers, ...) as the raw envelope.
    pub fn get_site_stats(&self) -> ApiResult<Value> {
        self.get("/stats/site", Query::new())
    }

    pub fn get_segment_stats(&self, segment_id: &str) -> ApiResult<Value> {
        self.get("/stats/segment", Query::new().with("segment_id", segment_id))
    }
}
