//! Purpose: Batch import endpoints (subscribers, emails, events, broadcasts).
//! Exports: Methods on `BentoClient` (`batch_create_*`).
//! Role: Send many resource objects in one request; return the raw envelope.
//! Invariants: Payload key is the plural resource name; element order is preserved.

use super::BentoClient;
use super::client::ApiResult;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct SubscribersBatch<'a, T> {
    subscribers: &'a [T],
}

#[derive(Serialize)]
struct EmailsBatch<'a, T> {
    emails: &'a [T],
}

#[derive(Serialize)]
struct EventsBatch<'a, T> {
    events: &'a [T],
}

#[derive(Serialize)]
struct BroadcastsBatch<'a, T> {
    broadcasts: &'a [T],
}

impl BentoClient {
    pub fn batch_create_subscribers<T: Serialize>(&self, subscribers: &[T]) -> ApiResult<Value> {
        self.post_json("/batch/subscribers", &SubscribersBatch { subscribers })
    }

    pub fn batch_create_emails<T: Serialize>(&self, emails: &[T]) -> ApiResult<Value> {
        self.post_json("/batch/emails", &EmailsBatch { emails })
    }

    pub fn batch_create_events<T: Serialize>(&self, events: &[T]) -> ApiResult<Value> {
        self.post_json("/batch/events", &EventsBatch { events })
    }

    pub fn batch_create_broadcasts<T: Serialize>(&self, broadcasts: &[T]) -> ApiResult<Value> {
        self.post_json("/batch/broadcasts", &BroadcastsBatch { broadcasts })
    }
}
