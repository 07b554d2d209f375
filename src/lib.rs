//! Purpose: Library crate for the Bento marketing-automation HTTP API.
//! Exports: `api` (client, query parameters, envelopes) and `core` (errors).
//! Role: Backs the `bento` CLI; usable directly as a blocking SDK.
//! Invariants: Every outbound request carries the configured `site_uuid`.
//! Invariants: All client failures surface as `ErrorKind::Request`.
pub mod api;
pub mod core;
