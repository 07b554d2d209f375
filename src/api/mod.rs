//! Purpose: Define the public Rust API for talking to Bento.
//! Exports: `BentoClient`, `Query`, `EmailValidation`, envelope helpers, error types.
//! Role: Public, additive-only surface; operation groups live in private modules.
//! Invariants: Every operation funnels through `BentoClient::request`.
//! Invariants: Responses are generic `serde_json::Value` trees.

mod batch;
mod catalog;
mod client;
mod commands;
mod envelope;
mod experimental;
mod query;
mod stats;
mod subscribers;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use client::{BentoClient, DEFAULT_BASE_URL};
pub use envelope::{collection_attributes, single_attributes};
pub use experimental::EmailValidation;
pub use query::Query;
