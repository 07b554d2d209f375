//! Purpose: Subscriber command execution (`add_tag`, `remove_tag`, `add_field`, ...).
//! Exports: `BentoClient::execute_commands`.
//! Role: Apply a list of mutations to subscribers in one request.
//! Invariants: The payload key is `command` (singular) even though it carries a list;
//! the remote API expects exactly that spelling.

use super::BentoClient;
use super::client::ApiResult;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct CommandsRequest<'a, T> {
    command: &'a [T],
}

impl BentoClient {
    pub fn execute_commands<T: Serialize>(&self, commands: &[T]) -> ApiResult<Value> {
        self.post_json("/fetch/commands", &CommandsRequest { command: commands })
    }
}
