//! Authenticated access to the Trello REST API.
//!
//! [`TrelloApi`] is the seam callers program against. [`Client`] is the
//! networked implementation; `MockTrelloApi` (generated by mockall, available
//! in tests and behind the `mock` feature) stands in for it in caller tests.

mod error;
mod trello;

use async_trait::async_trait;
use std::collections::BTreeMap;

pub use error::RequestError;
pub use trello::{Client, DEFAULT_HOST};

/// Query parameters for a single request.
///
/// Keys are encoded in ascending order.
pub type Params = BTreeMap<String, String>;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TrelloApi: Send + Sync {
    async fn get(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError>;
    async fn post(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError>;
    async fn put(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError>;
    async fn delete(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError>;
}
