//! Fetch Module
//!
//! The collaborator the cache delegates to on a miss.
//!
//! The cache knows nothing about transport or representation; whatever a
//! [`Fetcher`] returns is stored and handed back verbatim.

mod backend;

use async_trait::async_trait;

use crate::error::FetchError;

pub use backend::{BackendFetcher, PRINCIPAL_HEADER, SCOPE_PARAM};

/// Loads a fresh value for a principal and scope.
#[async_trait]
pub trait Fetcher<V>: Send + Sync {
    async fn fetch(&self, principal: Option<&str>, scope: Option<&str>)
        -> Result<V, FetchError>;
}
