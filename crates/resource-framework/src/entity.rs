//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait is the contract every remote resource (users, games,
//! snippets, ...) implements to be served by the generic [`ResourceClient`](crate::ResourceClient).
//!
//! # Architecture Note
//! By describing each resource through associated types and constants, the request
//! plumbing (URL building, credentials, error labeling) is written *once* in
//! `ResourceClient<T>` and reused for every resource.
//!
//! - `Listing` is the shape returned by `find` (usually [`PaginatedResult<Self>`]).
//! - `Create` is the payload accepted by `create`. A `GameCreate` can never be
//!   posted to `/snippets`; the compiler rejects it.
//!
//! # Provided Methods (Hooks)
//! [`ResourceEntity::handle_service_error`] has a default implementation that returns
//! the error unchanged. Override it to label failures with the resource name.

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A remote resource served by a [`ResourceClient`](crate::ResourceClient).
pub trait ResourceEntity: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Shape returned by `find` on the base path.
    type Listing: DeserializeOwned + Send + Debug;

    /// Payload accepted by `create`.
    type Create: Serialize + Send + Sync + Debug;

    /// Human readable resource name used in logs and error labels.
    const RESOURCE: &'static str;

    /// Base path of the resource on the API (e.g. `/games`).
    const BASE_PATH: &'static str;

    /// Public identifier used in every external route.
    fn pid(&self) -> &str;

    /// Hook applied to every failed operation before it reaches the caller.
    fn handle_service_error(_operation: &'static str, error: ClientError) -> ClientError {
        error
    }
}

/// Pagination descriptor returned alongside list results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A page of entities in server-defined order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: PaginationMeta,
}

impl<T> PaginatedResult<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> IntoIterator for PaginatedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_uses_camel_case_and_defaults() {
        let page: PaginatedResult<String> = serde_json::from_value(json!({
            "data": ["a", "b"],
            "meta": { "total": 12, "page": 1, "limit": 2, "totalPages": 6 }
        }))
        .unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.meta.total_pages, 6);
        assert!(page.meta.has_next_page());

        let bare: PaginatedResult<String> = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert!(bare.is_empty());
        assert_eq!(bare.meta, PaginationMeta::default());
    }
}
