//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string of the cached resource route (GET /api/properties)
///
/// # Fields
/// - `property_id`: Optional scope narrowing the resource to one property
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    /// The scope id, sent by clients as `propertyId`
    #[serde(default, rename = "propertyId")]
    pub property_id: Option<String>,
}

impl ResourceQuery {
    /// Returns the scope, treating an empty value as absent.
    pub fn scope(&self) -> Option<&str> {
        self.property_id.as_deref().filter(|s| !s.is_empty())
    }
}
