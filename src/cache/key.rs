//! Cache Key Module
//!
//! Derives store keys that partition cached responses by principal and scope.

// == Sentinels ==
/// Principal used when a request carries no user identity
pub const ANONYMOUS_PRINCIPAL: &str = "anon";

/// Scope used when a request is not narrowed to a resource subset
pub const ALL_SCOPE: &str = "all";

// == Derive Key ==
/// Builds the store key `"<principal>:<scope>"`.
///
/// Absent or empty parts fall back to [`ANONYMOUS_PRINCIPAL`] and [`ALL_SCOPE`].
pub fn derive_key(principal: Option<&str>, scope: Option<&str>) -> String {
    let principal = principal
        .filter(|p| !p.is_empty())
        .unwrap_or(ANONYMOUS_PRINCIPAL);
    let scope = scope.filter(|s| !s.is_empty()).unwrap_or(ALL_SCOPE);
    format!("{}:{}", principal, scope)
}
