//! UAP discovery documents.
//!
//! A service publishes a root [`DiscoveryDocument`] at `/.well-known/uap`
//! listing its modules; each [`ModuleRef`] points at a [`ModuleDocument`]
//! whose actions carry enough schema for a consumer to build a call.

pub mod document;

pub use document::{
    ActionDescriptor, ConfirmPolicy, DiscoveryDocument, HttpMethod, ModuleDocument, ModuleRef,
    ParamLocation, ParamSchema, ParamType,
};

/// Path of the root discovery document.
pub const WELL_KNOWN_PATH: &str = "/.well-known/uap";

/// Join a base URL and an absolute path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_trims_trailing_slash() {
        assert_eq!(
            join_url("http://localhost:8000/", WELL_KNOWN_PATH),
            "http://localhost:8000/.well-known/uap"
        );
        assert_eq!(
            join_url("http://localhost:8000", "/rooms"),
            "http://localhost:8000/rooms"
        );
    }
}
