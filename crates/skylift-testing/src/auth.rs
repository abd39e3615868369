//! Session header helpers for integration tests.
//!
//! Authenticated requests carry an opaque token in `x-session-id`. In tests,
//! `MockSession` builds that header directly so no login round trip is
//! needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Configurable session identity injected into test requests.
pub struct MockSession {
    pub token: String,
}

impl MockSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Return headers as if a logged-in client sent them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("x-session-id"),
            HeaderValue::from_str(&self.token).unwrap(),
        );
        map
    }
}
