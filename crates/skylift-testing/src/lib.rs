//! Test utilities for Skylift services.
//!
//! Provides the session-header builder and deterministic fixtures.
//! Import in `#[cfg(test)]` blocks and `tests/` only — never in production
//! code.

pub mod auth;
pub mod fixture;
