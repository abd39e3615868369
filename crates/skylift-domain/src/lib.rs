//! Domain types shared across the Skylift workspace.
//!
//! This crate contains only pure types with no framework dependencies:
//! statuses and their transition rules, the permission catalog, pagination.
//! Everything serializes with serde; nothing here pulls in axum or sea-orm.

pub mod booking;
pub mod currency;
pub mod employee;
pub mod pagination;
pub mod payment;
pub mod permission;
