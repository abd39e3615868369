//! Service plumbing shared across the Skylift workspace: health handlers,
//! request-id propagation, tracing setup, serde helpers.

pub mod health;
pub mod request_id;
pub mod serde;
pub mod tracing;
