//! `shopadmin-core`: shared building blocks for the shop admin crates.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{AttributeId, AttributeValueId, ProductId, VariantId};
