//! `shopadmin-client`
//!
//! **Responsibility:** remote access to the shop's variant and attribute
//! endpoints.
//!
//! The `VariantService` trait is the seam the editor reconciles against;
//! `HttpVariantService` is its reqwest-backed implementation.

pub mod config;
pub mod error;
pub mod http;
pub mod service;

pub use config::ClientConfig;
pub use error::{ServiceError, ServiceResult};
pub use http::HttpVariantService;
pub use service::VariantService;
