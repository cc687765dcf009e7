//! # Signet Core
//!
//! Core domain layer for the Signet token service. This crate contains the
//! claims entity, the token service, and the error types that form the
//! foundation of the application architecture. It is framework-free: the
//! presentation layer supplies header values and renders rejections.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
