//! Presentation layer for the Signet token service.
//!
//! Exposes the JWT authentication middleware and request extractors.
//! Routing and handlers are left to the embedding application; this crate
//! only decides whether a request carries a valid bearer credential and,
//! if so, which identity and roles travel with it.

pub mod middleware;
