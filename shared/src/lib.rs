//! Shared types and models for the Mercado Ops platform
//!
//! This crate contains the domain models together with the pure pricing
//! and validation logic used by the backend and its test suites.

pub mod models;
pub mod pricing;
pub mod validation;

pub use models::*;
pub use pricing::*;
pub use validation::*;
