//! Re-exports of shared domain models

pub use shared::models::*;
