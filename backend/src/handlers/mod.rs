//! HTTP handlers for the Mercado Ops API

pub mod chat;
pub mod dashboard;
pub mod fees;
pub mod health;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod vendors;

pub use chat::*;
pub use dashboard::*;
pub use fees::*;
pub use health::*;
pub use products::*;
pub use sales::*;
pub use suppliers::*;
pub use vendors::*;
