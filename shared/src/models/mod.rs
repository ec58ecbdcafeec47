//! Domain models for the Mercado Ops platform

mod fees;
mod product;
mod sale;
mod stock;
mod supplier;
mod vendor;

pub use fees::*;
pub use product::*;
pub use sale::*;
pub use stock::*;
pub use supplier::*;
pub use vendor::*;
