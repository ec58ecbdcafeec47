//! Business logic services for the Mercado Ops backend

pub mod fees;
pub mod image;
pub mod notifier;
pub mod product;
pub mod reporting;
pub mod sale;
pub mod supplier;
pub mod vendor;

pub use fees::FeeConfigService;
pub use image::ProductImageService;
pub use notifier::StockAlertService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use sale::SaleService;
pub use supplier::SupplierService;
pub use vendor::VendorService;
