// Business logic services
// Catalog, order lifecycle, escrow ledger, designer intake, admin rollup,
// and the live chat fan-out.

pub mod admin_service;
pub mod catalog_service;
pub mod chat_hub;
pub mod designer_service;
pub mod escrow_service;
pub mod order_service;

pub use admin_service::AdminService;
pub use catalog_service::CatalogService;
pub use chat_hub::{ChatEvent, ChatHub};
pub use designer_service::DesignerService;
pub use escrow_service::EscrowService;
pub use order_service::OrderService;
