pub mod api;
pub mod config;
pub mod erp;
pub mod error;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use erp::{ErpClient, SpireClient};
pub use service::ConsolidationService;
