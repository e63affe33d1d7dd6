pub mod handlers;

pub use handlers::*;

use crate::service::ConsolidationService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 构建路由
pub fn router(service: Arc<ConsolidationService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/orders", get(list_open_orders))
        .route("/submit_selected_orders", post(submit_selected_orders))
        .route("/delete_source_orders", post(delete_source_orders))
        .with_state(service)
}
