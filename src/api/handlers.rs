use crate::error::{ConsolidationError, ServiceError};
use crate::models::{DeleteRequest, StatusResponse, SubmitRequest, SubmitResponse};
use crate::service::ConsolidationService;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 未结销售订单列表
pub async fn list_open_orders(State(service): State<Arc<ConsolidationService>>) -> Response {
    match service.open_orders().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!("Error fetching open orders: {}", e);
            error_response(&e)
        }
    }
}

/// 合并选中订单并提交新订单
pub async fn submit_selected_orders(
    State(service): State<Arc<ConsolidationService>>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    match service.consolidate(&req).await {
        Ok(outcome) => {
            for skipped in &outcome.skipped {
                tracing::warn!(
                    "Order {} item {} left out of consolidated order: {}",
                    skipped.order_no,
                    skipped.part_no,
                    skipped.reason
                );
            }
            let response = SubmitResponse {
                status: "success".to_string(),
                message: "Order successfully created in Spire. Ready to delete source orders."
                    .to_string(),
                to_delete: outcome.to_delete,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// 删除来源订单
pub async fn delete_source_orders(
    State(service): State<Arc<ConsolidationService>>,
    Json(req): Json<DeleteRequest>,
) -> Response {
    match service.delete_source_orders(&req.order_ids).await {
        Ok(_) => (
            StatusCode::OK,
            Json(StatusResponse::success("Source orders deleted successfully.")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error deleting sales orders: {}", e);
            error_response(&e)
        }
    }
}

fn error_response(e: &ServiceError) -> Response {
    let status = match e {
        ServiceError::EmptySelection => StatusCode::BAD_REQUEST,
        ServiceError::Consolidation(ConsolidationError::MissingPurchaseOrder { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServiceError::Consolidation(ConsolidationError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Erp(_) => StatusCode::BAD_GATEWAY,
        ServiceError::Deletion(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match e {
        ServiceError::Deletion(_) => format!("Failed to delete all source orders: {}", e),
        _ => format!("Error: {}", e),
    };
    (status, Json(StatusResponse::error(message))).into_response()
}
