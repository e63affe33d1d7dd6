use crate::erp::{ErpClient, OrderConfirmation};
use crate::error::{DeletionError, ServiceError};
use crate::models::{RawLineItem, SubmitRequest};
use crate::service::assembler::{PayloadAssembler, SkippedItem};
use crate::service::grouper::group_by_order;
use crate::service::rules::RuleSource;
use crate::service::selection;
use serde_json::Value;
use std::sync::Arc;

const SALES_ORDERS_PATH: &str = "/sales/orders";
const SALES_ITEMS_PATH: &str = "/sales/items";

/// 合并结果
#[derive(Debug, Clone)]
pub struct ConsolidationOutcome {
    pub confirmation: OrderConfirmation,
    /// 待删除的来源订单ID
    pub to_delete: Vec<String>,
    pub skipped: Vec<SkippedItem>,
}

/// 合并订单服务: 查询明细 -> 分组 -> 组装 -> 提交
pub struct ConsolidationService {
    erp: Arc<dyn ErpClient>,
    assembler: PayloadAssembler,
}

impl ConsolidationService {
    pub fn new(erp: Arc<dyn ErpClient>, rules: Arc<dyn RuleSource>) -> Self {
        Self {
            erp,
            assembler: PayloadAssembler::new(rules),
        }
    }

    /// 未结销售订单
    pub async fn open_orders(&self) -> Result<Vec<Value>, ServiceError> {
        let records = self
            .erp
            .fetch_records(SALES_ORDERS_PATH, &selection::open_orders_filter())
            .await?;
        Ok(records)
    }

    pub async fn consolidate(&self, request: &SubmitRequest) -> Result<ConsolidationOutcome, ServiceError> {
        if request.orders.is_empty() {
            return Err(ServiceError::EmptySelection);
        }

        tracing::info!("Received {} selected order IDs for processing", request.orders.len());
        for order in request.orders.values() {
            tracing::info!("Order No: {}  Purchase No: {}", order.order_no, order.purchase_no);
        }

        let purchase_nos = selection::purchase_numbers(&request.orders);
        let filter = selection::item_filter(&request.orders);

        let records = self.erp.fetch_records(SALES_ITEMS_PATH, &filter).await?;
        let grouped = group_by_order(RawLineItem::from_records(records));
        tracing::info!("CustomerNo: {}, {} orders with items", request.customer_no, grouped.len());

        let assembly = self
            .assembler
            .assemble(&grouped, &request.customer_no, &purchase_nos)
            .map_err(|e| {
                tracing::error!("Error creating payload: {}", e);
                e
            })?;

        match serde_json::to_string_pretty(&assembly.payload) {
            Ok(json) => tracing::debug!("Payload to submit (JSON):\n{}", json),
            Err(e) => tracing::warn!("Error marshalling payload for log: {}", e),
        }

        let confirmation = self.erp.create_sales_order(&assembly.payload).await.map_err(|e| {
            tracing::error!("Error creating sales order: {}", e);
            e
        })?;
        tracing::info!("Sales order created: {:?}", confirmation);

        Ok(ConsolidationOutcome {
            confirmation,
            to_delete: selection::source_order_ids(&request.orders),
            skipped: assembly.skipped,
        })
    }

    /// 逐个删除来源订单, 遇到第一个失败即中止
    pub async fn delete_source_orders(&self, order_ids: &[String]) -> Result<usize, ServiceError> {
        tracing::info!("Attempting to delete {} source orders.", order_ids.len());

        for order_id in order_ids {
            self.erp
                .delete_sales_order(order_id)
                .await
                .map_err(|source| DeletionError {
                    order_id: order_id.clone(),
                    source,
                })?;
            tracing::info!("Deleted source order {}", order_id);
        }

        Ok(order_ids.len())
    }
}
