use bigdecimal::BigDecimal;
use serde_json::Value;
use thiserror::Error;

/// 客户规则加载失败
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read customer settings: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to unmarshal customer settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("customer {customer_no} has discount rate {rate}, expected a value in [0, 100)")]
    InvalidDiscountRate { customer_no: String, rate: BigDecimal },
}

/// 单条明细被跳过的原因 (不影响整单)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemError {
    #[error("skipped item of itemType {}", display_raw(.0))]
    UnsupportedItemType(Option<Value>),

    #[error("invalid or missing unitPrice: {0}")]
    InvalidUnitPrice(String),

    #[error("discount rate {0} leaves no retail price")]
    InvalidDiscountRate(BigDecimal),
}

/// 整单失败, 不返回任何部分结果
#[derive(Debug, Error)]
pub enum ConsolidationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("customer {customer_no} requires a PO, but none was found for order {order_no}")]
    MissingPurchaseOrder { customer_no: String, order_no: String },
}

/// ERP 接口调用失败
#[derive(Debug, Error)]
pub enum ErpError {
    #[error("ERP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ERP responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid order id {0:?}")]
    InvalidOrderId(String),
}

/// 批量删除在某个订单上中断
#[derive(Debug, Error)]
#[error("failed to delete order {order_id}: {source}")]
pub struct DeletionError {
    pub order_id: String,
    pub source: ErpError,
}

/// 合并流程错误
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no orders selected")]
    EmptySelection,

    #[error(transparent)]
    Consolidation(#[from] ConsolidationError),

    #[error(transparent)]
    Erp(#[from] ErpError),

    #[error(transparent)]
    Deletion(#[from] DeletionError),
}

fn display_raw(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<missing>".to_string(),
    }
}
