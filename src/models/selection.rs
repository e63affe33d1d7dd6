use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 选中的来源订单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_no: String,
    #[serde(default)]
    pub purchase_no: String,
}

/// 内部订单ID -> 订单信息
pub type OrderSelection = IndexMap<String, OrderDetails>;

/// 请求体: 合并提交
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub customer_no: String,
    pub orders: OrderSelection,
}

/// 响应体: 合并成功, 返回待删除的来源订单ID
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub status: String,
    pub message: String,
    pub to_delete: Vec<String>,
}

/// 请求体: 删除来源订单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "orderIDs")]
    pub order_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
