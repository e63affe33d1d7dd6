use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// 合并后的订单明细 (提交给 ERP)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub whse: Value,
    pub part_no: Value,
    pub description: Value,
    pub order_qty: Value,
    pub committed_qty: Value,
    pub sell_measure: Value,
    /// 折前零售价, 保留两位小数
    pub retail_price: String,
    #[serde(serialize_with = "decimal_as_number")]
    pub discount_pct: BigDecimal,
}

/// 装箱单备注行, 标识来源订单
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentSection {
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadLine {
    Comment(CommentSection),
    Item(NormalizedItem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub customer_no: String,
}

/// 新建销售订单请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedPayload {
    pub customer: CustomerRef,
    pub items: Vec<PayloadLine>,
}

impl ConsolidatedPayload {
    pub fn new(customer_no: impl Into<String>) -> Self {
        Self {
            customer: CustomerRef {
                customer_no: customer_no.into(),
            },
            items: Vec::new(),
        }
    }

    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|line| match line {
            PayloadLine::Comment(c) => Some(c.comment.as_str()),
            PayloadLine::Item(_) => None,
        })
    }

    pub fn normalized_items(&self) -> impl Iterator<Item = &NormalizedItem> {
        self.items.iter().filter_map(|line| match line {
            PayloadLine::Item(item) => Some(item),
            PayloadLine::Comment(_) => None,
        })
    }
}

/// ERP 期望折扣率为 JSON 数字而非字符串
fn decimal_as_number<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.with_scale(0) == *value {
        if let Some(v) = value.to_i64() {
            return serializer.serialize_i64(v);
        }
    }
    match value.to_f64() {
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_str(&value.to_string()),
    }
}
