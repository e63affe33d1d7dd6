use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// ERP 返回字段的解析状态: 缺失 / 类型不符 / 有效
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    Malformed(Value),
    Valid(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T: DeserializeOwned> Field<T> {
    /// null 视为缺失
    pub fn from_value(value: Value) -> Self {
        if value.is_null() {
            return Field::Missing;
        }
        match serde_json::from_value::<T>(value.clone()) {
            Ok(v) => Field::Valid(v),
            Err(_) => Field::Malformed(value),
        }
    }
}

impl<T> Field<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Field::Valid(v) => Some(v),
            _ => None,
        }
    }

    /// 原始值, 用于日志与诊断
    pub fn raw(&self) -> Option<Value>
    where
        T: serde::Serialize,
    {
        match self {
            Field::Missing => None,
            Field::Malformed(v) => Some(v.clone()),
            Field::Valid(v) => serde_json::to_value(v).ok(),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Field::from_value(value))
    }
}

/// 销售订单明细 (ERP /sales/items 返回的原始记录)
///
/// 只解析合并订单用到的字段, 其余字段忽略; 透传字段保持原值不做解释。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default)]
    pub order_no: Field<String>,
    #[serde(default)]
    pub item_type: Field<f64>,
    #[serde(default)]
    pub unit_price: Field<String>,
    #[serde(default)]
    pub part_no: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub order_qty: Value,
    #[serde(default)]
    pub committed_qty: Value,
    #[serde(default)]
    pub sell_measure: Value,
    #[serde(default)]
    pub whse: Value,
}

impl RawLineItem {
    /// 从 ERP 记录解析, 非对象记录返回错误
    pub fn from_record(record: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record)
    }

    /// 批量解析, 无法解析的记录记录日志后丢弃
    pub fn from_records(records: Vec<Value>) -> Vec<Self> {
        records
            .into_iter()
            .filter_map(|record| match Self::from_record(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Discarding malformed sales item record: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// 可合并的明细类型 (1 = 库存品, 2 = 非库存品)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Stock,
    NonStock,
}

impl ItemType {
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(ItemType::Stock)
        } else if code == 2.0 {
            Some(ItemType::NonStock)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_typed_and_passthrough_fields() {
        let item = RawLineItem::from_record(json!({
            "orderNo": "0000123",
            "itemType": 1,
            "unitPrice": "12.50",
            "partNo": "BOLT-10",
            "orderQty": "4",
            "whse": "00",
            "somethingElse": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(item.order_no, Field::Valid("0000123".to_string()));
        assert_eq!(item.item_type, Field::Valid(1.0));
        assert_eq!(item.unit_price, Field::Valid("12.50".to_string()));
        assert_eq!(item.part_no, json!("BOLT-10"));
        assert_eq!(item.description, Value::Null);
    }

    #[test]
    fn wrong_types_are_malformed_not_errors() {
        let item = RawLineItem::from_record(json!({
            "orderNo": 123,
            "itemType": "1",
            "unitPrice": 12.5
        }))
        .unwrap();

        assert_eq!(item.order_no, Field::Malformed(json!(123)));
        assert_eq!(item.item_type, Field::Malformed(json!("1")));
        assert_eq!(item.unit_price, Field::Malformed(json!(12.5)));
    }

    #[test]
    fn null_and_absent_are_missing() {
        let item = RawLineItem::from_record(json!({"orderNo": null})).unwrap();
        assert_eq!(item.order_no, Field::Missing);
        assert_eq!(item.item_type, Field::Missing);
    }

    #[test]
    fn non_object_records_are_dropped() {
        let items = RawLineItem::from_records(vec![json!("oops"), json!({"orderNo": "A"})]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn item_type_codes() {
        assert_eq!(ItemType::from_code(1.0), Some(ItemType::Stock));
        assert_eq!(ItemType::from_code(2.0), Some(ItemType::NonStock));
        assert_eq!(ItemType::from_code(3.0), None);
        assert_eq!(ItemType::from_code(1.5), None);
    }
}
