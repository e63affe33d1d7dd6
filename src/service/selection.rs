use crate::models::OrderSelection;
use serde_json::{json, Value};
use std::collections::HashMap;

/// 构建明细查询条件: `{ "$or": [ { "orderNo": no1 }, { "orderNo": no2 }, ... ] }`
pub fn item_filter(selection: &OrderSelection) -> Value {
    let conditions: Vec<Value> = selection
        .values()
        .map(|order| json!({ "orderNo": order.order_no }))
        .collect();
    json!({ "$or": conditions })
}

/// 订单号 -> PO 号
pub fn purchase_numbers(selection: &OrderSelection) -> HashMap<String, String> {
    selection
        .values()
        .map(|order| (order.order_no.clone(), order.purchase_no.clone()))
        .collect()
}

/// 合并成功后需要删除的来源订单ID
pub fn source_order_ids(selection: &OrderSelection) -> Vec<String> {
    selection.keys().cloned().collect()
}

/// 未结销售订单查询条件
pub fn open_orders_filter() -> Value {
    json!({ "type": "O" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderDetails;

    fn selection() -> OrderSelection {
        let mut selection = OrderSelection::new();
        selection.insert(
            "101".to_string(),
            OrderDetails { order_no: "0000123".to_string(), purchase_no: "PO1".to_string() },
        );
        selection.insert(
            "102".to_string(),
            OrderDetails { order_no: "0000124".to_string(), purchase_no: String::new() },
        );
        selection
    }

    #[test]
    fn filter_has_one_condition_per_order() {
        assert_eq!(
            item_filter(&selection()),
            json!({"$or": [{"orderNo": "0000123"}, {"orderNo": "0000124"}]})
        );
    }

    #[test]
    fn filter_does_not_dedupe() {
        let mut selection = selection();
        selection.insert(
            "103".to_string(),
            OrderDetails { order_no: "0000123".to_string(), purchase_no: String::new() },
        );
        assert_eq!(item_filter(&selection)["$or"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn purchase_numbers_and_ids() {
        let selection = selection();
        let pos = purchase_numbers(&selection);
        assert_eq!(pos["0000123"], "PO1");
        assert_eq!(pos["0000124"], "");
        assert_eq!(source_order_ids(&selection), vec!["101", "102"]);
    }
}
