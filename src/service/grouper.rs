use crate::models::{Field, RawLineItem};
use indexmap::IndexMap;

/// 订单号 -> 该订单的明细 (按首次出现顺序)
pub type GroupedItems = IndexMap<String, Vec<RawLineItem>>;

/// 按来源订单号分组明细
///
/// 订单号缺失或不是字符串的明细直接丢弃, 组内保持原始顺序。
pub fn group_by_order(items: Vec<RawLineItem>) -> GroupedItems {
    let mut groups = GroupedItems::with_capacity(items.len());

    for item in items {
        let order_no = match &item.order_no {
            Field::Valid(order_no) => order_no.clone(),
            Field::Malformed(raw) => {
                tracing::warn!("{} passed as order no, expecting a string", raw);
                continue;
            }
            Field::Missing => {
                tracing::warn!("Sales item without order no, part {}", item.part_no);
                continue;
            }
        };
        groups.entry(order_no).or_default().push(item);
    }

    groups
}
