use crate::error::ConsolidationError;
use crate::models::CustomerRule;
use std::collections::HashMap;

const PACKING_SLIP_PREFIX: &str = "Packing Slip Number - ";

/// 生成订单段的装箱单备注, 并校验 PO 要求
///
/// 格式是下游 ERP 的兼容约定:
/// `Packing Slip Number - <orderNo>` 或 `Packing Slip Number - <orderNo> PO <purchaseNo>`
pub fn build_comment(
    order_no: &str,
    customer_no: &str,
    purchase_nos: &HashMap<String, String>,
    rule: &CustomerRule,
) -> Result<String, ConsolidationError> {
    let mut comment = format!("{}{}", PACKING_SLIP_PREFIX, order_no);

    if rule.requires_po {
        let purchase_no = purchase_nos
            .get(order_no)
            .filter(|po| !po.is_empty())
            .ok_or_else(|| ConsolidationError::MissingPurchaseOrder {
                customer_no: customer_no.to_string(),
                order_no: order_no.to_string(),
            })?;
        comment.push_str(" PO ");
        comment.push_str(purchase_no);
    }

    Ok(comment)
}
