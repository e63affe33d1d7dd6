use crate::error::ItemError;
use crate::models::{CustomerRule, Field, ItemType, NormalizedItem, RawLineItem};
use bigdecimal::{BigDecimal, One, Zero};
use std::str::FromStr;

/// 校验并转换单条明细
///
/// 仅接受库存品/非库存品; 零售价按客户折扣率反推, 使 ERP 端应用折扣后还原原单价。
pub fn normalize(item: &RawLineItem, rule: &CustomerRule) -> Result<NormalizedItem, ItemError> {
    let supported = item.item_type.valid().and_then(|code| ItemType::from_code(*code));
    if supported.is_none() {
        return Err(ItemError::UnsupportedItemType(item.item_type.raw()));
    }

    let unit_price = parse_unit_price(&item.unit_price)?;
    let retail_price = retail_price(&unit_price, &rule.discount_rate)?;

    Ok(NormalizedItem {
        whse: item.whse.clone(),
        part_no: item.part_no.clone(),
        description: item.description.clone(),
        order_qty: item.order_qty.clone(),
        committed_qty: item.committed_qty.clone(),
        sell_measure: item.sell_measure.clone(),
        retail_price,
        discount_pct: rule.discount_rate.clone(),
    })
}

fn parse_unit_price(field: &Field<String>) -> Result<BigDecimal, ItemError> {
    match field {
        Field::Valid(raw) => BigDecimal::from_str(raw)
            .map_err(|e| ItemError::InvalidUnitPrice(format!("cannot parse {:?}: {}", raw, e))),
        Field::Malformed(raw) => Err(ItemError::InvalidUnitPrice(format!(
            "expected a string, got {}",
            raw
        ))),
        Field::Missing => Err(ItemError::InvalidUnitPrice("missing".to_string())),
    }
}

/// retail = unit / (1 - discount/100), 四舍五入到两位小数
pub fn retail_price(unit_price: &BigDecimal, discount_rate: &BigDecimal) -> Result<String, ItemError> {
    let divisor = BigDecimal::one() - discount_rate.clone() / BigDecimal::from(100);
    if divisor <= BigDecimal::zero() {
        return Err(ItemError::InvalidDiscountRate(discount_rate.clone()));
    }

    let retail = unit_price.clone() / divisor;
    Ok(retail.round(2).with_scale(2).to_string())
}
