use crate::error::{ConsolidationError, ItemError};
use crate::models::{CommentSection, ConsolidatedPayload, PayloadLine};
use crate::service::comment::build_comment;
use crate::service::grouper::GroupedItems;
use crate::service::normalizer::normalize;
use crate::service::rules::RuleSource;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// 被跳过的明细及原因
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedItem {
    pub order_no: String,
    pub part_no: Value,
    pub reason: ItemError,
}

/// 组装结果: 订单请求体 + 跳过明细诊断
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub payload: ConsolidatedPayload,
    pub skipped: Vec<SkippedItem>,
}

/// 合并订单组装器
///
/// 订单级严格 (任一订单缺少必需的 PO 则整体失败), 明细级宽松 (无效明细跳过并记录)。
pub struct PayloadAssembler {
    rules: Arc<dyn RuleSource>,
}

impl PayloadAssembler {
    pub fn new(rules: Arc<dyn RuleSource>) -> Self {
        Self { rules }
    }

    pub fn assemble(
        &self,
        grouped: &GroupedItems,
        customer_no: &str,
        purchase_nos: &HashMap<String, String>,
    ) -> Result<Assembly, ConsolidationError> {
        // 每次调用重新加载规则
        let rules = self.rules.load_rules().map_err(|e| {
            tracing::error!("Failed to load customer settings: {}", e);
            e
        })?;
        let rule = rules.rule_for(customer_no);

        let mut payload = ConsolidatedPayload::new(customer_no);
        let mut skipped = Vec::new();

        for (order_no, items) in grouped {
            let comment = build_comment(order_no, customer_no, purchase_nos, &rule)?;
            payload.items.push(PayloadLine::Comment(CommentSection { comment }));

            for item in items {
                match normalize(item, &rule) {
                    Ok(normalized) => payload.items.push(PayloadLine::Item(normalized)),
                    Err(reason) => {
                        tracing::warn!("Order {} item {} skipped: {}", order_no, item.part_no, reason);
                        skipped.push(SkippedItem {
                            order_no: order_no.clone(),
                            part_no: item.part_no.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        tracing::info!(
            "Assembled payload for customer {}: {} orders, {} lines, {} skipped",
            customer_no,
            grouped.len(),
            payload.items.len(),
            skipped.len()
        );

        Ok(Assembly { payload, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::models::{CustomerRule, CustomerRules, RawLineItem};
    use crate::service::grouper::group_by_order;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use testresult::TestResult;

    struct BrokenRules;

    impl RuleSource for BrokenRules {
        fn load_rules(&self) -> Result<CustomerRules, ConfigError> {
            Err(ConfigError::Parse(serde_json::from_str::<Value>("{").unwrap_err()))
        }
    }

    fn assembler(rules: CustomerRules) -> PayloadAssembler {
        PayloadAssembler::new(Arc::new(rules))
    }

    fn rules() -> CustomerRules {
        let mut rules = CustomerRules::new();
        rules.insert("STRICT", CustomerRule::new(true, BigDecimal::from(20)));
        rules.insert("LOOSE", CustomerRule::new(false, BigDecimal::from(0)));
        rules
    }

    fn grouped(records: Vec<Value>) -> GroupedItems {
        group_by_order(records.into_iter().map(|r| RawLineItem::from_record(r).unwrap()).collect())
    }

    fn po_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    /// 每个订单的 (备注, 明细零件号) 块
    fn blocks(payload: &ConsolidatedPayload) -> Vec<(String, Vec<Value>)> {
        let mut blocks: Vec<(String, Vec<Value>)> = Vec::new();
        for line in &payload.items {
            match line {
                PayloadLine::Comment(c) => blocks.push((c.comment.clone(), Vec::new())),
                PayloadLine::Item(item) => blocks
                    .last_mut()
                    .expect("item before any comment")
                    .1
                    .push(item.part_no.clone()),
            }
        }
        blocks
    }

    #[test]
    fn mixed_orders_with_po() -> TestResult {
        let items = grouped(vec![
            json!({"orderNo": "A", "itemType": 1, "unitPrice": "100.00", "partNo": "A1"}),
            json!({"orderNo": "B", "itemType": 2, "unitPrice": "8.00", "partNo": "B1"}),
        ]);

        let assembly = assembler(rules()).assemble(&items, "STRICT", &po_map(&[("A", "PO123"), ("B", "PO9")]))?;

        assert_eq!(assembly.payload.customer.customer_no, "STRICT");
        assert_eq!(
            blocks(&assembly.payload),
            vec![
                ("Packing Slip Number - A PO PO123".to_string(), vec![json!("A1")]),
                ("Packing Slip Number - B PO PO9".to_string(), vec![json!("B1")]),
            ]
        );
        let prices: Vec<_> = assembly.payload.normalized_items().map(|i| i.retail_price.clone()).collect();
        assert_eq!(prices, vec!["125.00", "10.00"]);
        assert!(assembly.skipped.is_empty());
        Ok(())
    }

    #[test]
    fn missing_po_aborts_whole_payload() {
        let items = grouped(vec![
            json!({"orderNo": "A", "itemType": 1, "unitPrice": "1", "partNo": "A1"}),
            json!({"orderNo": "B", "itemType": 1, "unitPrice": "1", "partNo": "B1"}),
        ]);

        let result = assembler(rules()).assemble(&items, "STRICT", &po_map(&[("A", "PO123"), ("B", "")]));

        match result {
            Err(ConsolidationError::MissingPurchaseOrder { customer_no, order_no }) => {
                assert_eq!(customer_no, "STRICT");
                assert_eq!(order_no, "B");
            }
            other => panic!("expected MissingPurchaseOrder, got {:?}", other),
        }
    }

    #[test]
    fn unknown_customer_uses_default_rule() -> TestResult {
        let items = grouped(vec![json!({"orderNo": "A", "itemType": 1, "unitPrice": "42.10", "partNo": "A1"})]);

        let assembly = assembler(rules()).assemble(&items, "NOBODY", &HashMap::new())?;

        assert_eq!(assembly.payload.comments().collect::<Vec<_>>(), vec!["Packing Slip Number - A"]);
        let item = assembly.payload.normalized_items().next().unwrap();
        assert_eq!(item.retail_price, "42.10");
        assert_eq!(item.discount_pct, BigDecimal::from(0));
        Ok(())
    }

    #[test]
    fn invalid_items_are_skipped_with_reasons() -> TestResult {
        let items = grouped(vec![
            json!({"orderNo": "A", "itemType": 3, "unitPrice": "1", "partNo": "COMMENT"}),
            json!({"orderNo": "A", "itemType": 1, "unitPrice": "oops", "partNo": "BAD"}),
            json!({"orderNo": "A", "itemType": 1, "unitPrice": "5", "partNo": "GOOD"}),
        ]);

        let assembly = assembler(rules()).assemble(&items, "LOOSE", &HashMap::new())?;

        assert_eq!(
            blocks(&assembly.payload),
            vec![("Packing Slip Number - A".to_string(), vec![json!("GOOD")])]
        );
        assert_eq!(assembly.skipped.len(), 2);
        assert!(matches!(assembly.skipped[0].reason, ItemError::UnsupportedItemType(Some(_))));
        assert_eq!(assembly.skipped[0].part_no, json!("COMMENT"));
        assert!(matches!(assembly.skipped[1].reason, ItemError::InvalidUnitPrice(_)));
        Ok(())
    }

    #[test]
    fn order_with_only_skipped_items_keeps_comment() -> TestResult {
        let items = grouped(vec![json!({"orderNo": "A", "itemType": 4, "partNo": "KIT"})]);

        let assembly = assembler(rules()).assemble(&items, "LOOSE", &HashMap::new())?;

        assert_eq!(assembly.payload.items.len(), 1);
        assert_eq!(assembly.skipped.len(), 1);
        Ok(())
    }

    #[test]
    fn rule_load_failure_is_config_error() {
        let items = grouped(vec![json!({"orderNo": "A", "itemType": 1, "unitPrice": "1"})]);
        let result = PayloadAssembler::new(Arc::new(BrokenRules)).assemble(&items, "LOOSE", &HashMap::new());
        assert!(matches!(result, Err(ConsolidationError::Config(_))));
    }

    #[test]
    fn assembly_is_repeatable() -> TestResult {
        let items = grouped(vec![
            json!({"orderNo": "B", "itemType": 1, "unitPrice": "3.30", "partNo": "B1"}),
            json!({"orderNo": "A", "itemType": 2, "unitPrice": "1.10", "partNo": "A1"}),
            json!({"orderNo": "B", "itemType": 2, "unitPrice": "9.99", "partNo": "B2"}),
        ]);
        let assembler = assembler(rules());

        let first = assembler.assemble(&items, "LOOSE", &HashMap::new())?;
        let second = assembler.assemble(&items, "LOOSE", &HashMap::new())?;

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.payload)?,
            serde_json::to_string(&second.payload)?
        );
        Ok(())
    }

    #[test]
    fn empty_groups_yield_empty_payload() -> TestResult {
        let assembly = assembler(rules()).assemble(&GroupedItems::new(), "STRICT", &HashMap::new())?;
        assert!(assembly.payload.items.is_empty());
        Ok(())
    }
}
