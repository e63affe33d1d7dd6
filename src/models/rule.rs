use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 客户业务规则 (是否强制 PO, 折扣率)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerRule {
    #[serde(default)]
    pub requires_po: bool,
    /// 折扣率百分比, 取值范围 [0, 100)
    #[serde(default)]
    pub discount_rate: BigDecimal,
}

impl CustomerRule {
    pub fn new(requires_po: bool, discount_rate: BigDecimal) -> Self {
        Self { requires_po, discount_rate }
    }

    /// 折扣率是否落在 [0, 100) 内
    pub fn has_valid_discount(&self) -> bool {
        self.discount_rate >= BigDecimal::zero() && self.discount_rate < BigDecimal::from(100)
    }
}

/// 客户编号 -> 规则
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerRules {
    rules: HashMap<String, CustomerRule>,
}

impl CustomerRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, customer_no: impl Into<String>, rule: CustomerRule) {
        self.rules.insert(customer_no.into(), rule);
    }

    pub fn get(&self, customer_no: &str) -> Option<&CustomerRule> {
        self.rules.get(customer_no)
    }

    /// 查找客户规则, 未配置的客户使用默认规则 (无 PO 要求, 零折扣)
    pub fn rule_for(&self, customer_no: &str) -> CustomerRule {
        match self.rules.get(customer_no) {
            Some(rule) => rule.clone(),
            None => {
                tracing::info!("Customer {} not found, using default settings", customer_no);
                CustomerRule::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CustomerRule)> {
        self.rules.iter()
    }
}

impl FromIterator<(String, CustomerRule)> for CustomerRules {
    fn from_iter<T: IntoIterator<Item = (String, CustomerRule)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
