use crate::error::ConfigError;
use crate::models::CustomerRules;
use std::path::PathBuf;

/// 随程序打包的客户规则
const EMBEDDED_RULES: &str = include_str!("../../data/customers.json");

/// 客户规则来源; 每次构建订单都重新加载, 不做缓存
pub trait RuleSource: Send + Sync {
    fn load_rules(&self) -> Result<CustomerRules, ConfigError>;
}

/// 编译期嵌入的规则文件
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRules;

impl RuleSource for EmbeddedRules {
    fn load_rules(&self) -> Result<CustomerRules, ConfigError> {
        parse_rules(EMBEDDED_RULES)
    }
}

/// 运行期从磁盘读取的规则文件
#[derive(Debug, Clone)]
pub struct FileRules {
    path: PathBuf,
}

impl FileRules {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RuleSource for FileRules {
    fn load_rules(&self) -> Result<CustomerRules, ConfigError> {
        let document = std::fs::read_to_string(&self.path)?;
        parse_rules(&document)
    }
}

/// 内存规则 (测试替身)
impl RuleSource for CustomerRules {
    fn load_rules(&self) -> Result<CustomerRules, ConfigError> {
        Ok(self.clone())
    }
}

/// 解析规则文档, 全部成功或整体失败
pub fn parse_rules(document: &str) -> Result<CustomerRules, ConfigError> {
    let rules: CustomerRules = serde_json::from_str(document)?;

    if let Some((customer_no, rule)) = rules.iter().find(|(_, rule)| !rule.has_valid_discount()) {
        return Err(ConfigError::InvalidDiscountRate {
            customer_no: customer_no.clone(),
            rate: rule.discount_rate.clone(),
        });
    }

    Ok(rules)
}
