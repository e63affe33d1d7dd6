use ::config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub erp: ErpConfig,
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// ERP (Spire) 连接配置
#[derive(Clone, Serialize, Deserialize)]
pub struct ErpConfig {
    pub root_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub page_limit: usize,
    pub timeout_secs: u64,
}

// 不在日志中输出密码
impl fmt::Debug for ErpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErpConfig")
            .field("root_url", &self.root_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("page_limit", &self.page_limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// 客户规则文件; 未配置时使用程序内嵌的规则
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// 默认值 + 环境变量 (`CONSOLIDATOR_SERVER__PORT`, `CONSOLIDATOR_ERP__ROOT_URL`, `CONSOLIDATOR_RULES__PATH` ...)
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(environment())
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("erp.page_limit", 1000)?
            .set_default("erp.timeout_secs", 30)?
            .add_source(env)
            // 兼容旧变量名
            .set_override_option("erp.root_url", std::env::var("SPIRE_ROOT_URL").ok())?
            .build()?
            .try_deserialize()
    }
}

/// 只读取带前缀的变量, 其它进程环境变量不进入配置
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

const ENV_PREFIX: &str = "CONSOLIDATOR";
