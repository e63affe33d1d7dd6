use order_consolidator::service::{EmbeddedRules, FileRules, RuleSource};
use order_consolidator::{api, AppConfig, ConsolidationService, SpireClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load().map_err(|e| {
        tracing::error!("Invalid configuration (is CONSOLIDATOR_ERP__ROOT_URL / SPIRE_ROOT_URL set?): {}", e);
        e
    })?;
    info!("Starting server with config: {:?}", config);

    // 客户规则来源: 配置文件优先, 否则使用内嵌规则
    let rules: Arc<dyn RuleSource> = match &config.rules.path {
        Some(path) => {
            info!("Using customer settings from {}", path.display());
            Arc::new(FileRules::new(path))
        }
        None => Arc::new(EmbeddedRules),
    };
    // 启动时校验一次, 运行期仍每次重新加载
    let customers = rules.load_rules()?;
    info!("Loaded settings for {} customers", customers.len());

    let erp = Arc::new(SpireClient::new(&config.erp)?);
    info!("Using ERP at {}", config.erp.root_url);

    let service = Arc::new(ConsolidationService::new(erp, rules));
    let app = api::router(service);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /orders                  - open sales orders");
    info!("  POST /submit_selected_orders  - consolidate selected orders");
    info!("  POST /delete_source_orders    - delete consolidated source orders");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
