use crate::config::ErpConfig;
use crate::error::ErpError;
use crate::models::ConsolidatedPayload;
use async_trait::async_trait;
use reqwest::header::LOCATION;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// 新建订单的确认信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub status: u16,
    /// 新订单地址 (Location 响应头)
    pub location: Option<String>,
}

/// ERP 接口
#[async_trait]
pub trait ErpClient: Send + Sync {
    /// 按过滤条件查询记录 (自动翻页)
    async fn fetch_records(&self, path: &str, filter: &Value) -> Result<Vec<Value>, ErpError>;

    /// 新建销售订单, 失败不重试
    async fn create_sales_order(
        &self,
        payload: &ConsolidatedPayload,
    ) -> Result<OrderConfirmation, ErpError>;

    async fn delete_sales_order(&self, order_id: &str) -> Result<(), ErpError>;
}

/// 列表接口的分页响应
#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<Value>,
    count: Option<usize>,
}

/// Spire REST 客户端
pub struct SpireClient {
    http: reqwest::Client,
    root_url: String,
    username: String,
    password: String,
    page_limit: usize,
}

impl SpireClient {
    pub fn new(config: &ErpConfig) -> Result<Self, ErpError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            root_url: config.root_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            page_limit: config.page_limit.max(1),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .basic_auth(&self.username, Some(&self.password))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ErpError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ErpError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ErpClient for SpireClient {
    async fn fetch_records(&self, path: &str, filter: &Value) -> Result<Vec<Value>, ErpError> {
        let filter = filter.to_string();
        let mut records = Vec::new();

        loop {
            let query = [
                ("filter", filter.clone()),
                ("start", records.len().to_string()),
                ("limit", self.page_limit.to_string()),
            ];
            let response = self.request(reqwest::Method::GET, path).query(&query).send().await?;
            let page: RecordPage = Self::check(response).await?.json().await?;

            let fetched = page.records.len();
            records.extend(page.records);
            tracing::debug!("Fetched {} records from {} ({} total)", fetched, path, records.len());

            // ERP 可能把每页限制在 page_limit 以下, 有 count 时以 count 为准
            let done = match page.count {
                Some(count) => fetched == 0 || records.len() >= count,
                None => fetched < self.page_limit,
            };
            if done {
                break;
            }
        }

        Ok(records)
    }

    async fn create_sales_order(
        &self,
        payload: &ConsolidatedPayload,
    ) -> Result<OrderConfirmation, ErpError> {
        let response = self
            .request(reqwest::Method::POST, "/sales/orders/")
            .json(payload)
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(OrderConfirmation {
            status: response.status().as_u16(),
            location: response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        })
    }

    async fn delete_sales_order(&self, order_id: &str) -> Result<(), ErpError> {
        if order_id.is_empty() || order_id.contains('/') {
            return Err(ErpError::InvalidOrderId(order_id.to_string()));
        }
        let path = format!("/sales/orders/{}", order_id);
        let response = self.request(reqwest::Method::DELETE, &path).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
