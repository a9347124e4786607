//! vCloud Director 客户端核心实现

use std::time::Duration;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{QueryApi, TaskApi, VAppApi, VAppTemplateApi, VdcApi, VmApi};
use crate::error::{Result, VcdError};
use crate::models::media_type;
use crate::retry::{
    parse_error_payload, BackoffPolicy, ClientErrorRetryPolicy, ServerErrorRetryPolicy,
};

/// vCloud Director 客户端配置
#[derive(Debug, Clone)]
pub struct VcdConfig {
    /// 连接超时（秒）
    pub connect_timeout: u64,

    /// 请求超时（秒）
    pub request_timeout: u64,

    /// 最大重试次数
    pub max_retries: u32,

    /// 首次退避延迟（毫秒）
    pub retry_delay_ms: u64,

    /// 可重试的 minorErrorCode 集合（4xx 客户端错误）
    pub retryable_error_codes: Vec<String>,

    /// 可重试的服务端错误码集合（5xx, 必须为空，仅作扩展点）
    pub retryable_server_codes: Vec<String>,

    /// 是否验证 SSL 证书
    pub verify_ssl: bool,
}

impl Default for VcdConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            request_timeout: 60,
            max_retries: 6,
            retry_delay_ms: 100,
            retryable_error_codes: vec![
                "OPERATION_LIMITS_EXCEEDED".to_string(),
                "BUSY_ENTITY".to_string(),
            ],
            retryable_server_codes: Vec::new(),
            verify_ssl: true,
        }
    }
}

/// vCloud Director 1.5 客户端
///
/// 无内部可变状态：重试策略与退避参数构造后只读，可在并发任务间共享。
#[derive(Debug)]
pub struct VcdClient {
    /// API 基础 URL（形如 https://host/api）
    base_url: String,

    /// HTTP 客户端
    http_client: Client,

    /// 已获取的 x-vcloud-authorization 会话令牌
    session_token: String,

    /// 请求级退避
    backoff: BackoffPolicy,

    /// 4xx 重试分类器
    client_retry: ClientErrorRetryPolicy,

    /// 5xx 重试分类器
    server_retry: ServerErrorRetryPolicy,
}

impl VcdClient {
    /// 创建新的 vCloud Director 客户端
    ///
    /// `session_token` 为调用方预先获取的会话令牌，会话生命周期管理
    /// 不在本层职责内。
    pub fn new(base_url: &str, session_token: &str, config: VcdConfig) -> Result<Self> {
        url::Url::parse(base_url)
            .map_err(|e| VcdError::Config(format!("无效的 API 入口 {base_url}: {e}")))?;

        let server_retry = ServerErrorRetryPolicy::new(&config.retryable_server_codes)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| VcdError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            session_token: session_token.to_string(),
            backoff: BackoffPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_delay_ms),
            ),
            client_retry: ClientErrorRetryPolicy::new(config.retryable_error_codes),
            server_retry,
        })
    }

    /// 获取任务 API
    pub fn task(&self) -> TaskApi<'_> {
        TaskApi::new(self)
    }

    /// 获取虚拟数据中心 API
    pub fn vdc(&self) -> VdcApi<'_> {
        VdcApi::new(self)
    }

    /// 获取 vApp API
    pub fn vapp(&self) -> VAppApi<'_> {
        VAppApi::new(self)
    }

    /// 获取虚拟机 API
    pub fn vm(&self) -> VmApi<'_> {
        VmApi::new(self)
    }

    /// 获取 vApp 模板 API
    pub fn vapp_template(&self) -> VAppTemplateApi<'_> {
        VAppTemplateApi::new(self)
    }

    /// 获取查询服务 API
    pub fn query(&self) -> QueryApi<'_> {
        QueryApi::new(self)
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 把 `urn:vcloud:<kind>:<uuid>` 标识解析为实体 href；
    /// 已是 http(s) URL 的输入原样返回
    pub fn entity_href(&self, id: &str) -> Result<String> {
        if id.starts_with("http://") || id.starts_with("https://") {
            return Ok(id.to_string());
        }

        let mut parts = id.splitn(4, ':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("urn"), Some("vcloud"), Some(kind), Some(uuid)) if !uuid.is_empty() => {
                let path = match kind {
                    "vm" => format!("vApp/vm-{uuid}"),
                    "vapp" => format!("vApp/vapp-{uuid}"),
                    "vapptemplate" => format!("vAppTemplate/vappTemplate-{uuid}"),
                    "vdc" => format!("vdc/{uuid}"),
                    "task" => format!("task/{uuid}"),
                    "network" => format!("network/{uuid}"),
                    other => {
                        return Err(VcdError::InvalidId(format!("{id} (未知实体类型 {other})")))
                    }
                };
                Ok(format!("{}/{}", self.base_url, path))
            }
            _ => Err(VcdError::InvalidId(id.to_string())),
        }
    }

    /// GET 并反序列化
    pub(crate) async fn get<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let body = self.request_raw(Method::GET, url, None).await?;
        from_xml(&body)
    }

    /// GET；403/404 视为资源不存在，返回 None
    pub(crate) async fn get_optional<R: DeserializeOwned>(&self, url: &str) -> Result<Option<R>> {
        match self.request_raw(Method::GET, url, None).await {
            Ok(body) => Ok(Some(from_xml(&body)?)),
            Err(VcdError::Api {
                status: 403 | 404, ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST XML 请求体并反序列化响应
    pub(crate) async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        payload: &B,
        content_type: &str,
    ) -> Result<R> {
        let xml = to_xml(payload)?;
        let body = self
            .request_raw(Method::POST, url, Some((xml, content_type.to_string())))
            .await?;
        from_xml(&body)
    }

    /// POST 无请求体
    pub(crate) async fn post_empty<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let body = self.request_raw(Method::POST, url, None).await?;
        from_xml(&body)
    }

    /// PUT XML 请求体并反序列化响应
    pub(crate) async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        payload: &B,
        content_type: &str,
    ) -> Result<R> {
        let xml = to_xml(payload)?;
        let body = self
            .request_raw(Method::PUT, url, Some((xml, content_type.to_string())))
            .await?;
        from_xml(&body)
    }

    /// DELETE 并反序列化响应
    pub(crate) async fn delete<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let body = self.request_raw(Method::DELETE, url, None).await?;
        from_xml(&body)
    }

    /// 发送 HTTP 请求
    ///
    /// 失败响应先经重试分类器判定，可重试的失败在退避后原样重发；
    /// 重试预算用尽或不可重试时返回终态错误。
    async fn request_raw(
        &self,
        method: Method,
        url: &str,
        body: Option<(String, String)>,
    ) -> Result<String> {
        let mut failure_count: u32 = 0;

        loop {
            debug!("vCloud API 请求: {} {}", method, url);

            let mut request = self
                .http_client
                .request(method.clone(), url)
                .header("x-vcloud-authorization", &self.session_token)
                .header("Accept", media_type::ANY_XML);

            if let Some((xml, content_type)) = &body {
                request = request
                    .header("Content-Type", content_type.as_str())
                    .body(xml.clone());
            }

            let response = request
                .send()
                .await
                .map_err(|e| VcdError::Http(e.to_string()))?;

            let status = response.status();
            if status.is_success() {
                return response
                    .text()
                    .await
                    .map_err(|e| VcdError::Http(e.to_string()));
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let error_body = response.text().await.unwrap_or_default();

            let retryable = if status.is_server_error() {
                self.server_retry
                    .should_retry(status.as_u16(), content_type.as_deref(), &error_body)
            } else {
                self.client_retry
                    .should_retry(status.as_u16(), content_type.as_deref(), &error_body)
            };

            if retryable {
                failure_count += 1;
                if !self.backoff.exhausted(failure_count) {
                    let delay = self.backoff.delay_for_attempt(failure_count);
                    debug!(
                        "重试 {}/{}: {:?} 后重发 {} {}",
                        failure_count, self.backoff.max_retries, delay, method, url
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                warn!("重试预算用尽 ({} 次): {} {}", failure_count, method, url);
            }

            let error = parse_error_payload(content_type.as_deref(), &error_body);
            let message = error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| truncate_body(&error_body));
            warn!("API 请求失败: {} {} - {}", status, url, message);

            return Err(VcdError::Api {
                status: status.as_u16(),
                message,
                error,
            });
        }
    }
}

/// 序列化为 XML 文本
fn to_xml<B: Serialize>(payload: &B) -> Result<String> {
    quick_xml::se::to_string(payload).map_err(|e| VcdError::Parse(e.to_string()))
}

/// 从 XML 文本反序列化
fn from_xml<R: DeserializeOwned>(body: &str) -> Result<R> {
    quick_xml::de::from_str(body).map_err(|e| VcdError::Parse(e.to_string()))
}

/// 诊断信息里只保留响应体前 256 字符
fn truncate_body(body: &str) -> String {
    if body.len() <= 256 {
        body.to_string()
    } else {
        let mut end = 256;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
