//! HTTP 重试策略
//!
//! vCloud 在并发压力下会把限流/实体占用以 400/403/409 加结构化错误载荷
//! （如 OPERATION_LIMITS_EXCEEDED）的形式返回。分类与退避都发生在请求
//! 管道内部，上层编排只会看到成功或终态错误。
//!
//! 注意与任务轮询区分：这里是请求级重试，轮询节奏见 vcd-compute 的 poller。

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Result, VcdError};
use crate::models::VcloudError;

/// 退避封顶系数（delay_start * 100，100ms 基数即封顶 10s）
const MAX_DELAY_FACTOR: u64 = 100;

/// 有界指数退避
///
/// 第 n 次失败后的延迟为 `delay_start * n²`：100ms 基数下依次为
/// 100ms、400ms、900ms、1.6s、2.5s。
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// 最大重试次数
    pub max_retries: u32,

    /// 首次退避延迟
    pub delay_start: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 6,
            delay_start: Duration::from_millis(100),
        }
    }
}

impl BackoffPolicy {
    pub fn new(max_retries: u32, delay_start: Duration) -> Self {
        Self {
            max_retries,
            delay_start,
        }
    }

    /// 第 `failure_count` 次失败后的退避延迟
    pub fn delay_for_attempt(&self, failure_count: u32) -> Duration {
        let factor = u64::from(failure_count)
            .saturating_pow(2)
            .min(MAX_DELAY_FACTOR);
        Duration::from_millis((self.delay_start.as_millis() as u64).saturating_mul(factor))
    }

    /// 失败次数是否已用尽重试预算
    pub fn exhausted(&self, failure_count: u32) -> bool {
        failure_count >= self.max_retries
    }
}

/// 解析失败响应中的 vCloud 错误载荷
///
/// 载荷缺失、Content-Type 不是 vCloud 错误类型或 XML 不合法时返回 None，
/// 调用方应按不可重试处理。
pub fn parse_error_payload(content_type: Option<&str>, body: &str) -> Option<VcloudError> {
    let content_type = content_type?;
    // 期望 "application/vnd.vmware.vcloud.error+xml;version=1.5"
    if !content_type
        .to_lowercase()
        .contains("vnd.vmware.vcloud.error+xml")
    {
        return None;
    }

    match VcloudError::from_xml(body) {
        Some(error) => Some(error),
        None => {
            warn!("vCloud 错误载荷解析失败, 按不可重试处理");
            None
        }
    }
}

/// 4xx 客户端错误重试分类器
///
/// 只有状态码为 400/403/409、携带可解析错误载荷且 minorErrorCode 命中
/// 配置集合的响应才会被重试。
#[derive(Debug, Clone)]
pub struct ClientErrorRetryPolicy {
    retryable_codes: HashSet<String>,
}

impl ClientErrorRetryPolicy {
    pub fn new<I, S>(retryable_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            retryable_codes: retryable_codes.into_iter().map(Into::into).collect(),
        }
    }

    /// 默认可重试码集合
    pub fn default_codes() -> Self {
        Self::new(["OPERATION_LIMITS_EXCEEDED", "BUSY_ENTITY"])
    }

    pub fn should_retry(&self, status: u16, content_type: Option<&str>, body: &str) -> bool {
        if !matches!(status, 400 | 403 | 409) {
            return false;
        }
        // HEAD 等请求可能没有响应体
        if body.is_empty() {
            return false;
        }

        match parse_error_payload(content_type, body) {
            Some(error) => {
                let retryable = self.retryable_codes.contains(&error.minor_error_code);
                if retryable {
                    debug!(
                        "命中可重试错误码 {} (HTTP {})",
                        error.minor_error_code, status
                    );
                }
                retryable
            }
            None => false,
        }
    }
}

/// 5xx 服务端错误重试分类器
///
/// 参考部署不重试任何服务端错误，码集合入参只是扩展点：给了非空集合
/// 视为配置错误，构造期即失败。
#[derive(Debug, Clone)]
pub struct ServerErrorRetryPolicy;

impl ServerErrorRetryPolicy {
    pub fn new(retryable_server_codes: &[String]) -> Result<Self> {
        if !retryable_server_codes.is_empty() {
            return Err(VcdError::Config(format!(
                "不支持可重试的服务端错误码, 但配置了 {:?}",
                retryable_server_codes
            )));
        }
        Ok(Self)
    }

    pub fn should_retry(&self, _status: u16, _content_type: Option<&str>, _body: &str) -> bool {
        false
    }
}
