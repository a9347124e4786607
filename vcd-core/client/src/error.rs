//! vCloud Director 客户端错误定义

use thiserror::Error;

use crate::models::VcloudError;

/// vCloud Director 客户端错误类型
#[derive(Error, Debug)]
pub enum VcdError {
    #[error("HTTP 错误: {0}")]
    Http(String),

    #[error("API 错误 [{status}]: {message}")]
    Api {
        /// HTTP 状态码
        status: u16,
        /// 服务端返回的错误描述
        message: String,
        /// 结构化错误载荷（可解析时）
        error: Option<VcloudError>,
    },

    #[error("XML 解析错误: {0}")]
    Parse(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("资源不存在: {0}")]
    NotFound(String),

    #[error("无效的实体标识: {0}")]
    InvalidId(String),
}

impl VcdError {
    /// 返回 API 错误对应的 HTTP 状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            VcdError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 服务端是否报告了 5xx 错误
    pub fn is_server_error(&self) -> bool {
        matches!(self, VcdError::Api { status, .. } if *status >= 500)
    }
}

/// vCloud Director 客户端结果类型
pub type Result<T> = std::result::Result<T, VcdError>;
