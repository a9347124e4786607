//! vCloud 计算适配器
//!
//! 把 vCloud Director 1.5 的 vApp/VM 模型适配成通用计算服务的节点
//! 生命周期操作：置备（compose -> 硬件定制 -> 部署开机 -> 提取凭据）、
//! 销毁（undeploy -> remove）、列举与电源操作。所有异步任务通过
//! `TaskPoller` 做有上界的等待，请求级限流重试在 vcd-client 内完成。
//!
//! # 示例
//!
//! ```ignore
//! use std::sync::Arc;
//! use vcd_client::VcdClient;
//! use vcd_compute::{ComputeAdapter, ProviderConfig, VcdComputeAdapter};
//!
//! let config = ProviderConfig::load()?;
//! let client = VcdClient::new(
//!     &config.endpoint,
//!     &config.session_token,
//!     config.client_config(),
//! )?;
//! let adapter = VcdComputeAdapter::new(Arc::new(client), &config)?;
//!
//! let node = adapter.create_node("web", "web-1", &template).await?;
//! adapter.destroy_node(&node.id).await?;
//! ```

pub mod adapter;
pub mod api;
pub mod config;
pub mod hardware;
pub mod poller;

pub use adapter::{
    ComputeAdapter, LoginCredentials, NodeAndCredentials, NodeTemplate, TemplateOptions,
    VcdComputeAdapter,
};
pub use api::{DirectorApi, TaskSource};
pub use config::{PollConfig, ProviderConfig, RetryConfig, TimeoutConfig};
pub use hardware::{enumerate_profiles, HardwareBounds, HardwareProfile};
pub use poller::{PollPolicy, TaskPoller};

use thiserror::Error;

/// 计算适配器错误
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("未找到匹配的网络: {0}")]
    NetworkNotFound(String),

    #[error("模板不可用: {0}")]
    TemplateUnusable(String),

    #[error("硬件规格缺失: {0}")]
    MissingHardwareSpec(String),

    #[error("无效的硬件档位: {0}")]
    InvalidHardwareProfile(String),

    #[error("置备失败: {0}")]
    Provision(String),

    #[error("销毁失败: {0}")]
    Destroy(String),

    #[error("不支持的操作: {0}")]
    Unsupported(String),

    #[error("API 调用失败: {0}")]
    Api(#[from] vcd_client::VcdError),
}

pub type Result<T> = std::result::Result<T, ComputeError>;
