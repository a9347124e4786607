//! 提供方配置管理
//!
//! 支持从多个源加载配置:
//! - 环境变量 (优先级最高)
//! - 配置文件 (TOML)
//! - 默认值 (优先级最低)
//!
//! 配置文件搜索路径 (按优先级):
//! 1. `VCD_PROVIDER_CONFIG` 环境变量指定的路径
//! 2. `./vcd.toml` (当前目录)
//! 3. `~/.config/vcd/provider.toml` (用户配置目录)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vcd_client::VcdConfig;

use crate::hardware::HardwareBounds;
use crate::poller::PollPolicy;
use crate::{ComputeError, Result};

// ============================================
// 核心配置结构
// ============================================

/// 提供方配置 (顶层)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API 入口 (形如 https://vcd.example.com/api)
    #[serde(default)]
    pub endpoint: String,

    /// 预先获取的会话令牌
    #[serde(default)]
    pub session_token: String,

    /// 是否验证 SSL 证书
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// 请求级重试
    #[serde(default)]
    pub retry: RetryConfig,

    /// 编排超时
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// 任务轮询节奏
    #[serde(default)]
    pub poll: PollConfig,

    /// 硬件档位合成边界
    #[serde(default)]
    pub hardware: HardwareBounds,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            session_token: String::new(),
            verify_ssl: default_verify_ssl(),
            retry: RetryConfig::default(),
            timeouts: TimeoutConfig::default(),
            poll: PollConfig::default(),
            hardware: HardwareBounds::default(),
        }
    }
}

/// 请求级重试配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// 最大重试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// 首次退避延迟 (毫秒)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// 可重试的 minorErrorCode 集合 (4xx)
    #[serde(default = "default_retryable_codes")]
    pub retryable_error_codes: Vec<String>,

    /// 可重试的服务端错误码集合 (5xx, 必须为空)
    #[serde(default)]
    pub retryable_server_codes: Vec<String>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            retryable_error_codes: default_retryable_codes(),
            retryable_server_codes: Vec::new(),
        }
    }
}

/// 编排超时配置 (毫秒)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// 通用任务完成超时
    #[serde(default = "default_task_completed_ms")]
    pub task_completed_ms: u64,

    /// 节点就绪超时 (compose/硬件编辑/开机等待用)
    #[serde(default = "default_node_running_ms")]
    pub node_running_ms: u64,

    /// 节点销毁超时 (undeploy/remove 等待用)
    #[serde(default = "default_node_terminated_ms")]
    pub node_terminated_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            task_completed_ms: default_task_completed_ms(),
            node_running_ms: default_node_running_ms(),
            node_terminated_ms: default_node_terminated_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn task_completed(&self) -> Duration {
        Duration::from_millis(self.task_completed_ms)
    }

    pub fn node_running(&self) -> Duration {
        Duration::from_millis(self.node_running_ms)
    }

    pub fn node_terminated(&self) -> Duration {
        Duration::from_millis(self.node_terminated_ms)
    }
}

/// 任务轮询配置 (毫秒)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// 起始轮询间隔
    #[serde(default = "default_poll_period_ms")]
    pub period_ms: u64,

    /// 轮询间隔上限
    #[serde(default = "default_poll_max_period_ms")]
    pub max_period_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            period_ms: default_poll_period_ms(),
            max_period_ms: default_poll_max_period_ms(),
        }
    }
}

impl PollConfig {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy {
            period: Duration::from_millis(self.period_ms),
            max_period: Duration::from_millis(self.max_period_ms),
        }
    }
}

impl ProviderConfig {
    /// 按搜索路径加载配置并叠加环境变量
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("加载提供方配置: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            ComputeError::Config(format!("读取配置文件 {} 失败: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ComputeError::Config(format!("解析配置文件 {} 失败: {}", path.display(), e))
        })
    }

    fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = env::var("VCD_PROVIDER_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let local = PathBuf::from("vcd.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("vcd").join("provider.toml");
            if user.exists() {
                return Some(user);
            }
        }

        None
    }

    /// 用环境变量覆盖配置
    pub fn apply_env(&mut self) {
        if let Ok(endpoint) = env::var("VCD_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(token) = env::var("VCD_SESSION_TOKEN") {
            self.session_token = token;
        }
        if let Some(max_retries) = env_parse("VCD_MAX_RETRIES") {
            self.retry.max_retries = max_retries;
        }
        if let Some(delay) = env_parse("VCD_RETRY_DELAY_MS") {
            self.retry.retry_delay_ms = delay;
        }
        if let Ok(codes) = env::var("VCD_RETRYABLE_ERROR_CODES") {
            self.retry.retryable_error_codes = codes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(timeout) = env_parse("VCD_TASK_TIMEOUT_MS") {
            self.timeouts.task_completed_ms = timeout;
        }
        if let Some(timeout) = env_parse("VCD_NODE_RUNNING_TIMEOUT_MS") {
            self.timeouts.node_running_ms = timeout;
        }
        if let Some(timeout) = env_parse("VCD_NODE_TERMINATED_TIMEOUT_MS") {
            self.timeouts.node_terminated_ms = timeout;
        }
    }

    /// 转换为客户端配置
    pub fn client_config(&self) -> VcdConfig {
        VcdConfig {
            max_retries: self.retry.max_retries,
            retry_delay_ms: self.retry.retry_delay_ms,
            retryable_error_codes: self.retry.retryable_error_codes.clone(),
            retryable_server_codes: self.retry.retryable_server_codes.clone(),
            verify_ssl: self.verify_ssl,
            ..VcdConfig::default()
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

// ============================================
// 默认值函数
// ============================================

fn default_verify_ssl() -> bool {
    true
}

fn default_max_retries() -> u32 {
    6
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_retryable_codes() -> Vec<String> {
    vec![
        "OPERATION_LIMITS_EXCEEDED".to_string(),
        "BUSY_ENTITY".to_string(),
    ]
}

fn default_task_completed_ms() -> u64 {
    1_200_000
}

fn default_node_running_ms() -> u64 {
    300_000
}

fn default_node_terminated_ms() -> u64 {
    300_000
}

fn default_poll_period_ms() -> u64 {
    250
}

fn default_poll_max_period_ms() -> u64 {
    5_000
}
