//! vCloud Director 1.5 API 客户端
//!
//! 提供与 vCloud Director 1.5 REST/XML API 交互的客户端实现。
//!
//! # 功能
//!
//! - **vApp 管理** (`VAppApi`): 查询、deploy/undeploy、删除
//! - **虚拟数据中心** (`VdcApi`): vDC 查询、网络解析、composeVApp
//! - **虚拟机管理** (`VmApi`): 查询、硬件分节读写、电源操作
//! - **模板管理** (`VAppTemplateApi`): vApp 模板查询
//! - **任务跟踪** (`TaskApi`): 异步任务状态拉取
//! - **查询服务** (`QueryApi`): 分页列举 vApp/模板/vDC
//! - **请求级重试** (`retry`): 4xx 限流错误的分类与有界指数退避
//!
//! # 示例
//!
//! ```ignore
//! use vcd_client::{VcdClient, VcdConfig};
//!
//! // 会话令牌由调用方预先获取
//! let client = VcdClient::new("https://vcd.example.com/api", token, VcdConfig::default())?;
//!
//! // 查询 vDC 并 compose vApp
//! let vdc = client.vdc().get("urn:vcloud:vdc:dc-1").await?;
//! let vapp = client.vdc().compose_vapp(&vdc, &params).await?;
//!
//! // 跟踪第一个任务
//! let task = client.task().get(&vapp.tasks()[0].href).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod retry;

pub use client::{VcdClient, VcdConfig};
pub use error::{Result, VcdError};

// 导出 API 模块
pub use api::{QueryApi, TaskApi, VAppApi, VAppTemplateApi, VdcApi, VmApi};

// 导出重试策略
pub use retry::{parse_error_payload, BackoffPolicy, ClientErrorRetryPolicy, ServerErrorRetryPolicy};

// 导出数据模型
pub use models::{
    // 通用
    Link, Reference, VcloudError,

    // 实体
    Network, ResourceStatus, Task, TaskStatus, VApp, VAppTemplate, Vdc, Vm,

    // 分节
    GuestCustomizationSection, HostResource, MsgType, ResourceItem, ResourceKind,
    VirtualHardwareSection,

    // 操作参数
    ComposeVAppParams, DeployVAppParams, FenceMode, InstantiationParams,
    IpAddressAllocationMode, NetworkConfigSection, NetworkConfiguration, NetworkConnection,
    NetworkConnectionSection, SourcedCompositionItem, UndeployPowerAction, UndeployVAppParams,
    VAppNetworkConfiguration,

    // 查询记录
    QueryResultRecords, QueryResultVAppRecord, QueryResultVAppTemplateRecord, QueryResultVdcRecord,
};
