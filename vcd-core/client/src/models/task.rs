//! 异步任务模型
//!
//! vCloud 的每个变更操作（compose/deploy/undeploy/编辑硬件/删除）都返回
//! 一个 Task 句柄，状态只能通过按 href 重新拉取来推进，本地不做任何缓存。

use serde::{Deserialize, Serialize};

use super::{Link, VcloudError};

/// 服务端异步任务句柄
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "Task")]
pub struct Task {
    /// 任务自引用，重新拉取状态用
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    /// 触发该任务的操作描述
    #[serde(rename = "@operation", default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    #[serde(rename = "@status")]
    pub status: TaskStatus,

    #[serde(rename = "Link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    /// 任务失败时的错误详情
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VcloudError>,
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// 排队中
    Queued,
    /// 预运行
    PreRunning,
    /// 运行中
    Running,
    /// 成功结束
    Success,
    /// 失败结束
    Error,
    /// 已取消
    Canceled,
    /// 已中止
    Aborted,
}

impl TaskStatus {
    /// 是否已到达终态（成功/失败/取消/中止）
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Success | TaskStatus::Error | TaskStatus::Canceled | TaskStatus::Aborted
        )
    }
}

/// `<Tasks>` 包装元素
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    #[serde(rename = "Task", default)]
    pub tasks: Vec<Task>,
}
