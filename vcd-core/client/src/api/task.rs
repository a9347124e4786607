//! 任务 API
//!
//! 任务状态只能整体重新拉取，服务端没有增量接口。

use tracing::debug;

use crate::client::VcdClient;
use crate::error::Result;
use crate::models::Task;

/// 任务 API
pub struct TaskApi<'a> {
    client: &'a VcdClient,
}

impl<'a> TaskApi<'a> {
    pub(crate) fn new(client: &'a VcdClient) -> Self {
        Self { client }
    }

    /// 按 href 拉取任务当前状态
    pub async fn get(&self, task_href: &str) -> Result<Task> {
        debug!("查询任务状态: {}", task_href);
        self.client.get(task_href).await
    }

    /// 按 urn 标识拉取任务当前状态
    pub async fn get_by_id(&self, task_id: &str) -> Result<Task> {
        let href = self.client.entity_href(task_id)?;
        self.get(&href).await
    }
}
