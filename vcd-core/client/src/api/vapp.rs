//! vApp API
//!
//! deploy/undeploy/remove 均为异步操作，返回任务句柄。

use tracing::info;

use crate::client::VcdClient;
use crate::error::Result;
use crate::models::{media_type, DeployVAppParams, Task, UndeployVAppParams, VApp};

/// vApp API
pub struct VAppApi<'a> {
    client: &'a VcdClient,
}

impl<'a> VAppApi<'a> {
    pub(crate) fn new(client: &'a VcdClient) -> Self {
        Self { client }
    }

    /// 查询 vApp 详情；已删除（403/404）返回 None
    pub async fn get(&self, vapp_ref: &str) -> Result<Option<VApp>> {
        let href = self.client.entity_href(vapp_ref)?;
        self.client.get_optional(&href).await
    }

    /// 部署 vApp（可选同时开机）
    pub async fn deploy(&self, vapp_href: &str, params: &DeployVAppParams) -> Result<Task> {
        info!("部署 vApp: {} (powerOn: {})", vapp_href, params.power_on);
        let url = format!("{}/action/deploy", vapp_href);
        self.client
            .post(&url, params, media_type::DEPLOY_VAPP_PARAMS)
            .await
    }

    /// 取消部署 vApp（带关机动作）
    pub async fn undeploy(&self, vapp_href: &str, params: &UndeployVAppParams) -> Result<Task> {
        info!("取消部署 vApp: {}", vapp_href);
        let url = format!("{}/action/undeploy", vapp_href);
        self.client
            .post(&url, params, media_type::UNDEPLOY_VAPP_PARAMS)
            .await
    }

    /// 删除 vApp（必须先 undeploy）
    pub async fn remove(&self, vapp_href: &str) -> Result<Task> {
        info!("删除 vApp: {}", vapp_href);
        self.client.delete(vapp_href).await
    }
}
