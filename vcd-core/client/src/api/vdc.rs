//! 虚拟数据中心 API

use tracing::info;

use crate::client::VcdClient;
use crate::error::Result;
use crate::models::{media_type, ComposeVAppParams, Network, Reference, VApp, Vdc};

/// 虚拟数据中心 API
pub struct VdcApi<'a> {
    client: &'a VcdClient,
}

impl<'a> VdcApi<'a> {
    pub(crate) fn new(client: &'a VcdClient) -> Self {
        Self { client }
    }

    /// 查询 vDC 详情
    pub async fn get(&self, vdc_ref: &str) -> Result<Vdc> {
        let href = self.client.entity_href(vdc_ref)?;
        self.client.get(&href).await
    }

    /// 解析 vDC 可用网络引用为网络详情（含隔离模式）
    pub async fn get_network(&self, network_ref: &Reference) -> Result<Network> {
        self.client.get(&network_ref.href).await
    }

    /// 在 vDC 中 compose vApp
    ///
    /// 异步操作：返回的 vApp 携带在途任务列表，第一个任务是 compose
    /// 的完成信号。
    pub async fn compose_vapp(&self, vdc: &Vdc, params: &ComposeVAppParams) -> Result<VApp> {
        info!("创建 vApp: {} (vDC: {})", params.name, vdc.name);
        let url = format!("{}/action/composeVApp", vdc.href);
        self.client
            .post(&url, params, media_type::COMPOSE_VAPP_PARAMS)
            .await
    }
}
