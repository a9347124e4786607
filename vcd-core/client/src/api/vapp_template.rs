//! vApp 模板 API

use tracing::debug;

use crate::client::VcdClient;
use crate::error::Result;
use crate::models::VAppTemplate;

/// vApp 模板 API
pub struct VAppTemplateApi<'a> {
    client: &'a VcdClient,
}

impl<'a> VAppTemplateApi<'a> {
    pub(crate) fn new(client: &'a VcdClient) -> Self {
        Self { client }
    }

    /// 查询模板详情（含内嵌 VM 定义）
    pub async fn get(&self, template_ref: &str) -> Result<VAppTemplate> {
        debug!("查询 vApp 模板: {}", template_ref);
        let href = self.client.entity_href(template_ref)?;
        self.client.get(&href).await
    }
}
