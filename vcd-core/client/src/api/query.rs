//! 查询服务 API
//!
//! 结果分页返回，沿 nextPage 链接取完所有页。

use tracing::debug;

use crate::client::VcdClient;
use crate::error::Result;
use crate::models::{
    QueryResultRecords, QueryResultVAppRecord, QueryResultVAppTemplateRecord, QueryResultVdcRecord,
};

/// 每页记录数
const DEFAULT_PAGE_SIZE: u32 = 128;

/// 查询服务 API
pub struct QueryApi<'a> {
    client: &'a VcdClient,
}

impl<'a> QueryApi<'a> {
    pub(crate) fn new(client: &'a VcdClient) -> Self {
        Self { client }
    }

    /// 查询指定类型的全部记录页
    pub async fn query_all(&self, entity_type: &str) -> Result<Vec<QueryResultRecords>> {
        let mut pages = Vec::new();
        let mut url = format!(
            "{}/query?type={}&pageSize={}&format=records",
            self.client.base_url(),
            entity_type,
            DEFAULT_PAGE_SIZE
        );

        loop {
            debug!("查询 {} 记录: {}", entity_type, url);
            let page: QueryResultRecords = self.client.get(&url).await?;
            let next = page.next_page().map(str::to_string);
            pages.push(page);
            match next {
                Some(next_url) => url = next_url,
                None => break,
            }
        }

        Ok(pages)
    }

    /// 查询所有 vApp 记录
    pub async fn vapps(&self) -> Result<Vec<QueryResultVAppRecord>> {
        Ok(self
            .query_all("vApp")
            .await?
            .into_iter()
            .flat_map(|p| p.vapp_records)
            .collect())
    }

    /// 查询所有 vApp 模板记录
    pub async fn vapp_templates(&self) -> Result<Vec<QueryResultVAppTemplateRecord>> {
        Ok(self
            .query_all("vAppTemplate")
            .await?
            .into_iter()
            .flat_map(|p| p.template_records)
            .collect())
    }

    /// 查询所有 vDC 记录
    pub async fn vdcs(&self) -> Result<Vec<QueryResultVdcRecord>> {
        Ok(self
            .query_all("orgVdc")
            .await?
            .into_iter()
            .flat_map(|p| p.vdc_records)
            .collect())
    }
}
