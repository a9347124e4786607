//! 查询服务结果模型
//!
//! `GET /query?type=...&format=records` 的分页结果，翻页沿
//! `nextPage` 链接进行。

use serde::{Deserialize, Serialize};

use super::Link;

/// 查询结果页
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "QueryResultRecords")]
pub struct QueryResultRecords {
    #[serde(rename = "@page", default)]
    pub page: u32,

    #[serde(rename = "@pageSize", default)]
    pub page_size: u32,

    #[serde(rename = "@total", default)]
    pub total: u64,

    #[serde(rename = "Link", default)]
    pub links: Vec<Link>,

    #[serde(rename = "VAppRecord", default)]
    pub vapp_records: Vec<QueryResultVAppRecord>,

    #[serde(rename = "VAppTemplateRecord", default)]
    pub template_records: Vec<QueryResultVAppTemplateRecord>,

    #[serde(rename = "OrgVdcRecord", default)]
    pub vdc_records: Vec<QueryResultVdcRecord>,
}

impl QueryResultRecords {
    /// 下一页链接
    pub fn next_page(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == super::rel::NEXT_PAGE)
            .map(|l| l.href.as_str())
    }
}

/// vApp 查询记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResultVAppRecord {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "@isDeployed", default, skip_serializing_if = "Option::is_none")]
    pub is_deployed: Option<bool>,
}

/// vApp 模板查询记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResultVAppTemplateRecord {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@vdcName", default, skip_serializing_if = "Option::is_none")]
    pub vdc_name: Option<String>,

    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// vDC 查询记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResultVdcRecord {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@name", default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_records_pagination() {
        let xml = r#"<QueryResultRecords xmlns="http://www.vmware.com/vcloud/v1.5" total="300" page="1" pageSize="128" href="https://acme.com/api/query?type=vApp&amp;page=1">
            <Link rel="nextPage" href="https://acme.com/api/query?type=vApp&amp;page=2&amp;pageSize=128&amp;format=records"/>
            <Link rel="lastPage" href="https://acme.com/api/query?type=vApp&amp;page=3&amp;pageSize=128&amp;format=records"/>
            <VAppRecord href="https://acme.com/api/vApp/vapp-1" name="web-1" status="POWERED_ON" isDeployed="true"/>
            <VAppRecord href="https://acme.com/api/vApp/vapp-2" name="web-2" status="POWERED_OFF" isDeployed="false"/>
        </QueryResultRecords>"#;
        let records: QueryResultRecords = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(records.total, 300);
        assert_eq!(records.vapp_records.len(), 2);
        assert!(records.next_page().unwrap().contains("page=2"));
    }

    #[test]
    fn test_query_records_last_page() {
        let xml = r#"<QueryResultRecords total="1" page="1" pageSize="128">
            <VAppTemplateRecord href="https://acme.com/api/vAppTemplate/vappTemplate-1" name="centos-7" vdcName="dc-1"/>
        </QueryResultRecords>"#;
        let records: QueryResultRecords = quick_xml::de::from_str(xml).unwrap();
        assert!(records.next_page().is_none());
        assert_eq!(records.template_records.len(), 1);
    }
}
