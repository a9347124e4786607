//! vCloud Director 1.5 数据模型
//!
//! vCloud 1.5 的所有载荷均为 XML，此处只绑定编排流程用到的字段子集，
//! 未识别的元素/属性在反序列化时直接忽略。

use serde::{Deserialize, Serialize};

mod entity;
mod params;
mod query;
mod sections;
mod task;

pub use entity::{
    AvailableNetworks, Network, ResourceStatus, VApp, VAppChildren, VAppTemplate,
    TemplateChildren, Vdc, Vm,
};
pub use params::{
    ComposeVAppParams, DeployVAppParams, FenceMode, InstantiationParams, IpAddressAllocationMode,
    NetworkConfigSection, NetworkConfiguration, NetworkConnection, NetworkConnectionSection,
    SourcedCompositionItem, UndeployPowerAction, UndeployVAppParams, VAppNetworkConfiguration,
};
pub use query::{
    QueryResultRecords, QueryResultVAppRecord, QueryResultVAppTemplateRecord, QueryResultVdcRecord,
};
pub use sections::{
    GuestCustomizationSection, HostResource, MsgType, ResourceItem, ResourceKind,
    VirtualHardwareSection,
};
pub use task::{Task, TaskList, TaskStatus};

/// XML 命名空间
pub mod ns {
    pub const VCLOUD: &str = "http://www.vmware.com/vcloud/v1.5";
    pub const OVF: &str = "http://schemas.dmtf.org/ovf/envelope/1";
    pub const RASD: &str =
        "http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_ResourceAllocationSettingData";

    pub(crate) fn vcloud() -> String {
        VCLOUD.to_string()
    }

    pub(crate) fn ovf() -> String {
        OVF.to_string()
    }

    pub(crate) fn rasd() -> String {
        RASD.to_string()
    }
}

/// 媒体类型 (请求体 Content-Type / 响应识别)
pub mod media_type {
    pub const ERROR: &str = "application/vnd.vmware.vcloud.error+xml";
    pub const COMPOSE_VAPP_PARAMS: &str = "application/vnd.vmware.vcloud.composeVAppParams+xml";
    pub const DEPLOY_VAPP_PARAMS: &str = "application/vnd.vmware.vcloud.deployVAppParams+xml";
    pub const UNDEPLOY_VAPP_PARAMS: &str =
        "application/vnd.vmware.vcloud.undeployVAppParams+xml";
    pub const VIRTUAL_HARDWARE_SECTION: &str =
        "application/vnd.vmware.vcloud.virtualHardwareSection+xml";
    pub const ANY_XML: &str = "application/*+xml;version=1.5";
}

/// 实体引用（href + 可选名称/类型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

impl Reference {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: None,
            type_: None,
        }
    }

    pub fn named(href: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            name: Some(name.into()),
            type_: None,
        }
    }
}

/// 实体间关系链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "@rel")]
    pub rel: String,

    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(rename = "@name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 常用链接关系
pub mod rel {
    pub const UP: &str = "up";
    pub const NEXT_PAGE: &str = "nextPage";
    pub const LAST_PAGE: &str = "lastPage";
}

/// vCloud 结构化错误载荷
///
/// 失败响应的 `<Error>` 文档: majorErrorCode 对齐 HTTP 状态类别，
/// minorErrorCode 为服务端细分原因（如 OPERATION_LIMITS_EXCEEDED）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Error")]
pub struct VcloudError {
    #[serde(rename = "@majorErrorCode")]
    pub major_error_code: String,

    #[serde(rename = "@minorErrorCode")]
    pub minor_error_code: String,

    #[serde(rename = "@message")]
    pub message: String,
}

impl VcloudError {
    /// 从 XML 文本解析错误载荷，格式不符返回 None
    ///
    /// 三个属性缺一即视为格式不符。
    pub fn from_xml(body: &str) -> Option<Self> {
        quick_xml::de::from_str(body).ok()
    }
}

impl std::fmt::Display for VcloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] {}",
            self.major_error_code, self.minor_error_code, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vcloud_error() {
        let xml = r#"<Error xmlns="http://www.vmware.com/vcloud/v1.5" minorErrorCode="OPERATION_LIMITS_EXCEEDED" message="The maximum number of simultaneous operations for user &quot;myname&quot; on organization &quot;my-org&quot; has been reached." majorErrorCode="400"></Error>"#;
        let err = VcloudError::from_xml(xml).expect("应能解析错误载荷");
        assert_eq!(err.minor_error_code, "OPERATION_LIMITS_EXCEEDED");
        assert_eq!(err.major_error_code, "400");
        assert!(err.message.contains("my-org"));
    }

    #[test]
    fn test_parse_vcloud_error_malformed() {
        assert!(VcloudError::from_xml("not xml at all").is_none());
        assert!(VcloudError::from_xml("<Unexpected/>").is_none());
    }

    #[test]
    fn test_reference_roundtrip() {
        let reference = Reference::named("https://acme.com/api/network/net-1", "public");
        let xml = quick_xml::se::to_string(&reference).unwrap();
        assert!(xml.contains(r#"href="https://acme.com/api/network/net-1""#));
        assert!(xml.contains(r#"name="public""#));
    }
}
