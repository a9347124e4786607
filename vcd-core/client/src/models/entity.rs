//! 资源实体模型
//!
//! vApp（虚拟机容器）、Vm、vApp 模板、vDC 与组织网络。

use serde::{Deserialize, Serialize};

use super::sections::GuestCustomizationSection;
use super::task::{Task, TaskList};
use super::{rel, Link, NetworkConfiguration, Reference};

/// 资源实体状态（vCloud status 码值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    FailedCreation,
    Unresolved,
    Resolved,
    Deployed,
    Suspended,
    PoweredOn,
    WaitingForInput,
    Unknown,
    Unrecognized,
    PoweredOff,
    InconsistentState,
    Mixed,
    /// 未收录的码值
    Other(i32),
}

impl ResourceStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => ResourceStatus::FailedCreation,
            0 => ResourceStatus::Unresolved,
            1 => ResourceStatus::Resolved,
            2 => ResourceStatus::Deployed,
            3 => ResourceStatus::Suspended,
            4 => ResourceStatus::PoweredOn,
            5 => ResourceStatus::WaitingForInput,
            6 => ResourceStatus::Unknown,
            7 => ResourceStatus::Unrecognized,
            8 => ResourceStatus::PoweredOff,
            9 => ResourceStatus::InconsistentState,
            10 => ResourceStatus::Mixed,
            other => ResourceStatus::Other(other),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ResourceStatus::FailedCreation => "创建失败",
            ResourceStatus::Unresolved => "未解析",
            ResourceStatus::Resolved => "已解析",
            ResourceStatus::Deployed => "已部署",
            ResourceStatus::Suspended => "挂起",
            ResourceStatus::PoweredOn => "运行中",
            ResourceStatus::WaitingForInput => "等待输入",
            ResourceStatus::Unknown => "未知",
            ResourceStatus::Unrecognized => "无法识别",
            ResourceStatus::PoweredOff => "关机",
            ResourceStatus::InconsistentState => "状态不一致",
            ResourceStatus::Mixed => "混合状态",
            ResourceStatus::Other(_) => "未收录",
        }
    }
}

/// 虚拟机容器（vApp）
///
/// 容器上仍有未终结任务时不可视为就绪。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "VApp")]
pub struct VApp {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@status", default)]
    pub status: i32,

    #[serde(rename = "@deployed", default)]
    pub deployed: bool,

    #[serde(rename = "Link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    #[serde(rename = "Tasks", default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<TaskList>,

    #[serde(rename = "Children", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<VAppChildren>,
}

impl VApp {
    /// 容器上的在途/历史任务（无 `<Tasks>` 元素时为空）
    pub fn tasks(&self) -> &[Task] {
        self.task_list.as_ref().map_or(&[], |t| &t.tasks)
    }

    /// 子虚拟机列表
    pub fn vms(&self) -> &[Vm] {
        self.children.as_ref().map_or(&[], |c| &c.vms)
    }

    pub fn resource_status(&self) -> ResourceStatus {
        ResourceStatus::from_code(self.status)
    }
}

/// `<Children>` 包装元素
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VAppChildren {
    #[serde(rename = "Vm", default)]
    pub vms: Vec<Vm>,
}

/// 虚拟机
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "Vm")]
pub struct Vm {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@status", default)]
    pub status: i32,

    #[serde(rename = "@deployed", default)]
    pub deployed: bool,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(rename = "Link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    #[serde(rename = "Tasks", default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<TaskList>,

    #[serde(
        rename = "GuestCustomizationSection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub guest_customization: Option<GuestCustomizationSection>,
}

impl Vm {
    pub fn tasks(&self) -> &[Task] {
        self.task_list.as_ref().map_or(&[], |t| &t.tasks)
    }

    pub fn resource_status(&self) -> ResourceStatus {
        ResourceStatus::from_code(self.status)
    }

    /// 所属 vApp 的 href（`up` 链接）
    pub fn parent_vapp_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == rel::UP)
            .map(|l| l.href.as_str())
    }

    pub fn to_reference(&self) -> Reference {
        Reference {
            href: self.href.clone(),
            name: Some(self.name.clone()),
            type_: self.type_.clone(),
        }
    }
}

/// vApp 模板
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "VAppTemplate")]
pub struct VAppTemplate {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "Children", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<TemplateChildren>,
}

impl VAppTemplate {
    /// 模板内嵌的 VM 定义
    pub fn vms(&self) -> &[Vm] {
        self.children.as_ref().map_or(&[], |c| &c.vms)
    }
}

/// 模板 `<Children>` 包装元素
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateChildren {
    #[serde(rename = "Vm", default)]
    pub vms: Vec<Vm>,
}

/// 虚拟数据中心（vDC）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "Vdc")]
pub struct Vdc {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "Link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    #[serde(
        rename = "AvailableNetworks",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_networks: Option<AvailableNetworks>,
}

impl Vdc {
    /// vDC 内可用网络的引用列表
    pub fn networks(&self) -> &[Reference] {
        self.available_networks.as_ref().map_or(&[], |n| &n.networks)
    }
}

/// `<AvailableNetworks>` 包装元素
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableNetworks {
    #[serde(rename = "Network", default)]
    pub networks: Vec<Reference>,
}

/// 组织网络
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "OrgNetwork")]
pub struct Network {
    #[serde(rename = "@href")]
    pub href: String,

    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "Configuration", default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<NetworkConfiguration>,
}

impl Network {
    /// 网络的隔离模式（无配置时为 None）
    pub fn fence_mode(&self) -> Option<super::FenceMode> {
        self.configuration.as_ref().map(|c| c.fence_mode)
    }

    pub fn to_reference(&self) -> Reference {
        Reference::named(self.href.clone(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn test_vapp_deserialization() {
        let xml = r#"<VApp xmlns="http://www.vmware.com/vcloud/v1.5" href="https://acme.com/api/vApp/vapp-1" id="urn:vcloud:vapp:1" name="web-1" status="8" deployed="false">
            <Link rel="up" href="https://acme.com/api/vdc/dc-1"/>
            <Tasks>
                <Task status="running" href="https://acme.com/api/task/t-1" operation="Composing"/>
            </Tasks>
            <Children>
                <Vm href="https://acme.com/api/vApp/vm-1" id="urn:vcloud:vm:1" name="web-1-vm" status="8">
                    <Link rel="up" href="https://acme.com/api/vApp/vapp-1"/>
                </Vm>
            </Children>
        </VApp>"#;
        let vapp: VApp = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(vapp.resource_status(), ResourceStatus::PoweredOff);
        assert_eq!(vapp.tasks().len(), 1);
        assert_eq!(vapp.tasks()[0].status, TaskStatus::Running);
        assert_eq!(vapp.vms().len(), 1);
        assert_eq!(
            vapp.vms()[0].parent_vapp_href(),
            Some("https://acme.com/api/vApp/vapp-1")
        );
    }

    #[test]
    fn test_vapp_without_tasks_or_children() {
        let xml = r#"<VApp href="https://acme.com/api/vApp/vapp-2" status="4"/>"#;
        let vapp: VApp = quick_xml::de::from_str(xml).unwrap();
        assert!(vapp.tasks().is_empty());
        assert!(vapp.vms().is_empty());
        assert_eq!(vapp.resource_status(), ResourceStatus::PoweredOn);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ResourceStatus::from_code(4), ResourceStatus::PoweredOn);
        assert_eq!(ResourceStatus::from_code(8), ResourceStatus::PoweredOff);
        assert_eq!(ResourceStatus::from_code(-1), ResourceStatus::FailedCreation);
        assert_eq!(ResourceStatus::from_code(42), ResourceStatus::Other(42));
        assert_eq!(ResourceStatus::PoweredOn.display_name(), "运行中");
    }

    #[test]
    fn test_vdc_networks() {
        let xml = r#"<Vdc href="https://acme.com/api/vdc/dc-1" name="dc-1">
            <AvailableNetworks>
                <Network href="https://acme.com/api/network/net-1" name="isolated-net"/>
                <Network href="https://acme.com/api/network/net-2" name="routed-net"/>
            </AvailableNetworks>
        </Vdc>"#;
        let vdc: Vdc = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(vdc.networks().len(), 2);
        assert_eq!(vdc.networks()[1].name.as_deref(), Some("routed-net"));
    }
}
