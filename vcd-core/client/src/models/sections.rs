//! OVF 分节模型
//!
//! 只绑定硬件定制与来宾定制两个分节。硬件分节中的 `rasd:*` 子元素必须
//! 按字母序声明（OVF 规约的元素顺序），序列化时按字段声明顺序输出。

use serde::{Deserialize, Serialize};

use super::ns;

/// `<ovf:Info>` 说明文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgType {
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl MsgType {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// 来宾定制分节
///
/// compose 时作为实例化参数下发；deploy 之后服务端可能改写其中的
/// 管理员密码，因此取凭据前必须重新拉取。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "GuestCustomizationSection")]
pub struct GuestCustomizationSection {
    #[serde(rename = "@xmlns", default = "ns::vcloud")]
    pub xmlns: String,

    #[serde(rename = "@xmlns:ovf", default = "ns::ovf")]
    pub xmlns_ovf: String,

    #[serde(rename = "@href", default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(rename = "ovf:Info", default)]
    pub info: MsgType,

    #[serde(rename = "Enabled", default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(
        rename = "AdminPasswordEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_password_enabled: Option<bool>,

    #[serde(
        rename = "AdminPasswordAuto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_password_auto: Option<bool>,

    #[serde(rename = "AdminPassword", default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,

    /// 首次登录是否强制改密；compose 时显式置 false
    #[serde(
        rename = "ResetPasswordRequired",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reset_password_required: Option<bool>,

    #[serde(
        rename = "CustomizationScript",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub customization_script: Option<String>,

    #[serde(rename = "ComputerName", default, skip_serializing_if = "Option::is_none")]
    pub computer_name: Option<String>,
}

impl Default for GuestCustomizationSection {
    fn default() -> Self {
        Self {
            xmlns: ns::vcloud(),
            xmlns_ovf: ns::ovf(),
            href: None,
            info: MsgType::new("Specifies Guest OS Customization Settings"),
            enabled: None,
            admin_password_enabled: None,
            admin_password_auto: None,
            admin_password: None,
            reset_password_required: None,
            customization_script: None,
            computer_name: None,
        }
    }
}

/// 资源类别（RASD ResourceType 码值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// 处理器
    Processor,
    /// 内存
    Memory,
    /// 磁盘
    DiskDrive,
}

impl ResourceKind {
    pub fn code(self) -> u16 {
        match self {
            ResourceKind::Processor => 3,
            ResourceKind::Memory => 4,
            ResourceKind::DiskDrive => 17,
        }
    }
}

/// 虚拟硬件分节
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "ovf:VirtualHardwareSection")]
pub struct VirtualHardwareSection {
    #[serde(rename = "@xmlns", default = "ns::vcloud")]
    pub xmlns: String,

    #[serde(rename = "@xmlns:ovf", default = "ns::ovf")]
    pub xmlns_ovf: String,

    #[serde(rename = "@xmlns:rasd", default = "ns::rasd")]
    pub xmlns_rasd: String,

    #[serde(rename = "@xmlns:vcloud", default = "ns::vcloud")]
    pub xmlns_vcloud: String,

    #[serde(rename = "@vcloud:href", default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(rename = "ovf:Info", default)]
    pub info: MsgType,

    #[serde(rename = "ovf:Item", default)]
    pub items: Vec<ResourceItem>,
}

impl VirtualHardwareSection {
    /// 按资源类别查找第一个条目
    pub fn find_item(&self, kind: ResourceKind) -> Option<&ResourceItem> {
        self.items.iter().find(|i| i.resource_type == kind.code())
    }

    /// 按资源类别查找第一个条目（可变）
    pub fn find_item_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceItem> {
        self.items.iter_mut().find(|i| i.resource_type == kind.code())
    }
}

/// 硬件资源条目（RASD Item）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceItem {
    #[serde(rename = "rasd:Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(
        rename = "rasd:AddressOnParent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub address_on_parent: Option<String>,

    #[serde(rename = "rasd:ElementName", default)]
    pub element_name: String,

    #[serde(rename = "rasd:HostResource", default, skip_serializing_if = "Vec::is_empty")]
    pub host_resources: Vec<HostResource>,

    #[serde(rename = "rasd:InstanceID", default)]
    pub instance_id: String,

    #[serde(
        rename = "rasd:ResourceSubType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_sub_type: Option<String>,

    #[serde(rename = "rasd:ResourceType", default)]
    pub resource_type: u16,

    #[serde(
        rename = "rasd:VirtualQuantity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub virtual_quantity: Option<u64>,
}

/// 宿主资源描述（磁盘容量挂在 vcloud:capacity 属性上）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostResource {
    #[serde(
        rename = "@vcloud:capacity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<String>,

    #[serde(
        rename = "@vcloud:busSubType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_sub_type: Option<String>,

    #[serde(rename = "@vcloud:busType", default, skip_serializing_if = "Option::is_none")]
    pub bus_type: Option<String>,

    #[serde(rename = "$text", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARDWARE_XML: &str = r#"<ovf:VirtualHardwareSection xmlns="http://www.vmware.com/vcloud/v1.5" xmlns:ovf="http://schemas.dmtf.org/ovf/envelope/1" xmlns:rasd="http://schemas.dmtf.org/wbem/wscim/1/cim-schema/2/CIM_ResourceAllocationSettingData" xmlns:vcloud="http://www.vmware.com/vcloud/v1.5" vcloud:href="https://acme.com/api/vApp/vm-1/virtualHardwareSection/">
        <ovf:Info>Virtual hardware requirements</ovf:Info>
        <ovf:Item>
            <rasd:ElementName>1 virtual CPU(s)</rasd:ElementName>
            <rasd:InstanceID>1</rasd:InstanceID>
            <rasd:ResourceType>3</rasd:ResourceType>
            <rasd:VirtualQuantity>1</rasd:VirtualQuantity>
        </ovf:Item>
        <ovf:Item>
            <rasd:ElementName>512 MB of memory</rasd:ElementName>
            <rasd:InstanceID>2</rasd:InstanceID>
            <rasd:ResourceType>4</rasd:ResourceType>
            <rasd:VirtualQuantity>512</rasd:VirtualQuantity>
        </ovf:Item>
        <ovf:Item>
            <rasd:AddressOnParent>0</rasd:AddressOnParent>
            <rasd:ElementName>Hard disk 1</rasd:ElementName>
            <rasd:HostResource vcloud:capacity="10240" vcloud:busSubType="lsilogic" vcloud:busType="6"/>
            <rasd:InstanceID>2000</rasd:InstanceID>
            <rasd:ResourceType>17</rasd:ResourceType>
        </ovf:Item>
    </ovf:VirtualHardwareSection>"#;

    #[test]
    fn test_hardware_section_deserialization() {
        let section: VirtualHardwareSection = quick_xml::de::from_str(HARDWARE_XML).unwrap();
        assert_eq!(section.items.len(), 3);

        let cpu = section.find_item(ResourceKind::Processor).unwrap();
        assert_eq!(cpu.virtual_quantity, Some(1));

        let mem = section.find_item(ResourceKind::Memory).unwrap();
        assert_eq!(mem.virtual_quantity, Some(512));

        let disk = section.find_item(ResourceKind::DiskDrive).unwrap();
        assert_eq!(disk.element_name, "Hard disk 1");
        assert_eq!(disk.host_resources[0].capacity.as_deref(), Some("10240"));
    }

    #[test]
    fn test_hardware_section_edit_roundtrip() {
        let mut section: VirtualHardwareSection = quick_xml::de::from_str(HARDWARE_XML).unwrap();
        section
            .find_item_mut(ResourceKind::Processor)
            .unwrap()
            .virtual_quantity = Some(4);

        let xml = quick_xml::se::to_string(&section).unwrap();
        let reparsed: VirtualHardwareSection = quick_xml::de::from_str(&xml).unwrap();
        assert_eq!(
            reparsed
                .find_item(ResourceKind::Processor)
                .unwrap()
                .virtual_quantity,
            Some(4)
        );
        assert_eq!(
            reparsed
                .find_item(ResourceKind::DiskDrive)
                .unwrap()
                .host_resources[0]
                .capacity
                .as_deref(),
            Some("10240")
        );
    }

    #[test]
    fn test_guest_customization_defaults() {
        let section = GuestCustomizationSection {
            reset_password_required: Some(false),
            ..Default::default()
        };
        let xml = quick_xml::se::to_string(&section).unwrap();
        assert!(xml.contains("<ResetPasswordRequired>false</ResetPasswordRequired>"));
        assert!(!xml.contains("AdminPassword>"));
    }
}
