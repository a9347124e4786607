//! 操作请求参数模型
//!
//! compose / deploy / undeploy 的请求体。

use serde::{Deserialize, Serialize};

use super::sections::{GuestCustomizationSection, MsgType};
use super::{ns, Reference};

/// 网络隔离模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FenceMode {
    /// 桥接到父网络
    #[serde(rename = "bridged")]
    Bridged,
    /// 完全隔离
    #[serde(rename = "isolated")]
    Isolated,
    /// NAT 路由
    #[serde(rename = "natRouted")]
    NatRouted,
}

/// IP 分配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpAddressAllocationMode {
    #[serde(rename = "POOL")]
    Pool,
    #[serde(rename = "DHCP")]
    Dhcp,
    #[serde(rename = "MANUAL")]
    Manual,
    #[serde(rename = "NONE")]
    None,
}

/// compose 请求参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "ComposeVAppParams")]
pub struct ComposeVAppParams {
    #[serde(rename = "@xmlns", default = "ns::vcloud")]
    pub xmlns: String,

    #[serde(rename = "@xmlns:ovf", default = "ns::ovf")]
    pub xmlns_ovf: String,

    #[serde(rename = "@name")]
    pub name: String,

    #[serde(
        rename = "InstantiationParams",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instantiation_params: Option<InstantiationParams>,

    #[serde(rename = "SourcedItem", default, skip_serializing_if = "Vec::is_empty")]
    pub sourced_items: Vec<SourcedCompositionItem>,

    #[serde(rename = "AllEULAsAccepted", default, skip_serializing_if = "Option::is_none")]
    pub all_eulas_accepted: Option<bool>,
}

impl ComposeVAppParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            xmlns: ns::vcloud(),
            xmlns_ovf: ns::ovf(),
            name: name.into(),
            instantiation_params: None,
            sourced_items: Vec::new(),
            all_eulas_accepted: Some(true),
        }
    }
}

/// 实例化参数（分节集合）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstantiationParams {
    #[serde(
        rename = "NetworkConfigSection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_config: Option<NetworkConfigSection>,

    #[serde(
        rename = "NetworkConnectionSection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_connection: Option<NetworkConnectionSection>,

    #[serde(
        rename = "GuestCustomizationSection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub guest_customization: Option<GuestCustomizationSection>,
}

/// compose 的来源条目（要并入容器的模板 VM）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcedCompositionItem {
    #[serde(rename = "Source")]
    pub source: Reference,

    #[serde(
        rename = "InstantiationParams",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instantiation_params: Option<InstantiationParams>,
}

/// vApp 级网络配置分节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfigSection {
    #[serde(rename = "ovf:Info", default)]
    pub info: MsgType,

    #[serde(rename = "NetworkConfig", default, skip_serializing_if = "Vec::is_empty")]
    pub network_configs: Vec<VAppNetworkConfiguration>,
}

/// 单个 vApp 网络配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VAppNetworkConfiguration {
    #[serde(rename = "@networkName")]
    pub network_name: String,

    #[serde(rename = "Configuration")]
    pub configuration: NetworkConfiguration,
}

/// 网络配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfiguration {
    #[serde(rename = "ParentNetwork", default, skip_serializing_if = "Option::is_none")]
    pub parent_network: Option<Reference>,

    #[serde(rename = "FenceMode")]
    pub fence_mode: FenceMode,

    #[serde(
        rename = "RetainNetInfoAcrossDeployments",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub retain_net_info_across_deployments: Option<bool>,
}

/// VM 级网络连接分节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConnectionSection {
    #[serde(rename = "ovf:Info", default)]
    pub info: MsgType,

    #[serde(rename = "PrimaryNetworkConnectionIndex")]
    pub primary_network_connection_index: u32,

    #[serde(rename = "NetworkConnection", default, skip_serializing_if = "Vec::is_empty")]
    pub network_connections: Vec<NetworkConnection>,
}

/// 单个网卡连接
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConnection {
    #[serde(rename = "@network")]
    pub network: String,

    #[serde(rename = "NetworkConnectionIndex")]
    pub network_connection_index: u32,

    #[serde(rename = "IsConnected")]
    pub is_connected: bool,

    #[serde(rename = "IpAddressAllocationMode")]
    pub ip_address_allocation_mode: IpAddressAllocationMode,
}

/// deploy 请求参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "DeployVAppParams")]
pub struct DeployVAppParams {
    #[serde(rename = "@xmlns", default = "ns::vcloud")]
    pub xmlns: String,

    #[serde(rename = "@powerOn")]
    pub power_on: bool,
}

impl DeployVAppParams {
    /// 部署并开机
    pub fn power_on() -> Self {
        Self {
            xmlns: ns::vcloud(),
            power_on: true,
        }
    }
}

/// undeploy 关机动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndeployPowerAction {
    #[serde(rename = "powerOff")]
    PowerOff,
    #[serde(rename = "suspend")]
    Suspend,
    #[serde(rename = "shutdown")]
    Shutdown,
    #[serde(rename = "force")]
    Force,
}

/// undeploy 请求参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "UndeployVAppParams")]
pub struct UndeployVAppParams {
    #[serde(rename = "@xmlns", default = "ns::vcloud")]
    pub xmlns: String,

    #[serde(rename = "UndeployPowerAction")]
    pub undeploy_power_action: UndeployPowerAction,
}

impl UndeployVAppParams {
    pub fn power_off() -> Self {
        Self {
            xmlns: ns::vcloud(),
            undeploy_power_action: UndeployPowerAction::PowerOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_params_serialization() {
        let mut params = ComposeVAppParams::new("web-1");
        params.instantiation_params = Some(InstantiationParams {
            network_config: Some(NetworkConfigSection {
                info: MsgType::new("Configuration parameters for logical networks"),
                network_configs: vec![VAppNetworkConfiguration {
                    network_name: "routed-net".to_string(),
                    configuration: NetworkConfiguration {
                        parent_network: Some(Reference::named(
                            "https://acme.com/api/network/net-2",
                            "routed-net",
                        )),
                        fence_mode: FenceMode::Bridged,
                        retain_net_info_across_deployments: Some(false),
                    },
                }],
            }),
            ..Default::default()
        });
        params.sourced_items.push(SourcedCompositionItem {
            source: Reference::named("https://acme.com/api/vAppTemplate/vm-9", "vm-x"),
            instantiation_params: None,
        });

        let xml = quick_xml::se::to_string(&params).unwrap();
        assert!(xml.starts_with("<ComposeVAppParams"));
        assert!(xml.contains(r#"name="web-1""#));
        assert!(xml.contains("<FenceMode>bridged</FenceMode>"));
        assert!(xml.contains("<AllEULAsAccepted>true</AllEULAsAccepted>"));
        assert!(xml.contains("<SourcedItem>"));
        assert!(xml.contains(r#"href="https://acme.com/api/vAppTemplate/vm-9""#));
    }

    #[test]
    fn test_undeploy_params_serialization() {
        let xml = quick_xml::se::to_string(&UndeployVAppParams::power_off()).unwrap();
        assert!(xml.contains("<UndeployPowerAction>powerOff</UndeployPowerAction>"));
    }

    #[test]
    fn test_deploy_params_serialization() {
        let xml = quick_xml::se::to_string(&DeployVAppParams::power_on()).unwrap();
        assert!(xml.contains(r#"powerOn="true""#));
    }
}
