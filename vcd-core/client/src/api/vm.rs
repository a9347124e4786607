//! 虚拟机 API

use tracing::info;

use crate::client::VcdClient;
use crate::error::Result;
use crate::models::{media_type, GuestCustomizationSection, Task, VirtualHardwareSection, Vm};

/// 虚拟机 API
pub struct VmApi<'a> {
    client: &'a VcdClient,
}

impl<'a> VmApi<'a> {
    pub(crate) fn new(client: &'a VcdClient) -> Self {
        Self { client }
    }

    /// 查询虚拟机详情；已删除（403/404）返回 None
    pub async fn get(&self, vm_ref: &str) -> Result<Option<Vm>> {
        let href = self.client.entity_href(vm_ref)?;
        self.client.get_optional(&href).await
    }

    /// 拉取虚拟硬件分节
    pub async fn get_virtual_hardware_section(
        &self,
        vm_href: &str,
    ) -> Result<VirtualHardwareSection> {
        let url = format!("{}/virtualHardwareSection/", vm_href);
        self.client.get(&url).await
    }

    /// 提交虚拟硬件分节编辑（异步）
    ///
    /// vCD 1.5 不支持在 compose 阶段定制硬件，只能在 compose 完成后
    /// 整节替换。
    pub async fn edit_virtual_hardware_section(
        &self,
        vm_href: &str,
        section: &VirtualHardwareSection,
    ) -> Result<Task> {
        info!("编辑虚拟机硬件: {}", vm_href);
        let url = format!("{}/virtualHardwareSection/", vm_href);
        self.client
            .put(&url, section, media_type::VIRTUAL_HARDWARE_SECTION)
            .await
    }

    /// 拉取来宾定制分节
    pub async fn get_guest_customization_section(
        &self,
        vm_href: &str,
    ) -> Result<GuestCustomizationSection> {
        let url = format!("{}/guestCustomizationSection/", vm_href);
        self.client.get(&url).await
    }

    /// 重启虚拟机
    pub async fn reboot(&self, vm_ref: &str) -> Result<Task> {
        info!("重启虚拟机: {}", vm_ref);
        let href = self.client.entity_href(vm_ref)?;
        self.client
            .post_empty(&format!("{}/power/action/reboot", href))
            .await
    }

    /// 挂起虚拟机
    pub async fn suspend(&self, vm_ref: &str) -> Result<Task> {
        info!("挂起虚拟机: {}", vm_ref);
        let href = self.client.entity_href(vm_ref)?;
        self.client
            .post_empty(&format!("{}/power/action/suspend", href))
            .await
    }
}
