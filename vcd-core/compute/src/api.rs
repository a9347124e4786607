//! 远端 API 抽象接口
//!
//! 编排层只依赖这里定义的 trait，不直接依赖具体 HTTP 客户端，
//! 测试可以用内存实现替换远端。

use async_trait::async_trait;

use vcd_client::models::{
    ComposeVAppParams, DeployVAppParams, GuestCustomizationSection, Network,
    QueryResultVAppRecord, QueryResultVAppTemplateRecord, QueryResultVdcRecord, Reference, Task,
    UndeployVAppParams, VApp, VAppTemplate, Vdc, VirtualHardwareSection, Vm,
};
use vcd_client::{Result, VcdClient};

/// 任务状态来源
///
/// 轮询器只需要这一个能力，单独抽出便于窄依赖。
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// 按 href 重新拉取任务当前状态
    async fn get_task(&self, task_href: &str) -> Result<Task>;
}

/// vCloud Director 操作集合
///
/// 与编排流程一一对应的远端操作；变更类操作均为异步，返回任务句柄。
#[async_trait]
pub trait DirectorApi: TaskSource {
    /// 查询 vDC
    async fn get_vdc(&self, vdc_ref: &str) -> Result<Vdc>;

    /// 解析网络引用为网络详情（含隔离模式）
    async fn get_network(&self, network_ref: &Reference) -> Result<Network>;

    /// 查询 vApp 模板
    async fn get_vapp_template(&self, template_ref: &str) -> Result<VAppTemplate>;

    /// 拉取 VM 的来宾定制分节
    async fn get_guest_customization(&self, vm_href: &str)
        -> Result<GuestCustomizationSection>;

    /// 在 vDC 中 compose vApp（异步，响应携带在途任务）
    async fn compose_vapp(&self, vdc: &Vdc, params: &ComposeVAppParams) -> Result<VApp>;

    /// 查询 vApp；已删除返回 None
    async fn get_vapp(&self, vapp_ref: &str) -> Result<Option<VApp>>;

    /// 查询 VM；已删除返回 None
    async fn get_vm(&self, vm_ref: &str) -> Result<Option<Vm>>;

    /// 拉取 VM 的虚拟硬件分节
    async fn get_virtual_hardware(&self, vm_href: &str) -> Result<VirtualHardwareSection>;

    /// 提交虚拟硬件分节编辑
    async fn edit_virtual_hardware(
        &self,
        vm_href: &str,
        section: &VirtualHardwareSection,
    ) -> Result<Task>;

    /// 部署 vApp
    async fn deploy(&self, vapp_href: &str, params: &DeployVAppParams) -> Result<Task>;

    /// 取消部署 vApp
    async fn undeploy(&self, vapp_href: &str, params: &UndeployVAppParams) -> Result<Task>;

    /// 删除 vApp
    async fn remove_vapp(&self, vapp_href: &str) -> Result<Task>;

    /// 列举所有 vApp 记录
    async fn list_vapp_records(&self) -> Result<Vec<QueryResultVAppRecord>>;

    /// 列举所有 vApp 模板记录
    async fn list_template_records(&self) -> Result<Vec<QueryResultVAppTemplateRecord>>;

    /// 列举所有 vDC 记录
    async fn list_vdc_records(&self) -> Result<Vec<QueryResultVdcRecord>>;

    /// 重启 VM（单次远端调用）
    async fn reboot_vm(&self, vm_ref: &str) -> Result<Task>;

    /// 挂起 VM（单次远端调用）
    async fn suspend_vm(&self, vm_ref: &str) -> Result<Task>;
}

#[async_trait]
impl TaskSource for VcdClient {
    async fn get_task(&self, task_href: &str) -> Result<Task> {
        self.task().get(task_href).await
    }
}

#[async_trait]
impl DirectorApi for VcdClient {
    async fn get_vdc(&self, vdc_ref: &str) -> Result<Vdc> {
        self.vdc().get(vdc_ref).await
    }

    async fn get_network(&self, network_ref: &Reference) -> Result<Network> {
        self.vdc().get_network(network_ref).await
    }

    async fn get_vapp_template(&self, template_ref: &str) -> Result<VAppTemplate> {
        self.vapp_template().get(template_ref).await
    }

    async fn get_guest_customization(
        &self,
        vm_href: &str,
    ) -> Result<GuestCustomizationSection> {
        self.vm().get_guest_customization_section(vm_href).await
    }

    async fn compose_vapp(&self, vdc: &Vdc, params: &ComposeVAppParams) -> Result<VApp> {
        self.vdc().compose_vapp(vdc, params).await
    }

    async fn get_vapp(&self, vapp_ref: &str) -> Result<Option<VApp>> {
        self.vapp().get(vapp_ref).await
    }

    async fn get_vm(&self, vm_ref: &str) -> Result<Option<Vm>> {
        self.vm().get(vm_ref).await
    }

    async fn get_virtual_hardware(&self, vm_href: &str) -> Result<VirtualHardwareSection> {
        self.vm().get_virtual_hardware_section(vm_href).await
    }

    async fn edit_virtual_hardware(
        &self,
        vm_href: &str,
        section: &VirtualHardwareSection,
    ) -> Result<Task> {
        self.vm().edit_virtual_hardware_section(vm_href, section).await
    }

    async fn deploy(&self, vapp_href: &str, params: &DeployVAppParams) -> Result<Task> {
        self.vapp().deploy(vapp_href, params).await
    }

    async fn undeploy(&self, vapp_href: &str, params: &UndeployVAppParams) -> Result<Task> {
        self.vapp().undeploy(vapp_href, params).await
    }

    async fn remove_vapp(&self, vapp_href: &str) -> Result<Task> {
        self.vapp().remove(vapp_href).await
    }

    async fn list_vapp_records(&self) -> Result<Vec<QueryResultVAppRecord>> {
        self.query().vapps().await
    }

    async fn list_template_records(&self) -> Result<Vec<QueryResultVAppTemplateRecord>> {
        self.query().vapp_templates().await
    }

    async fn list_vdc_records(&self) -> Result<Vec<QueryResultVdcRecord>> {
        self.query().vdcs().await
    }

    async fn reboot_vm(&self, vm_ref: &str) -> Result<Task> {
        self.vm().reboot(vm_ref).await
    }

    async fn suspend_vm(&self, vm_ref: &str) -> Result<Task> {
        self.vm().suspend(vm_ref).await
    }
}
