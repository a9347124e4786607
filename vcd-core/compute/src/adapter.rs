//! 计算适配器
//!
//! 把 vCloud Director 的 vApp/VM 模型适配成通用计算服务的节点操作。
//! 置备是线性多步工作流：选网络 -> 选模板 -> compose -> 等待 ->
//! 硬件定制 -> 等待 -> 部署开机 -> 等待 -> 提取凭据；compose 成功之后
//! 的任何一步失败都会先尽力销毁已创建的 VM 再上抛。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use vcd_client::models::{
    ComposeVAppParams, DeployVAppParams, FenceMode, GuestCustomizationSection,
    InstantiationParams, IpAddressAllocationMode, MsgType, NetworkConfigSection,
    NetworkConfiguration, NetworkConnection, NetworkConnectionSection,
    QueryResultVAppTemplateRecord, Reference, ResourceKind, ResourceStatus,
    SourcedCompositionItem, Task, UndeployVAppParams, VApp, VAppNetworkConfiguration, Vdc,
    VirtualHardwareSection, Vm,
};

use crate::api::DirectorApi;
use crate::config::{PollConfig, ProviderConfig, TimeoutConfig};
use crate::hardware::{enumerate_profiles, HardwareProfile};
use crate::poller::TaskPoller;
use crate::{ComputeError, Result};

/// 无网络指定时搜索的默认隔离模式
const DEFAULT_FENCE_MODE: FenceMode = FenceMode::NatRouted;

/// 远端未提供登录用户时的默认值
const DEFAULT_LOGIN_USER: &str = "root";

/// 磁盘覆盖只作用于第一块系统盘
const PRIMARY_DISK_NAME: &str = "Hard disk 1";

// ============================================================================
// 宿主侧数据结构
// ============================================================================

/// 登录凭据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginCredentials {
    pub user: Option<String>,
    pub password: Option<String>,
    pub private_key: Option<String>,
}

/// 置备模板（宿主框架模板的最小投影）
#[derive(Debug, Clone, Default)]
pub struct NodeTemplate {
    /// 目标 vDC（资源池）标识
    pub vdc_id: String,

    /// vApp 模板（镜像）标识
    pub image_id: String,

    /// 命名硬件档位（如 2CPU_4GB_RAM）
    pub hardware_id: Option<String>,

    /// 模板选项
    pub options: TemplateOptions,
}

/// 置备选项
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    /// 指定网络名；空则在 vDC 中搜索默认隔离模式的网络
    pub networks: Vec<String>,

    /// CPU 覆盖（优先于硬件档位）
    pub virtual_cpus: Option<u32>,

    /// 内存覆盖 MB（优先于硬件档位）
    pub memory_mb: Option<u32>,

    /// 系统盘容量覆盖 MB
    pub disk_mb: Option<u64>,

    /// 来宾定制脚本
    pub customization_script: Option<String>,

    /// 登录用户覆盖
    pub login_user: Option<String>,

    /// 登录密码覆盖
    pub login_password: Option<String>,

    /// 登录私钥覆盖
    pub login_private_key: Option<String>,
}

/// 置备结果：节点与初始凭据
#[derive(Debug, Clone)]
pub struct NodeAndCredentials {
    /// 节点标识（VM 的 urn）
    pub id: String,

    /// 置备完成的虚拟机
    pub vm: Vm,

    /// 初始登录凭据
    pub credentials: LoginCredentials,
}

// ============================================================================
// 适配器接口
// ============================================================================

/// 通用计算适配器接口
///
/// 宿主框架通过该接口驱动节点生命周期；任意传输实现都可满足。
#[async_trait]
pub trait ComputeAdapter: Send + Sync {
    /// 置备节点并返回初始凭据
    async fn create_node(
        &self,
        group: &str,
        name: &str,
        template: &NodeTemplate,
    ) -> Result<NodeAndCredentials>;

    /// 销毁节点（幂等：节点已不存在时正常返回）
    async fn destroy_node(&self, vm_id: &str) -> Result<()>;

    /// 列举就绪节点：所属 vApp 无在途任务、VM 已开机
    async fn list_nodes(&self) -> Result<Vec<Vm>>;

    /// 查询单个节点
    async fn get_node(&self, vm_id: &str) -> Result<Option<Vm>>;

    /// 重启节点（单次远端调用，不等待任务）
    async fn reboot_node(&self, vm_id: &str) -> Result<()>;

    /// 挂起节点（单次远端调用，不等待任务）
    async fn suspend_node(&self, vm_id: &str) -> Result<()>;

    /// 恢复节点（暂不支持）
    async fn resume_node(&self, vm_id: &str) -> Result<()>;

    /// 可用硬件档位
    fn list_hardware_profiles(&self) -> &[HardwareProfile];

    /// 列举镜像（vApp 模板记录）
    async fn list_images(&self) -> Result<Vec<QueryResultVAppTemplateRecord>>;

    /// 列举资源池（vDC）
    async fn list_locations(&self) -> Result<Vec<Vdc>>;
}

// ============================================================================
// VcdComputeAdapter - vCloud Director 实现
// ============================================================================

/// vCloud Director 计算适配器
///
/// 不持有可变共享状态：所有实体状态都在远端，每次决策前重新拉取。
pub struct VcdComputeAdapter<A: DirectorApi> {
    /// 远端 API
    api: Arc<A>,

    /// 编排超时
    timeouts: TimeoutConfig,

    /// 轮询节奏
    poll: PollConfig,

    /// 可用硬件档位
    profiles: Vec<HardwareProfile>,
}

impl<A: DirectorApi> VcdComputeAdapter<A> {
    /// 创建适配器；硬件档位在此一次性合成
    pub fn new(api: Arc<A>, config: &ProviderConfig) -> Result<Self> {
        let profiles = enumerate_profiles(&config.hardware)?;
        Ok(Self {
            api,
            timeouts: config.timeouts.clone(),
            poll: config.poll.clone(),
            profiles,
        })
    }

    fn poller(&self) -> TaskPoller<'_, A> {
        TaskPoller::new(self.api.as_ref(), self.poll.policy())
    }

    /// 等待任务完成，传输错误转为适配器错误
    async fn wait_for_task(&self, task: &Task, timeout: std::time::Duration) -> Result<bool> {
        Ok(self.poller().await_completion(task, timeout).await?)
    }

    /// 用通用任务超时等待任意任务（给直接驱动任务的调用方用）
    pub async fn await_task(&self, task: &Task) -> Result<bool> {
        self.wait_for_task(task, self.timeouts.task_completed()).await
    }

    /// 回滚路径的销毁：失败只记录，不覆盖原始错误
    async fn destroy_best_effort(&self, vm_id: &str) {
        if let Err(e) = self.destroy_node(vm_id).await {
            warn!("回滚销毁虚拟机 {} 失败: {}", vm_id, e);
        }
    }

    /// 在 vDC 中按名称精确匹配网络
    fn find_network_by_name(&self, vdc: &Vdc, network_name: &str) -> Result<Reference> {
        vdc.networks()
            .iter()
            .find(|r| r.name.as_deref() == Some(network_name))
            .cloned()
            .ok_or_else(|| {
                ComputeError::NetworkNotFound(format!(
                    "vDC {} 中没有名为 {} 的网络",
                    vdc.name, network_name
                ))
            })
    }

    /// 在 vDC 中搜索指定隔离模式的网络
    async fn find_network_with_fence_mode(
        &self,
        vdc: &Vdc,
        fence_mode: FenceMode,
    ) -> Result<Reference> {
        for reference in vdc.networks() {
            let network = self.api.get_network(reference).await?;
            if network.fence_mode() == Some(fence_mode) {
                return Ok(network.to_reference());
            }
        }
        Err(ComputeError::NetworkNotFound(format!(
            "vDC {} 中没有隔离模式为 {:?} 的网络",
            vdc.name, fence_mode
        )))
    }

    /// 解析本次置备的目标网络
    async fn select_network(&self, vdc: &Vdc, options: &TemplateOptions) -> Result<Reference> {
        match options.networks.as_slice() {
            [] => {
                self.find_network_with_fence_mode(vdc, DEFAULT_FENCE_MODE)
                    .await
            }
            [name] => self.find_network_by_name(vdc, name),
            more => Err(ComputeError::Config(format!(
                "每个节点只支持一个网络, 但指定了 {} 个",
                more.len()
            ))),
        }
    }

    /// 解析 CPU/内存：显式覆盖优先于命名硬件档位
    fn resolve_hardware_spec(
        &self,
        template: &NodeTemplate,
    ) -> (Option<u32>, Option<u32>, Option<&HardwareProfile>) {
        let profile = template
            .hardware_id
            .as_deref()
            .and_then(|id| self.profiles.iter().find(|p| p.name == id));
        let virtual_cpus = template
            .options
            .virtual_cpus
            .or_else(|| profile.map(|p| p.num_cpus));
        let memory_mb = template
            .options
            .memory_mb
            .or_else(|| profile.map(|p| p.ram_mb));
        (virtual_cpus, memory_mb, profile)
    }

    /// 取 vApp 的唯一子 VM
    fn only_vm(vapp: &VApp) -> Result<Vm> {
        match vapp.vms() {
            [vm] => Ok(vm.clone()),
            vms => Err(ComputeError::Provision(format!(
                "vApp({}) 应恰好包含一个 VM, 实际为 {} 个",
                vapp.id,
                vms.len()
            ))),
        }
    }

    /// 按 CPU/内存/磁盘覆盖改写硬件分节
    ///
    /// 处理器/内存条目缺失只告警不失败，磁盘同理：按找到的子集提交编辑。
    fn customize_hardware_section(
        section: &mut VirtualHardwareSection,
        virtual_cpus: u32,
        memory_mb: u32,
        disk_mb: Option<u64>,
    ) {
        match section.find_item_mut(ResourceKind::Processor) {
            Some(item) => {
                item.element_name = format!("{} virtual CPU(s)", virtual_cpus);
                item.virtual_quantity = Some(u64::from(virtual_cpus));
            }
            None => warn!("硬件分节中没有处理器条目, 跳过 CPU 修改"),
        }

        match section.find_item_mut(ResourceKind::Memory) {
            Some(item) => {
                item.element_name = format!("{} MB of memory", memory_mb);
                item.virtual_quantity = Some(u64::from(memory_mb));
            }
            None => warn!("硬件分节中没有内存条目, 跳过内存修改"),
        }

        if let Some(disk_mb) = disk_mb {
            let disk_item = section.items.iter_mut().find(|i| {
                i.resource_type == ResourceKind::DiskDrive.code()
                    && i.element_name == PRIMARY_DISK_NAME
            });
            match disk_item {
                Some(item) => match item.host_resources.first_mut() {
                    Some(host_resource) if host_resource.capacity.is_some() => {
                        host_resource.capacity = Some(disk_mb.to_string());
                    }
                    Some(_) => warn!(
                        "磁盘 {} 的宿主资源缺少 capacity 属性, 无法调整容量到 {} MB",
                        PRIMARY_DISK_NAME, disk_mb
                    ),
                    None => warn!(
                        "磁盘 {} 没有宿主资源条目, 无法调整容量到 {} MB",
                        PRIMARY_DISK_NAME, disk_mb
                    ),
                },
                None => warn!(
                    "硬件分节中没有 {} 条目, 跳过磁盘调整",
                    PRIMARY_DISK_NAME
                ),
            }
        }
    }

    /// vApp 级实例化参数：把选中的网络桥接为 vApp 网络
    fn instantiation_params(network: &Reference) -> InstantiationParams {
        let network_name = network.name.clone().unwrap_or_default();
        InstantiationParams {
            network_config: Some(NetworkConfigSection {
                info: MsgType::new("Configuration parameters for logical networks"),
                network_configs: vec![VAppNetworkConfiguration {
                    network_name,
                    configuration: NetworkConfiguration {
                        parent_network: Some(network.clone()),
                        fence_mode: FenceMode::Bridged,
                        retain_net_info_across_deployments: Some(false),
                    },
                }],
            }),
            ..Default::default()
        }
    }

    /// compose 的来源条目：模板 VM + 网卡连接 + 来宾定制
    fn vm_item(
        source_vm: &Vm,
        item_name: &str,
        network_name: &str,
        guest_customization: GuestCustomizationSection,
    ) -> SourcedCompositionItem {
        let connection_section = NetworkConnectionSection {
            info: MsgType::new("networkInfo"),
            primary_network_connection_index: 0,
            network_connections: vec![NetworkConnection {
                network: network_name.to_string(),
                network_connection_index: 0,
                is_connected: true,
                ip_address_allocation_mode: IpAddressAllocationMode::Pool,
            }],
        };

        SourcedCompositionItem {
            source: Reference {
                href: source_vm.href.clone(),
                name: Some(item_name.to_string()),
                type_: source_vm.type_.clone(),
            },
            instantiation_params: Some(InstantiationParams {
                network_connection: Some(connection_section),
                guest_customization: Some(guest_customization),
                ..Default::default()
            }),
        }
    }

    /// 从 VM 来宾定制元数据提取凭据；无任何线索时返回 None
    fn credentials_from(vm: &Vm) -> Option<LoginCredentials> {
        let section = vm.guest_customization.as_ref()?;
        if section.admin_password_enabled == Some(true) {
            if let Some(password) = section.admin_password.clone() {
                return Some(LoginCredentials {
                    user: None,
                    password: Some(password),
                    private_key: None,
                });
            }
        }
        None
    }

    /// 组装最终凭据：远端线索 -> 默认 root -> 调用方覆盖
    fn resolve_credentials(vm: &Vm, options: &TemplateOptions) -> LoginCredentials {
        let mut credentials = Self::credentials_from(vm).unwrap_or_default();
        if credentials.user.is_none() {
            credentials.user = Some(DEFAULT_LOGIN_USER.to_string());
        }
        if let Some(user) = &options.login_user {
            credentials.user = Some(user.clone());
        }
        if let Some(password) = &options.login_password {
            credentials.password = Some(password.clone());
        }
        if let Some(private_key) = &options.login_private_key {
            credentials.private_key = Some(private_key.clone());
        }
        credentials
    }
}

#[async_trait]
impl<A: DirectorApi> ComputeAdapter for VcdComputeAdapter<A> {
    async fn create_node(
        &self,
        group: &str,
        name: &str,
        template: &NodeTemplate,
    ) -> Result<NodeAndCredentials> {
        info!("置备节点: {}/{} (镜像 {})", group, name, template.image_id);

        let vdc = self.api.get_vdc(&template.vdc_id).await?;

        // 网络选择：失败时尚无任何远端资源，直接上抛
        let network = self.select_network(&vdc, &template.options).await?;
        let network_name = network.name.clone().unwrap_or_default();

        // 模板选择：取第一个内嵌 VM，多 VM 模板不做消歧
        let vapp_template = self.api.get_vapp_template(&template.image_id).await?;
        let source_vm = vapp_template
            .vms()
            .first()
            .ok_or_else(|| {
                ComputeError::TemplateUnusable(format!(
                    "模板 {} 没有内嵌 VM 定义",
                    template.image_id
                ))
            })?
            .clone();

        // 来宾定制：禁用首登改密，套用调用方脚本
        let mut guest_customization = self
            .api
            .get_guest_customization(&source_vm.href)
            .await?;
        guest_customization.reset_password_required = Some(false);
        if let Some(script) = &template.options.customization_script {
            guest_customization.customization_script = Some(script.clone());
        }

        // compose：响应里的第一个任务是完成信号
        let mut params = ComposeVAppParams::new(name);
        params.instantiation_params = Some(Self::instantiation_params(&network));
        params.sourced_items.push(Self::vm_item(
            &source_vm,
            &format!("vm-{name}"),
            &network_name,
            guest_customization,
        ));

        let vapp = self.api.compose_vapp(&vdc, &params).await?;
        let composition_task = vapp.tasks().first().cloned().ok_or_else(|| {
            ComputeError::Provision(format!("vApp({}) compose 响应未携带任务", vapp.id))
        })?;

        debug!(">> 等待 vApp({}) compose 完成", vapp.id);
        let composed = self
            .wait_for_task(&composition_task, self.timeouts.node_running())
            .await?;
        debug!("<< vApp({}) compose 结果: {}", vapp.id, composed);
        if !composed {
            // 此时还拿不到 VM 标识，容器留给人工处理
            let message = format!(
                "vApp({}, {}) 未在 {} ms 内完成 compose (任务 {})",
                name,
                vapp.id,
                self.timeouts.node_running_ms,
                composition_task.href
            );
            warn!("{message}");
            return Err(ComputeError::Provision(message));
        }

        // 重新拉取 vApp，取唯一子 VM
        let composed_vapp = self.api.get_vapp(&vapp.href).await?.ok_or_else(|| {
            ComputeError::Provision(format!("vApp({}) compose 完成后消失", vapp.id))
        })?;
        let vm = Self::only_vm(&composed_vapp)?;

        // compose 后容器/VM 上残留的在途任务；此时 VM 标识已知，
        // 失败先销毁再上抛
        let settle_tasks = composed_vapp.tasks().iter().chain(vm.tasks());
        for task in settle_tasks {
            if task.status.is_terminal() {
                continue;
            }
            debug!(">> 等待 vApp({}) compose 后任务 {}", vapp.id, task.href);
            let ready = self
                .wait_for_task(task, self.timeouts.node_running())
                .await?;
            if !ready {
                let message = format!(
                    "vApp({}, {}) 的 VM({}) 未在 {} ms 内就绪 (任务 {}), 将销毁",
                    name, vapp.id, vm.href, self.timeouts.node_running_ms, task.href
                );
                warn!("{message}");
                self.destroy_best_effort(&vm.id).await;
                return Err(ComputeError::Provision(message));
            }
        }

        // 硬件定制：覆盖优先于档位；CPU/内存双双缺失是硬性失败
        let (virtual_cpus, memory_mb, profile) = self.resolve_hardware_spec(template);
        let (Some(virtual_cpus), Some(memory_mb)) = (virtual_cpus, memory_mb) else {
            let message = if profile.is_some() {
                format!(
                    "硬件档位 {:?} 缺少 CPU/内存定义, 且模板选项未覆盖",
                    template.hardware_id
                )
            } else {
                format!(
                    "没有匹配 {:?} 的硬件档位, 且模板选项未覆盖 CPU/内存",
                    template.hardware_id
                )
            };
            error!("{message}; 销毁 VM 并失败");
            self.destroy_best_effort(&vm.id).await;
            return Err(ComputeError::MissingHardwareSpec(message));
        };

        let mut section = self.api.get_virtual_hardware(&vm.href).await?;
        Self::customize_hardware_section(
            &mut section,
            virtual_cpus,
            memory_mb,
            template.options.disk_mb,
        );

        // vCD 1.5 不支持在 compose 阶段定制硬件，只能事后整节替换
        let edit_task = self.api.edit_virtual_hardware(&vm.href, &section).await?;
        debug!(">> 等待 VM({}) 硬件编辑完成", vm.id);
        let edited = self
            .wait_for_task(&edit_task, self.timeouts.node_running())
            .await?;
        debug!("<< VM({}) 硬件编辑结果: {}", vm.id, edited);
        if !edited {
            let message = format!(
                "vApp({}, {}) 的 VM({}) 硬件编辑未在 {} ms 内完成 (任务 {}); 销毁 VM",
                name, vapp.id, vm.href, self.timeouts.node_running_ms, edit_task.href
            );
            warn!("{message}");
            self.destroy_best_effort(&vm.id).await;
            return Err(ComputeError::Provision(message));
        }

        // 部署并开机
        let deploy_task = self
            .api
            .deploy(&vapp.href, &DeployVAppParams::power_on())
            .await?;
        debug!(">> 等待 vApp({}) 开机完成", vapp.id);
        let powered_on = self
            .wait_for_task(&deploy_task, self.timeouts.node_running())
            .await?;
        debug!("<< vApp({}) 开机结果: {}", vapp.id, powered_on);
        if !powered_on {
            let message = format!(
                "vApp({}, {}) 开机未在 {} ms 内完成 (任务 {}); 销毁 VM",
                name, vapp.id, self.timeouts.node_running_ms, deploy_task.href
            );
            warn!("{message}");
            self.destroy_best_effort(&vm.id).await;
            return Err(ComputeError::Provision(message));
        }

        // 重新拉取：deploy 可能改写来宾定制（如生成的密码）
        let deployed_vapp = self.api.get_vapp(&vapp.href).await?.ok_or_else(|| {
            ComputeError::Provision(format!("vApp({}) 部署完成后消失", vapp.id))
        })?;
        let vm = Self::only_vm(&deployed_vapp)?;

        let credentials = Self::resolve_credentials(&vm, &template.options);

        info!("节点 {} 置备完成 (VM {})", name, vm.id);
        Ok(NodeAndCredentials {
            id: vm.id.clone(),
            vm,
            credentials,
        })
    }

    async fn destroy_node(&self, vm_id: &str) -> Result<()> {
        let Some(vm) = self.api.get_vm(vm_id).await? else {
            // 先前的半途失败或并发删除都会走到这里
            info!("销毁虚拟机 {} 时未找到, 视为已删除", vm_id);
            return Ok(());
        };

        let Some(vapp_href) = vm.parent_vapp_href().map(str::to_string) else {
            info!("虚拟机 {} 没有所属 vApp 链接, 视为已删除", vm_id);
            return Ok(());
        };

        let Some(vapp) = self.api.get_vapp(&vapp_href).await? else {
            info!(
                "虚拟机 {} 的 vApp {} 未找到, 视为已删除",
                vm_id, vapp_href
            );
            return Ok(());
        };

        debug!("删除包含 VM({}) 的 vApp({}) ...", vm.name, vapp.name);

        // 销毁前先等在途任务；超时只告警，后续步骤照常尝试
        for task in vapp.tasks() {
            if task.status.is_terminal() {
                continue;
            }
            debug!(">> 等待 vApp({}) 在途任务 {}", vapp.id, task.href);
            let settled = self
                .wait_for_task(task, self.timeouts.node_terminated())
                .await?;
            if !settled {
                warn!(
                    "vApp({}) 销毁前在途任务未在 {} ms 内完成 (任务 {}); 继续",
                    vapp.id, self.timeouts.node_terminated_ms, task.href
                );
            }
        }

        // undeploy 超时是硬性失败, 不会带着部署态容器继续 remove
        let undeploy_task = self
            .api
            .undeploy(&vapp.href, &UndeployVAppParams::power_off())
            .await?;
        debug!(">> 等待 vApp({}) undeploy 完成", vapp.id);
        let undeployed = self
            .wait_for_task(&undeploy_task, self.timeouts.node_terminated())
            .await?;
        debug!("<< vApp({}) undeploy 结果: {}", vapp.id, undeployed);
        if !undeployed {
            return Err(ComputeError::Destroy(format!(
                "vApp({}) undeploy 未在 {} ms 内完成 (任务 {})",
                vapp.id, self.timeouts.node_terminated_ms, undeploy_task.href
            )));
        }

        let remove_task = self.api.remove_vapp(&vapp.href).await?;
        debug!(">> 等待 vApp({}) 删除完成", vapp.id);
        let removed = self
            .wait_for_task(&remove_task, self.timeouts.node_terminated())
            .await?;
        debug!("<< vApp({}) 删除结果: {}", vapp.id, removed);
        if !removed {
            let message = format!(
                "vApp({}) 删除未在 {} ms 内完成 (任务 {})",
                vapp.id, self.timeouts.node_terminated_ms, remove_task.href
            );
            warn!("{message}");
            return Err(ComputeError::Destroy(message));
        }

        debug!("vApp({}) 已删除", vapp.name);
        Ok(())
    }

    async fn list_nodes(&self) -> Result<Vec<Vm>> {
        let records = self.api.list_vapp_records().await?;
        let mut nodes = Vec::new();

        for record in records {
            let vapp = match self.api.get_vapp(&record.href).await {
                Ok(Some(vapp)) => vapp,
                Ok(None) => continue,
                // 状态不一致的 vApp 服务端会回 5xx，跳过即可
                Err(e) if e.is_server_error() => {
                    debug!("无法获取 vApp {} 详情, 跳过: {}", record.href, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if !vapp.tasks().is_empty() {
                continue;
            }

            nodes.extend(
                vapp.vms()
                    .iter()
                    .filter(|vm| vm.resource_status() == ResourceStatus::PoweredOn)
                    .cloned(),
            );
        }

        Ok(nodes)
    }

    async fn get_node(&self, vm_id: &str) -> Result<Option<Vm>> {
        Ok(self.api.get_vm(vm_id).await?)
    }

    async fn reboot_node(&self, vm_id: &str) -> Result<()> {
        self.api.reboot_vm(vm_id).await?;
        Ok(())
    }

    async fn suspend_node(&self, vm_id: &str) -> Result<()> {
        self.api.suspend_vm(vm_id).await?;
        Ok(())
    }

    async fn resume_node(&self, _vm_id: &str) -> Result<()> {
        Err(ComputeError::Unsupported("resume".to_string()))
    }

    fn list_hardware_profiles(&self) -> &[HardwareProfile] {
        &self.profiles
    }

    async fn list_images(&self) -> Result<Vec<QueryResultVAppTemplateRecord>> {
        Ok(self.api.list_template_records().await?)
    }

    async fn list_locations(&self) -> Result<Vec<Vdc>> {
        let records = self.api.list_vdc_records().await?;
        let mut vdcs = Vec::with_capacity(records.len());
        for record in records {
            vdcs.push(self.api.get_vdc(&record.href).await?);
        }
        Ok(vdcs)
    }
}
