//! 硬件档位
//!
//! 档位名形如 `2CPU_4GB_RAM`；内存为 1024 的整数倍时 GB 取整数，
//! 否则取小数（512MB -> `0.5GB`）。合成与解析互为逆操作。

use std::sync::OnceLock;

use regex::Regex;

use crate::{ComputeError, Result};

fn short_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]+)CPU_([0-9.]+)GB_RAM$").unwrap())
}

/// 命名硬件档位（CPU 数 + 内存）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareProfile {
    /// 档位名，形如 2CPU_4GB_RAM
    pub name: String,

    /// CPU 核数
    pub num_cpus: u32,

    /// 内存 (MB)
    pub ram_mb: u32,
}

impl HardwareProfile {
    /// 由 CPU 数与内存合成档位
    pub fn from_parts(num_cpus: u32, ram_mb: u32) -> Self {
        let name = if ram_mb % 1024 == 0 {
            format!("{}CPU_{}GB_RAM", num_cpus, ram_mb / 1024)
        } else {
            format!("{}CPU_{}GB_RAM", num_cpus, f64::from(ram_mb) / 1024.0)
        };
        Self {
            name,
            num_cpus,
            ram_mb,
        }
    }

    /// 解析 `<n>CPU_<r>GB_RAM` 形式的档位名
    pub fn parse(short_name: &str) -> Result<Self> {
        let captures = short_name_pattern().captures(short_name).ok_or_else(|| {
            ComputeError::InvalidHardwareProfile(short_name.to_string())
        })?;
        let num_cpus: u32 = captures[1]
            .parse()
            .map_err(|_| ComputeError::InvalidHardwareProfile(short_name.to_string()))?;
        let ram_gb: f64 = captures[2]
            .parse()
            .map_err(|_| ComputeError::InvalidHardwareProfile(short_name.to_string()))?;

        Ok(Self {
            name: short_name.to_string(),
            num_cpus,
            ram_mb: (ram_gb * 1024.0) as u32,
        })
    }
}

/// 硬件档位合成边界
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HardwareBounds {
    /// 合成档位的最大 CPU 数
    #[serde(default = "default_max_cpu")]
    pub max_cpu: u32,

    /// 合成档位的最小内存 (MB)
    #[serde(default = "default_min_ram_mb")]
    pub min_ram_mb: u32,

    /// 合成档位的最大内存 (MB)
    #[serde(default = "default_max_ram_mb")]
    pub max_ram_mb: u32,

    /// 预定义档位名列表；非空时完全取代合成结果
    #[serde(default)]
    pub predefined: Vec<String>,
}

impl Default for HardwareBounds {
    fn default() -> Self {
        Self {
            max_cpu: default_max_cpu(),
            min_ram_mb: default_min_ram_mb(),
            max_ram_mb: default_max_ram_mb(),
            predefined: Vec::new(),
        }
    }
}

fn default_max_cpu() -> u32 {
    8
}

fn default_min_ram_mb() -> u32 {
    512
}

fn default_max_ram_mb() -> u32 {
    32 * 1024
}

/// 按边界枚举可用档位
///
/// 配置了预定义档位时逐个解析并返回；否则 CPU 按 2 的幂、内存按倍增
/// 合成全组合。
pub fn enumerate_profiles(bounds: &HardwareBounds) -> Result<Vec<HardwareProfile>> {
    if !bounds.predefined.is_empty() {
        return bounds
            .predefined
            .iter()
            .map(|name| HardwareProfile::parse(name))
            .collect();
    }

    let mut profiles = Vec::new();
    let mut num_cpus = 1;
    while num_cpus <= bounds.max_cpu {
        let mut ram_mb = bounds.min_ram_mb;
        while ram_mb <= bounds.max_ram_mb {
            profiles.push(HardwareProfile::from_parts(num_cpus, ram_mb));
            ram_mb *= 2;
        }
        num_cpus *= 2;
    }
    Ok(profiles)
}
