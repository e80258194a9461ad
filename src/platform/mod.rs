//! 平台/后端选择模块
//!
//! 将"操作系统 × GPU 后端"这一构建期配置表示为显式的、经过校验的记录
//! [`BuildConfig`]，并解析为需要暴露的原生接口集合（见 [`native`]）。
//!
//! 两条配置轴互相独立：
//!
//! - 操作系统：[`TargetSystem`]，每次构建至多一个
//! - GPU 后端：[`GpuBackend`]，可与任意操作系统组合
//!
//! 两者都用 `Option` 表示"未定义"。

pub mod flags;
pub mod native;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::core::error::{Result, SelectionError};

pub use native::{resolve, NativeApi, NativeApiSet};

/// 目标操作系统
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSystem {
    Linux,
    Windows,
    Macos,
    Android,
    Ios,
}

/// GPU 后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuBackend {
    /// Vulkan 后端
    Vulkan,
}

impl TargetSystem {
    /// 所有受支持的操作系统
    pub const ALL: [TargetSystem; 5] = [
        TargetSystem::Linux,
        TargetSystem::Windows,
        TargetSystem::Macos,
        TargetSystem::Android,
        TargetSystem::Ios,
    ];

    /// 获取名称（与配置文件中的写法一致）
    pub fn name(&self) -> &'static str {
        match self {
            TargetSystem::Linux => "linux",
            TargetSystem::Windows => "windows",
            TargetSystem::Macos => "macos",
            TargetSystem::Android => "android",
            TargetSystem::Ios => "ios",
        }
    }

    /// 由 Rust 的 `target_os` 取值映射
    ///
    /// 未知的 `target_os`（如 freebsd、wasm 目标）返回 `None`。
    pub fn from_target_os(target_os: &str) -> Option<Self> {
        match target_os {
            "linux" => Some(TargetSystem::Linux),
            "windows" => Some(TargetSystem::Windows),
            "macos" => Some(TargetSystem::Macos),
            "android" => Some(TargetSystem::Android),
            "ios" => Some(TargetSystem::Ios),
            _ => None,
        }
    }

    /// 当前编译目标的操作系统
    pub fn host() -> Option<Self> {
        if cfg!(target_os = "linux") {
            Some(TargetSystem::Linux)
        } else if cfg!(target_os = "windows") {
            Some(TargetSystem::Windows)
        } else if cfg!(target_os = "macos") {
            Some(TargetSystem::Macos)
        } else if cfg!(target_os = "android") {
            Some(TargetSystem::Android)
        } else if cfg!(target_os = "ios") {
            Some(TargetSystem::Ios)
        } else {
            None
        }
    }
}

impl GpuBackend {
    /// 获取后端名称
    pub fn name(&self) -> &'static str {
        match self {
            GpuBackend::Vulkan => "vulkan",
        }
    }

    /// 检查是否为 Vulkan 后端
    pub fn is_vulkan(&self) -> bool {
        matches!(self, GpuBackend::Vulkan)
    }

    /// 本 crate 编译时启用的后端（`gpu_vulkan` feature）
    pub fn enabled() -> Option<Self> {
        if cfg!(feature = "gpu_vulkan") {
            Some(GpuBackend::Vulkan)
        } else {
            None
        }
    }
}

impl fmt::Display for TargetSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for GpuBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetSystem {
    type Err = SelectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TargetSystem::ALL
            .into_iter()
            .find(|system| system.name() == lower)
            .ok_or_else(|| SelectionError::UnknownSystem(s.to_string()))
    }
}

impl FromStr for GpuBackend {
    type Err = SelectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vulkan" => Ok(GpuBackend::Vulkan),
            _ => Err(SelectionError::UnknownBackend(s.to_string())),
        }
    }
}

/// 构建配置记录
///
/// 每条轴一个字段，构建期解析一次。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildConfig {
    /// 目标操作系统（`None` 表示未定义任何系统标志）
    pub system: Option<TargetSystem>,

    /// GPU 后端（`None` 表示未定义后端标志）
    pub gpu: Option<GpuBackend>,
}

impl BuildConfig {
    pub fn new(system: Option<TargetSystem>, gpu: Option<GpuBackend>) -> Self {
        Self { system, gpu }
    }

    /// 当前编译目标的配置
    pub fn host() -> Self {
        Self::new(TargetSystem::host(), GpuBackend::enabled())
    }

    /// 从 Cargo 构建脚本环境变量读取
    ///
    /// 读取 `CARGO_CFG_TARGET_OS` 与 `CARGO_FEATURE_GPU_VULKAN`，
    /// 供下游 `build.rs` 使用。
    pub fn from_cargo_env() -> Self {
        let target_os = std::env::var("CARGO_CFG_TARGET_OS").ok();
        let gpu_vulkan = std::env::var_os("CARGO_FEATURE_GPU_VULKAN").is_some();
        Self::from_cargo_vars(target_os.as_deref(), gpu_vulkan)
    }

    /// 由已读取的 Cargo 变量构造
    pub fn from_cargo_vars(target_os: Option<&str>, gpu_vulkan: bool) -> Self {
        let system = target_os.and_then(TargetSystem::from_target_os);
        let gpu = gpu_vulkan.then_some(GpuBackend::Vulkan);
        Self::new(system, gpu)
    }

    /// 从预处理器风格的标志符号集合解析
    ///
    /// 多个不同的系统标志会被拒绝；未知符号忽略并记录警告。
    ///
    /// ```
    /// use platform_select::platform::{BuildConfig, GpuBackend, TargetSystem};
    ///
    /// let config = BuildConfig::from_flags(["_SYSTEM_LINUX_", "_GPU_VULKAN_"]).unwrap();
    /// assert_eq!(config.system, Some(TargetSystem::Linux));
    /// assert_eq!(config.gpu, Some(GpuBackend::Vulkan));
    /// ```
    pub fn from_flags<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut systems: Vec<TargetSystem> = Vec::new();
        let mut gpu = None;

        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if let Some(backend) = flags::backend_for_symbol(symbol) {
                gpu = Some(backend);
            } else if let Some(system) = flags::system_for_symbol(symbol) {
                if !systems.contains(&system) {
                    systems.push(system);
                }
            } else {
                warn!(symbol, "Ignoring unknown configuration flag");
            }
        }

        if systems.len() > 1 {
            return Err(SelectionError::ConflictingSystems(systems).into());
        }

        let config = Self::new(systems.first().copied(), gpu);
        debug!(?config, "Parsed build flags");
        Ok(config)
    }

    /// 已定义的标志符号（GPU 在前）
    pub fn flags(&self) -> Vec<&'static str> {
        let mut symbols = Vec::with_capacity(2);
        if let Some(gpu) = self.gpu {
            symbols.push(flags::backend_symbol(gpu));
        }
        if let Some(system) = self.system {
            symbols.push(flags::system_symbol(system));
        }
        symbols
    }

    /// 传给 clang/bindgen 的 `-D` 参数
    pub fn clang_args(&self) -> Vec<String> {
        self.flags().into_iter().map(|s| format!("-D{}", s)).collect()
    }

    /// 解析出需要暴露的原生接口
    pub fn native_apis(&self) -> NativeApiSet {
        resolve(self)
    }

    /// 验证组合是否受支持
    ///
    /// 解析表对所有组合都有定义；这里额外拒绝在本单元中没有平台互操作
    /// 的 Vulkan 组合（macOS、Android、iOS）。
    pub fn validate(&self) -> Result<()> {
        match (self.system, self.gpu) {
            (Some(TargetSystem::Macos | TargetSystem::Android | TargetSystem::Ios), Some(GpuBackend::Vulkan)) => {
                Err(SelectionError::UnsupportedCombination {
                    system: self.system,
                    gpu: self.gpu,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}",
            self.system.map_or("none", |s| s.name()),
            self.gpu.map_or("none", |g| g.name()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PlatformSelectError;

    #[test]
    fn test_system_names_round_trip() {
        for system in TargetSystem::ALL {
            assert_eq!(system.name().parse::<TargetSystem>().unwrap(), system);
        }
        assert_eq!(" Linux ".parse::<TargetSystem>().unwrap(), TargetSystem::Linux);
        assert!("beos".parse::<TargetSystem>().is_err());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("VULKAN".parse::<GpuBackend>().unwrap(), GpuBackend::Vulkan);
        assert_eq!(
            "metal".parse::<GpuBackend>(),
            Err(SelectionError::UnknownBackend("metal".to_string()))
        );
    }

    #[test]
    fn test_from_flags_empty() {
        let config = BuildConfig::from_flags(Vec::<String>::new()).unwrap();
        assert_eq!(config, BuildConfig::default());
        assert!(config.native_apis().is_empty());
    }

    #[test]
    fn test_from_flags_each_system() {
        for system in TargetSystem::ALL {
            let config = BuildConfig::from_flags([flags::system_symbol(system)]).unwrap();
            assert_eq!(config.system, Some(system));
            assert_eq!(config.gpu, None);
        }
    }

    #[test]
    fn test_from_flags_rejects_two_systems() {
        let err = BuildConfig::from_flags(["_SYSTEM_LINUX_", "_GPU_VULKAN_", "_SYSTEM_IOS_"]).unwrap_err();
        match err {
            PlatformSelectError::Selection(SelectionError::ConflictingSystems(systems)) => {
                assert_eq!(systems, vec![TargetSystem::Linux, TargetSystem::Ios]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_flags_duplicates_and_unknown() {
        let config =
            BuildConfig::from_flags(["_SYSTEM_WINDOWS_", "_SYSTEM_WINDOWS_", "_DEBUG_", "_GPU_VULKAN_"]).unwrap();
        assert_eq!(config, BuildConfig::new(Some(TargetSystem::Windows), Some(GpuBackend::Vulkan)));
    }

    #[test]
    fn test_flags_and_clang_args() {
        let config = BuildConfig::new(Some(TargetSystem::Linux), Some(GpuBackend::Vulkan));
        assert_eq!(config.flags(), vec!["_GPU_VULKAN_", "_SYSTEM_LINUX_"]);
        assert_eq!(config.clang_args(), vec!["-D_GPU_VULKAN_", "-D_SYSTEM_LINUX_"]);
        assert_eq!(BuildConfig::from_flags(config.flags()).unwrap(), config);
        assert!(BuildConfig::default().clang_args().is_empty());
    }

    #[test]
    fn test_from_cargo_vars() {
        let config = BuildConfig::from_cargo_vars(Some("windows"), true);
        assert_eq!(config, BuildConfig::new(Some(TargetSystem::Windows), Some(GpuBackend::Vulkan)));

        let config = BuildConfig::from_cargo_vars(Some("freebsd"), false);
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_validate() {
        assert!(BuildConfig::new(Some(TargetSystem::Linux), Some(GpuBackend::Vulkan)).validate().is_ok());
        assert!(BuildConfig::new(Some(TargetSystem::Windows), None).validate().is_ok());
        assert!(BuildConfig::new(None, Some(GpuBackend::Vulkan)).validate().is_ok());
        assert!(BuildConfig::new(Some(TargetSystem::Macos), None).validate().is_ok());

        for system in [TargetSystem::Macos, TargetSystem::Android, TargetSystem::Ios] {
            let config = BuildConfig::new(Some(system), Some(GpuBackend::Vulkan));
            assert!(config.validate().is_err(), "{} should be rejected", config);
        }
    }

    #[test]
    fn test_host_matches_target_os() {
        let host = BuildConfig::host();
        #[cfg(target_os = "linux")]
        assert_eq!(host.system, Some(TargetSystem::Linux));
        #[cfg(target_os = "windows")]
        assert_eq!(host.system, Some(TargetSystem::Windows));
        assert_eq!(host.gpu.is_some(), cfg!(feature = "gpu_vulkan"));
    }

    #[test]
    fn test_display() {
        assert_eq!(BuildConfig::default().to_string(), "none / none");
        assert_eq!(
            BuildConfig::new(Some(TargetSystem::Ios), Some(GpuBackend::Vulkan)).to_string(),
            "ios / vulkan"
        );
    }
}
