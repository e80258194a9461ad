//! 预处理器风格的配置标志
//!
//! 原生构建系统通过 `-D` 定义这些符号；这里只做符号与枚举之间的映射。

use super::{GpuBackend, TargetSystem};

pub const GPU_VULKAN: &str = "_GPU_VULKAN_";
pub const SYSTEM_LINUX: &str = "_SYSTEM_LINUX_";
pub const SYSTEM_WINDOWS: &str = "_SYSTEM_WINDOWS_";
pub const SYSTEM_MACOS: &str = "_SYSTEM_MACOS_";
pub const SYSTEM_ANDROID: &str = "_SYSTEM_ANDROID_";
pub const SYSTEM_IOS: &str = "_SYSTEM_IOS_";

/// 操作系统对应的标志符号
pub fn system_symbol(system: TargetSystem) -> &'static str {
    match system {
        TargetSystem::Linux => SYSTEM_LINUX,
        TargetSystem::Windows => SYSTEM_WINDOWS,
        TargetSystem::Macos => SYSTEM_MACOS,
        TargetSystem::Android => SYSTEM_ANDROID,
        TargetSystem::Ios => SYSTEM_IOS,
    }
}

/// GPU 后端对应的标志符号
pub fn backend_symbol(gpu: GpuBackend) -> &'static str {
    match gpu {
        GpuBackend::Vulkan => GPU_VULKAN,
    }
}

pub fn system_for_symbol(symbol: &str) -> Option<TargetSystem> {
    TargetSystem::ALL
        .into_iter()
        .find(|system| system_symbol(*system) == symbol)
}

pub fn backend_for_symbol(symbol: &str) -> Option<GpuBackend> {
    (symbol == GPU_VULKAN).then_some(GpuBackend::Vulkan)
}
