//! 原生平台的统一抽象接口
//!
//! 每个"操作系统 × 后端"编译单元都实现 [`NativePlatform`]，上层图形代码
//! 只依赖能力集合（能否创建渲染表面、能否拿到原生窗口句柄），
//! 而不直接依赖平台相关的原生符号。

#[cfg(feature = "gpu_vulkan")]
use ash::vk;
#[cfg(feature = "gpu_vulkan")]
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
#[cfg(feature = "gpu_vulkan")]
use std::ffi::CStr;

#[cfg(feature = "gpu_vulkan")]
use crate::core::Result;
use crate::platform::{resolve, BuildConfig, GpuBackend, NativeApi, NativeApiSet, TargetSystem};

use super::generic::GenericPlatform;
use super::linux::LinuxPlatform;
use super::windows::WindowsPlatform;

/// 平台能力集合
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// 能否创建渲染表面（需要图形 API 与窗口系统的互操作）
    pub surface_creation: bool,

    /// 能否使用原生窗口类型
    pub native_window: bool,
}

impl Capabilities {
    /// 由已解析的原生接口推导能力
    pub fn from_apis(apis: &NativeApiSet) -> Self {
        Self {
            surface_creation: apis.iter().any(|api| api.is_interop()),
            native_window: apis.contains(NativeApi::Xcb),
        }
    }

    /// 由构建配置推导能力
    pub fn of(config: &BuildConfig) -> Self {
        Self::from_apis(&resolve(config))
    }
}

/// 原生平台的统一接口
pub trait NativePlatform {
    /// 平台对应的操作系统
    fn system(&self) -> Option<TargetSystem>;

    /// 平台名称，用于日志输出
    fn name(&self) -> &str;

    fn native_apis(&self, gpu: Option<GpuBackend>) -> NativeApiSet {
        resolve(&BuildConfig::new(self.system(), gpu))
    }

    fn capabilities(&self, gpu: Option<GpuBackend>) -> Capabilities {
        Capabilities::from_apis(&self.native_apis(gpu))
    }

    /// 创建表面所需的 Vulkan 实例扩展
    #[cfg(feature = "gpu_vulkan")]
    fn instance_extensions(&self) -> Vec<&'static CStr>;

    /// 为原生窗口创建 Vulkan 表面
    ///
    /// # Safety
    ///
    /// `instance` 必须由 `entry` 创建，并启用了 [`Self::instance_extensions`]
    /// 返回的扩展；句柄必须在表面销毁之前保持有效。
    #[cfg(feature = "gpu_vulkan")]
    unsafe fn create_surface(
        &self,
        entry: &ash::Entry,
        instance: &ash::Instance,
        display: RawDisplayHandle,
        window: RawWindowHandle,
    ) -> Result<vk::SurfaceKHR>;
}

/// 按操作系统选择平台实现
pub fn platform_for(system: Option<TargetSystem>) -> Box<dyn NativePlatform> {
    match system {
        Some(TargetSystem::Linux) => Box::new(LinuxPlatform),
        Some(TargetSystem::Windows) => Box::new(WindowsPlatform),
        other => Box::new(GenericPlatform::new(other)),
    }
}

/// 当前编译目标的平台实现
pub fn host_platform() -> Box<dyn NativePlatform> {
    platform_for(TargetSystem::host())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VK: Option<GpuBackend> = Some(GpuBackend::Vulkan);

    #[test]
    fn test_capabilities_per_platform() {
        let linux = platform_for(Some(TargetSystem::Linux));
        assert_eq!(
            linux.capabilities(VK),
            Capabilities { surface_creation: true, native_window: true }
        );
        assert_eq!(
            linux.capabilities(None),
            Capabilities { surface_creation: false, native_window: true }
        );

        let windows = platform_for(Some(TargetSystem::Windows));
        assert_eq!(
            windows.capabilities(VK),
            Capabilities { surface_creation: true, native_window: false }
        );
        assert_eq!(windows.capabilities(None), Capabilities::default());

        for system in [Some(TargetSystem::Macos), Some(TargetSystem::Android), Some(TargetSystem::Ios), None] {
            assert_eq!(platform_for(system).capabilities(VK), Capabilities::default());
        }
    }

    #[test]
    fn test_platform_for_keeps_system() {
        for system in TargetSystem::ALL {
            assert_eq!(platform_for(Some(system)).system(), Some(system));
        }
        assert_eq!(platform_for(None).system(), None);
        assert_eq!(host_platform().system(), TargetSystem::host());
    }

    #[test]
    fn test_capabilities_of_config() {
        let config = BuildConfig::new(Some(TargetSystem::Linux), VK);
        assert!(Capabilities::of(&config).surface_creation);
    }

    #[cfg(feature = "gpu_vulkan")]
    #[test]
    fn test_instance_extensions() {
        let names = |system| -> Vec<String> {
            platform_for(system)
                .instance_extensions()
                .into_iter()
                .map(|name| name.to_string_lossy().into_owned())
                .collect()
        };

        assert_eq!(names(Some(TargetSystem::Linux)), vec!["VK_KHR_surface", "VK_KHR_xcb_surface"]);
        assert_eq!(names(Some(TargetSystem::Windows)), vec!["VK_KHR_surface", "VK_KHR_win32_surface"]);
        assert!(names(Some(TargetSystem::Ios)).is_empty());
    }
}
