//! macOS、Android、iOS 以及未指定系统的平台
//!
//! 这些系统在本单元中没有任何原生互操作；最多只有 Vulkan 核心 API。

#[cfg(feature = "gpu_vulkan")]
use ash::vk;
#[cfg(feature = "gpu_vulkan")]
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
#[cfg(feature = "gpu_vulkan")]
use std::ffi::CStr;

#[cfg(feature = "gpu_vulkan")]
use crate::core::error::{GraphicsError, Result};
use crate::platform::TargetSystem;

use super::backend::NativePlatform;

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericPlatform {
    system: Option<TargetSystem>,
}

impl GenericPlatform {
    /// Linux 与 Windows 有各自的实现，见 [`super::platform_for`]
    pub(crate) fn new(system: Option<TargetSystem>) -> Self {
        Self { system }
    }
}

impl NativePlatform for GenericPlatform {
    fn system(&self) -> Option<TargetSystem> {
        self.system
    }

    fn name(&self) -> &str {
        match self.system {
            Some(TargetSystem::Macos) => "macOS",
            Some(TargetSystem::Android) => "Android",
            Some(TargetSystem::Ios) => "iOS",
            Some(TargetSystem::Linux | TargetSystem::Windows) | None => "unspecified",
        }
    }

    #[cfg(feature = "gpu_vulkan")]
    fn instance_extensions(&self) -> Vec<&'static CStr> {
        Vec::new()
    }

    #[cfg(feature = "gpu_vulkan")]
    unsafe fn create_surface(
        &self,
        _entry: &ash::Entry,
        _instance: &ash::Instance,
        _display: RawDisplayHandle,
        _window: RawWindowHandle,
    ) -> Result<vk::SurfaceKHR> {
        Err(GraphicsError::Unsupported(format!("no Vulkan surface interop for {}", self.name())).into())
    }
}
