//! Windows 平台：Vulkan 通过 `VK_KHR_win32_surface` 互操作
//!
//! 窗口类型本身由 Win32 提供，不在本单元暴露。

#[cfg(feature = "gpu_vulkan")]
use ash::{extensions::khr, vk};
#[cfg(feature = "gpu_vulkan")]
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
#[cfg(feature = "gpu_vulkan")]
use std::ffi::{c_void, CStr};
#[cfg(feature = "gpu_vulkan")]
use tracing::debug;

#[cfg(feature = "gpu_vulkan")]
use crate::core::error::{GraphicsError, Result};
use crate::platform::TargetSystem;

use super::backend::NativePlatform;

/// Windows 平台实现
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

/// 从窗口句柄中取出 HWND 与 HINSTANCE
#[cfg(feature = "gpu_vulkan")]
pub(crate) fn win32_handles(window: RawWindowHandle) -> Result<(vk::HWND, vk::HINSTANCE)> {
    match window {
        RawWindowHandle::Win32(handle) => {
            let hwnd = handle.hwnd.get() as *const c_void;
            let hinstance = handle
                .hinstance
                .map_or(std::ptr::null(), |h| h.get() as *const c_void);
            Ok((hwnd, hinstance))
        }
        other => Err(GraphicsError::WindowHandle(format!("expected Win32 window handle, got {:?}", other)).into()),
    }
}

impl NativePlatform for WindowsPlatform {
    fn system(&self) -> Option<TargetSystem> {
        Some(TargetSystem::Windows)
    }

    fn name(&self) -> &str {
        "Windows (Win32)"
    }

    #[cfg(feature = "gpu_vulkan")]
    fn instance_extensions(&self) -> Vec<&'static CStr> {
        vec![khr::Surface::name(), khr::Win32Surface::name()]
    }

    #[cfg(feature = "gpu_vulkan")]
    unsafe fn create_surface(
        &self,
        entry: &ash::Entry,
        instance: &ash::Instance,
        _display: RawDisplayHandle,
        window: RawWindowHandle,
    ) -> Result<vk::SurfaceKHR> {
        let (hwnd, hinstance) = win32_handles(window)?;

        let create_info = vk::Win32SurfaceCreateInfoKHR::builder()
            .hinstance(hinstance)
            .hwnd(hwnd);

        let loader = khr::Win32Surface::new(entry, instance);
        let surface = loader
            .create_win32_surface(&create_info, None)
            .map_err(|e| GraphicsError::SurfaceCreation(format!("vkCreateWin32SurfaceKHR: {}", e)))?;

        debug!("Win32 surface created");
        Ok(surface)
    }
}

#[cfg(all(test, feature = "gpu_vulkan"))]
mod tests {
    use super::*;
    use raw_window_handle::{Win32WindowHandle, XcbWindowHandle};
    use std::num::{NonZeroIsize, NonZeroU32};

    #[test]
    fn test_win32_handles() {
        let mut handle = Win32WindowHandle::new(NonZeroIsize::new(0x1000).unwrap());
        handle.hinstance = NonZeroIsize::new(0x2000);

        let (hwnd, hinstance) = win32_handles(RawWindowHandle::Win32(handle)).unwrap();
        assert_eq!(hwnd as usize, 0x1000);
        assert_eq!(hinstance as usize, 0x2000);
    }

    #[test]
    fn test_win32_handles_without_hinstance() {
        let handle = Win32WindowHandle::new(NonZeroIsize::new(1).unwrap());
        let (_, hinstance) = win32_handles(RawWindowHandle::Win32(handle)).unwrap();
        assert!(hinstance.is_null());
    }

    #[test]
    fn test_win32_handles_rejects_xcb() {
        let window = RawWindowHandle::Xcb(XcbWindowHandle::new(NonZeroU32::new(3).unwrap()));
        assert!(win32_handles(window).is_err());
    }
}
