//! Linux 平台：XCB 窗口系统，Vulkan 通过 `VK_KHR_xcb_surface` 互操作

#[cfg(feature = "gpu_vulkan")]
use ash::{extensions::khr, vk};
#[cfg(feature = "gpu_vulkan")]
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
#[cfg(feature = "gpu_vulkan")]
use std::ffi::{c_void, CStr};
#[cfg(feature = "gpu_vulkan")]
use std::ptr::NonNull;
#[cfg(feature = "gpu_vulkan")]
use tracing::debug;

#[cfg(feature = "gpu_vulkan")]
use crate::core::error::{GraphicsError, Result};
use crate::platform::TargetSystem;

use super::backend::NativePlatform;

/// Linux 平台实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxPlatform;

/// 从窗口句柄中取出 XCB 连接与窗口 ID
#[cfg(feature = "gpu_vulkan")]
pub(crate) fn xcb_handles(display: RawDisplayHandle, window: RawWindowHandle) -> Result<(NonNull<c_void>, u32)> {
    match (display, window) {
        (RawDisplayHandle::Xcb(display), RawWindowHandle::Xcb(window)) => {
            let connection = display
                .connection
                .ok_or_else(|| GraphicsError::WindowHandle("XCB display handle has no connection".to_string()))?;
            Ok((connection, window.window.get()))
        }
        (display, window) => Err(GraphicsError::WindowHandle(format!(
            "expected XCB handles, got {:?} / {:?}",
            display, window
        ))
        .into()),
    }
}

impl NativePlatform for LinuxPlatform {
    fn system(&self) -> Option<TargetSystem> {
        Some(TargetSystem::Linux)
    }

    fn name(&self) -> &str {
        "Linux (XCB)"
    }

    #[cfg(feature = "gpu_vulkan")]
    fn instance_extensions(&self) -> Vec<&'static CStr> {
        vec![khr::Surface::name(), khr::XcbSurface::name()]
    }

    #[cfg(feature = "gpu_vulkan")]
    unsafe fn create_surface(
        &self,
        entry: &ash::Entry,
        instance: &ash::Instance,
        display: RawDisplayHandle,
        window: RawWindowHandle,
    ) -> Result<vk::SurfaceKHR> {
        let (connection, window) = xcb_handles(display, window)?;

        let create_info = vk::XcbSurfaceCreateInfoKHR::builder()
            .connection(connection.as_ptr().cast())
            .window(window);

        let loader = khr::XcbSurface::new(entry, instance);
        let surface = loader
            .create_xcb_surface(&create_info, None)
            .map_err(|e| GraphicsError::SurfaceCreation(format!("vkCreateXcbSurfaceKHR: {}", e)))?;

        debug!(window, "XCB surface created");
        Ok(surface)
    }
}

#[cfg(all(test, feature = "gpu_vulkan"))]
mod tests {
    use super::*;
    use crate::core::error::PlatformSelectError;
    use raw_window_handle::{Win32WindowHandle, WindowsDisplayHandle, XcbDisplayHandle, XcbWindowHandle};
    use std::num::{NonZeroIsize, NonZeroU32};

    fn xcb_window(id: u32) -> RawWindowHandle {
        RawWindowHandle::Xcb(XcbWindowHandle::new(NonZeroU32::new(id).unwrap()))
    }

    #[test]
    fn test_xcb_handles() {
        let mut token = 0u8;
        let connection = NonNull::from(&mut token).cast::<c_void>();
        let display = RawDisplayHandle::Xcb(XcbDisplayHandle::new(Some(connection), 0));

        let (conn, window) = xcb_handles(display, xcb_window(42)).unwrap();
        assert_eq!(conn, connection);
        assert_eq!(window, 42);
    }

    #[test]
    fn test_xcb_handles_without_connection() {
        let display = RawDisplayHandle::Xcb(XcbDisplayHandle::new(None, 0));
        assert!(matches!(
            xcb_handles(display, xcb_window(7)),
            Err(PlatformSelectError::Graphics(GraphicsError::WindowHandle(_)))
        ));
    }

    #[test]
    fn test_xcb_handles_rejects_win32() {
        let display = RawDisplayHandle::Windows(WindowsDisplayHandle::new());
        let window = RawWindowHandle::Win32(Win32WindowHandle::new(NonZeroIsize::new(1).unwrap()));
        assert!(xcb_handles(display, window).is_err());
    }
}
