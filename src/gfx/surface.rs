//! Vulkan 表面
//!
//! 从任意实现 raw-window-handle 0.6 的窗口创建 `VkSurfaceKHR`，
//! 由当前平台的 [`NativePlatform`] 实现负责具体的互操作调用。

use ash::{extensions::khr, vk};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::{debug, info};

use crate::core::error::{GraphicsError, Result};

use super::backend::{host_platform, NativePlatform};

/// 拥有一个 `VkSurfaceKHR`，析构时销毁
pub struct NativeSurface {
    loader: khr::Surface,
    handle: vk::SurfaceKHR,
}

impl NativeSurface {
    /// 使用当前编译目标的平台实现创建表面
    ///
    /// # Safety
    ///
    /// 同 [`NativePlatform::create_surface`]；此外表面必须先于
    /// `instance` 被销毁。
    pub unsafe fn new<W>(entry: &ash::Entry, instance: &ash::Instance, window: &W) -> Result<Self>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        Self::with_platform(host_platform().as_ref(), entry, instance, window)
    }

    /// 使用指定的平台实现创建表面
    ///
    /// # Safety
    ///
    /// 同 [`NativeSurface::new`]。
    pub unsafe fn with_platform<W>(
        platform: &dyn NativePlatform,
        entry: &ash::Entry,
        instance: &ash::Instance,
        window: &W,
    ) -> Result<Self>
    where
        W: HasDisplayHandle + HasWindowHandle + ?Sized,
    {
        let display = window
            .display_handle()
            .map_err(|e| GraphicsError::WindowHandle(e.to_string()))?
            .as_raw();
        let raw_window = window
            .window_handle()
            .map_err(|e| GraphicsError::WindowHandle(e.to_string()))?
            .as_raw();

        let handle = platform.create_surface(entry, instance, display, raw_window)?;
        info!(platform = platform.name(), "Native surface created");

        Ok(Self {
            loader: khr::Surface::new(entry, instance),
            handle,
        })
    }

    pub fn handle(&self) -> vk::SurfaceKHR {
        self.handle
    }

    /// `VK_KHR_surface` 函数表，用于查询表面能力
    pub fn loader(&self) -> &khr::Surface {
        &self.loader
    }
}

impl Drop for NativeSurface {
    fn drop(&mut self) {
        unsafe { self.loader.destroy_surface(self.handle, None) };
        debug!("Native surface destroyed");
    }
}
