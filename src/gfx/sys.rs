//! 原生声明的再导出
//!
//! 按编译目标与 feature 暴露所需的原生类型与函数表：
//!
//! - `gpu_vulkan`：Vulkan 核心（`vk`、`Entry`、`Instance`、`Surface`）
//! - Linux：XCB 句柄类型；启用 `gpu_vulkan` 时另有 `XcbSurface`
//! - Windows + `gpu_vulkan`：`Win32Surface`
//! - 其他系统：不额外暴露任何内容
//!
//! 下游代码引用了未被选中的符号时会直接编译失败。

#[cfg(feature = "gpu_vulkan")]
pub use ash::{extensions::khr::Surface, vk, Entry, Instance};

#[cfg(target_os = "linux")]
pub use raw_window_handle::{XcbDisplayHandle, XcbWindowHandle};

#[cfg(all(target_os = "linux", feature = "gpu_vulkan"))]
pub use ash::extensions::khr::XcbSurface;

#[cfg(all(target_os = "windows", feature = "gpu_vulkan"))]
pub use ash::extensions::khr::Win32Surface;
