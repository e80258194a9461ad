//! 图形平台模块
//!
//! 本模块按"操作系统 × GPU 后端"划分编译单元：
//! - `linux`：XCB + Vulkan-XCB 互操作
//! - `windows`：Vulkan-Win32 互操作
//! - `generic`：macOS、Android、iOS 及未指定系统，不提供互操作
//!
//! 所有平台都实现统一的 `NativePlatform` trait；`sys` 按编译目标再导出
//! 对应的原生声明。

pub mod backend;
pub mod generic;
pub mod linux;
pub mod windows;
pub mod sys;
#[cfg(feature = "gpu_vulkan")]
pub mod surface;

pub use backend::{host_platform, platform_for, Capabilities, NativePlatform};
pub use generic::GenericPlatform;
pub use linux::LinuxPlatform;
pub use windows::WindowsPlatform;
#[cfg(feature = "gpu_vulkan")]
pub use surface::NativeSurface;
