//! platform_select - 原生图形互操作的平台/后端选择
//!
//! 根据目标操作系统与 GPU 后端，决定需要暴露哪些原生声明
//! （Vulkan 核心、Vulkan 平台扩展、XCB），并为上层图形代码提供
//! 与平台无关的能力接口。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `platform`: 构建配置记录与原生接口解析
//! - `gfx`: 按平台划分的编译单元、表面创建与原生声明再导出
//!
//! # 使用示例
//!
//! ```
//! use platform_select::platform::{BuildConfig, NativeApi};
//!
//! let config = BuildConfig::from_flags(["_SYSTEM_LINUX_", "_GPU_VULKAN_"]).unwrap();
//! let apis = config.native_apis();
//! assert!(apis.contains(NativeApi::VulkanXcb));
//! print!("{}", apis.render_includes());
//! ```

pub mod core;
pub mod platform;
pub mod gfx;

pub use crate::core::{Config, PlatformSelectError, Result};
pub use gfx::{Capabilities, NativePlatform};
pub use platform::{BuildConfig, GpuBackend, NativeApi, NativeApiSet, TargetSystem};
