//! 错误处理模块
//!
//! 定义了选择器中使用的统一错误类型。
//!
//! 原生头文件选择本身只会在编译期失败；这里的错误类型覆盖显式化之后
//! 才出现的失败情况：配置文件、标志冲突、不支持的组合，以及运行期的
//! 表面（surface）创建。

use std::fmt;

use crate::platform::{GpuBackend, TargetSystem};

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, PlatformSelectError>;

/// platform_select 的错误类型
#[derive(Debug)]
pub enum PlatformSelectError {
    /// 配置错误
    Config(ConfigError),

    /// 平台/后端选择错误
    Selection(SelectionError),

    /// 图形接口错误
    Graphics(GraphicsError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 平台/后端组合相关的错误
#[derive(Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// 同时定义了多个操作系统标志
    ConflictingSystems(Vec<TargetSystem>),

    /// 该组合在本单元中没有原生互操作支持
    UnsupportedCombination {
        system: Option<TargetSystem>,
        gpu: Option<GpuBackend>,
    },

    /// 无法识别的操作系统名称
    UnknownSystem(String),

    /// 无法识别的 GPU 后端名称
    UnknownBackend(String),
}

/// 图形接口相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 当前平台不提供该能力
    Unsupported(String),

    /// 窗口/显示句柄不可用或类型不匹配
    WindowHandle(String),

    /// 表面创建失败
    SurfaceCreation(String),
}

impl fmt::Display for PlatformSelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformSelectError::Config(e) => write!(f, "Configuration error: {}", e),
            PlatformSelectError::Selection(e) => write!(f, "Selection error: {}", e),
            PlatformSelectError::Graphics(e) => write!(f, "Graphics error: {}", e),
            PlatformSelectError::Io(e) => write!(f, "IO error: {}", e),
            PlatformSelectError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::ConflictingSystems(systems) => {
                let names: Vec<&str> = systems.iter().map(|s| s.name()).collect();
                write!(f, "Conflicting operating systems: {}", names.join(", "))
            }
            SelectionError::UnsupportedCombination { system, gpu } => write!(
                f,
                "Unsupported combination: system={}, gpu={}",
                system.map_or("none", |s| s.name()),
                gpu.map_or("none", |g| g.name()),
            ),
            SelectionError::UnknownSystem(name) => write!(f, "Unknown operating system: {}", name),
            SelectionError::UnknownBackend(name) => write!(f, "Unknown GPU backend: {}", name),
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::Unsupported(msg) => write!(f, "Unsupported on this platform: {}", msg),
            GraphicsError::WindowHandle(msg) => write!(f, "Window handle error: {}", msg),
            GraphicsError::SurfaceCreation(msg) => write!(f, "Surface creation failed: {}", msg),
        }
    }
}

impl std::error::Error for PlatformSelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformSelectError::Config(e) => Some(e),
            PlatformSelectError::Selection(e) => Some(e),
            PlatformSelectError::Graphics(e) => Some(e),
            PlatformSelectError::Io(e) => Some(e),
            PlatformSelectError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for SelectionError {}
impl std::error::Error for GraphicsError {}

impl From<std::io::Error> for PlatformSelectError {
    fn from(err: std::io::Error) -> Self {
        PlatformSelectError::Io(err)
    }
}

impl From<ConfigError> for PlatformSelectError {
    fn from(err: ConfigError) -> Self {
        PlatformSelectError::Config(err)
    }
}

impl From<SelectionError> for PlatformSelectError {
    fn from(err: SelectionError) -> Self {
        PlatformSelectError::Selection(err)
    }
}

impl From<GraphicsError> for PlatformSelectError {
    fn from(err: GraphicsError) -> Self {
        PlatformSelectError::Graphics(err)
    }
}
