//! 配置管理模块
//!
//! 提供选择器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (platform.toml)
//!
//! ```toml
//! [target]
//! system = "linux"    # linux, windows, macos, android, ios；省略表示不定义系统标志
//! gpu = "vulkan"      # 省略表示不定义 GPU 标志
//! strict = true       # 拒绝没有互操作支持的组合
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```
//!
//! 没有配置文件时使用当前编译目标的配置（见 [`BuildConfig::host`]）。

use serde::{Deserialize, Serialize};
use std::path::Path;

use tracing::debug;

use super::error::{ConfigError, PlatformSelectError, Result, SelectionError};
use crate::platform::{BuildConfig, GpuBackend, TargetSystem};

/// 选择器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 目标配置（配置文件中省略时表示不定义任何标志）
    #[serde(default = "TargetConfig::undefined")]
    pub target: TargetConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 目标配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// 目标操作系统
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<TargetSystem>,

    /// GPU 后端
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuBackend>,

    /// 是否拒绝不受支持的组合
    #[serde(default = "default_strict")]
    pub strict: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_strict() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "platform_select.log".to_string() }

impl Default for TargetConfig {
    fn default() -> Self {
        let host = BuildConfig::host();
        Self {
            system: host.system,
            gpu: host.gpu,
            strict: default_strict(),
        }
    }
}

impl TargetConfig {
    /// 不定义任何标志的目标配置
    pub fn undefined() -> Self {
        Self {
            system: None,
            gpu: None,
            strict: default_strict(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use platform_select::core::Config;
    ///
    /// let config = Config::from_file("platform.toml")?;
    /// # Ok::<(), platform_select::core::PlatformSelectError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path_str.clone()).into(),
            _ => PlatformSelectError::Io(e),
        })?;

        Self::from_toml(&contents)
    }

    /// 从 TOML 文本解析
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    ///
    /// 只有文件不存在时才回退到默认配置；解析失败等其他错误照常返回。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::from_file(path) {
            Err(PlatformSelectError::Config(ConfigError::FileNotFound(path))) => {
                debug!(path = %path, "Config file not found, using host configuration");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--system <name>`: 目标操作系统（`none` 表示不定义）
    /// - `--gpu <name>`: GPU 后端（`none` 表示不定义）
    /// - `--host`: 使用当前编译目标的配置
    /// - `--lenient`: 不拒绝缺少互操作支持的组合
    pub fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--host") {
            let host = BuildConfig::host();
            self.target.system = host.system;
            self.target.gpu = host.gpu;
        }

        if args.iter().any(|a| a == "--lenient") {
            self.target.strict = false;
        }

        if let Some(value) = option_value(&args, "--system")? {
            self.target.system = match value {
                "none" => None,
                name => Some(name.parse().map_err(|e: SelectionError| {
                    ConfigError::InvalidValue {
                        field: "target.system".to_string(),
                        reason: e.to_string(),
                    }
                })?),
            };
        }

        if let Some(value) = option_value(&args, "--gpu")? {
            self.target.gpu = match value {
                "none" => None,
                name => Some(name.parse().map_err(|e: SelectionError| {
                    ConfigError::InvalidValue {
                        field: "target.gpu".to_string(),
                        reason: e.to_string(),
                    }
                })?),
            };
        }

        Ok(())
    }

    /// 目标配置对应的构建配置记录
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::new(self.target.system, self.target.gpu)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }
            .into());
        }

        if self.target.strict {
            self.build_config().validate()?;
        }

        Ok(())
    }
}

/// 取出 `--name <value>` 形式参数的值
fn option_value<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == name) {
        None => Ok(None),
        Some(idx) => match args.get(idx + 1) {
            Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
            _ => Err(ConfigError::InvalidValue {
                field: name.trim_start_matches('-').to_string(),
                reason: "Missing value".to_string(),
            }
            .into()),
        },
    }
}
