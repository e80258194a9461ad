//! platform_select 命令行工具
//!
//! 解析目标配置，输出对应的原生接口。可用于生成 bindgen 的包装头文件
//! 或 `-D` 参数。
//!
//! # 使用方法
//!
//! ```bash
//! # 当前编译目标（或 platform.toml）的摘要
//! cargo run
//!
//! # 指定目标并输出 #include 行
//! cargo run -- --system linux --gpu vulkan --emit-includes
//!
//! # 输出通用的按标志条件包含的头文件
//! cargo run -- --emit-wrapper --out wrapper.h
//! ```

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;

use platform_select::core::{log, Config};
use platform_select::gfx::platform_for;
use platform_select::platform::{native::render_wrapper, BuildConfig};
use platform_select::{select_debug, select_info, select_warn};

const DEFAULT_CONFIG: &str = "platform.toml";

const USAGE: &str = "\
Usage: platform_select [OPTIONS]

Options:
  --config <path>     Load target configuration from a TOML file (default: platform.toml)
  --system <os>       linux, windows, macos, android, ios or none
  --gpu <backend>     vulkan or none
  --host              Use the configuration of the current build target
  --lenient           Do not reject combinations without native interop
  --emit-includes     Print the resolved #include lines
  --emit-wrapper      Print the generic flag-gated wrapper header
  --defines           Print the -D arguments for clang/bindgen
  --out <path>        Write the output to a file instead of stdout
  -h, --help          Show this help
";

/// 输出内容
#[derive(Debug, PartialEq, Eq)]
enum Output {
    Summary,
    Includes,
    Wrapper,
    Defines,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{}", USAGE);
        return Ok(());
    }

    // 1. 加载配置（显式指定的配置文件必须存在）
    let mut config = match arg_value(&args, "--config")? {
        Some(path) => Config::from_file(path).with_context(|| format!("failed to load {}", path))?,
        None => Config::from_file_or_default(DEFAULT_CONFIG)
            .with_context(|| format!("failed to load {}", DEFAULT_CONFIG))?,
    };

    // 2. 应用命令行参数并验证
    config.apply_args(&args).context("invalid command line")?;
    config.validate().context("invalid configuration")?;

    // 3. 初始化日志系统
    let log_file = config.logging.file_output.then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)?;

    let build = config.build_config();
    select_info!(config = %build, strict = config.target.strict, "Resolved build configuration");
    if let Err(e) = build.validate() {
        select_warn!(error = %e, "Continuing with a combination that has no native interop");
    }

    let output = output_kind(&args)?;
    let text = match output {
        Output::Summary => summary(&build),
        Output::Includes => build.native_apis().render_includes(),
        Output::Wrapper => render_wrapper(),
        Output::Defines => {
            let mut line = build.clang_args().join(" ");
            line.push('\n');
            line
        }
    };

    match arg_value(&args, "--out")? {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("failed to write {}", path))?;
            select_info!(path, "Output written");
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn output_kind(args: &[String]) -> Result<Output> {
    let selected: Vec<Output> = args
        .iter()
        .filter_map(|a| match a.as_str() {
            "--emit-includes" => Some(Output::Includes),
            "--emit-wrapper" => Some(Output::Wrapper),
            "--defines" => Some(Output::Defines),
            _ => None,
        })
        .collect();
    select_debug!(count = selected.len(), "Output selectors");

    if selected.len() > 1 {
        bail!("--emit-includes, --emit-wrapper and --defines are mutually exclusive");
    }
    Ok(selected.into_iter().next().unwrap_or(Output::Summary))
}

fn arg_value<'a>(args: &'a [String], name: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == name) {
        None => Ok(None),
        Some(idx) => match args.get(idx + 1) {
            Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
            _ => bail!("{} requires a value", name),
        },
    }
}

fn summary(build: &BuildConfig) -> String {
    let platform = platform_for(build.system);
    let apis = build.native_apis();
    let caps = platform.capabilities(build.gpu);

    let mut out = String::new();
    let _ = writeln!(out, "configuration: {}", build);
    let _ = writeln!(out, "platform:      {}", platform.name());
    let _ = writeln!(out, "flags:         {}", build.flags().join(" "));
    let _ = writeln!(out, "native APIs:");
    if apis.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for api in apis.iter() {
        let _ = writeln!(out, "  {:<24} {}", api.header(), api.entry_points().join(", "));
    }
    let _ = writeln!(
        out,
        "capabilities:  surface_creation={} native_window={}",
        caps.surface_creation, caps.native_window
    );

    #[cfg(feature = "gpu_vulkan")]
    if build.gpu.is_some() {
        let extensions: Vec<String> = platform
            .instance_extensions()
            .into_iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        let _ = writeln!(out, "extensions:    {}", extensions.join(", "));
    }

    out
}
