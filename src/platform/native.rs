//! 原生接口解析
//!
//! | 操作系统 | GPU | 原生接口 |
//! |---|---|---|
//! | Linux | Vulkan | Vulkan 核心、XCB、Vulkan-XCB |
//! | Linux | 无 | XCB |
//! | Windows | Vulkan | Vulkan 核心、Vulkan-Win32 |
//! | Windows | 无 | 无 |
//! | macOS / Android / iOS | 任意 | 无平台相关接口（仅可能有 Vulkan 核心） |
//! | 无 | Vulkan | Vulkan 核心 |

use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;

use super::{flags, BuildConfig, GpuBackend, TargetSystem};

/// 原生声明单元
///
/// 声明顺序即包含顺序：核心 API 先于依赖它的平台互操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NativeApi {
    /// Vulkan 核心类型与函数
    VulkanCore,
    /// XCB 连接/窗口类型
    Xcb,
    /// Vulkan 与 XCB 的互操作
    VulkanXcb,
    /// Vulkan 与 Win32 的互操作
    VulkanWin32,
}

impl NativeApi {
    /// 对应的原生头文件
    pub fn header(&self) -> &'static str {
        match self {
            NativeApi::VulkanCore => "vulkan/vulkan.h",
            NativeApi::Xcb => "xcb/xcb.h",
            NativeApi::VulkanXcb => "vulkan/vulkan_xcb.h",
            NativeApi::VulkanWin32 => "vulkan/vulkan_win32.h",
        }
    }

    /// 包含后可用的代表性符号
    pub fn entry_points(&self) -> &'static [&'static str] {
        match self {
            NativeApi::VulkanCore => &["vkCreateInstance", "vkDestroySurfaceKHR", "VkSurfaceKHR"],
            NativeApi::Xcb => &["xcb_connect", "xcb_connection_t", "xcb_window_t"],
            NativeApi::VulkanXcb => &["vkCreateXcbSurfaceKHR", "VkXcbSurfaceCreateInfoKHR"],
            NativeApi::VulkanWin32 => &["vkCreateWin32SurfaceKHR", "VkWin32SurfaceCreateInfoKHR"],
        }
    }

    /// 本接口依赖的其他接口
    pub fn requires(&self) -> &'static [NativeApi] {
        match self {
            NativeApi::VulkanCore | NativeApi::Xcb => &[],
            NativeApi::VulkanXcb => &[NativeApi::VulkanCore, NativeApi::Xcb],
            NativeApi::VulkanWin32 => &[NativeApi::VulkanCore],
        }
    }

    /// 是否为图形 API 到窗口系统的互操作接口
    pub fn is_interop(&self) -> bool {
        matches!(self, NativeApi::VulkanXcb | NativeApi::VulkanWin32)
    }
}

impl fmt::Display for NativeApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// 有序的原生接口集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeApiSet {
    apis: BTreeSet<NativeApi>,
}

impl NativeApiSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, api: NativeApi) {
        self.apis.insert(api);
    }

    pub fn contains(&self, api: NativeApi) -> bool {
        self.apis.contains(&api)
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }

    pub fn len(&self) -> usize {
        self.apis.len()
    }

    /// 按包含顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = NativeApi> + '_ {
        self.apis.iter().copied()
    }

    /// 是否提供某个符号
    pub fn provides(&self, symbol: &str) -> bool {
        self.iter().any(|api| api.entry_points().contains(&symbol))
    }

    /// 生成 `#include` 行
    pub fn render_includes(&self) -> String {
        self.iter()
            .map(|api| format!("#include <{}>\n", api.header()))
            .collect()
    }
}

impl FromIterator<NativeApi> for NativeApiSet {
    fn from_iter<T: IntoIterator<Item = NativeApi>>(iter: T) -> Self {
        Self {
            apis: iter.into_iter().collect(),
        }
    }
}

/// 将构建配置解析为原生接口集合
///
/// 对所有组合都有定义，不会失败。
pub fn resolve(config: &BuildConfig) -> NativeApiSet {
    let vulkan = config.gpu.map_or(false, |g| g.is_vulkan());
    let mut apis = NativeApiSet::new();

    if vulkan {
        apis.insert(NativeApi::VulkanCore);
    }

    match config.system {
        Some(TargetSystem::Linux) => {
            apis.insert(NativeApi::Xcb);
            if vulkan {
                apis.insert(NativeApi::VulkanXcb);
            }
        }
        Some(TargetSystem::Windows) => {
            if vulkan {
                apis.insert(NativeApi::VulkanWin32);
            }
        }
        Some(TargetSystem::Macos | TargetSystem::Android | TargetSystem::Ios) | None => {}
    }

    trace!(%config, count = apis.len(), "Resolved native APIs");
    apis
}

/// 生成通用的、按标志条件包含的包装头文件
///
/// 与 [`resolve`] 等价，只是把选择推迟到 C 预处理器：
/// 以 [`BuildConfig::clang_args`] 的输出作为 bindgen 参数即可。
pub fn render_wrapper() -> String {
    let vulkan = flags::backend_symbol(GpuBackend::Vulkan);
    let mut out = String::new();

    out.push_str(&format!("#ifdef {}\n", vulkan));
    out.push_str(&format!("#include <{}>\n", NativeApi::VulkanCore.header()));
    out.push_str("#endif\n");

    for system in TargetSystem::ALL {
        let platform: &[NativeApi] = match system {
            TargetSystem::Linux => &[NativeApi::Xcb],
            _ => &[],
        };
        let interop: &[NativeApi] = match system {
            TargetSystem::Linux => &[NativeApi::VulkanXcb],
            TargetSystem::Windows => &[NativeApi::VulkanWin32],
            _ => &[],
        };

        out.push('\n');
        out.push_str(&format!("#ifdef {}\n", flags::system_symbol(system)));
        for api in platform {
            out.push_str(&format!("#include <{}>\n", api.header()));
        }
        if !interop.is_empty() {
            out.push_str(&format!("#ifdef {}\n", vulkan));
            for api in interop {
                out.push_str(&format!("#include <{}>\n", api.header()));
            }
            out.push_str("#endif\n");
        }
        out.push_str("#endif\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apis(system: Option<TargetSystem>, gpu: Option<GpuBackend>) -> Vec<NativeApi> {
        resolve(&BuildConfig::new(system, gpu)).iter().collect()
    }

    const VK: Option<GpuBackend> = Some(GpuBackend::Vulkan);

    #[test]
    fn test_linux_rows() {
        assert_eq!(
            apis(Some(TargetSystem::Linux), VK),
            vec![NativeApi::VulkanCore, NativeApi::Xcb, NativeApi::VulkanXcb]
        );
        assert_eq!(apis(Some(TargetSystem::Linux), None), vec![NativeApi::Xcb]);
    }

    #[test]
    fn test_windows_rows() {
        assert_eq!(
            apis(Some(TargetSystem::Windows), VK),
            vec![NativeApi::VulkanCore, NativeApi::VulkanWin32]
        );
        assert!(apis(Some(TargetSystem::Windows), None).is_empty());
    }

    #[test]
    fn test_platforms_without_interop() {
        for system in [TargetSystem::Macos, TargetSystem::Android, TargetSystem::Ios] {
            assert!(apis(Some(system), None).is_empty());
            assert_eq!(apis(Some(system), VK), vec![NativeApi::VulkanCore]);
        }
    }

    #[test]
    fn test_no_system() {
        assert_eq!(apis(None, VK), vec![NativeApi::VulkanCore]);
        assert!(apis(None, None).is_empty());
    }

    #[test]
    fn test_resolved_sets_are_closed_under_requires() {
        for system in TargetSystem::ALL.into_iter().map(Some).chain([None]) {
            for gpu in [None, VK] {
                let set = resolve(&BuildConfig::new(system, gpu));
                for api in set.iter() {
                    for dep in api.requires() {
                        assert!(set.contains(*dep), "{:?} missing {:?}", api, dep);
                    }
                }
            }
        }
    }

    #[test]
    fn test_expected_symbols() {
        let linux = resolve(&BuildConfig::new(Some(TargetSystem::Linux), VK));
        assert!(linux.provides("vkCreateXcbSurfaceKHR"));
        assert!(linux.provides("xcb_connect"));
        assert!(!linux.provides("vkCreateWin32SurfaceKHR"));

        let windows = resolve(&BuildConfig::new(Some(TargetSystem::Windows), VK));
        assert!(windows.provides("vkCreateWin32SurfaceKHR"));
        assert!(!windows.provides("xcb_connect"));
    }

    #[test]
    fn test_render_includes() {
        let set = resolve(&BuildConfig::new(Some(TargetSystem::Linux), VK));
        assert_eq!(
            set.render_includes(),
            "#include <vulkan/vulkan.h>\n#include <xcb/xcb.h>\n#include <vulkan/vulkan_xcb.h>\n"
        );
        assert_eq!(NativeApiSet::new().render_includes(), "");
    }

    #[test]
    fn test_render_wrapper() {
        let wrapper = render_wrapper();
        assert!(wrapper.starts_with("#ifdef _GPU_VULKAN_\n#include <vulkan/vulkan.h>\n#endif\n"));
        assert!(wrapper.contains(
            "#ifdef _SYSTEM_LINUX_\n#include <xcb/xcb.h>\n#ifdef _GPU_VULKAN_\n#include <vulkan/vulkan_xcb.h>\n#endif\n#endif\n"
        ));
        assert!(wrapper.contains(
            "#ifdef _SYSTEM_WINDOWS_\n#ifdef _GPU_VULKAN_\n#include <vulkan/vulkan_win32.h>\n#endif\n#endif\n"
        ));
        assert!(wrapper.contains("#ifdef _SYSTEM_IOS_\n#endif\n"));
    }
}
