//! Display labels for the supported locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language used for card titles, metric labels and the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "en-US", alias = "EN")]
    En,
    #[serde(rename = "zh-CN", alias = "zh", alias = "zh-cn")]
    ZhCn,
}

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::ZhCn => &ZH_CN,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "zh" | "zh-cn" => Ok(Locale::ZhCn),
            other => Err(format!("unsupported locale: {} (expected en or zh-CN)", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::ZhCn => f.write_str("zh-CN"),
        }
    }
}

/// Every piece of text the dashboard shows.
#[derive(Debug)]
pub struct Labels {
    pub system_title: &'static str,
    pub cache_title: &'static str,
    pub warmup_title: &'static str,
    pub performance_title: &'static str,
    pub dedup_title: &'static str,

    pub uptime: &'static str,
    pub memory: &'static str,
    pub goroutines: &'static str,
    pub gc_count: &'static str,

    pub overall_hit_rate: &'static str,
    pub total_requests: &'static str,
    pub item_info_hits: &'static str,
    pub strm_type_hits: &'static str,

    pub warmup_status: &'static str,
    pub success_rate: &'static str,
    pub warmup_requests: &'static str,
    pub average_duration: &'static str,

    pub composite_score: &'static str,
    pub request_rate: &'static str,
    pub cache_efficiency: &'static str,
    pub memory_efficiency: &'static str,

    pub dedup_status: &'static str,
    pub dedup_rate: &'static str,
    pub dedup_count: &'static str,
    pub saved_time: &'static str,
    pub state: &'static str,

    pub enabled: &'static str,
    pub disabled: &'static str,
    pub calculating: &'static str,
    pub good: &'static str,

    pub last_updated: &'static str,
    pub loading: &'static str,
    pub error_title: &'static str,
    pub error_hint: &'static str,
    /// Follows the failure count.
    pub consecutive_failures: &'static str,
    pub trend: &'static str,

    // Header
    pub app_title: &'static str,
    pub paused: &'static str,
    pub hidden: &'static str,
    /// Polling interval, wrapped around the seconds value.
    pub every_prefix: &'static str,
    pub every_suffix: &'static str,

    // Status bar
    pub error_prefix: &'static str,
    /// Time since the last update, wrapped around the seconds value.
    pub updated_prefix: &'static str,
    pub updated_suffix: &'static str,
    pub controls: &'static str,
    pub error_controls: &'static str,
    pub loading_controls: &'static str,
    pub polling_paused: &'static str,
    pub polling_resumed: &'static str,
    pub exported_to: &'static str,
    pub export_failed: &'static str,

    // Help overlay
    pub help_title: &'static str,
    pub help_heading: &'static str,
    pub help_polling: &'static str,
    pub help_refresh: &'static str,
    pub help_pause: &'static str,
    pub help_general: &'static str,
    pub help_export: &'static str,
    pub help_toggle: &'static str,
    pub help_quit: &'static str,
    pub help_focus_note: &'static str,
    pub help_close: &'static str,

    // Too-small terminal
    pub too_small: &'static str,
    pub minimum: &'static str,
    pub resize: &'static str,
}

pub static EN: Labels = Labels {
    system_title: "System",
    cache_title: "Cache",
    warmup_title: "Warmup",
    performance_title: "Performance",
    dedup_title: "Deduplication",

    uptime: "Uptime",
    memory: "Memory",
    goroutines: "Goroutines",
    gc_count: "GC count",

    overall_hit_rate: "Overall hit rate",
    total_requests: "Total requests",
    item_info_hits: "Item info hits",
    strm_type_hits: "Strm type hits",

    warmup_status: "Warmup",
    success_rate: "Success rate",
    warmup_requests: "Warmup requests",
    average_duration: "Average duration",

    composite_score: "Composite score",
    request_rate: "Request rate",
    cache_efficiency: "Cache efficiency",
    memory_efficiency: "Memory efficiency",

    dedup_status: "Deduplication",
    dedup_rate: "Deduplication rate",
    dedup_count: "Deduplicated",
    saved_time: "Time saved",
    state: "Status",

    enabled: "✅ Enabled",
    disabled: "❌ Disabled",
    calculating: "Calculating...",
    good: "Good",

    last_updated: "Last updated: ",
    loading: "Loading monitor data...",
    error_title: "Monitor data unavailable",
    error_hint: "Check that MediaWarp is running and reachable. Retrying on the next tick.",
    consecutive_failures: " consecutive failures",
    trend: "Trend",

    app_title: "MEDIAWARP MONITOR",
    paused: "paused",
    hidden: "hidden",
    every_prefix: "every ",
    every_suffix: "s",

    error_prefix: "Error: ",
    updated_prefix: "Updated ",
    updated_suffix: "s ago",
    controls: "p:pause r:refresh e:export ?:help q:quit",
    error_controls: "r:retry q:quit",
    loading_controls: "q:quit",
    polling_paused: "Polling paused",
    polling_resumed: "Polling resumed",
    exported_to: "Exported to ",
    export_failed: "Export failed: ",

    help_title: " Help ",
    help_heading: "Keyboard Shortcuts",
    help_polling: " Polling",
    help_refresh: "  r         Refresh now",
    help_pause: "  p         Pause / resume",
    help_general: " General",
    help_export: "  e         Export to JSON",
    help_toggle: "  ?         Toggle help",
    help_quit: "  q / Esc   Quit",
    help_focus_note: "Polling pauses while the terminal is unfocused",
    help_close: "Press any key to close",

    too_small: "Terminal too small",
    minimum: "Minimum",
    resize: "Resize to continue",
};

pub static ZH_CN: Labels = Labels {
    system_title: "系统状态",
    cache_title: "缓存统计",
    warmup_title: "预热统计",
    performance_title: "性能指标",
    dedup_title: "请求去重",

    uptime: "运行时间",
    memory: "内存使用",
    goroutines: "协程数量",
    gc_count: "GC次数",

    overall_hit_rate: "总体命中率",
    total_requests: "总请求数",
    item_info_hits: "媒体项命中",
    strm_type_hits: "Strm类型命中",

    warmup_status: "预热状态",
    success_rate: "成功率",
    warmup_requests: "预热请求",
    average_duration: "平均耗时",

    composite_score: "综合评分",
    request_rate: "请求速率",
    cache_efficiency: "缓存效率",
    memory_efficiency: "内存效率",

    dedup_status: "去重状态",
    dedup_rate: "去重率",
    dedup_count: "去重次数",
    saved_time: "节省时间",
    state: "状态",

    enabled: "✅ 已启用",
    disabled: "❌ 未启用",
    calculating: "计算中...",
    good: "良好",

    last_updated: "最后更新: ",
    loading: "正在加载监控数据...",
    error_title: "无法获取监控数据",
    error_hint: "请检查 MediaWarp 是否运行，将在下次轮询时重试。",
    consecutive_failures: " 次连续失败",
    trend: "趋势",

    app_title: "MEDIAWARP 监控",
    paused: "已暂停",
    hidden: "已隐藏",
    every_prefix: "每 ",
    every_suffix: " 秒",

    error_prefix: "错误: ",
    updated_prefix: "",
    updated_suffix: " 秒前更新",
    controls: "p:暂停 r:刷新 e:导出 ?:帮助 q:退出",
    error_controls: "r:重试 q:退出",
    loading_controls: "q:退出",
    polling_paused: "已暂停轮询",
    polling_resumed: "已恢复轮询",
    exported_to: "已导出到 ",
    export_failed: "导出失败: ",

    help_title: " 帮助 ",
    help_heading: "快捷键",
    help_polling: " 轮询",
    help_refresh: "  r         立即刷新",
    help_pause: "  p         暂停 / 恢复",
    help_general: " 通用",
    help_export: "  e         导出为 JSON",
    help_toggle: "  ?         显示 / 隐藏帮助",
    help_quit: "  q / Esc   退出",
    help_focus_note: "终端失去焦点时暂停轮询",
    help_close: "按任意键关闭",

    too_small: "终端窗口过小",
    minimum: "最小尺寸",
    resize: "请调整窗口大小",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("zh-CN".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert_eq!("ZH".parse::<Locale>().unwrap(), Locale::ZhCn);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_chrome_text_is_localized() {
        let zh = Locale::ZhCn.labels();
        assert_eq!(zh.trend, "趋势");
        assert_eq!(zh.paused, "已暂停");
        assert!(zh.controls.contains("q:退出"));
        assert_eq!(Locale::En.labels().app_title, "MEDIAWARP MONITOR");
    }

    #[test]
    fn test_locale_serde_names() {
        let locale: Locale = serde_json::from_str(r#""zh-CN""#).unwrap();
        assert_eq!(locale, Locale::ZhCn);
        assert_eq!(serde_json::to_string(&Locale::En).unwrap(), r#""en""#);
        assert_eq!(Locale::ZhCn.to_string(), "zh-CN");
    }
}
