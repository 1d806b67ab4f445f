//! # 尺寸预设
//!
//! ## 设计思路
//!
//! 预设表是固定的“名称 → 宽高”映射，建模为可注入的纯查找接口 `PresetLookup`，
//! 而不是全局可变状态。测试可直接传入闭包替换整张表。
//!
//! 打印类预设按 300 PPI 折算：A4 为 8.27 × 11.69 英寸 → 2480 × 3508 像素。

use super::source::TargetSize;

/// 预设查找接口。
pub trait PresetLookup {
    /// 按名称查找尺寸，未知名称返回 `None`。
    fn lookup(&self, name: &str) -> Option<TargetSize>;

    /// 可用预设名（用于错误提示），无法枚举时返回空。
    fn available(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<F> PresetLookup for F
where
    F: Fn(&str) -> Option<TargetSize>,
{
    fn lookup(&self, name: &str) -> Option<TargetSize> {
        self(name)
    }
}

/// 内置预设表。
const BUILTIN_PRESETS: &[(&str, TargetSize)] = &[
    // 常见手机竖屏
    ("phone", TargetSize::new(1080, 1920)),
    // 4K UHD 横屏
    ("4k", TargetSize::new(3840, 2160)),
    ("a4-portrait", TargetSize::new(2480, 3508)),
    ("a4-landscape", TargetSize::new(3508, 2480)),
];

/// 内置预设查找（名称不区分大小写，忽略首尾空白）。
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPresets;

impl PresetLookup for BuiltinPresets {
    fn lookup(&self, name: &str) -> Option<TargetSize> {
        let normalized = name.trim().to_lowercase();
        BUILTIN_PRESETS
            .iter()
            .find(|(preset, _)| *preset == normalized)
            .map(|(_, size)| *size)
    }

    fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_PRESETS.iter().map(|(name, _)| name.to_string()).collect();
        names.sort();
        names
    }
}
