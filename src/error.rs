//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，命令行入口统一返回 `Result<T, AppError>`，
//! 由它决定错误输出格式与进程退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `WallpaperError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，供 `--json` 输出。

use serde::Serialize;

use crate::wallpaper::{ErrorCategory, WallpaperError};

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 壁纸生成流水线错误（解析 / 解码 / 规划 / 写出）
    #[error("{0}")]
    Wallpaper(#[from] WallpaperError),

    /// 运行摘要序列化失败
    #[error("摘要序列化失败: {0}")]
    Report(#[from] serde_json::Error),
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Wallpaper(err) => err.category(),
            Self::Report(_) => ErrorCategory::Io,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
