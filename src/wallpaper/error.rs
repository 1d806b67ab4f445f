//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载“解析意图 → 规划尺寸 → 合成 → 写出”整条链路的错误来源，
//! 避免字符串拼接式错误处理。通过 `thiserror` 保持人类可读错误，同时让调用侧（及测试）
//! 可按分支匹配。
//!
//! ## 实现思路
//!
//! - 每个分支归属一个 `ErrorCategory`，由它决定进程退出码。
//! - `code()` / `stage()` 输出稳定字符串，供 `--json` 结构化错误使用。

/// 错误大类，对应不同退出码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 参数错误：未知预设、尺寸冲突、非法切片数等。
    Usage,
    /// 读写错误：输入不可读、解码失败、输出不可写。
    Io,
    /// 处理错误：缩放退化、资源超限、合成异常。
    Processing,
}

impl ErrorCategory {
    /// 进程退出码（与 clap 参数错误的 2 保持一致）。
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Usage => 2,
            Self::Io => 3,
            Self::Processing => 4,
        }
    }
}

/// 壁纸生成统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum WallpaperError {
    #[error("参数格式错误：{0}")]
    InvalidArgument(String),

    #[error("未知预设：{name}（可选：{available}）")]
    UnknownPreset { name: String, available: String },

    #[error("输出尺寸冲突：{0}")]
    ConflictingSize(String),

    #[error("切片数量必须为正整数：{tiles_x}x{tiles_y}")]
    InvalidTileCount { tiles_x: u32, tiles_y: u32 },

    #[error("目标尺寸必须为正整数：{width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    #[error("输入切片必须为正方形：{width}x{height}（可去掉 --require-square）")]
    NonSquareTile { width: u32, height: u32 },

    #[error(
        "缩放退化：切片 {tiles_x}x{tiles_y} 无法放入目标 {target_width}x{target_height}（源图 {source_width}x{source_height}）"
    )]
    DegenerateScale {
        tiles_x: u32,
        tiles_y: u32,
        target_width: u32,
        target_height: u32,
        source_width: u32,
        source_height: u32,
    },

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("合成错误：{0}")]
    Compose(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("不支持的输出格式：{0}")]
    UnsupportedFormat(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("写入错误：{0}")]
    IoWrite(String),
}

impl WallpaperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument(_)
            | Self::UnknownPreset { .. }
            | Self::ConflictingSize(_)
            | Self::InvalidTileCount { .. }
            | Self::InvalidDimension { .. }
            | Self::NonSquareTile { .. } => ErrorCategory::Usage,
            Self::FileSystem(_)
            | Self::InvalidFormat(_)
            | Self::Decode(_)
            | Self::UnsupportedFormat(_)
            | Self::Encode(_)
            | Self::IoWrite(_) => ErrorCategory::Io,
            Self::DegenerateScale { .. } | Self::ResourceLimit(_) | Self::Compose(_) => {
                ErrorCategory::Processing
            }
        }
    }

    /// 稳定错误码，供脚本侧判断。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnknownPreset { .. } => "unknown_preset",
            Self::ConflictingSize(_) => "conflicting_size",
            Self::InvalidTileCount { .. } => "invalid_tile_count",
            Self::InvalidDimension { .. } => "invalid_dimension",
            Self::NonSquareTile { .. } => "non_square_tile",
            Self::DegenerateScale { .. } => "degenerate_scale",
            Self::ResourceLimit(_) => "resource_limit",
            Self::Compose(_) => "compose",
            Self::FileSystem(_) => "file_system",
            Self::InvalidFormat(_) => "invalid_format",
            Self::Decode(_) => "decode",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::Encode(_) => "encode",
            Self::IoWrite(_) => "io_write",
        }
    }

    /// 出错所在的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_)
            | Self::UnknownPreset { .. }
            | Self::ConflictingSize(_)
            | Self::InvalidTileCount { .. }
            | Self::InvalidDimension { .. } => "resolve",
            Self::FileSystem(_) | Self::InvalidFormat(_) | Self::Decode(_) | Self::NonSquareTile { .. } => {
                "load"
            }
            Self::DegenerateScale { .. } | Self::ResourceLimit(_) => "plan",
            Self::Compose(_) => "compose",
            Self::UnsupportedFormat(_) | Self::Encode(_) | Self::IoWrite(_) => "save",
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}
