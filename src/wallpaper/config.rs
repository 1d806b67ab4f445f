//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `WallpaperConfig`，保证运行时行为可观测、可调整、可测试。
//! 重采样滤镜作为独立枚举 `ResampleFilter`，只收录卷积类滤镜，
//! 最近邻插值在类型层面不可表达（会产生锯齿，不满足平滑缩放要求）。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置（Lanczos3、常见体积与像素上限、默认预设 4k）。
//! - `ResampleFilter` 负责字符串解析（即 `--filter` 的取值解析器，含常见别名）
//!   与反向输出，并映射到 `fast_image_resize` 与 `image` 两套滤镜。

use fast_image_resize as fr;
use image::imageops::FilterType;

use super::WallpaperError;

/// 壁纸生成配置。
#[derive(Debug, Clone)]
pub struct WallpaperConfig {
    /// 读取输入文件时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 源图解码后的像素上限（`width * height`）。
    pub max_source_pixels: u64,
    /// 输出画布的像素上限。
    pub max_canvas_pixels: u64,
    /// 重采样滤镜。
    pub resample_filter: ResampleFilter,
    /// 未指定尺寸与预设时使用的预设名。
    pub default_preset: String,
    /// 是否要求输入切片为正方形。
    pub require_square: bool,
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_source_pixels: 40_000_000,
            max_canvas_pixels: 150_000_000,
            resample_filter: ResampleFilter::Lanczos3,
            default_preset: "4k".to_string(),
            require_square: false,
        }
    }
}

/// 重采样滤镜。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleFilter {
    Bilinear,
    CatmullRom,
    Mitchell,
    Lanczos3,
}

impl ResampleFilter {
    /// 从外部字符串解析滤镜。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use tile_wallpaper::wallpaper::ResampleFilter;
    ///
    /// let f = ResampleFilter::parse("catmull-rom")?;
    /// assert_eq!(f.as_str(), "catmull-rom");
    /// # Ok::<(), tile_wallpaper::wallpaper::WallpaperError>(())
    /// ```
    pub fn parse(filter: &str) -> Result<Self, WallpaperError> {
        match filter.trim().to_lowercase().as_str() {
            "bilinear" | "triangle" => Ok(Self::Bilinear),
            "catmull-rom" | "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "mitchell" => Ok(Self::Mitchell),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(WallpaperError::InvalidArgument(format!(
                "未知重采样滤镜：{}（可选：bilinear / catmull-rom / mitchell / lanczos3）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bilinear => "bilinear",
            Self::CatmullRom => "catmull-rom",
            Self::Mitchell => "mitchell",
            Self::Lanczos3 => "lanczos3",
        }
    }

    pub(crate) fn to_fast_filter(self) -> fr::FilterType {
        match self {
            Self::Bilinear => fr::FilterType::Bilinear,
            Self::CatmullRom => fr::FilterType::CatmullRom,
            Self::Mitchell => fr::FilterType::Mitchell,
            Self::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }

    /// `image` 没有 Mitchell，回退路径用最接近的高斯核代替。
    pub(crate) fn to_image_filter(self) -> FilterType {
        match self {
            Self::Bilinear => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Mitchell => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
