//! # 数据模型
//!
//! ## 设计思路
//!
//! 将“用户意图”和“流水线中间结果”解耦：
//! - `SizeIntent` 表示命令行给出的原始意图（可能不合法）
//! - `TileRequest` 表示经解析校验后的请求
//! - `ScalePlan` 表示由源图尺寸 + 请求推导出的唯一缩放方案
//! - `SourceTile` / `Canvas` 分别是输入像素与输出像素
//!
//! 各阶段只通过这些类型交接，所有权按值传递。

use image::RgbaImage;
use serde::Serialize;

use super::WallpaperError;

/// 宽高对（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 切片网格（横向 × 纵向重复次数）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    pub tiles_x: u32,
    pub tiles_y: u32,
}

impl TileGrid {
    pub const fn new(tiles_x: u32, tiles_y: u32) -> Self {
        Self { tiles_x, tiles_y }
    }
}

/// 解析前的尺寸意图。
///
/// `explicit` 与 `preset` 同时存在属于冲突，由解析器拒绝。
#[derive(Debug, Clone, Default)]
pub struct SizeIntent {
    /// 切片网格，`None` 视为参数缺失。
    pub tiles: Option<TileGrid>,
    /// `--size WxH` 给出的尺寸。
    pub size: Option<TargetSize>,
    /// `--width`。
    pub width: Option<u32>,
    /// `--height`。
    pub height: Option<u32>,
    /// `--preset`。
    pub preset: Option<String>,
}

/// 校验后的生成请求。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRequest {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub target_width: u32,
    pub target_height: u32,
}

/// 缩放方案。
///
/// 不变量：`canvas_width == scaled_tile_width * tiles_x`，
/// `canvas_height == scaled_tile_height * tiles_y`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalePlan {
    /// 统一缩放系数（宽高共用）。
    pub scale: f64,
    pub source_width: u32,
    pub source_height: u32,
    pub scaled_tile_width: u32,
    pub scaled_tile_height: u32,
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl ScalePlan {
    /// 缩放后尺寸与源图一致时无需重采样。
    pub fn needs_resample(&self) -> bool {
        self.scaled_tile_width != self.source_width || self.scaled_tile_height != self.source_height
    }

    pub fn canvas_size(&self) -> TargetSize {
        TargetSize::new(self.canvas_width, self.canvas_height)
    }
}

/// 源切片：只读 RGBA 像素。
#[derive(Debug, Clone)]
pub struct SourceTile {
    image: RgbaImage,
}

impl SourceTile {
    /// 包装一张 RGBA 图像，零尺寸视为解码异常。
    pub fn new(image: RgbaImage) -> Result<Self, WallpaperError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(WallpaperError::Decode(format!(
                "源图尺寸为零：{}x{}",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> TargetSize {
        TargetSize::new(self.width(), self.height())
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// 合成结果画布。
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// 分配全透明画布。
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
