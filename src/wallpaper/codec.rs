//! # 编解码模块
//!
//! ## 设计思路
//!
//! 图片读写抽象为最小能力接口 `ImageCodec`（`load` / `save`），
//! 缩放与平铺核心因此可以用内存中的合成像素测试，与具体编解码器无关。
//!
//! ## 实现思路
//!
//! 读取（`FsImageCodec::load`）：
//! - 存在性 + metadata 体积限制 + 读取字节
//! - `infer` 签名校验，拒绝已识别的非图片内容
//! - 先读 header 尺寸做像素上限检查，再完整解码并转为 RGBA
//!
//! 写出（`FsImageCodec::save`）：
//! - 由扩展名推断格式，不可写格式尽早拒绝
//! - 先在内存中完成编码，再写入同目录临时文件并原子重命名，
//!   任一步失败都不会在目标路径留下残缺文件

use image::{DynamicImage, ImageFormat};
use std::io::{Cursor, Write};
use std::path::Path;

use super::source::{Canvas, SourceTile};
use super::{WallpaperConfig, WallpaperError};

/// 图片读写能力。
pub trait ImageCodec {
    /// 读取并解码源切片。
    fn load(&self, path: &Path) -> Result<SourceTile, WallpaperError>;

    /// 将画布按扩展名对应格式写出。
    fn save(&self, canvas: &Canvas, path: &Path) -> Result<(), WallpaperError>;

    /// 在解码输入之前校验输出路径，默认不做检查。
    fn validate_destination(&self, _path: &Path) -> Result<(), WallpaperError> {
        Ok(())
    }
}

/// 基于文件系统与 `image` crate 的编解码实现。
#[derive(Debug, Clone)]
pub struct FsImageCodec {
    max_file_size: u64,
    max_source_pixels: u64,
}

impl FsImageCodec {
    pub fn new(config: &WallpaperConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            max_source_pixels: config.max_source_pixels,
        }
    }

    /// 由扩展名推断可写出的格式。
    pub fn output_format(path: &Path) -> Result<ImageFormat, WallpaperError> {
        let format = ImageFormat::from_path(path).map_err(|_| {
            WallpaperError::UnsupportedFormat(format!("无法从扩展名识别格式：{}", path.display()))
        })?;

        if !format.writing_enabled() {
            return Err(WallpaperError::UnsupportedFormat(format!(
                "{:?} 格式不支持写出：{}",
                format,
                path.display()
            )));
        }

        Ok(format)
    }

    fn validate_image_signature(bytes: &[u8]) -> Result<(), WallpaperError> {
        if bytes.is_empty() {
            return Err(WallpaperError::InvalidFormat("图片内容为空".to_string()));
        }

        // infer 不认识的格式（如 TGA / PNM）交给 image 的格式猜测
        let Some(kind) = infer::get(bytes) else {
            return Ok(());
        };

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(WallpaperError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }

    /// 仅通过图片头信息读取宽高，用于在完整解码前做像素限制检查。
    fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), WallpaperError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| WallpaperError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| WallpaperError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), WallpaperError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| WallpaperError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > self.max_source_pixels {
            return Err(WallpaperError::ResourceLimit(format!(
                "源图像素过大：{} 像素（限制：{} 像素）",
                pixels, self.max_source_pixels
            )));
        }

        Ok(())
    }

    /// 编码到内存。JPEG 不支持透明通道，先转 RGB。
    fn encode(canvas: &Canvas, format: ImageFormat) -> Result<Vec<u8>, WallpaperError> {
        let image = DynamicImage::ImageRgba8(canvas.as_image().clone());
        let image = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image,
        };

        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, format)
            .map_err(|e| WallpaperError::Encode(format!("{:?} 编码失败：{}", format, e)))?;
        Ok(cursor.into_inner())
    }
}

impl ImageCodec for FsImageCodec {
    fn load(&self, path: &Path) -> Result<SourceTile, WallpaperError> {
        log::info!("📁 开始读取源切片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(WallpaperError::FileSystem(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| WallpaperError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > self.max_file_size {
            return Err(WallpaperError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| WallpaperError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        let (header_width, header_height) = Self::inspect_dimensions(&bytes)?;
        self.validate_pixel_limits(header_width, header_height)?;

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| WallpaperError::Decode(format!("图片解码失败：{}", e)))?;

        log::info!(
            "✅ 源切片解码成功 - 尺寸: {}x{} 色彩: {:?}",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        SourceTile::new(decoded.to_rgba8())
    }

    fn save(&self, canvas: &Canvas, path: &Path) -> Result<(), WallpaperError> {
        let format = Self::output_format(path)?;
        let bytes = Self::encode(canvas, format)?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .map_err(|e| WallpaperError::IoWrite(format!("无法创建输出目录 {}：{}", parent.display(), e)))?;

        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| WallpaperError::IoWrite(format!("无法创建临时文件：{}", e)))?;
        staged
            .write_all(&bytes)
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| WallpaperError::IoWrite(format!("写入临时文件失败：{}", e)))?;
        staged
            .persist(path)
            .map_err(|e| WallpaperError::IoWrite(format!("无法写入 {}：{}", path.display(), e.error)))?;

        log::info!(
            "💾 已写出 {}（{:?}，{} KB）",
            path.display(),
            format,
            bytes.len() / 1024
        );
        Ok(())
    }

    fn validate_destination(&self, path: &Path) -> Result<(), WallpaperError> {
        Self::output_format(path).map(|_| ())
    }
}
