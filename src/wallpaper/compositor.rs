//! # 切片合成模块
//!
//! ## 设计思路
//!
//! 先把源切片按方案重采样一次，再以“边贴边”的方式整数平铺到画布上。
//! 不做接缝混合：无缝效果完全依赖源切片本身可无缝拼接。
//!
//! ## 实现思路
//!
//! 1. 方案尺寸与源图一致时直接复用源像素，否则用 `fast_image_resize` 卷积重采样
//!    （失败时回退 `image::imageops::resize`）
//! 2. 分配全透明画布
//! 3. 在 `(i * w, j * h)` 处逐格原样拷贝像素，每个画布像素恰好被写入一次

use fast_image_resize as fr;
use image::{GenericImage, ImageBuffer, Rgba, RgbaImage};

use super::config::ResampleFilter;
use super::source::{Canvas, ScalePlan, SourceTile};
use super::WallpaperError;

/// 按方案合成画布。
pub fn compose(
    source: SourceTile,
    plan: &ScalePlan,
    filter: ResampleFilter,
) -> Result<Canvas, WallpaperError> {
    let tile = resample_tile(source, plan, filter)?;

    if tile.width() != plan.scaled_tile_width || tile.height() != plan.scaled_tile_height {
        return Err(WallpaperError::Compose(format!(
            "重采样输出尺寸异常：{}x{}（期望 {}x{}）",
            tile.width(),
            tile.height(),
            plan.scaled_tile_width,
            plan.scaled_tile_height
        )));
    }

    let mut canvas = Canvas::blank(plan.canvas_width, plan.canvas_height);
    for row in 0..plan.tiles_y {
        for col in 0..plan.tiles_x {
            let x = col * plan.scaled_tile_width;
            let y = row * plan.scaled_tile_height;
            canvas
                .as_image_mut()
                .copy_from(&tile, x, y)
                .map_err(|e| WallpaperError::Compose(format!("切片越界 ({}, {})：{}", x, y, e)))?;
        }
    }

    log::debug!(
        "🧱 平铺完成：{}x{} 个 {}x{} 切片 → {}x{}",
        plan.tiles_x,
        plan.tiles_y,
        plan.scaled_tile_width,
        plan.scaled_tile_height,
        plan.canvas_width,
        plan.canvas_height
    );

    Ok(canvas)
}

/// 按方案尺寸重采样源切片（至多一次）。
fn resample_tile(
    source: SourceTile,
    plan: &ScalePlan,
    filter: ResampleFilter,
) -> Result<RgbaImage, WallpaperError> {
    if !plan.needs_resample() {
        log::debug!("切片尺寸未变化，跳过重采样");
        return Ok(source.into_image());
    }

    log::info!(
        "🧩 重采样切片：{}x{} -> {}x{}（filter={}, scale={:.4}）",
        plan.source_width,
        plan.source_height,
        plan.scaled_tile_width,
        plan.scaled_tile_height,
        filter.as_str(),
        plan.scale
    );

    let image = source.into_image();
    match resize_with_fast_image_resize(&image, plan.scaled_tile_width, plan.scaled_tile_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 重采样失败，回退 image::imageops::resize：{}", err);
            Ok(image::imageops::resize(
                &image,
                plan.scaled_tile_width,
                plan.scaled_tile_height,
                filter.to_image_filter(),
            ))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &RgbaImage,
    target_width: u32,
    target_height: u32,
    filter: ResampleFilter,
) -> Result<RgbaImage, WallpaperError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| WallpaperError::Compose(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(filter.to_fast_filter()));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| WallpaperError::Compose(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| WallpaperError::Compose("fast_image_resize 输出缓冲长度异常".to_string()))
}
