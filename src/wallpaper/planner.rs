//! # 缩放规划模块
//!
//! ## 设计思路
//!
//! 给定源切片尺寸与请求，计算唯一的统一缩放系数以及最终画布尺寸。
//! 只缩放一次、只按整数像素平铺，因此不会出现接缝，也不需要二次缩放。
//!
//! ## 实现思路
//!
//! 1. 理想单元格：`ideal_w = target_w / tiles_x`，`ideal_h = target_h / tiles_y`
//! 2. 统一系数：`s = min(ideal_w / src_w, ideal_h / src_h)`，保持源图宽高比
//! 3. 四舍五入得到切片尺寸；进位导致超出 `floor(target / tiles)` 时两边改为向下取整，
//!    保证画布不超出目标
//! 4. 画布 = 切片尺寸 × 切片数量（以此为准，可能略小于目标）
//!
//! 宽高比与单元格不一致时，画布会在一个方向上小于目标：不裁剪、不拉伸、不留白。

use super::source::{ScalePlan, TargetSize, TileRequest};
use super::WallpaperError;

const FLOOR_EPSILON: f64 = 1e-9;

/// 计算缩放方案。
///
/// # 示例
/// ```rust,ignore
/// use tile_wallpaper::wallpaper::{plan_scale, TargetSize, TileRequest};
///
/// let request = TileRequest { tiles_x: 2, tiles_y: 1, target_width: 300, target_height: 100 };
/// let plan = plan_scale(TargetSize::new(100, 100), &request, u64::MAX)?;
/// assert_eq!((plan.canvas_width, plan.canvas_height), (200, 100));
/// # Ok::<(), tile_wallpaper::wallpaper::WallpaperError>(())
/// ```
pub fn plan_scale(
    source: TargetSize,
    request: &TileRequest,
    max_canvas_pixels: u64,
) -> Result<ScalePlan, WallpaperError> {
    let degenerate = || WallpaperError::DegenerateScale {
        tiles_x: request.tiles_x,
        tiles_y: request.tiles_y,
        target_width: request.target_width,
        target_height: request.target_height,
        source_width: source.width,
        source_height: source.height,
    };

    if source.width == 0 || source.height == 0 || request.tiles_x == 0 || request.tiles_y == 0 {
        return Err(degenerate());
    }

    let ideal_w = request.target_width as f64 / request.tiles_x as f64;
    let ideal_h = request.target_height as f64 / request.tiles_y as f64;
    let scale = (ideal_w / source.width as f64).min(ideal_h / source.height as f64);

    if !scale.is_finite() || scale <= 0.0 {
        return Err(degenerate());
    }

    let cell_width = request.target_width / request.tiles_x;
    let cell_height = request.target_height / request.tiles_y;
    let (scaled_tile_width, scaled_tile_height) =
        scaled_tile_size(source, scale, cell_width, cell_height);

    if scaled_tile_width == 0 || scaled_tile_height == 0 {
        return Err(degenerate());
    }

    let canvas_width = scaled_tile_width
        .checked_mul(request.tiles_x)
        .ok_or_else(|| WallpaperError::ResourceLimit("画布宽度溢出".to_string()))?;
    let canvas_height = scaled_tile_height
        .checked_mul(request.tiles_y)
        .ok_or_else(|| WallpaperError::ResourceLimit("画布高度溢出".to_string()))?;

    let canvas_pixels = (canvas_width as u64)
        .checked_mul(canvas_height as u64)
        .ok_or_else(|| WallpaperError::ResourceLimit("画布像素数溢出".to_string()))?;
    if canvas_pixels > max_canvas_pixels {
        return Err(WallpaperError::ResourceLimit(format!(
            "画布像素过大：{}x{} = {} 像素（限制：{} 像素）",
            canvas_width, canvas_height, canvas_pixels, max_canvas_pixels
        )));
    }

    Ok(ScalePlan {
        scale,
        source_width: source.width,
        source_height: source.height,
        scaled_tile_width,
        scaled_tile_height,
        tiles_x: request.tiles_x,
        tiles_y: request.tiles_y,
        canvas_width,
        canvas_height,
    })
}

/// 切片缩放后尺寸。
///
/// 优先四舍五入；若任一边因进位超出单元格，则两边统一向下取整（至少 1 像素），
/// 保证不超出目标且两边取整方向一致。
fn scaled_tile_size(source: TargetSize, scale: f64, cell_width: u32, cell_height: u32) -> (u32, u32) {
    let exact_width = source.width as f64 * scale;
    let exact_height = source.height as f64 * scale;

    let rounded_width = to_edge(exact_width.round());
    let rounded_height = to_edge(exact_height.round());
    if rounded_width <= cell_width && rounded_height <= cell_height {
        return (rounded_width, rounded_height);
    }

    // 吸收 s * src 的浮点误差，避免整数结果被截成 n - 1；
    // 不足 1 像素的短边保留 1 像素，单元格为 0 时仍为 0
    let floored_width = to_edge((exact_width + FLOOR_EPSILON).floor()).max(1).min(cell_width);
    let floored_height = to_edge((exact_height + FLOOR_EPSILON).floor()).max(1).min(cell_height);
    (floored_width, floored_height)
}

fn to_edge(value: f64) -> u32 {
    if value >= u32::MAX as f64 {
        u32::MAX
    } else if value <= 0.0 {
        0
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tiles: (u32, u32), target: (u32, u32)) -> TileRequest {
        TileRequest {
            tiles_x: tiles.0,
            tiles_y: tiles.1,
            target_width: target.0,
            target_height: target.1,
        }
    }

    #[test]
    fn square_tile_in_wide_target_keeps_aspect() {
        // 理想单元格 150x100 → s = min(1.5, 1.0) = 1.0
        let plan = plan_scale(TargetSize::new(100, 100), &request((2, 1), (300, 100)), u64::MAX)
            .unwrap();

        assert_eq!(plan.scale, 1.0);
        assert_eq!((plan.scaled_tile_width, plan.scaled_tile_height), (100, 100));
        assert_eq!((plan.canvas_width, plan.canvas_height), (200, 100));
        assert!(!plan.needs_resample());
    }

    #[test]
    fn phone_preset_with_square_tile() {
        // 1080/3 = 360，1920/6 = 320 → 纵向受限
        let plan = plan_scale(TargetSize::new(512, 512), &request((3, 6), (1080, 1920)), u64::MAX)
            .unwrap();

        assert_eq!((plan.scaled_tile_width, plan.scaled_tile_height), (320, 320));
        assert_eq!((plan.canvas_width, plan.canvas_height), (960, 1920));
        assert!(plan.needs_resample());
    }

    #[test]
    fn single_tile_is_resize_to_fit() {
        let plan = plan_scale(TargetSize::new(400, 200), &request((1, 1), (1000, 1000)), u64::MAX)
            .unwrap();

        assert_eq!((plan.canvas_width, plan.canvas_height), (1000, 500));
        assert_eq!(plan.scale, 2.5);
    }

    #[test]
    fn fractional_cell_never_overshoots() {
        // 301/2 = 150.5，四舍五入会得到 151，需封顶为 150
        let plan = plan_scale(TargetSize::new(100, 100), &request((2, 1), (301, 1000)), u64::MAX)
            .unwrap();

        assert_eq!(plan.scaled_tile_width, 150);
        assert_eq!(plan.scaled_tile_height, 150);
        assert!(plan.canvas_width <= 301);
        assert!(plan.canvas_height <= 1000);
    }

    #[test]
    fn sub_pixel_short_edge_survives_floor_fallback() {
        // s = 0.75：1.5 进位为 2 超出单元格 1，回退取整后宽 0.75 仍保留 1 像素
        let plan = plan_scale(TargetSize::new(1, 2), &request((1, 2), (100, 3)), u64::MAX).unwrap();
        assert_eq!((plan.scaled_tile_width, plan.scaled_tile_height), (1, 1));
        assert_eq!((plan.canvas_width, plan.canvas_height), (1, 2));

        let plan =
            plan_scale(TargetSize::new(6, 1000), &request((1, 2), (100, 201)), u64::MAX).unwrap();
        assert_eq!((plan.scaled_tile_width, plan.scaled_tile_height), (1, 100));
        assert!(plan.canvas_height <= 201);
    }

    #[test]
    fn zero_cell_is_still_degenerate() {
        // 3 / 4 = 0：单元格本身为 0
        let result = plan_scale(TargetSize::new(10, 10), &request((1, 4), (100, 3)), u64::MAX);
        assert!(matches!(result, Err(WallpaperError::DegenerateScale { .. })));
    }

    #[test]
    fn non_square_tile_is_not_distorted() {
        let plan = plan_scale(TargetSize::new(300, 200), &request((4, 4), (3840, 2160)), u64::MAX)
            .unwrap();

        // s = min(960/300, 540/200) = 2.7
        assert_eq!((plan.scaled_tile_width, plan.scaled_tile_height), (810, 540));
        assert_eq!((plan.canvas_width, plan.canvas_height), (3240, 2160));
    }

    #[test]
    fn more_tiles_than_pixels_is_degenerate() {
        let result = plan_scale(TargetSize::new(64, 64), &request((500, 1), (300, 100)), u64::MAX);

        assert!(matches!(
            result,
            Err(WallpaperError::DegenerateScale {
                tiles_x: 500,
                target_width: 300,
                ..
            })
        ));
    }

    #[test]
    fn very_thin_tile_rounds_to_zero() {
        // 1x1000 源图放入 100x100，s = 0.1，宽度四舍五入为 0
        let result = plan_scale(TargetSize::new(1, 1000), &request((1, 1), (100, 100)), u64::MAX);
        assert!(matches!(result, Err(WallpaperError::DegenerateScale { .. })));
    }

    #[test]
    fn canvas_over_pixel_limit_is_rejected() {
        let result = plan_scale(TargetSize::new(100, 100), &request((2, 2), (4000, 4000)), 1_000_000);
        assert!(matches!(result, Err(WallpaperError::ResourceLimit(_))));
    }
}
