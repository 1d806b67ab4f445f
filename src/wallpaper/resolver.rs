//! # 意图解析模块
//!
//! ## 设计思路
//!
//! 把命令行给出的切片网格、显式尺寸与预设名合并为一个已校验的 `TileRequest`。
//! 该阶段不做任何 I/O，必须在解码图片之前完成，以便参数错误尽早失败。
//!
//! ## 实现思路
//!
//! 1. 切片网格缺失或任一方向为 0 → `InvalidTileCount`
//! 2. 显式尺寸（`--size` 或 `--width/--height`）与预设同时出现 → `ConflictingSize`
//! 3. 只给出宽或高之一 → `ConflictingSize`
//! 4. 预设名经 `PresetLookup` 查找，未知 → `UnknownPreset`
//! 5. 都未给出 → 使用默认预设
//! 6. 任一目标边为 0 → `InvalidDimension`

use super::preset::PresetLookup;
use super::source::{SizeIntent, TargetSize, TileGrid, TileRequest};
use super::WallpaperError;

/// 解析 `"2x4"` / `"2*4"` 形式的切片网格。
///
/// 0 在此处放行，由 `resolve_request` 统一报告 `InvalidTileCount`。
pub fn parse_tiles(raw: &str) -> Result<TileGrid, WallpaperError> {
    let normalized = raw.trim().to_lowercase().replace('*', "x");
    let (tiles_x, tiles_y) = split_pair(&normalized).ok_or_else(|| {
        WallpaperError::InvalidArgument(format!("切片数量应形如 2x4 或 2*4，收到：{}", raw))
    })?;
    Ok(TileGrid::new(tiles_x, tiles_y))
}

/// 解析 `"3840x2160"` 形式的尺寸。
pub fn parse_size(raw: &str) -> Result<TargetSize, WallpaperError> {
    let normalized = raw.trim().to_lowercase();
    let (width, height) = split_pair(&normalized).ok_or_else(|| {
        WallpaperError::InvalidArgument(format!("尺寸应形如 3840x2160，收到：{}", raw))
    })?;
    Ok(TargetSize::new(width, height))
}

fn split_pair(normalized: &str) -> Option<(u32, u32)> {
    let (a, b) = normalized.split_once('x')?;
    let first = a.trim().parse::<u32>().ok()?;
    let second = b.trim().parse::<u32>().ok()?;
    Some((first, second))
}

/// 合并意图并校验，生成 `TileRequest`。
pub fn resolve_request<P: PresetLookup + ?Sized>(
    intent: &SizeIntent,
    presets: &P,
    default_preset: &str,
) -> Result<TileRequest, WallpaperError> {
    let grid = intent
        .tiles
        .ok_or_else(|| WallpaperError::InvalidArgument("缺少 --tiles 参数".to_string()))?;
    if grid.tiles_x < 1 || grid.tiles_y < 1 {
        return Err(WallpaperError::InvalidTileCount {
            tiles_x: grid.tiles_x,
            tiles_y: grid.tiles_y,
        });
    }

    let explicit = explicit_size(intent)?;
    let target = match (explicit, intent.preset.as_deref()) {
        (Some(_), Some(preset)) => {
            return Err(WallpaperError::ConflictingSize(format!(
                "显式尺寸与预设 {} 不能同时指定",
                preset
            )));
        }
        (Some(size), None) => size,
        (None, Some(preset)) => lookup_preset(presets, preset)?,
        (None, None) => {
            log::debug!("未指定输出尺寸，使用默认预设 {}", default_preset);
            lookup_preset(presets, default_preset)?
        }
    };

    if target.width < 1 || target.height < 1 {
        return Err(WallpaperError::InvalidDimension {
            width: target.width,
            height: target.height,
        });
    }

    Ok(TileRequest {
        tiles_x: grid.tiles_x,
        tiles_y: grid.tiles_y,
        target_width: target.width,
        target_height: target.height,
    })
}

fn explicit_size(intent: &SizeIntent) -> Result<Option<TargetSize>, WallpaperError> {
    match (intent.size, intent.width, intent.height) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(WallpaperError::ConflictingSize(
            "--size 与 --width/--height 不能同时指定".to_string(),
        )),
        (Some(size), None, None) => Ok(Some(size)),
        (None, Some(width), Some(height)) => Ok(Some(TargetSize::new(width, height))),
        (None, Some(_), None) | (None, None, Some(_)) => Err(WallpaperError::ConflictingSize(
            "--width 与 --height 必须同时指定".to_string(),
        )),
        (None, None, None) => Ok(None),
    }
}

fn lookup_preset<P: PresetLookup + ?Sized>(
    presets: &P,
    name: &str,
) -> Result<TargetSize, WallpaperError> {
    presets.lookup(name).ok_or_else(|| {
        let available = presets.available();
        WallpaperError::UnknownPreset {
            name: name.to_string(),
            available: if available.is_empty() {
                "-".to_string()
            } else {
                available.join(" / ")
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallpaper::preset::BuiltinPresets;

    fn intent(tiles: (u32, u32)) -> SizeIntent {
        SizeIntent {
            tiles: Some(TileGrid::new(tiles.0, tiles.1)),
            ..SizeIntent::default()
        }
    }

    #[test]
    fn parse_tiles_accepts_x_and_star() {
        assert_eq!(parse_tiles("2x4").unwrap(), TileGrid::new(2, 4));
        assert_eq!(parse_tiles(" 3*6 ").unwrap(), TileGrid::new(3, 6));
        assert_eq!(parse_tiles("2X1").unwrap(), TileGrid::new(2, 1));
    }

    #[test]
    fn parse_tiles_rejects_malformed_input() {
        for raw in ["2", "axb", "2x", "-1x2", "2x3x4", ""] {
            assert!(
                matches!(parse_tiles(raw), Err(WallpaperError::InvalidArgument(_))),
                "should reject {:?}",
                raw
            );
        }
    }

    #[test]
    fn parse_tiles_lets_zero_through_for_resolver() {
        assert_eq!(parse_tiles("0x1").unwrap(), TileGrid::new(0, 1));
    }

    #[test]
    fn parse_size_reads_width_and_height() {
        assert_eq!(parse_size("3000x2000").unwrap(), TargetSize::new(3000, 2000));
        assert!(matches!(parse_size("3000*2000"), Err(WallpaperError::InvalidArgument(_))));
    }

    #[test]
    fn zero_tile_count_is_rejected() {
        let mut request = intent((0, 1));
        request.width = Some(300);
        request.height = Some(100);

        let result = resolve_request(&request, &BuiltinPresets, "4k");
        assert!(matches!(
            result,
            Err(WallpaperError::InvalidTileCount { tiles_x: 0, tiles_y: 1 })
        ));
    }

    #[test]
    fn explicit_dimensions_are_used() {
        let mut request = intent((2, 1));
        request.width = Some(300);
        request.height = Some(100);

        let resolved = resolve_request(&request, &BuiltinPresets, "4k").unwrap();
        assert_eq!(
            resolved,
            TileRequest {
                tiles_x: 2,
                tiles_y: 1,
                target_width: 300,
                target_height: 100,
            }
        );
    }

    #[test]
    fn preset_is_looked_up() {
        let mut request = intent((3, 6));
        request.preset = Some("phone".to_string());

        let resolved = resolve_request(&request, &BuiltinPresets, "4k").unwrap();
        assert_eq!((resolved.target_width, resolved.target_height), (1080, 1920));
    }

    #[test]
    fn missing_size_falls_back_to_default_preset() {
        let resolved = resolve_request(&intent((6, 4)), &BuiltinPresets, "4k").unwrap();
        assert_eq!((resolved.target_width, resolved.target_height), (3840, 2160));
    }

    #[test]
    fn unknown_preset_lists_available_names() {
        let mut request = intent((2, 2));
        request.preset = Some("8k".to_string());

        match resolve_request(&request, &BuiltinPresets, "4k") {
            Err(WallpaperError::UnknownPreset { name, available }) => {
                assert_eq!(name, "8k");
                assert!(available.contains("a4-portrait"));
            }
            other => panic!("expected UnknownPreset, got {:?}", other),
        }
    }

    #[test]
    fn explicit_size_with_preset_conflicts() {
        let mut request = intent((2, 2));
        request.size = Some(TargetSize::new(100, 100));
        request.preset = Some("4k".to_string());

        assert!(matches!(
            resolve_request(&request, &BuiltinPresets, "4k"),
            Err(WallpaperError::ConflictingSize(_))
        ));
    }

    #[test]
    fn size_with_width_conflicts_and_half_size_is_incomplete() {
        let mut both = intent((1, 1));
        both.size = Some(TargetSize::new(100, 100));
        both.width = Some(50);
        assert!(matches!(
            resolve_request(&both, &BuiltinPresets, "4k"),
            Err(WallpaperError::ConflictingSize(_))
        ));

        let mut half = intent((1, 1));
        half.height = Some(50);
        assert!(matches!(
            resolve_request(&half, &BuiltinPresets, "4k"),
            Err(WallpaperError::ConflictingSize(_))
        ));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let mut request = intent((1, 1));
        request.size = Some(TargetSize::new(0, 100));

        assert!(matches!(
            resolve_request(&request, &BuiltinPresets, "4k"),
            Err(WallpaperError::InvalidDimension { width: 0, height: 100 })
        ));
    }

    #[test]
    fn injected_lookup_replaces_builtin_table() {
        let lookup = |name: &str| (name == "tiny").then_some(TargetSize::new(8, 8));
        let mut request = intent((2, 2));
        request.preset = Some("tiny".to_string());

        let resolved = resolve_request(&request, &lookup, "tiny").unwrap();
        assert_eq!((resolved.target_width, resolved.target_height), (8, 8));

        request.preset = Some("4k".to_string());
        assert!(matches!(
            resolve_request(&request, &lookup, "tiny"),
            Err(WallpaperError::UnknownPreset { .. })
        ));
    }
}
