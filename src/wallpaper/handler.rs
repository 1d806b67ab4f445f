//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `WallpaperGenerator` 只负责流程编排，不直接绑定命令行或具体编解码器。
//! 处理链路固定为：
//! 1. 解析意图（不做 I/O，参数错误在解码前失败）
//! 2. 校验输出格式
//! 3. 加载源切片
//! 4. 规划缩放
//! 5. 重采样 + 平铺
//! 6. 写出
//!
//! ## 实现思路
//!
//! - 编解码器与预设表均为泛型注入，测试可替换为内存实现或自定义表。
//! - 记录 `load/plan/compose/save/total` 阶段耗时，便于性能诊断。
//! - 任一阶段失败立即返回，后续阶段不会执行，目标路径不会被写入。

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use super::codec::ImageCodec;
use super::compositor;
use super::planner;
use super::preset::PresetLookup;
use super::resolver;
use super::source::{Canvas, ScalePlan, SizeIntent, SourceTile, TargetSize, TileRequest};
use super::{WallpaperConfig, WallpaperError};

/// 一次生成任务。
#[derive(Debug, Clone)]
pub struct WallpaperJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub intent: SizeIntent,
}

/// 各阶段耗时（毫秒）。
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageTimings {
    pub load_ms: u128,
    pub plan_ms: u128,
    pub compose_ms: u128,
    pub save_ms: u128,
    pub total_ms: u128,
}

/// 单次运行摘要。
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub request: TileRequest,
    pub source: TargetSize,
    pub plan: ScalePlan,
    pub resampled: bool,
    pub filter: &'static str,
    pub timings: StageTimings,
}

/// 壁纸生成器。
pub struct WallpaperGenerator<C, P> {
    config: WallpaperConfig,
    codec: C,
    presets: P,
}

impl<C: ImageCodec, P: PresetLookup> WallpaperGenerator<C, P> {
    pub fn new(config: WallpaperConfig, codec: C, presets: P) -> Self {
        Self {
            config,
            codec,
            presets,
        }
    }

    /// 解析意图为请求。
    pub fn resolve(&self, intent: &SizeIntent) -> Result<TileRequest, WallpaperError> {
        resolver::resolve_request(intent, &self.presets, &self.config.default_preset)
    }

    /// 对内存中的源切片执行规划与合成，不涉及文件读写。
    pub fn render(
        &self,
        source: SourceTile,
        request: &TileRequest,
    ) -> Result<(ScalePlan, Canvas), WallpaperError> {
        self.check_square(&source)?;
        let plan = planner::plan_scale(source.size(), request, self.config.max_canvas_pixels)?;
        let canvas = compositor::compose(source, &plan, self.config.resample_filter)?;
        Ok((plan, canvas))
    }

    /// 处理主入口：读取切片、生成并写出壁纸。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use tile_wallpaper::wallpaper::*;
    ///
    /// let config = WallpaperConfig::default();
    /// let generator = WallpaperGenerator::new(config.clone(), FsImageCodec::new(&config), BuiltinPresets);
    /// let report = generator.generate(&WallpaperJob {
    ///     input: "tile.png".into(),
    ///     output: "phone.png".into(),
    ///     intent: SizeIntent { tiles: Some(TileGrid::new(3, 6)), preset: Some("phone".into()), ..Default::default() },
    /// })?;
    /// # Ok::<(), WallpaperError>(())
    /// ```
    pub fn generate(&self, job: &WallpaperJob) -> Result<GenerationReport, WallpaperError> {
        let total_start = Instant::now();

        let request = self.resolve(&job.intent)?;
        self.codec.validate_destination(&job.output)?;
        log::info!(
            "🎯 目标 {}x{}，切片 {}x{}",
            request.target_width,
            request.target_height,
            request.tiles_x,
            request.tiles_y
        );

        let load_start = Instant::now();
        let source = self.codec.load(&job.input)?;
        let load_elapsed = load_start.elapsed();
        self.check_square(&source)?;
        let source_size = source.size();

        let plan_start = Instant::now();
        let plan = planner::plan_scale(source_size, &request, self.config.max_canvas_pixels)?;
        let plan_elapsed = plan_start.elapsed();

        if plan.canvas_width != request.target_width || plan.canvas_height != request.target_height {
            log::info!(
                "📐 画布 {}x{} 小于目标 {}x{}（保持切片比例，不裁剪不拉伸）",
                plan.canvas_width,
                plan.canvas_height,
                request.target_width,
                request.target_height
            );
        }

        let compose_start = Instant::now();
        let resampled = plan.needs_resample();
        let canvas = compositor::compose(source, &plan, self.config.resample_filter)?;
        let compose_elapsed = compose_start.elapsed();

        let save_start = Instant::now();
        self.codec.save(&canvas, &job.output)?;
        let save_elapsed = save_start.elapsed();

        let timings = StageTimings {
            load_ms: load_elapsed.as_millis(),
            plan_ms: plan_elapsed.as_millis(),
            compose_ms: compose_elapsed.as_millis(),
            save_ms: save_elapsed.as_millis(),
            total_ms: total_start.elapsed().as_millis(),
        };
        log::info!(
            "✅ 壁纸生成完成 - load={}ms plan={}ms compose={}ms save={}ms total={}ms",
            timings.load_ms,
            timings.plan_ms,
            timings.compose_ms,
            timings.save_ms,
            timings.total_ms
        );

        Ok(GenerationReport {
            input: job.input.clone(),
            output: job.output.clone(),
            request,
            source: source_size,
            plan,
            resampled,
            filter: self.config.resample_filter.as_str(),
            timings,
        })
    }

    fn check_square(&self, source: &SourceTile) -> Result<(), WallpaperError> {
        if self.config.require_square && source.width() != source.height() {
            return Err(WallpaperError::NonSquareTile {
                width: source.width(),
                height: source.height(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallpaper::preset::BuiltinPresets;
    use crate::wallpaper::source::TileGrid;
    use image::{ImageBuffer, Rgba, RgbaImage};
    use std::cell::{Cell, RefCell};
    use std::path::Path;

    /// 内存编解码器：记录调用次数与写出的像素。
    struct MemoryCodec {
        tile: RgbaImage,
        loads: Cell<u32>,
        saved: RefCell<Option<RgbaImage>>,
    }

    impl MemoryCodec {
        fn new(width: u32, height: u32) -> Self {
            Self {
                tile: ImageBuffer::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 9, 255])),
                loads: Cell::new(0),
                saved: RefCell::new(None),
            }
        }
    }

    impl ImageCodec for MemoryCodec {
        fn load(&self, _path: &Path) -> Result<SourceTile, WallpaperError> {
            self.loads.set(self.loads.get() + 1);
            SourceTile::new(self.tile.clone())
        }

        fn save(&self, canvas: &Canvas, _path: &Path) -> Result<(), WallpaperError> {
            *self.saved.borrow_mut() = Some(canvas.as_image().clone());
            Ok(())
        }
    }

    fn job(intent: SizeIntent) -> WallpaperJob {
        WallpaperJob {
            input: PathBuf::from("tile.png"),
            output: PathBuf::from("out.png"),
            intent,
        }
    }

    fn explicit(tiles: (u32, u32), width: u32, height: u32) -> SizeIntent {
        SizeIntent {
            tiles: Some(TileGrid::new(tiles.0, tiles.1)),
            width: Some(width),
            height: Some(height),
            ..SizeIntent::default()
        }
    }

    #[test]
    fn generate_reports_plan_and_saves_canvas() {
        let generator =
            WallpaperGenerator::new(WallpaperConfig::default(), MemoryCodec::new(100, 100), BuiltinPresets);

        let report = generator.generate(&job(explicit((2, 1), 300, 100))).unwrap();

        assert_eq!((report.plan.canvas_width, report.plan.canvas_height), (200, 100));
        assert!(!report.resampled);
        let saved = generator.codec.saved.borrow();
        let saved = saved.as_ref().expect("canvas should be saved");
        assert_eq!(saved.dimensions(), (200, 100));
        assert_eq!(saved.get_pixel(150, 20), saved.get_pixel(50, 20));
    }

    #[test]
    fn invalid_tile_count_fails_before_decode() {
        let generator =
            WallpaperGenerator::new(WallpaperConfig::default(), MemoryCodec::new(100, 100), BuiltinPresets);

        let result = generator.generate(&job(explicit((0, 1), 300, 100)));

        assert!(matches!(result, Err(WallpaperError::InvalidTileCount { .. })));
        assert_eq!(generator.codec.loads.get(), 0);
        assert!(generator.codec.saved.borrow().is_none());
    }

    #[test]
    fn unknown_preset_fails_without_saving() {
        let generator =
            WallpaperGenerator::new(WallpaperConfig::default(), MemoryCodec::new(64, 64), BuiltinPresets);
        let intent = SizeIntent {
            tiles: Some(TileGrid::new(2, 2)),
            preset: Some("poster".to_string()),
            ..SizeIntent::default()
        };

        let err = generator.generate(&job(intent)).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(generator.codec.loads.get(), 0);
        assert!(generator.codec.saved.borrow().is_none());
    }

    #[test]
    fn require_square_rejects_rectangular_tile() {
        let config = WallpaperConfig {
            require_square: true,
            ..WallpaperConfig::default()
        };
        let generator = WallpaperGenerator::new(config, MemoryCodec::new(80, 40), BuiltinPresets);

        let result = generator.generate(&job(explicit((2, 2), 400, 400)));

        assert!(matches!(
            result,
            Err(WallpaperError::NonSquareTile { width: 80, height: 40 })
        ));
        assert!(generator.codec.saved.borrow().is_none());
    }

    #[test]
    fn degenerate_scale_does_not_save() {
        let generator =
            WallpaperGenerator::new(WallpaperConfig::default(), MemoryCodec::new(32, 32), BuiltinPresets);

        let result = generator.generate(&job(explicit((50, 1), 20, 20)));

        assert!(matches!(result, Err(WallpaperError::DegenerateScale { .. })));
        assert!(generator.codec.saved.borrow().is_none());
    }

    #[test]
    fn render_works_on_in_memory_tile() {
        let generator = WallpaperGenerator::new(
            WallpaperConfig::default(),
            MemoryCodec::new(1, 1),
            |name: &str| (name == "strip").then_some(TargetSize::new(90, 30)),
        );
        let intent = SizeIntent {
            tiles: Some(TileGrid::new(3, 1)),
            preset: Some("strip".to_string()),
            ..SizeIntent::default()
        };
        let request = generator.resolve(&intent).unwrap();

        let tile = SourceTile::new(ImageBuffer::from_fn(10, 10, |x, _| Rgba([x as u8, 0, 0, 255]))).unwrap();
        let (plan, canvas) = generator.render(tile, &request).unwrap();

        assert_eq!((plan.scaled_tile_width, plan.scaled_tile_height), (30, 30));
        assert_eq!((canvas.width(), canvas.height()), (90, 30));
    }
}
