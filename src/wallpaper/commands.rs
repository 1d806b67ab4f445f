//! # 命令行参数层
//!
//! ## 设计思路
//!
//! 命令层仅做参数接收与结果返回，不承载业务逻辑。
//! 字符串形式的 `--tiles` / `--size` 在这里只做语法解析，
//! 语义校验（切片数为 0、尺寸冲突、未知预设）统一交给 `resolver`，
//! 保证所有参数错误都走同一套 `WallpaperError` 分支。

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use super::{
    BuiltinPresets, FsImageCodec, GenerationReport, ResampleFilter, SizeIntent, WallpaperConfig,
    WallpaperError, WallpaperGenerator, WallpaperJob, parse_size, parse_tiles,
};

/// 用一张无缝切片生成平铺壁纸。
#[derive(Debug, Clone, Parser)]
#[command(name = "tile-wallpaper")]
#[command(about = "用一张无缝切片重复平铺生成壁纸 / 打印背景", long_about = None)]
pub struct WallpaperArgs {
    /// 输入切片图片（PNG / JPG / WebP 等）
    pub input: PathBuf,

    /// 输出图片路径，扩展名决定格式（如 out.png / out.jpg / out.webp）
    pub output: PathBuf,

    /// 切片数量，形如 2x4 或 2*4
    #[arg(long)]
    pub tiles: String,

    /// 输出尺寸预设（4k / phone / a4-portrait / a4-landscape）
    #[arg(long)]
    pub preset: Option<String>,

    /// 自定义输出尺寸，形如 3000x2000
    #[arg(long)]
    pub size: Option<String>,

    /// 自定义输出宽度（需与 --height 同时使用）
    #[arg(long)]
    pub width: Option<u32>,

    /// 自定义输出高度（需与 --width 同时使用）
    #[arg(long)]
    pub height: Option<u32>,

    /// 重采样滤镜（bilinear / catmull-rom / mitchell / lanczos3）
    #[arg(long, default_value = "lanczos3", value_parser = parse_filter_arg)]
    pub filter: ResampleFilter,

    /// 要求输入切片为正方形
    #[arg(long)]
    pub require_square: bool,

    /// 以 JSON 输出运行摘要或错误
    #[arg(long)]
    pub json: bool,
}

fn parse_filter_arg(value: &str) -> Result<ResampleFilter, String> {
    ResampleFilter::parse(value).map_err(|e| e.to_string())
}

/// 面向脚本的结构化错误。
#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    pub code: &'static str,
    pub stage: &'static str,
    pub exit_code: i32,
    pub message: String,
}

impl From<&WallpaperError> for CommandError {
    fn from(error: &WallpaperError) -> Self {
        Self {
            code: error.code(),
            stage: error.stage(),
            exit_code: error.exit_code(),
            message: error.to_string(),
        }
    }
}

impl WallpaperArgs {
    /// 合成运行配置。
    pub fn config(&self) -> WallpaperConfig {
        WallpaperConfig {
            resample_filter: self.filter,
            require_square: self.require_square,
            ..WallpaperConfig::default()
        }
    }

    /// 参数语法解析为生成任务。
    pub fn job(&self) -> Result<WallpaperJob, WallpaperError> {
        let tiles = parse_tiles(&self.tiles)?;
        let size = self.size.as_deref().map(parse_size).transpose()?;

        Ok(WallpaperJob {
            input: self.input.clone(),
            output: self.output.clone(),
            intent: SizeIntent {
                tiles: Some(tiles),
                size,
                width: self.width,
                height: self.height,
                preset: self.preset.clone(),
            },
        })
    }
}

/// 执行一次生成。
pub fn run(args: &WallpaperArgs) -> Result<GenerationReport, WallpaperError> {
    let job = args.job()?;
    let config = args.config();
    let codec = FsImageCodec::new(&config);
    let generator = WallpaperGenerator::new(config, codec, BuiltinPresets);
    generator.generate(&job)
}
