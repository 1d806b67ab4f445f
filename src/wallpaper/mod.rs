//! # 无缝平铺壁纸模块（wallpaper）
//!
//! ## 设计思路
//!
//! 将“意图解析 → 缩放规划 → 重采样平铺 → 写出”按职责拆分为多个子模块，
//! 各阶段只通过不可变的中间类型交接，前一阶段失败则整条链路终止。
//!
//! - `commands`：命令行参数适配（薄封装）
//! - `handler`：编排整条处理流水线
//! - `resolver`：切片网格 / 显式尺寸 / 预设合并与校验
//! - `preset`：可注入的预设查找表
//! - `planner`：统一缩放系数与画布尺寸计算
//! - `compositor`：一次重采样 + 整数平铺
//! - `codec`：图片读写能力接口与文件系统实现
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（clap 解析 + 日志初始化）
//!    ↓
//! commands.rs（参数适配）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ resolver.rs（意图 → TileRequest，不做 I/O）
//!    ├─ codec.rs（加载源切片 + 体积/像素校验）
//!    ├─ planner.rs（TileRequest + 源尺寸 → ScalePlan）
//!    ├─ compositor.rs（重采样 + 平铺 → Canvas）
//!    └─ codec.rs（原子写出）
//!    ↓
//! 返回 WallpaperError / GenerationReport
//! ```

pub mod commands;
mod codec;
mod compositor;
mod config;
mod error;
mod handler;
mod planner;
mod preset;
mod resolver;
mod source;

pub use codec::{FsImageCodec, ImageCodec};
pub use compositor::compose;
pub use config::{ResampleFilter, WallpaperConfig};
pub use error::{ErrorCategory, WallpaperError};
pub use handler::{GenerationReport, StageTimings, WallpaperGenerator, WallpaperJob};
pub use planner::plan_scale;
pub use preset::{BuiltinPresets, PresetLookup};
pub use resolver::{parse_size, parse_tiles, resolve_request};
pub use source::{Canvas, ScalePlan, SizeIntent, SourceTile, TargetSize, TileGrid, TileRequest};
