//! # 无缝平铺壁纸生成器 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   clap 参数 · env_logger · 退出码                │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<GenerationReport, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  └─ wallpaper                                            │
//! │      ├─ resolver     切片网格 + 尺寸 / 预设 → TileRequest │
//! │      ├─ planner      统一缩放系数 → ScalePlan             │
//! │      ├─ compositor   一次重采样 + 整数平铺 → Canvas       │
//! │      └─ codec        读取切片 · 原子写出                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误 `AppError`，决定输出格式与退出码 |
//! | [`wallpaper`] | 意图解析、缩放规划、平铺合成与图片读写 |

pub mod error;
pub mod wallpaper;
