//! # 无缝平铺壁纸生成器 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与退出码映射。
//! 业务逻辑分布在 `wallpaper` 子模块中，详见 `lib.rs` 架构文档。

use clap::Parser;
use std::process;
use tile_wallpaper::error::AppError;
use tile_wallpaper::wallpaper::commands::{self, CommandError, WallpaperArgs};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = WallpaperArgs::parse();

    if let Err(err) = execute(&args) {
        log::error!("❌ 壁纸生成失败: {err}");
        if args.json {
            let payload = match &err {
                AppError::Wallpaper(inner) => serde_json::to_string_pretty(&CommandError::from(inner)),
                other => serde_json::to_string_pretty(other),
            };
            match payload {
                Ok(json) => println!("{json}"),
                Err(json_err) => eprintln!("Error: {err}（JSON 输出失败: {json_err}）"),
            }
        } else {
            eprintln!("Error: {err}");
        }
        process::exit(err.exit_code());
    }
}

fn execute(args: &WallpaperArgs) -> Result<(), AppError> {
    let report = commands::run(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} → {}x{}（切片 {}x{}，单块 {}x{}）",
            report.output.display(),
            report.plan.canvas_width,
            report.plan.canvas_height,
            report.request.tiles_x,
            report.request.tiles_y,
            report.plan.scaled_tile_width,
            report.plan.scaled_tile_height
        );
    }

    Ok(())
}
