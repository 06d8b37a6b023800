//! The SDL2 and OpenGL side of the firstgl demos.
//!
//! Each binary only picks a [`DemoKind`]; [`run`] does the rest.

pub mod abs;
pub mod logging;
pub mod platform;

use std::{path::PathBuf, process::ExitCode};

use firstgl_core::{Demo, DemoConfig, DemoKind, FrameLoop, Result, RunSummary, StartClock};
use log::LevelFilter;

use crate::{
    abs::App,
    platform::{SdlEvents, SdlSurface},
};

/// Where shaders, textures and config overrides are looked up.
pub const ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// Runs one demo to completion. Any setup failure is logged and turns into exit status 1.
pub fn run(kind: DemoKind) -> ExitCode {
    let assets_dir = PathBuf::from(ASSETS_DIR);
    let config_path = assets_dir.join(format!("{}.json", kind.binary_name()));
    let config = kind.config(assets_dir).with_file(&config_path);

    let level = config
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or(LevelFilter::Info);
    if let Err(e) = logging::init(level) {
        eprintln!("Failed to install logger: {e}");
    }

    match config.and_then(|config| launch(kind, &config)) {
        Ok(summary) => {
            log::debug!("{} finished after {} frames", kind.binary_name(), summary.frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(1)
        }
    }
}

fn launch(kind: DemoKind, config: &DemoConfig) -> Result<RunSummary> {
    let mut app = App::new(&config.window)?;
    let (width, height) = app.drawable_size();

    let mut demo = Demo::new(
        &app.gl,
        &kind.descriptor(),
        &config.assets_dir,
        width,
        height,
    )?;
    log::info!("{} ready", config.window.title);

    let mut frame_loop = FrameLoop::new(
        SdlEvents {
            pump: &mut app.event_pump,
            window: &app.window,
        },
        SdlSurface(&app.window),
        StartClock::start(),
        config.quit_key,
    );
    Ok(frame_loop.run(&mut demo))
}
