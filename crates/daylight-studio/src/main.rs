//! `daylight`: a persistent in-game clock with a day/night cycle.

mod app;
mod display;
mod scene;
mod status;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use daylight_clock::{ClockConfig, ClockStore, FileStore, KeyValueStore, MemoryStore};
use daylight_engine::device::GpuInit;
use daylight_engine::logging::{LoggingConfig, init_logging};
use daylight_engine::time::FrameClamps;
use daylight_engine::window::{Runtime, RuntimeConfig};

use crate::app::DaylightApp;

#[derive(Parser, Debug)]
#[command(name = "daylight")]
#[command(about = "Persistent game clock with a day/night cycle")]
struct Args {
    /// State file holding the elapsed tick count
    #[arg(long, default_value = "daylight-state.json")]
    state: PathBuf,

    /// Keep the clock in memory only; nothing is written
    #[arg(long)]
    ephemeral: bool,

    /// Start over from tick 0
    #[arg(long)]
    reset: bool,

    /// Name shown in the status panel
    #[arg(long, default_value = status::DEFAULT_NAME)]
    name: String,

    /// Font for the status panel; needs Hangul glyphs. Defaults to a system font
    #[arg(long)]
    font: Option<PathBuf>,

    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let store: Box<dyn KeyValueStore> = if args.ephemeral {
        log::info!("ephemeral run; state will not be persisted");
        Box::new(MemoryStore::new())
    } else {
        log::info!("state file: {}", args.state.display());
        Box::new(FileStore::new(args.state.clone()))
    };

    let config = ClockConfig::default();
    let mut clock = ClockStore::open(store, &config);
    if args.reset {
        clock.reset();
    }

    let mut app = DaylightApp::new(clock, &config, &args.name);
    match load_font(args.font.as_deref()) {
        Some(bytes) => app = app.with_font(&bytes),
        None => log::warn!("no usable font found; status text falls back to bars"),
    }

    let runtime = RuntimeConfig::default()
        .with_title(status::HEADING)
        .with_size(args.width, args.height)
        // Stalls must reach the clock in full so it can catch up.
        .with_frame_clamps(FrameClamps::CATCH_UP);

    Runtime::run(runtime, GpuInit::default(), app)
}

/// Fonts with Hangul coverage first, then Latin-only fallbacks.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

fn load_font(explicit: Option<&Path>) -> Option<Vec<u8>> {
    if let Some(path) = explicit {
        match std::fs::read(path) {
            Ok(bytes) => return Some(bytes),
            Err(err) => log::warn!("cannot read font {}: {err}", path.display()),
        }
    }
    FONT_CANDIDATES.iter().find_map(|p| {
        let bytes = std::fs::read(p).ok()?;
        log::debug!("using font {p}");
        Some(bytes)
    })
}
