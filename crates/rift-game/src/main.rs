use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use rift_engine::device::GpuInit;
use rift_engine::logging::init_logging;
use rift_engine::window::{Runtime, RuntimeConfig};
use rift_game::app::RiftApp;
use rift_game::config::GameConfig;
use rift_game::{assets, cards, SCREEN_HEIGHT, SCREEN_WIDTH};

fn main() -> Result<()> {
    let config = GameConfig::from_env().context("reading configuration")?;
    init_logging(config.logging.clone());

    cards::validate_tables().context("card tables are inconsistent")?;
    let image = assets::load_image(config.assets_dir.as_deref()).context("preparing the texture atlas")?;

    let scale = f64::from(config.window_scale);
    let runtime = RuntimeConfig {
        title: "Beyond the Rift".to_string(),
        initial_size: LogicalSize::new(f64::from(SCREEN_WIDTH) * scale, f64::from(SCREEN_HEIGHT) * scale),
        hide_cursor: true,
    };
    log::info!("starting at {}x scale", config.window_scale);

    let app = RiftApp::new(&config, image);
    Runtime::run(runtime, GpuInit::default(), app).context("running the game loop")
}
