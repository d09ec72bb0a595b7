pub mod algorithm;
pub mod capture;
pub mod engine;
pub mod error;
pub mod input;
pub mod models;
pub mod scene;

pub use engine::{ZoomEngine, ZoomRuntime};
pub use error::{Result, ZoomError};
pub use models::settings::{EngineConfig, ZoomSettings};

/// Headless host: global hooks drive an in-memory scene the size of the
/// primary display. Settings come from the first argument or the default
/// config path.
#[cfg(feature = "hooks")]
pub async fn run() -> Result<()> {
    use std::path::PathBuf;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use capture::provider::{CatalogProvider, SharedPointer};
    use capture::selector::{CaptureSource, MonitorSelector};
    use models::geometry::{CanvasSize, ContentSize};
    use scene::{MemoryItem, MemoryScene};

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(models::settings::default_settings_path);
    let settings = match path.as_deref() {
        Some(path) => ZoomSettings::load(path)?,
        None => ZoomSettings::default(),
    };
    init_logging(settings.debug);
    match &path {
        Some(path) => log::info!("settings: {}", path.display()),
        None => log::warn!("settings: no config directory, using defaults"),
    }

    let catalog = input::hooks::primary_display_catalog()?;
    let canvas = catalog
        .monitors
        .first()
        .map(|monitor| {
            CanvasSize::new(monitor.rect.width() as f64, monitor.rect.height() as f64)
        })
        .unwrap_or_default();
    let item = MemoryItem::new(
        CaptureSource::Display {
            monitor: MonitorSelector::Index { index: 0 },
        },
        ContentSize::new(canvas.width as u32, canvas.height as u32),
    );

    let pointer: SharedPointer = Arc::new(Mutex::new(None));
    let provider = CatalogProvider::new(catalog, Arc::clone(&pointer));
    let config = settings.engine_config();
    let engine = ZoomEngine::new(config, Box::new(provider));
    let runtime = Arc::new(ZoomRuntime::new(
        engine,
        MemoryScene::new(canvas, item),
        tokio::runtime::Handle::current(),
    ));

    let hook_runtime = Arc::clone(&runtime);
    input::hooks::spawn_hook_thread(pointer, move |edge| {
        hook_runtime.handle_edge(&edge);
    })?;
    log::info!(
        "zoomtrack running on {}x{} canvas, trigger {:?}; Ctrl-C to exit",
        canvas.width,
        canvas.height,
        config.trigger
    );

    tokio::signal::ctrl_c().await.map_err(ZoomError::Signal)?;
    runtime.shutdown();
    Ok(())
}

#[cfg(feature = "hooks")]
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
