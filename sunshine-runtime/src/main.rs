//! Sunshine - weather watch face simulator
//!
//! Runs both halves of the sync pipeline on one host executor: the handheld
//! weather service and producer, an in-process paired link, and the
//! wearable's listener and watch face driven by a scripted host.
//!
//! Usage: `sunshine-runtime [config.toml]`. Log level follows `RUST_LOG`.

use std::path::PathBuf;

use embassy_executor::Spawner;
use static_cell::StaticCell;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sunshine_core::cache::SyncCache;
use sunshine_display::{RenderEngine, WeatherIcons};

use crate::canvas::LogCanvas;
use crate::channels::{HANDHELD_TO_WEARABLE, RADIO, WEARABLE_TO_HANDHELD};
use crate::link::{HandheldLink, WearableLink};
use crate::store::FileStore;

mod canvas;
mod channels;
mod config;
mod link;
mod store;
mod tasks;

// Shared by the listener and the face for the life of the program
static CACHE: StaticCell<SyncCache<FileStore>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    init_tracing();
    info!("Sunshine simulator starting...");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load(config_path.as_deref()).unwrap_or_else(|e| {
        error!("Config unusable ({}), using embedded scenario", e);
        config::embedded()
    });

    let store = match &config.store_path {
        Some(path) => FileStore::open(path).unwrap_or_else(|e| {
            error!("{}, sync cache will not persist", e);
            FileStore::in_memory()
        }),
        None => FileStore::in_memory(),
    };
    match store.path() {
        Some(path) => info!("Sync cache at {}", path.display()),
        None => info!("Sync cache is volatile"),
    }
    let cache: &'static SyncCache<FileStore> = CACHE.init(SyncCache::new(store));

    let summary = cache.summary();
    info!(
        "Cached summary: {} {} (dirty={})",
        summary.hi_low_text(),
        summary.icon_token(),
        cache.is_dirty()
    );

    let engine = RenderEngine::new(config.face.clone(), WeatherIcons, cache);
    let handheld = HandheldLink::new(&HANDHELD_TO_WEARABLE, &WEARABLE_TO_HANDHELD, &RADIO);
    let wearable = WearableLink::new(&WEARABLE_TO_HANDHELD, &HANDHELD_TO_WEARABLE, &RADIO);

    // Spawn tasks
    spawner.spawn(tasks::listener_task(wearable, cache)).unwrap();
    spawner
        .spawn(tasks::face_task(engine, LogCanvas::new(), cache))
        .unwrap();
    spawner.spawn(tasks::time_tick_task(config.time_tick_ms)).unwrap();
    spawner.spawn(tasks::handheld_task(handheld)).unwrap();
    spawner.spawn(tasks::weather_task(config.weather)).unwrap();
    spawner
        .spawn(tasks::host_task(config.display, config.host, config.linger_ms))
        .unwrap();

    info!("All tasks spawned");
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}
