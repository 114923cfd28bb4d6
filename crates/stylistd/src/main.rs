use anyhow::{Context, Result};
use std::sync::Arc;
use stylist_core::Catalog;
use tracing_subscriber::EnvFilter;

mod config;
mod dbus_interface;
mod engine;

use config::{BusKind, Config};

const BUS_NAME: &str = "org.freedesktop.Stylist1";
const OBJECT_PATH: &str = "/org/freedesktop/Stylist1";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("stylistd starting");

    let config = Config::from_env();

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin()
            .context("loading embedded catalog")?
            .clone(),
    };
    tracing::info!(garments = catalog.len(), "catalog ready");

    let engine = engine::spawn_engine(config.sample_size, config.sample_seed)
        .context("spawning analysis thread")?;

    let service = dbus_interface::StylistService {
        engine,
        catalog: Arc::new(catalog),
        sample_size: config.sample_size,
    };

    let builder = match config.bus {
        BusKind::Session => zbus::connection::Builder::session()?,
        BusKind::System => zbus::connection::Builder::system()?,
    };
    let _connection = builder
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, service)?
        .build()
        .await
        .context("registering on D-Bus")?;

    tracing::info!(bus = ?config.bus, name = BUS_NAME, "stylistd ready");

    // Keep running until signaled
    tokio::signal::ctrl_c().await?;
    tracing::info!("stylistd shutting down");

    Ok(())
}
