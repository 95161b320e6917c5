//! Backend entry-point: loads settings and fixtures, then serves the REST API.

mod server;

use actix_web::cookie::SameSite;
use actix_web::web;
use camino::Utf8Path;
use library_data::{BookDataset, UserRoster};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookshelf::domain::{Catalog, RosterDirectory};
use bookshelf::inbound::http::health::HealthState;
use bookshelf::settings::{BuildMode, ServerSettings};
use server::{ServerConfig, create_server};

fn load_catalog(path: &Utf8Path) -> std::io::Result<Catalog> {
    let dataset = BookDataset::from_file(path).map_err(std::io::Error::other)?;
    let catalog = Catalog::from_records(dataset.into_books()).map_err(std::io::Error::other)?;
    info!(path = %path, books = catalog.entries().len(), "catalogue loaded");
    Ok(catalog)
}

fn load_roster(path: &Utf8Path) -> std::io::Result<RosterDirectory> {
    let roster = UserRoster::from_file(path).map_err(std::io::Error::other)?;
    let directory = RosterDirectory::from_roster(&roster).map_err(std::io::Error::other)?;
    info!(path = %path, users = directory.len(), "roster loaded");
    Ok(directory)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let key = settings
        .session_key(BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let catalog = load_catalog(&settings.catalog_path().map_err(std::io::Error::other)?)?;
    let roster = load_roster(&settings.users_path().map_err(std::io::Error::other)?)?;
    let ledger_dir = settings.ledger_dir().map_err(std::io::Error::other)?;

    let config = ServerConfig::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr)
        .with_library(catalog, roster)
        .with_ledger_dir(ledger_dir);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
