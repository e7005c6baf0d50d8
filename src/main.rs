// ABOUTME: Entry point for the novus binary.
// ABOUTME: Loads configuration, initializes tracing, opens the backend, and brings every store to ready.

mod config;

use novus_store::{Stores, open_backend};

use crate::config::NovusConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("novus=debug,novus_store=debug")),
        )
        .init();

    let config = NovusConfig::from_env()?;
    tracing::info!("novus starting up with {} backend at {}", config.backend, config.home.display());

    let backend = open_backend(config.backend, &config.home)?;
    let stores = Stores::open_ready(backend).await?;

    let profile = stores.user.user();
    tracing::info!(
        "profile {} (onboarding complete: {}), {} favorites, {} history entries, {} journal entries, theme {}",
        profile.name,
        stores.onboarding.is_completed(),
        stores.favorites.favorites().len(),
        stores.history.history().len(),
        stores.journal.entries().len(),
        stores.theme.current_theme_id()
    );

    Ok(())
}
