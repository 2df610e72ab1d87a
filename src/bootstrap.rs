use crate::application::services::{AuthService, HotelService};
use crate::config::Config;
use crate::domain::ports::{HotelRepository, IdentityProvider};
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::providers::{IdentityTableError, StaticIdentityProvider};
use std::sync::Arc;

/// Credential table from `IDENTITY_FILE`, or the built-in one.
pub fn identity_provider(config: &Config) -> Result<StaticIdentityProvider, IdentityTableError> {
    match &config.identity_file {
        Some(path) => {
            let provider = StaticIdentityProvider::from_file(path)?;
            tracing::info!("Loaded {} credential(s) from {}", provider.len(), path);
            Ok(provider)
        }
        None => {
            tracing::info!("Using built-in credential table");
            Ok(StaticIdentityProvider::builtin())
        }
    }
}

pub fn build_app_state(
    db: Database,
    identity_provider: Arc<dyn IdentityProvider>,
    development_mode: bool,
) -> AppState {
    let hotel_repo: Arc<dyn HotelRepository> = Arc::new(db);

    AppState {
        hotel_service: HotelService::new(hotel_repo),
        auth_service: AuthService::new(identity_provider),
        development_mode,
    }
}
