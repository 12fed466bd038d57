//! Serve command implementation
//!
//! Runs the HTTP API server over a filesystem-backed store.

use super::shared::{apply_serve_overrides, setup_logging};
use crate::app::services::marker_store::MarkerStore;
use crate::app::services::record_update::MarkerService;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::server::{self, AppState};
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Serve command runner
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    setup_logging(args.get_log_level())?;

    info!("Starting marker server");
    args.validate()?;

    let mut config = Config::from_env()?;
    apply_serve_overrides(&mut config, &args);
    config.validate()?;

    let store = MarkerStore::new(config.storage.data_dir.clone());
    store.ensure_data_dir()?;
    info!("Serving collections from {}", store.data_dir().display());

    let state = Arc::new(AppState {
        service: MarkerService::new(store),
    });

    server::serve(state, config.socket_addr()?).await
}
