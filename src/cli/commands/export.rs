//! Export command implementation
//!
//! Writes the tabular xlsx projection of one collection to a local file,
//! using the same projector as the HTTP export endpoint.

use super::shared::{apply_export_overrides, setup_logging};
use crate::app::models::CollectionKey;
use crate::app::services::marker_store::MarkerStore;
use crate::app::services::record_update::MarkerService;
use crate::cli::args::ExportArgs;
use crate::config::Config;
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::info;

/// Export command runner
pub async fn run_export(args: ExportArgs) -> Result<()> {
    setup_logging(args.get_log_level())?;

    args.validate()?;
    let key: CollectionKey = args.key.parse()?;

    let mut config = Config::from_env()?;
    apply_export_overrides(&mut config, &args);
    config.validate()?;

    let store = MarkerStore::new(config.storage.data_dir.clone());
    let service = MarkerService::new(store);

    info!(
        "Exporting collection '{}' from {}",
        key,
        config.storage.data_dir.display()
    );

    let bytes = service.export(key).await?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_stations.xlsx", key)));

    std::fs::write(&output, &bytes)
        .map_err(|e| Error::io(format!("Failed to write {}", output.display()), e))?;

    println!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}
