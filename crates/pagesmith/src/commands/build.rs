//! Site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use pagesmith_static::StaticBuilder;

use crate::config::{ConfigFile, Overrides};

/// Run the build command.
pub fn run(config_path: &Path, root: Option<PathBuf>, reference: Option<PathBuf>) -> Result<()> {
    let config = ConfigFile::load(config_path)?.into_build_config(Overrides {
        root,
        reference_page: reference,
    });

    tracing::info!("Building pages in {}", config.root.display());

    let result = StaticBuilder::new(config).build()?;

    tracing::info!(
        "Build complete! Processed {} pages in {}ms",
        result.pages.len(),
        result.duration_ms
    );

    Ok(())
}
