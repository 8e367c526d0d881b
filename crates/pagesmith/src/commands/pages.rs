//! Page listing command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use pagesmith_static::StaticBuilder;

use crate::config::{ConfigFile, Overrides};

/// Run the pages command.
pub fn run(config_path: &Path, root: Option<PathBuf>) -> Result<()> {
    let config = ConfigFile::load(config_path)?.into_build_config(Overrides {
        root,
        ..Default::default()
    });

    let builder = StaticBuilder::new(config.clone());
    let pages = builder.discover();

    for page in &pages {
        println!("{}\t{}", page.id(), config.output_path(page).display());
    }

    tracing::info!("{} pages found", pages.len());

    Ok(())
}
