//! Initialize a content root for pagesmith.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{ConfigFile, Overrides};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing pagesmith...");

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    // Same location `build` reads overrides from
    let config = ConfigFile::load(config_path)?.into_build_config(Overrides::default());
    let partials_dir = config.partial_policy().partials_dir;
    fs::create_dir_all(&partials_dir)
        .with_context(|| format!("Failed to create {}", partials_dir.display()))?;

    let head_path = partials_dir.join("head.html");
    if !head_path.exists() || yes {
        fs::write(&head_path, DEFAULT_HEAD).context("Failed to write head.html")?;
        tracing::info!("Created {}", head_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!(
        "Add header.html / footer.html to {} or let the reference page supply them.",
        partials_dir.display()
    );
    tracing::info!("Run 'pagesmith build' to assemble the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# pagesmith configuration

[site]
# Default page title and index heading
name = "Mel'z Baby&Kids"

# lang attribute of generated documents
lang = "tr"

# <body> class for fragments that declare none
body_class = ""

[paths]
# Content root holding the page directories, relative to this file
root = "."

# Override partials (head.html, header.html, footer.html), relative to root
partials = "_partials"

# Page whose fragment supplies header/footer when no override exists
reference_page = "ana_sayfa"

# File marking a directory as a page
source_file = "code.html"

# Per-page output subdirectory
output_dir = "dist"

# Generated index, relative to root
index_file = "index.html"

[discovery]
# Directories starting with this prefix are never pages
reserved_prefix = "_"

# Directory names skipped everywhere
exclude = ["node_modules"]

[build]
# Append the reference page's <head> to _partials/head.html
head_from_reference = false

# Content for fragments without <main> or <body>: "placeholder" or "raw"
fallback = "placeholder"
"#;

const DEFAULT_HEAD: &str = r#"<meta charset="utf-8"/>
<meta content="width=device-width, initial-scale=1.0" name="viewport"/>
"#;
