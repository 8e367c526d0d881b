//! Configuration file (pagesmith.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagesmith_static::{BuildConfig, DiscoveryOptions, Fallback};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub build: BuildSettings,

    /// Directory holding the config file; `paths.root` is relative to it
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub lang: String,
    pub body_class: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Mel'z Baby&Kids".to_string(),
            lang: "tr".to_string(),
            body_class: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub root: PathBuf,
    pub partials: PathBuf,
    pub reference_page: PathBuf,
    pub source_file: String,
    pub output_dir: String,
    pub index_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            partials: PathBuf::from("_partials"),
            reference_page: PathBuf::from("ana_sayfa"),
            source_file: "code.html".to_string(),
            output_dir: "dist".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub reserved_prefix: String,
    pub exclude: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            reserved_prefix: "_".to_string(),
            exclude: vec!["node_modules".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BuildSettings {
    pub head_from_reference: bool,
    pub fallback: Fallback,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub reference_page: Option<PathBuf>,
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();

        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self {
                base_dir,
                ..Self::default()
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.base_dir = base_dir;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Build configuration with command-line overrides applied.
    ///
    /// A `--root` given on the command line is taken as is; `paths.root` from
    /// the file is resolved against the file's directory.
    pub fn into_build_config(self, overrides: Overrides) -> BuildConfig {
        BuildConfig {
            root: overrides
                .root
                .unwrap_or_else(|| self.base_dir.join(&self.paths.root)),
            partials_dir: self.paths.partials,
            reference_page: overrides
                .reference_page
                .unwrap_or(self.paths.reference_page),
            index_file: self.paths.index_file,
            discovery: DiscoveryOptions {
                source_file: self.paths.source_file,
                output_dir: self.paths.output_dir,
                reserved_prefix: self.discovery.reserved_prefix,
                exclude: self.discovery.exclude,
            },
            site_name: self.site.name,
            lang: self.site.lang,
            body_class: self.site.body_class,
            head_from_reference: self.build.head_from_reference,
            fallback: self.build.fallback,
        }
    }
}
