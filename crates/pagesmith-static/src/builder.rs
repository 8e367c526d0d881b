//! Static page builder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pagesmith_html::{extract_content, ExtractError, Fallback, Fragment, PageMeta};

use crate::discover::{discover_pages, DiscoveryOptions, PageRef};
use crate::index::generate_index;
use crate::partials::{PartialKind, PartialPolicy, PartialSet};
use crate::templates::{escape_text, PageContext, TemplateEngine};

/// Configuration for one build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content root holding the page directories
    pub root: PathBuf,

    /// Directory of override partials, relative to the root
    pub partials_dir: PathBuf,

    /// Page directory, relative to the root, supplying shared partials
    pub reference_page: PathBuf,

    /// Index file written at the root
    pub index_file: String,

    /// Which directories count as pages
    pub discovery: DiscoveryOptions,

    /// Site name, used as the default page title
    pub site_name: String,

    /// `lang` attribute of generated documents
    pub lang: String,

    /// `<body>` class for fragments that declare none
    pub body_class: String,

    /// Append the reference page's `<head>` to the base head
    pub head_from_reference: bool,

    /// Content used when a fragment has neither `<main>` nor `<body>`
    pub fallback: Fallback,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            partials_dir: PathBuf::from("_partials"),
            reference_page: PathBuf::from("ana_sayfa"),
            index_file: "index.html".to_string(),
            discovery: DiscoveryOptions::default(),
            site_name: "Mel'z Baby&Kids".to_string(),
            lang: "tr".to_string(),
            body_class: String::new(),
            head_from_reference: false,
            fallback: Fallback::default(),
        }
    }
}

impl BuildConfig {
    /// Partial resolution policy for this configuration.
    pub fn partial_policy(&self) -> PartialPolicy {
        PartialPolicy {
            partials_dir: self.root.join(&self.partials_dir),
            reference_page: self.reference_page.display().to_string(),
            reference_source: self
                .root
                .join(&self.reference_page)
                .join(&self.discovery.source_file),
            head_from_reference: self.head_from_reference,
        }
    }

    /// Output file for a page directory.
    pub fn output_path(&self, page: &PageRef) -> PathBuf {
        self.root
            .join(&page.relative_dir)
            .join(&self.discovery.output_dir)
            .join("index.html")
    }

    /// Root index file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }
}

/// A page written during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPage {
    /// Relative page directory with `/` separators
    pub id: String,

    /// Assembled document
    pub output_path: PathBuf,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Pages written, in build order
    pub pages: Vec<BuiltPage>,

    /// Generated root index
    pub index_path: PathBuf,

    /// Total build time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Reference page '{page}' not found: {} does not exist", .path.display())]
    MissingReferencePage { page: String, path: PathBuf },

    #[error(
        "No {kind} partial: create {} or add a <{}> element to reference page '{reference}'",
        .override_path.display(),
        .kind.tag()
    )]
    MissingPartial {
        kind: PartialKind,
        override_path: PathBuf,
        reference: String,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ExtractError },

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Static page builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Pages this builder would assemble.
    pub fn discover(&self) -> Vec<PageRef> {
        discover_pages(&self.config.root, &self.config.discovery)
    }

    /// Build every page and the root index.
    ///
    /// Partials are resolved before anything is written, so a configuration
    /// error leaves the output tree untouched.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let pages = self.discover();
        tracing::debug!("Discovered {} pages", pages.len());

        let partials = self.config.partial_policy().resolve()?;

        let mut built = Vec::with_capacity(pages.len());
        for page in &pages {
            if let Some(output_path) = self.build_page(page, &partials)? {
                built.push(BuiltPage {
                    id: page.id(),
                    output_path,
                });
            }
        }

        tracing::info!("Built {} pages", built.len());

        let index_path = self.config.index_path();
        let index = generate_index(&self.templates, &self.config, &built)?;
        write_file(&index_path, &index)?;
        tracing::info!("Index: {}", index_path.display());

        Ok(BuildResult {
            pages: built,
            index_path,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Assemble and write a single page.
    ///
    /// Returns `None` when the page's fragment has disappeared since discovery.
    fn build_page(
        &self,
        page: &PageRef,
        partials: &PartialSet,
    ) -> Result<Option<PathBuf>, BuildError> {
        let source = match fs::read_to_string(&page.source_path) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Skipping {}: no source fragment", page.id());
                return Ok(None);
            }
            Err(e) => {
                return Err(BuildError::Read {
                    path: page.source_path.clone(),
                    source: e,
                });
            }
        };

        tracing::info!("Processing: {}", page.id());

        let html = self.assemble(&source, partials).map_err(|e| match e {
            AssembleError::Parse(source) => BuildError::Parse {
                path: page.source_path.clone(),
                source,
            },
            AssembleError::Template(message) => BuildError::Template(message),
        })?;

        let output_path = self.config.output_path(page);
        write_file(&output_path, &html)?;
        tracing::debug!("  -> {}", output_path.display());

        Ok(Some(output_path))
    }

    /// Wrap one fragment's content with the shared partials.
    pub fn assemble(&self, source: &str, partials: &PartialSet) -> Result<String, AssembleError> {
        let fragment = Fragment::parse(source).map_err(AssembleError::Parse)?;
        let meta = PageMeta::from_fragment(&fragment);

        let content = extract_content(&fragment, self.config.fallback);
        if content.is_fallback() {
            tracing::warn!(
                "No usable <main> or <body> found, using {:?} fallback",
                content.source
            );
        }

        let styles = meta
            .styles
            .into_iter()
            .filter(|style| !partials.head.contains(style.as_str()))
            .collect();

        let context = PageContext {
            lang: self.config.lang.clone(),
            head: partials.head.clone(),
            title: meta
                .title
                .unwrap_or_else(|| escape_text(&self.config.site_name)),
            styles,
            body_class: meta
                .body_class
                .unwrap_or_else(|| self.config.body_class.clone()),
            header: partials.header.clone(),
            content: content.html,
            footer: partials.footer.clone(),
        };

        self.templates
            .render_page(&context)
            .map_err(|e| AssembleError::Template(e.to_string()))
    }
}

/// Errors from assembling a single document.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error(transparent)]
    Parse(#[from] ExtractError),

    #[error("Failed to render template: {0}")]
    Template(String),
}

/// Write a file, creating its parent directory.
fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| BuildError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
