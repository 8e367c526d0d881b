//! Shared partial resolution.
//!
//! Every page is wrapped with the same head, header and footer. Each comes from
//! an override file in the partials directory when one exists, otherwise it is
//! pulled out of the reference page's fragment:
//!
//! | partial | override file        | reference page                           |
//! |---------|----------------------|------------------------------------------|
//! | head    | `head.html` (base)   | `<head>` inner, if `head_from_reference` |
//! | header  | `header.html`        | first `<header>` element                 |
//! | footer  | `footer.html`        | first `<footer>` element                 |
//!
//! The head is the only partial that combines both sources: base first, then
//! the reference head. Header and footer must not end up empty.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use pagesmith_html::{extract_block, extract_head, Fragment};

use crate::builder::BuildError;

/// One of the shared partials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialKind {
    Head,
    Header,
    Footer,
}

impl PartialKind {
    /// Element name the partial is extracted from.
    pub fn tag(self) -> &'static str {
        match self {
            PartialKind::Head => "head",
            PartialKind::Header => "header",
            PartialKind::Footer => "footer",
        }
    }

    /// Override file name inside the partials directory.
    pub fn file_name(self) -> String {
        format!("{}.html", self.tag())
    }
}

impl fmt::Display for PartialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Resolved partials shared by every page of one build.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialSet {
    pub head: String,
    pub header: String,
    pub footer: String,
}

/// Where partials come from and in which order sources win.
#[derive(Debug, Clone)]
pub struct PartialPolicy {
    /// Directory holding override files
    pub partials_dir: PathBuf,

    /// Identifier of the reference page, for diagnostics
    pub reference_page: String,

    /// Source fragment of the reference page
    pub reference_source: PathBuf,

    /// Append the reference page's `<head>` to the base head
    pub head_from_reference: bool,
}

impl PartialPolicy {
    /// Resolve head, header and footer.
    ///
    /// Fails when the reference page is missing or when header or footer cannot
    /// be found in either source.
    pub fn resolve(&self) -> Result<PartialSet, BuildError> {
        let reference = match fs::read_to_string(&self.reference_source) {
            Ok(source) => source,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(BuildError::MissingReferencePage {
                    page: self.reference_page.clone(),
                    path: self.reference_source.clone(),
                });
            }
            Err(e) => {
                return Err(BuildError::Read {
                    path: self.reference_source.clone(),
                    source: e,
                });
            }
        };

        tracing::info!("Using reference page: {}", self.reference_page);

        let fragment = Fragment::parse(&reference).map_err(|e| BuildError::Parse {
            path: self.reference_source.clone(),
            source: e,
        })?;

        Ok(PartialSet {
            head: self.resolve_head(&fragment)?,
            header: self.resolve_block(PartialKind::Header, &fragment)?,
            footer: self.resolve_block(PartialKind::Footer, &fragment)?,
        })
    }

    /// Base head followed by the reference head, each trimmed, joined by a newline.
    fn resolve_head(&self, reference: &Fragment<'_>) -> Result<String, BuildError> {
        let base = self.read_override(PartialKind::Head)?;
        let extracted = if self.head_from_reference {
            extract_head(reference)
        } else {
            None
        };

        let head = [base, extracted]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(head)
    }

    /// Override file if present, else the first matching reference element.
    fn resolve_block(
        &self,
        kind: PartialKind,
        reference: &Fragment<'_>,
    ) -> Result<String, BuildError> {
        let resolved = match self.read_override(kind)? {
            Some(content) => {
                tracing::debug!("Using {} override", kind);
                content
            }
            None => {
                tracing::debug!("Extracting {} from reference page", kind);
                extract_block(reference, kind.tag())
                    .unwrap_or_default()
                    .to_string()
            }
        };

        if resolved.is_empty() {
            return Err(BuildError::MissingPartial {
                kind,
                override_path: self.override_path(kind),
                reference: self.reference_page.clone(),
            });
        }

        Ok(resolved)
    }

    /// Trimmed content of an override file, `None` when it does not exist.
    fn read_override(&self, kind: PartialKind) -> Result<Option<String>, BuildError> {
        let path = self.override_path(kind);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BuildError::Read { path, source: e }),
        }
    }

    fn override_path(&self, kind: PartialKind) -> PathBuf {
        self.partials_dir.join(kind.file_name())
    }
}
