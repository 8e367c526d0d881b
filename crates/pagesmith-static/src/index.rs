//! Root index generation.

use std::collections::BTreeSet;

use crate::builder::{BuildConfig, BuildError, BuiltPage};
use crate::templates::{escape_text, IndexContext, IndexLink, TemplateEngine};

/// Render the root index linking to every built page.
///
/// Links are sorted by page id and deduplicated. Each points at
/// `./<page>/<output dir>/index.html` using the plain relative path.
pub fn generate_index(
    templates: &TemplateEngine,
    config: &BuildConfig,
    pages: &[BuiltPage],
) -> Result<String, BuildError> {
    let ids: BTreeSet<&str> = pages.iter().map(|page| page.id.as_str()).collect();

    let links = ids
        .into_iter()
        .map(|id| IndexLink {
            href: escape_text(&format!(
                "./{}/{}/index.html",
                id, config.discovery.output_dir
            )),
            label: escape_text(id),
        })
        .collect();

    let context = IndexContext {
        lang: config.lang.clone(),
        title: escape_text(&config.site_name),
        links,
    };

    templates
        .render_index(&context)
        .map_err(|e| BuildError::Template(e.to_string()))
}
