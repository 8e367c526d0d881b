//! Page metadata carried over from a fragment.

use crate::fragment::Fragment;

/// Metadata read from a page fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    /// Trimmed text of `<title>`
    pub title: Option<String>,

    /// `class` attribute of `<body>`
    pub body_class: Option<String>,

    /// `<style>` blocks declared in `<head>`, verbatim
    pub styles: Vec<String>,
}

impl PageMeta {
    /// Read metadata from a parsed fragment.
    pub fn from_fragment(fragment: &Fragment<'_>) -> Self {
        let title = fragment
            .first("title")
            .filter(|el| el.closed)
            .map(|el| fragment.inner_html(el).trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        let body_class = fragment
            .first("body")
            .and_then(|el| el.attribute("class"))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let styles = match fragment.first("head").filter(|head| head.closed) {
            Some(head) => fragment
                .all("style")
                .filter(|el| el.closed && el.within(&head.span))
                .map(|el| fragment.outer_html(el).to_string())
                .collect(),
            None => Vec::new(),
        };

        Self {
            title,
            body_class,
            styles,
        }
    }
}
