//! Content and partial extraction.

use serde::Deserialize;

use crate::fragment::Fragment;

/// Elements that belong to the shared partials and never to page content.
pub const PARTIAL_TAGS: &[&str] = &["header", "footer"];

/// Content emitted by [`Fallback::Placeholder`].
pub const PLACEHOLDER: &str = r#"<main class="flex-1"><p>Content extraction failed</p></main>"#;

/// What to emit when a fragment has neither `<main>` nor `<body>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// A fixed `<main>` block with a diagnostic message
    #[default]
    Placeholder,
    /// The whole fragment, trimmed
    Raw,
}

/// Where a page's content was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// The first `<main>` element, tags included
    Main,
    /// Inner content of `<body>`
    Body,
    /// [`PLACEHOLDER`], nothing usable was found
    Placeholder,
    /// The whole fragment, see [`Fallback::Raw`]
    Raw,
}

/// Page-specific content extracted from a fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    /// Extracted HTML with partial elements removed
    pub html: String,

    /// Which rule produced the content
    pub source: ContentSource,
}

impl Content {
    /// Whether extraction had to fall back.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ContentSource::Placeholder | ContentSource::Raw)
    }
}

/// Extract the page-specific content of a fragment.
///
/// Takes the first `<main>` element (tags included), else the inner content of
/// `<body>`, else whatever `fallback` dictates. An element without its closing
/// tag is passed over with a warning. Any `<header>` or `<footer>` left inside
/// the result is removed.
pub fn extract_content(fragment: &Fragment<'_>, fallback: Fallback) -> Content {
    if let Some(main) = fragment.first("main") {
        if main.closed {
            return Content {
                html: fragment.without(main.span.clone(), PARTIAL_TAGS),
                source: ContentSource::Main,
            };
        }
        tracing::warn!("<main> has no closing tag, trying <body>");
    }

    if let Some(body) = fragment.first("body") {
        if body.closed {
            let inner = fragment.inner_span(body);
            return Content {
                html: fragment.without(inner, PARTIAL_TAGS).trim().to_string(),
                source: ContentSource::Body,
            };
        }
        tracing::warn!("<body> has no closing tag, using fallback");
    }

    let placeholder = || Content {
        html: PLACEHOLDER.to_string(),
        source: ContentSource::Placeholder,
    };

    match fallback {
        Fallback::Placeholder => placeholder(),
        Fallback::Raw => {
            let raw = fragment.without(0..fragment.source().len(), PARTIAL_TAGS);
            let raw = raw.trim();
            if raw.is_empty() {
                placeholder()
            } else {
                Content {
                    html: raw.to_string(),
                    source: ContentSource::Raw,
                }
            }
        }
    }
}

/// Verbatim source of the first element named `name`, trimmed.
///
/// `None` when the element is missing, empty, or has no closing tag.
pub fn extract_block<'a>(fragment: &Fragment<'a>, name: &str) -> Option<&'a str> {
    let element = fragment.first(name)?;
    if !element.closed {
        tracing::warn!("<{}> has no closing tag, ignoring it", name);
        return None;
    }

    Some(fragment.outer_html(element).trim()).filter(|html| !html.is_empty())
}

/// Inner content of the first `<head>`, without its `<title>`.
///
/// Pages supply their own title, so it is dropped from a shared head.
pub fn extract_head(fragment: &Fragment<'_>) -> Option<String> {
    let head = fragment.first("head")?;
    if !head.closed {
        tracing::warn!("<head> has no closing tag, ignoring it");
        return None;
    }

    let inner = fragment.without(fragment.inner_span(head), &["title"]);
    let inner = inner.trim();

    (!inner.is_empty()).then(|| inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn content(source: &str, fallback: Fallback) -> Content {
        let fragment = Fragment::parse(source).unwrap();
        extract_content(&fragment, fallback)
    }

    #[test]
    fn prefers_main_element() {
        let source = r#"<body><header>H</header><main class="flex-1"><p>Hi</p></main><footer>F</footer></body>"#;

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.source, ContentSource::Main);
        assert_eq!(result.html, r#"<main class="flex-1"><p>Hi</p></main>"#);
    }

    #[test]
    fn strips_header_and_footer_inside_main() {
        let source = "<main><header>Dup</header><p>Body</p>\n<footer>Dup</footer></main>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.html, "<main><p>Body</p>\n</main>");
    }

    #[test]
    fn uses_first_main_only() {
        let source = "<main>One</main><main>Two</main>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.html, "<main>One</main>");
    }

    #[test]
    fn falls_back_to_body_inner() {
        let source = "<html><body>\n<header>H</header>\n<p>World</p>\n</body></html>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.source, ContentSource::Body);
        assert_eq!(result.html, "<p>World</p>");
    }

    #[test]
    fn placeholder_when_nothing_matches() {
        let result = content("<div>loose</div>", Fallback::Placeholder);

        assert!(result.is_fallback());
        assert_eq!(result.source, ContentSource::Placeholder);
        assert_eq!(result.html, PLACEHOLDER);
    }

    #[test]
    fn raw_fallback_passes_fragment_through() {
        let result = content("\n<div>loose</div>\n<footer>F</footer>\n", Fallback::Raw);

        assert_eq!(result.source, ContentSource::Raw);
        assert_eq!(result.html, "<div>loose</div>");
    }

    #[test]
    fn raw_fallback_never_empty() {
        let result = content("   \n", Fallback::Raw);

        assert_eq!(result.source, ContentSource::Placeholder);
        assert_eq!(result.html, PLACEHOLDER);
    }

    #[test]
    fn main_with_inline_script_is_kept_whole() {
        let source = "<body><main><h1>Toys</h1><script>for (let i = 0; i < 3; i++) {}</script><p>Catalog</p></main></body>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.source, ContentSource::Main);
        assert_eq!(
            result.html,
            "<main><h1>Toys</h1><script>for (let i = 0; i < 3; i++) {}</script><p>Catalog</p></main>"
        );
    }

    #[test]
    fn main_with_bare_lt_in_text() {
        let source = "<main><p>Age 3 < 5</p><footer>F</footer></main>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.html, "<main><p>Age 3 < 5</p></main>");
    }

    #[test]
    fn main_with_optional_end_tags() {
        let source = "<body><main><p>one<p>two</main></body>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.html, "<main><p>one<p>two</main>");
    }

    #[test]
    fn main_closed_with_trailing_space() {
        let result = content("<main>Hi</main >", Fallback::Placeholder);

        assert_eq!(result.source, ContentSource::Main);
        assert_eq!(result.html, "<main>Hi</main >");
    }

    #[test]
    fn unclosed_main_falls_back_to_body() {
        let source = "<body><p>Intro</p><main><p>Lost</body>";

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.source, ContentSource::Body);
        assert_eq!(result.html, "<p>Intro</p><main><p>Lost");
    }

    #[test]
    fn unclosed_main_and_body_use_fallback() {
        let result = content("<body><main>Lost", Fallback::Placeholder);

        assert_eq!(result.source, ContentSource::Placeholder);
        assert_eq!(result.html, PLACEHOLDER);
    }

    #[test]
    fn comments_and_styles_do_not_confuse_extraction() {
        let source = r#"<body>
<!-- <main>draft</main> -->
<style>main > p { color: red; }</style>
<main class="flex-1"><p>Live</p></main>
</body>"#;

        let result = content(source, Fallback::Placeholder);

        assert_eq!(result.html, r#"<main class="flex-1"><p>Live</p></main>"#);
    }

    #[test]
    fn header_with_script_is_extracted_whole() {
        let source = "<body><header><nav>Menu</nav><script>if (a < b) {}</script></header><main>x</main></body>";
        let fragment = Fragment::parse(source).unwrap();

        assert_eq!(
            extract_block(&fragment, "header"),
            Some("<header><nav>Menu</nav><script>if (a < b) {}</script></header>")
        );
    }

    #[test]
    fn unclosed_header_is_not_a_block() {
        let fragment = Fragment::parse("<body><header><nav>Menu</nav><main>x</main></body>").unwrap();

        assert_eq!(extract_block(&fragment, "header"), None);
    }

    #[test]
    fn extracts_first_block_with_tags() {
        let source = "<body><header class=\"top\">\n<a>Logo</a>\n</header><header>Second</header></body>";
        let fragment = Fragment::parse(source).unwrap();

        assert_eq!(
            extract_block(&fragment, "header"),
            Some("<header class=\"top\">\n<a>Logo</a>\n</header>")
        );
        assert_eq!(extract_block(&fragment, "footer"), None);
    }

    #[test]
    fn head_drops_title() {
        let source = "<html><head>\n<meta charset=\"utf-8\"/>\n<title>Home</title>\n<link rel=\"stylesheet\" href=\"/a.css\"/>\n</head><body></body></html>";
        let fragment = Fragment::parse(source).unwrap();

        let head = extract_head(&fragment).unwrap();

        assert!(head.starts_with("<meta charset=\"utf-8\"/>"));
        assert!(head.ends_with("<link rel=\"stylesheet\" href=\"/a.css\"/>"));
        assert!(!head.contains("<title>"));
    }

    #[test]
    fn missing_head_is_none() {
        let fragment = Fragment::parse("<main>x</main>").unwrap();

        assert_eq!(extract_head(&fragment), None);
    }
}
