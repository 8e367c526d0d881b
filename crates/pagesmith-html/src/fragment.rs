//! Fragment parsing.
//!
//! A [`Fragment`] is scanned once into a list of [`Element`]s in document order.
//! Each element remembers its byte span in the original source, so extraction
//! always hands back the author's markup verbatim instead of a re-serialized
//! tree. Boundaries come from the tag scanner; attributes are read with `tl`.

use std::ops::Range;

use tl::{Node, ParserOptions};

use crate::scan::{self, TagKind};

/// Errors that can occur when parsing a fragment.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to parse HTML: {0}")]
    Parse(String),
}

/// An element located in a parsed fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, lowercased
    pub name: String,

    /// Byte range in the source, opening tag through closing tag
    pub span: Range<usize>,

    /// Byte range between the opening and closing tags
    pub inner: Range<usize>,

    /// Whether the element ends in its own closing tag (or needs none).
    /// An unclosed element's span runs to the end of the source.
    pub closed: bool,

    /// Attributes in source order, keys lowercased
    pub attributes: Vec<(String, Option<String>)>,
}

impl Element {
    /// Look up an attribute value by name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether this element has the given tag name (case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether this element lies entirely inside `range`.
    pub fn within(&self, range: &Range<usize>) -> bool {
        self.span.start >= range.start && self.span.end <= range.end
    }
}

/// A parsed source fragment.
#[derive(Debug, Clone)]
pub struct Fragment<'a> {
    source: &'a str,
    elements: Vec<Element>,
}

impl<'a> Fragment<'a> {
    /// Parse a fragment.
    pub fn parse(source: &'a str) -> Result<Self, ExtractError> {
        let tags = scan::tokenize(source);
        let mut elements = Vec::new();

        for (index, tag) in tags.iter().enumerate() {
            let (span, inner, closed) = match tag.kind {
                TagKind::Close => continue,
                TagKind::SelfClosing => (tag.span.clone(), tag.span.end..tag.span.end, true),
                TagKind::Open => match scan::matching_close(&tags, index) {
                    Some(close) => (
                        tag.span.start..close.span.end,
                        tag.span.end..close.span.start,
                        true,
                    ),
                    None => (
                        tag.span.start..source.len(),
                        tag.span.end..source.len(),
                        false,
                    ),
                },
            };

            elements.push(Element {
                name: tag.name.clone(),
                span,
                inner,
                closed,
                attributes: attributes_of(&source[tag.span.clone()])?,
            });
        }

        Ok(Self { source, elements })
    }

    /// The original source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First element with the given tag name.
    pub fn first(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.is(name))
    }

    /// All elements with the given tag name, in document order.
    pub fn all<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Element> + 's {
        self.elements.iter().filter(move |el| el.is(name))
    }

    /// Source text of an element, tags included.
    pub fn outer_html(&self, element: &Element) -> &'a str {
        &self.source[element.span.clone()]
    }

    /// Source text between an element's opening and closing tags.
    pub fn inner_html(&self, element: &Element) -> &'a str {
        &self.source[self.inner_span(element)]
    }

    /// Byte range between an element's opening and closing tags.
    pub fn inner_span(&self, element: &Element) -> Range<usize> {
        element.inner.clone()
    }

    /// Source text of `range` with every element named in `names` cut out.
    ///
    /// Only closed elements are cut. Elements nested inside one that is already
    /// cut are skipped, as are elements that straddle the range boundary.
    pub fn without(&self, range: Range<usize>, names: &[&str]) -> String {
        let mut out = String::with_capacity(range.len());
        let mut cursor = range.start;

        for element in &self.elements {
            if !element.closed || !names.iter().any(|name| element.is(name)) {
                continue;
            }
            if element.span.start < cursor || element.span.end > range.end {
                continue;
            }
            out.push_str(&self.source[cursor..element.span.start]);
            cursor = element.span.end;
        }

        out.push_str(&self.source[cursor..range.end]);
        out
    }
}

/// Attributes of a single opening tag, read with `tl`.
fn attributes_of(open_tag: &str) -> Result<Vec<(String, Option<String>)>, ExtractError> {
    let dom = tl::parse(open_tag, ParserOptions::default())
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    let parser = dom.parser();

    let attributes = dom
        .children()
        .first()
        .and_then(|handle| handle.get(parser))
        .and_then(Node::as_tag)
        .map(|tag| {
            tag.attributes()
                .iter()
                .map(|(key, value)| (key.to_ascii_lowercase(), value.map(|v| v.into_owned())))
                .collect()
        })
        .unwrap_or_default();

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<html lang="tr">
<head>
<title>Hakkımızda</title>
</head>
<body class="bg-white">
<header><nav>Menu</nav></header>
<main class="flex-1"><h1>About</h1></main>
<footer>Footer</footer>
</body>
</html>"#;

    #[test]
    fn locates_elements_in_document_order() {
        let fragment = Fragment::parse(PAGE).unwrap();

        let names: Vec<&str> = fragment
            .elements()
            .iter()
            .map(|el| el.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec!["html", "head", "title", "body", "header", "nav", "main", "h1", "footer"]
        );
    }

    #[test]
    fn outer_html_is_verbatim() {
        let fragment = Fragment::parse(PAGE).unwrap();
        let main = fragment.first("main").unwrap();

        assert_eq!(
            fragment.outer_html(main),
            r#"<main class="flex-1"><h1>About</h1></main>"#
        );
    }

    #[test]
    fn inner_html_strips_own_tags() {
        let fragment = Fragment::parse(PAGE).unwrap();
        let title = fragment.first("title").unwrap();

        assert_eq!(fragment.inner_html(title), "Hakkımızda");
    }

    #[test]
    fn inner_html_handles_gt_in_attribute() {
        let source = r#"<div data-rule="a > b"><span>x</span></div>"#;
        let fragment = Fragment::parse(source).unwrap();
        let div = fragment.first("div").unwrap();

        assert_eq!(fragment.inner_html(div), "<span>x</span>");
    }

    #[test]
    fn reads_attributes() {
        let fragment = Fragment::parse(PAGE).unwrap();
        let body = fragment.first("body").unwrap();

        assert_eq!(body.attribute("class"), Some("bg-white"));
        assert_eq!(body.attribute("id"), None);
    }

    #[test]
    fn matches_tag_names_case_insensitively() {
        let fragment = Fragment::parse("<MAIN>Hi</MAIN>").unwrap();
        let main = fragment.first("main").unwrap();

        assert_eq!(fragment.outer_html(main), "<MAIN>Hi</MAIN>");
        assert_eq!(fragment.inner_html(main), "Hi");
    }

    #[test]
    fn without_cuts_named_elements() {
        let source = "<main><header>H</header><p>Body</p><footer>F</footer></main>";
        let fragment = Fragment::parse(source).unwrap();
        let main = fragment.first("main").unwrap();

        let cleaned = fragment.without(main.span.clone(), &["header", "footer"]);

        assert_eq!(cleaned, "<main><p>Body</p></main>");
    }

    #[test]
    fn without_skips_nested_matches() {
        let source = "<div><header><header>inner</header></header>kept</div>";
        let fragment = Fragment::parse(source).unwrap();
        let div = fragment.first("div").unwrap();

        let cleaned = fragment.without(div.span.clone(), &["header"]);

        assert_eq!(cleaned, "<div>kept</div>");
    }

    #[test]
    fn bare_lt_in_script_keeps_element_whole() {
        let source = "<main><h1>Toys</h1><script>for (let i = 0; i < 3; i++) {}</script><p>Catalog</p></main>";
        let fragment = Fragment::parse(source).unwrap();
        let main = fragment.first("main").unwrap();

        assert!(main.closed);
        assert_eq!(fragment.outer_html(main), source);
        assert_eq!(fragment.first("p").map(|p| fragment.inner_html(p)), Some("Catalog"));
    }

    #[test]
    fn closing_tag_inside_script_is_text() {
        let source = "<main><script>document.write('</main>');</script>after</main>";
        let fragment = Fragment::parse(source).unwrap();
        let main = fragment.first("main").unwrap();

        assert_eq!(fragment.outer_html(main), source);
    }

    #[test]
    fn tags_inside_comments_are_ignored() {
        let source = "<!-- <main>old</main> --><main>new</main>";
        let fragment = Fragment::parse(source).unwrap();
        let main = fragment.first("main").unwrap();

        assert_eq!(fragment.outer_html(main), "<main>new</main>");
    }

    #[test]
    fn closing_tag_with_trailing_space() {
        let fragment = Fragment::parse("<main>Hi</main >").unwrap();
        let main = fragment.first("main").unwrap();

        assert!(main.closed);
        assert_eq!(fragment.outer_html(main), "<main>Hi</main >");
        assert_eq!(fragment.inner_html(main), "Hi");
    }

    #[test]
    fn optional_end_tags_inside_element() {
        let source = "<main><p>one<p>two</main>";
        let fragment = Fragment::parse(source).unwrap();
        let main = fragment.first("main").unwrap();

        assert!(main.closed);
        assert_eq!(fragment.inner_html(main), "<p>one<p>two");
        assert!(fragment.all("p").all(|p| !p.closed));
    }

    #[test]
    fn unclosed_element_is_flagged() {
        let fragment = Fragment::parse("<body><main><p>lost").unwrap();
        let main = fragment.first("main").unwrap();

        assert!(!main.closed);
    }

    #[test]
    fn void_elements_need_no_closing_tag() {
        let fragment = Fragment::parse(r#"<head><meta charset="utf-8"><link rel="icon" href="/i.png"></head>"#).unwrap();
        let head = fragment.first("head").unwrap();
        let link = fragment.first("link").unwrap();

        assert!(head.closed);
        assert!(link.closed);
        assert_eq!(link.attribute("href"), Some("/i.png"));
        assert_eq!(fragment.inner_html(link), "");
    }

    #[test]
    fn plain_text_has_no_elements() {
        let fragment = Fragment::parse("just some text").unwrap();

        assert!(fragment.elements().is_empty());
        assert!(fragment.first("main").is_none());
    }
}
