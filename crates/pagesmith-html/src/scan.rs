//! Tag scanner used to pin down element boundaries.
//!
//! `tl` gives us the tree and attributes, but it gives up on an element at the
//! first stray `<` in its text (inline scripts, comparisons in prose). The
//! scanner walks the raw source instead: it skips comments, treats the bodies of
//! raw-text elements as opaque, and pairs opening with closing tags by name.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A comment, or an opening/closing tag with quoted attribute values.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("valid tag pattern")
});

/// End of a raw-text element.
static RAW_TEXT_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(script|style|textarea|title)\s*>").expect("valid raw text pattern")
});

/// Elements whose content is text, never markup.
const RAW_TEXT: &[&str] = &["script", "style", "textarea", "title"];

/// Elements that never have a closing tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Open,
    /// Void element or `<x/>`
    SelfClosing,
    Close,
}

/// A tag found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    /// Tag name, lowercased
    pub name: String,
    pub span: Range<usize>,
    pub kind: TagKind,
}

/// All tags in `source`, in order.
pub(crate) fn tokenize(source: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TAG.captures_at(source, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        pos = whole.end();

        // Comment
        let Some(name) = caps.get(2) else {
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps
            .get(3)
            .is_some_and(|m| m.as_str().trim_end().ends_with('/'));

        let kind = if closing {
            TagKind::Close
        } else if self_closing || VOID.contains(&name.as_str()) {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };

        if kind == TagKind::Open && RAW_TEXT.contains(&name.as_str()) {
            pos = raw_text_end(source, pos, &name);
        }

        tags.push(Tag {
            name,
            span: whole.range(),
            kind,
        });
    }

    tags
}

/// Offset of the tag closing the raw-text element `name` opened before `from`.
fn raw_text_end(source: &str, from: usize, name: &str) -> usize {
    RAW_TEXT_END
        .captures_iter(&source[from..])
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(0))
        .map_or(source.len(), |m| from + m.start())
}

/// Closing tag paired with the opening tag at `index`, nesting respected.
pub(crate) fn matching_close(tags: &[Tag], index: usize) -> Option<&Tag> {
    let name = &tags[index].name;
    let mut depth = 0usize;

    for tag in &tags[index + 1..] {
        if tag.name != *name {
            continue;
        }
        match tag.kind {
            TagKind::Open => depth += 1,
            TagKind::Close if depth == 0 => return Some(tag),
            TagKind::Close => depth -= 1,
            TagKind::SelfClosing => {}
        }
    }

    None
}
