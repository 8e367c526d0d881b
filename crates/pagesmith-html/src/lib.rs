//! HTML fragment parsing and element extraction.
//!
//! Parses hand-authored page fragments into a flat list of located elements and
//! pulls out the pieces a page is assembled from: the `<main>` content block, the
//! shared `<head>`, `<header>` and `<footer>` blocks, and page metadata such as the
//! title.

pub mod extract;
pub mod fragment;
pub mod meta;
mod scan;

pub use extract::{extract_block, extract_content, extract_head, Content, ContentSource, Fallback};
pub use fragment::{Element, ExtractError, Fragment};
pub use meta::PageMeta;
