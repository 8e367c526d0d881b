//! Static page assembly for pagesmith.
//!
//! Discovers page fragments under a content root, resolves the shared
//! head/header/footer partials, wraps every page with them and writes a root
//! index linking to all built pages.

pub mod builder;
pub mod discover;
pub mod index;
pub mod partials;
pub mod templates;

pub use builder::{AssembleError, BuildConfig, BuildError, BuildResult, BuiltPage, StaticBuilder};
pub use discover::{discover_pages, DiscoveryOptions, PageRef};
pub use pagesmith_html::Fallback;
pub use partials::{PartialKind, PartialPolicy, PartialSet};
