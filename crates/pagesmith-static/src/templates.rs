//! Template engine for rendering assembled pages and the root index.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

/// Context for rendering an assembled page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// `lang` attribute of the document
    pub lang: String,
    /// Resolved head partial
    pub head: String,
    /// Page title, already HTML
    pub title: String,
    /// Page-local style blocks
    pub styles: Vec<String>,
    /// `class` attribute of `<body>`, omitted when empty
    pub body_class: String,
    /// Resolved header partial
    pub header: String,
    /// Extracted page content
    pub content: String,
    /// Resolved footer partial
    pub footer: String,
}

/// A link on the index page.
#[derive(Debug, Clone, Serialize)]
pub struct IndexLink {
    /// Link target
    pub href: String,
    /// Visible text
    pub label: String,
}

/// Context for rendering the root index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub lang: String,
    pub title: String,
    pub links: Vec<IndexLink>,
}

/// Template engine using minijinja.
///
/// Fragments and partials are trusted HTML, so auto-escaping is off; text that
/// needs escaping goes through [`escape_text`] first.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_template("page.html", PAGE_TEMPLATE)
            .expect("Failed to add page template");
        env.add_template("index.html", INDEX_TEMPLATE)
            .expect("Failed to add index template");

        Self { env }
    }

    /// Render an assembled page.
    pub fn render_page(&self, context: &PageContext) -> Result<String, minijinja::Error> {
        self.env.get_template("page.html")?.render(context)
    }

    /// Render the root index.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for use in HTML content or a quoted attribute.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
{{ head }}
<title>{{ title }}</title>
{% for style in styles %}{{ style }}
{% endfor %}</head>
<body{% if body_class %} class="{{ body_class }}"{% endif %}>
{{ header }}

{{ content }}

{{ footer }}
</body>
</html>
"##;

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title }}</title>
</head>
<body>
<h1>{{ title }}</h1>
<ul>
{% for link in links %}<li><a href="{{ link.href }}">{{ link.label }}</a></li>
{% endfor %}</ul>
</body>
</html>
"##;
