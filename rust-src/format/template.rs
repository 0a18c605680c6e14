//! Tooltip templates resolved by id.
//!
//! Templates use positional placeholders (`{0}`, `{1}`, ...) that are filled
//! with already formatted fields. Missing fields render as nothing.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::{DEFAULT_TOOLTIP_TEMPLATE, TOOLTIP_TEMPLATE_ID};


fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder pattern"))
}


/// Templates available to the charts, keyed by id.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}


impl Default for TemplateRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(TOOLTIP_TEMPLATE_ID, DEFAULT_TOOLTIP_TEMPLATE);
        registry
    }
}


impl TemplateRegistry {
    /// A registry without the built-in tooltip template.
    pub fn empty() -> Self {
        Self { templates: HashMap::new() }
    }

    /// Add or replace a template.
    pub fn register(&mut self, id: &str, template: &str) {
        self.templates.insert(id.to_string(), template.to_string());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.templates.get(id).map(String::as_str)
    }

    /// Render template `id` with `fields`; `None` if the id is unknown.
    pub fn render(&self, id: &str, fields: &[String]) -> Option<String> {
        let template = self.get(id)?;
        let rendered = placeholder().replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| fields.get(i))
                .map(|field| escape_html(field))
                .unwrap_or_default()
        });

        // Empty rows are dropped
        Some(rendered.replace("<div></div>", ""))
    }
}


/// Escape text for embedding in markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
