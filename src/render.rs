use crate::error::Result;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::info;

pub const DEFAULT_TEMPLATES_GLOB: &str = "templates/*.html";

/// Compiled template set, read-only after construction
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new(mut tera: Tera) -> Self {
        tera.set_escape_fn(escape_html);
        Self { tera }
    }

    /// Parse every template matching `pattern`, e.g. `templates/*.html`
    pub fn from_glob(pattern: &str) -> Result<Self> {
        let tera = Tera::new(pattern)?;
        info!(
            "Loaded {} templates from {}",
            tera.get_template_names().count(),
            pattern
        );
        Ok(Self::new(tera))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render the template registered as `name`, falling back to `name.html`.
    /// `data` must serialize to a map.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = if self.has_template(name) {
            name.to_string()
        } else {
            format!("{}.html", name)
        };

        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(&template, &context)?)
    }
}

/// Tera's default escaper also rewrites `/`, which mangles every URL on the
/// page. Only the characters that can break out of text or attributes are
/// replaced.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
