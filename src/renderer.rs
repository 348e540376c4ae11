//! Template rendering for generated files.
//! Templates use a small subset of MiniJinja: `{% if %}` blocks and
//! `{{ variable }}` interpolation. Referencing a variable that is not in the
//! context is an error rather than an empty string.
use minijinja::{Environment, UndefinedBehavior};

use crate::error::{Error, Result};

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Logical name of the template, used in error messages
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with strict undefined handling.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::Render` if the template does not parse or references an
    ///   undefined variable
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env
            .render_str(template, context)
            .map_err(|source| Error::Render { template: name.to_string(), source })
    }
}
