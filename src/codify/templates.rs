use anyhow::Context;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;

use crate::config::TemplatePaths;
use crate::error::TemplateError;

/// Built-in install template, written for a method body that has
/// `registry: &mut kodify::Registry` and `client: Option<&dyn kodify::ResourceClient>`
/// in scope and returns `Result<_, Box<dyn std::error::Error>>`.
pub const INSTALL_TEMPLATE: &str = include_str!("../../templates/install.rs.j2");
/// Built-in uninstall template, for the same method-body context.
pub const UNINSTALL_TEMPLATE: &str = include_str!("../../templates/uninstall.rs.j2");

/// Indentation level (four spaces each) the built-in templates place the
/// literal at.
pub const LITERAL_INDENT: usize = 2;

/// Values a snippet template can reference.
///
/// Rendering is strict: a template that names anything else fails with a
/// [`TemplateError`]. Values are raw text; templates place them inside Rust
/// source through the `rust_str` filter, which renders an escaped string
/// literal (`{{ namespace | rust_str }}` -> `"apps"`).
#[derive(Debug, Clone, Serialize)]
pub struct SnippetContext<'a> {
    /// Rust variable bound to the object
    pub variable: &'a str,
    pub namespace: &'a str,
    /// Sanitized object name
    pub name: &'a str,
    pub kind: &'a str,
    /// Construction expression; empty for uninstall
    pub literal: &'a str,
}

/// Install and uninstall template sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    install: String,
    uninstall: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self::new(INSTALL_TEMPLATE, UNINSTALL_TEMPLATE)
    }
}

impl Templates {
    pub fn new(install: impl Into<String>, uninstall: impl Into<String>) -> Self {
        Self {
            install: install.into(),
            uninstall: uninstall.into(),
        }
    }

    /// Built-in templates, with any path in `paths` read from disk instead.
    pub fn load(paths: &TemplatePaths) -> anyhow::Result<Self> {
        let mut templates = Self::default();
        if let Some(path) = &paths.install {
            templates.install = read_template(path)?;
        }
        if let Some(path) = &paths.uninstall {
            templates.uninstall = read_template(path)?;
        }
        Ok(templates)
    }

    pub fn render_install(&self, cx: &SnippetContext<'_>) -> Result<String, TemplateError> {
        render("install.rs", &self.install, cx)
    }

    pub fn render_uninstall(&self, cx: &SnippetContext<'_>) -> Result<String, TemplateError> {
        render("uninstall.rs", &self.uninstall, cx)
    }
}

fn read_template(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template: {}", path.display()))
}

fn render(name: &str, source: &str, cx: &SnippetContext<'_>) -> Result<String, TemplateError> {
    let fail = |err| TemplateError {
        template: name.to_string(),
        source: err,
    };
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_filter("rust_str", rust_str);
    env.add_template(name, source).map_err(fail)?;
    let tmpl = env.get_template(name).map_err(fail)?;
    tmpl.render(cx).map_err(fail)
}

/// `value` as a Rust string literal, quotes and escapes included.
fn rust_str(value: String) -> String {
    format!("{value:?}")
}
