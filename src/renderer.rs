//! Compile entry points
//!
//! A [`Renderer`] parses its source once, at construction, and can render the
//! resulting tree any number of times.

use crate::ast::Tree;
use crate::builder::build_tree;
use crate::config::{HamlConfig, RenderOptions};
use crate::error::TemplateError;
use crate::render::render_lines;

#[derive(Debug, Clone)]
pub struct Renderer {
    source: String,
    tree: Tree,
    options: RenderOptions,
}

impl Renderer {
    /// Parse `source`; fails on the first indentation or syntax error.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn new(source: &str, options: RenderOptions) -> Result<Self, TemplateError> {
        let tree = build_tree(source)?;
        Ok(Self {
            source: source.to_string(),
            tree,
            options,
        })
    }

    pub fn from_config(source: &str, config: &HamlConfig) -> Result<Self, TemplateError> {
        Self::new(source, config.render.clone())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self) -> String {
        render_lines(&self.tree, &self.options.indent_unit_string)
            .join(&self.options.line_join_string)
    }
}

/// Compile with the default options: no line separator, no indentation.
pub fn compile(source: &str) -> Result<String, TemplateError> {
    compile_with(source, &RenderOptions::default())
}

pub fn compile_with(source: &str, options: &RenderOptions) -> Result<String, TemplateError> {
    Ok(Renderer::new(source, options.clone())?.render())
}

/// Compile with the `[render]` table of a loaded configuration.
pub fn compile_with_config(source: &str, config: &HamlConfig) -> Result<String, TemplateError> {
    Ok(Renderer::from_config(source, config)?.render())
}
