use super::{Helpers, RenderContext};
use crate::errors::LinkdownError;
use anyhow::Context;
use log::debug;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use std::{fs, io, io::Write, path::Path};

const TEMPLATE_NAME: &str = "bookmarks";

/// The built-in markdown template.
pub const DEFAULT_TEMPLATE: &str = include_str!("default_template.md.j2");

/// Renders a [`RenderContext`] with a compiled template.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Compile the template `source` with the given helpers.
    pub fn new(source: &str, helpers: &Helpers) -> Result<Self, LinkdownError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        helpers.register(&mut env);
        env.add_template_owned(TEMPLATE_NAME, source.to_owned())
            .map_err(LinkdownError::TemplateCompile)?;

        Ok(Self { env })
    }

    pub fn with_default_template(helpers: &Helpers) -> Result<Self, LinkdownError> {
        Self::new(DEFAULT_TEMPLATE, helpers)
    }

    pub fn from_file(path: &Path, helpers: &Helpers) -> Result<Self, LinkdownError> {
        debug!("Read template from {}", path.display());
        let source = fs::read_to_string(path)
            .context(format!("Can't read template at {}", path.display()))?;
        Self::new(&source, helpers)
    }

    /// Render the context into `writer`.
    ///
    /// Output is written incrementally, so `writer` may already contain
    /// partial output if rendering fails.
    pub fn render(&self, context: &RenderContext, writer: impl Write) -> Result<(), LinkdownError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(LinkdownError::TemplateCompile)?;

        template
            .render_to_write(context, writer)
            .map_err(|err| match err.kind() {
                ErrorKind::WriteFailure => LinkdownError::Output(io::Error::other(err)),
                _ => LinkdownError::TemplateExecution(err),
            })?;

        Ok(())
    }
}
