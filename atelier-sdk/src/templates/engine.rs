use std::error::Error as StdError;

use tera::{Context, Tera};
use thiserror::Error;

use crate::templates::{dialect, renderer::Renderer, value::PropMap};

// Name under which templates are registered when only compiling them.
const COMPILE_NAME: &str = "__atelier_component";

#[derive(Error, Debug)]
pub enum TemplateError {
	#[error("template engine error")]
	Engine(#[from] tera::Error),

	#[error("props could not be converted into a render context")]
	Context {
		#[source]
		source: tera::Error,
	},
}

impl TemplateError {
	/// Flattens the error and all of its sources into a single line.
	pub fn describe(&self) -> String {
		let mut messages = vec![self.to_string()];
		let mut source = self.source();
		while let Some(err) = source {
			messages.push(err.to_string());
			source = err.source();
		}
		messages.join(": ")
	}
}

/// The full template engine, backed by tera.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeraRenderer {
	pub autoescape: bool,
}

impl TeraRenderer {
	pub fn new(autoescape: bool) -> Self {
		Self { autoescape }
	}
}

impl Renderer for TeraRenderer {
	fn name(&self) -> &'static str {
		"tera"
	}

	#[tracing::instrument(level = "trace", skip(self, props), err(Debug))]
	fn render(&self, template: &str, props: &PropMap) -> Result<String, TemplateError> {
		let source = dialect::normalize(template);
		let context = Context::from_serialize(props).map_err(|source| TemplateError::Context { source })?;
		Ok(Tera::one_off(&source, &context, self.autoescape)?)
	}
}

/// Parses the template without rendering it.
pub fn compile(template: &str) -> Result<(), TemplateError> {
	let mut tera = Tera::default();
	tera.add_raw_template(COMPILE_NAME, &dialect::normalize(template))?;
	Ok(())
}
