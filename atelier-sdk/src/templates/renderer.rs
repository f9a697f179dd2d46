use dyn_clone::DynClone;
use std::fmt::Debug;

use crate::templates::{engine::TemplateError, value::PropMap};

dyn_clone::clone_trait_object!(Renderer);

/// A strategy that turns a template plus a prop map into HTML.
///
/// Implementations must be pure: the same template and props always produce
/// the same output, and neither input is modified.
pub trait Renderer: DynClone + Send + Sync + Debug {
	/// Short identifier used in logs.
	fn name(&self) -> &'static str;
	fn render(&self, template: &str, props: &PropMap) -> Result<String, TemplateError>;
}
