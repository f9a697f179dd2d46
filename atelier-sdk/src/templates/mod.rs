use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
	schema::PropSchema,
	templates::{engine::TeraRenderer, fallback::FallbackRenderer, renderer::Renderer},
};

pub mod dialect;
pub mod engine;
pub mod extract;
pub mod fallback;
pub mod renderer;
pub mod scaffold;
pub mod validate;
pub mod value;

pub use extract::{audit, referenced_props, PropAudit};
pub use scaffold::{default_template, Category};
pub use validate::{validate, Validation};
pub use value::{PropMap, Value};

/// Which renderer handles templates first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RendererKind {
	#[default]
	Tera,
	Fallback,
}

/// Entry point for turning component templates into HTML.
///
/// Rendering never fails: when the primary renderer rejects a template the
/// restricted fallback is used instead, so a live preview keeps showing
/// something while the author is mid-edit.
#[derive(Clone, Debug)]
pub struct Templater {
	primary: Box<dyn Renderer>,
	fallback: FallbackRenderer,
}

impl Default for Templater {
	fn default() -> Self {
		Self::new(Box::new(TeraRenderer::default()))
	}
}

impl Templater {
	pub fn new(primary: Box<dyn Renderer>) -> Self {
		Self {
			primary,
			fallback: FallbackRenderer,
		}
	}

	pub fn from_kind(kind: RendererKind, autoescape: bool) -> Self {
		match kind {
			RendererKind::Tera => Self::new(Box::new(TeraRenderer::new(autoescape))),
			RendererKind::Fallback => Self::new(Box::new(FallbackRenderer)),
		}
	}

	pub fn primary(&self) -> &dyn Renderer {
		self.primary.as_ref()
	}

	pub fn render(&self, template: &str, props: &PropMap) -> String {
		match self.primary.render(template, props) {
			Ok(html) => html,
			Err(e) => {
				tracing::debug!(renderer = self.primary.name(), error = %e.describe(), "falling back to restricted substitution");
				self.fallback.substitute(template, props)
			}
		}
	}

	/// Renders using only the restricted substitution path.
	pub fn render_fallback(&self, template: &str, props: &PropMap) -> String {
		self.fallback.substitute(template, props)
	}

	/// Renders with every declared schema default as the prop map.
	pub fn preview_with_defaults(&self, template: &str, schema: &PropSchema) -> String {
		self.render(template, &schema.defaults())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::templates::engine::TemplateError;
	use pretty_assertions::assert_eq;

	#[derive(Clone, Debug)]
	struct Unavailable;

	impl Renderer for Unavailable {
		fn name(&self) -> &'static str {
			"unavailable"
		}

		fn render(&self, _template: &str, _props: &PropMap) -> Result<String, TemplateError> {
			Err(TemplateError::Engine(tera::Error::msg("engine not loaded")))
		}
	}

	fn props(pairs: &[(&str, Value)]) -> PropMap {
		pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
	}

	#[test]
	fn render_is_idempotent() {
		let templater = Templater::default();
		let template = "<b class=\"{% if on %}on{% endif %}\">{{ label|default('x') }}</b>";
		let props = props(&[("on", true.into())]);
		assert_eq!(templater.render(template, &props), templater.render(template, &props));
	}

	#[test]
	fn numbers_are_substituted_even_when_falsy() {
		let templater = Templater::default();
		assert_eq!(templater.render("{{n}}", &props(&[("n", Value::Num(0.0))])), "0");
		assert_eq!(templater.render("{{n}}", &props(&[("n", Value::Num(2.5))])), "2.5");
	}

	#[test]
	fn malformed_templates_degrade_instead_of_failing() {
		let templater = Templater::default();
		let rendered = templater.render("<p>{{ name }}</p>{% if x %}", &props(&[("name", "Ada".into())]));
		assert_eq!(rendered, "<p>Ada</p>{% if x %}");
		let rendered = templater.render("{{ {{ oops }", &PropMap::new());
		assert_eq!(rendered, "{{ {{ oops }");
	}

	#[test]
	fn literal_markup_survives_rendering() {
		let templater = Templater::default();
		assert_eq!(templater.render("<code>x|default('y')</code>", &PropMap::new()), "<code>x|default('y')</code>");
		assert_eq!(
			templater.render("<code>{% raw %}{{ a }}{% endraw %}</code>{{ a }}", &props(&[("a", "1".into())])),
			"<code>{{ a }}</code>1"
		);
	}

	#[test]
	fn unavailable_engine_uses_fallback() {
		let templater = Templater::new(Box::new(Unavailable));
		let rendered = templater.render("Hi {{ name }}{% if bold %}!{% endif %}", &props(&[("name", "Ada".into()), ("bold", true.into())]));
		assert_eq!(rendered, "Hi Ada!");
	}

	#[test]
	fn fallback_kind_is_selected_at_construction() {
		let templater = Templater::from_kind(RendererKind::Fallback, false);
		assert_eq!(templater.primary().name(), "fallback");
		assert_eq!(templater.render("Hello {{ name|default('World') }}", &PropMap::new()), "Hello ");
		assert_eq!(Templater::from_kind(RendererKind::Tera, false).primary().name(), "tera");
	}

	#[test]
	fn render_fallback_skips_the_engine() {
		let templater = Templater::default();
		assert_eq!(templater.render_fallback("{{ a|default('z') }}", &PropMap::new()), "");
		assert_eq!(templater.render("{{ a|default('z') }}", &PropMap::new()), "z");
	}

	#[test]
	fn preview_uses_schema_defaults() {
		let schema: PropSchema = serde_json::from_str(
			r#"{"text": {"type": "string", "default": "Save"}, "disabled": {"type": "boolean", "default": true}, "size": {"type": "select", "default": "xl", "options": ["sm"]}, "icon": {"type": "string"}}"#,
		)
		.unwrap();
		let template = "<button{% if disabled %} disabled{% endif %} data-size=\"{{ size }}\">{{ icon|default('*') }}{{ text }}</button>";
		let rendered = Templater::default().preview_with_defaults(template, &schema);
		assert_eq!(rendered, "<button disabled data-size=\"xl\">*Save</button>");
	}
}
