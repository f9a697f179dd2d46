use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::templates::{engine::TemplateError, renderer::Renderer, value::PropMap};

lazy_static! {
	// a guard on a single prop name, optionally negated, whose branches contain no other block tags
	static ref SIMPLE_BLOCK: Regex = Regex::new(
		r"\{%-?\s*if\s+(not\s+)?([A-Za-z_][A-Za-z0-9_]*)\s*-?%\}((?:[^{]|\{[^%])*?)(?:\{%-?\s*else\s*-?%\}((?:[^{]|\{[^%])*?))?\{%-?\s*endif\s*-?%\}"
	)
	.unwrap();
	// filters after the name are accepted but ignored
	static ref INTERPOLATION: Regex = Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:\|[^}]*)?-?\}\}").unwrap();
}

/// Restricted substitution used when the full engine is unavailable or rejects a template.
///
/// Only plain `{{ name }}` interpolations and guards of the form
/// `{% if [not] name %}…[{% else %}…]{% endif %}` are understood. Filters are
/// dropped, so `{{ name|default('x') }}` renders empty when `name` is missing.
/// Anything else, like compound conditions or loops, is left in the output verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FallbackRenderer;

impl FallbackRenderer {
	pub fn substitute(&self, template: &str, props: &PropMap) -> String {
		let mut output = template.to_string();

		// innermost blocks first, so nested guards resolve from the inside out
		loop {
			let next = SIMPLE_BLOCK.replace_all(&output, |caps: &Captures| {
				let negated = caps.get(1).is_some();
				let truthy = props.get(&caps[2]).is_some_and(|value| value.is_truthy());
				let branch = if truthy != negated { caps.get(3) } else { caps.get(4) };
				branch.map(|m| m.as_str()).unwrap_or_default().to_string()
			});
			if next == output {
				break;
			}
			output = next.into_owned();
		}

		INTERPOLATION
			.replace_all(&output, |caps: &Captures| {
				props.get(&caps[1]).map(ToString::to_string).unwrap_or_default()
			})
			.into_owned()
	}
}

impl Renderer for FallbackRenderer {
	fn name(&self) -> &'static str {
		"fallback"
	}

	fn render(&self, template: &str, props: &PropMap) -> Result<String, TemplateError> {
		Ok(self.substitute(template, props))
	}
}
