use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
	schema::{PropSchema, PropType},
	templates::{dialect::KEYWORDS, extract::referenced_props},
};

/// Atomic design level a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
	Atoms,
	Molecules,
	Organisms,
	Templates,
	Pages,
}

fn class_name(name: &str) -> String {
	let mut slug = String::with_capacity(name.len());
	for (i, c) in name.trim().chars().enumerate() {
		if c.is_ascii_uppercase() && i > 0 && !slug.ends_with('-') {
			slug.push('-');
		}
		if c.is_ascii_alphanumeric() {
			slug.push(c.to_ascii_lowercase());
		} else if !slug.ends_with('-') && !slug.is_empty() {
			slug.push('-');
		}
	}
	let slug = slug.trim_end_matches('-');
	if slug.is_empty() {
		"component".to_string()
	} else {
		slug.to_string()
	}
}

fn skeleton(category: Category, name: &str, class: &str) -> String {
	let lowered = name.to_lowercase();
	// the display name lands inside string literals and markup
	let name = name.trim().replace(['\'', '"', '{', '}', '%'], "");
	match category {
		Category::Atoms if lowered.contains("button") => format!(
			"<button class=\"{class} {class}--{{{{ variant|default('primary') }}}}\" type=\"{{{{ type|default('button') }}}}\"{{% if disabled %}} disabled{{% endif %}}>\n  {{{{ text|default('{name}') }}}}\n</button>"
		),
		Category::Atoms if lowered.contains("input") => format!(
			"<input class=\"{class}\" type=\"{{{{ type|default('text') }}}}\" placeholder=\"{{{{ placeholder|default('') }}}}\" value=\"{{{{ value }}}}\"{{% if disabled %}} disabled{{% endif %}} />"
		),
		Category::Atoms => format!("<span class=\"{class}\">{{{{ text|default('{name}') }}}}</span>"),
		Category::Molecules => format!(
			"<div class=\"{class}\">\n  {{% if title %}}<h3 class=\"{class}__title\">{{{{ title }}}}</h3>{{% endif %}}\n  <div class=\"{class}__content\">{{{{ content|default('{name}') }}}}</div>\n</div>"
		),
		Category::Organisms => format!(
			"<section class=\"{class}\">\n  <header class=\"{class}__header\">\n    <h2>{{{{ title|default('{name}') }}}}</h2>\n  </header>\n  <div class=\"{class}__body\">{{{{ content }}}}</div>\n</section>"
		),
		Category::Templates => format!(
			"<div class=\"{class}\">\n  <header class=\"{class}__header\">{{{{ header|default('{name}') }}}}</header>\n  <main class=\"{class}__main\">{{{{ content }}}}</main>\n  {{% if footer %}}<footer class=\"{class}__footer\">{{{{ footer }}}}</footer>{{% endif %}}\n</div>"
		),
		Category::Pages => format!(
			"<main class=\"{class}\">\n  <h1>{{{{ title|default('{name}') }}}}</h1>\n  {{% if subtitle %}}<p class=\"{class}__subtitle\">{{{{ subtitle }}}}</p>{{% endif %}}\n  <div class=\"{class}__content\">{{{{ content }}}}</div>\n</main>"
		),
	}
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
		&& !KEYWORDS.contains(&name)
}

/// Builds a starter template for a new component.
///
/// Schema props the skeleton does not already reference are appended:
/// booleans as modifier classes, everything else as an interpolation.
/// Props whose names cannot appear in an expression are left out.
pub fn default_template(category: Category, name: &str, schema: &PropSchema) -> String {
	let class = class_name(name);
	let mut template = skeleton(category, name, &class);
	let used = referenced_props(&template);

	let mut modifiers = String::new();
	let mut slots = String::new();
	for (prop, def) in schema.iter().filter(|(prop, _)| !used.contains(prop.as_str())) {
		if !is_identifier(prop) {
			tracing::debug!(prop = %prop, "Skipping prop that is not a valid template identifier");
			continue;
		}
		match def.kind {
			PropType::Boolean => modifiers.push_str(&format!("{{% if {prop} %}} {class}--{prop}{{% endif %}}")),
			_ => slots.push_str(&format!("\n<span class=\"{class}__{prop}\">{{{{ {prop} }}}}</span>")),
		}
	}

	if !modifiers.is_empty() {
		let anchor = format!("class=\"{class}");
		if let Some(pos) = template.find(&anchor) {
			// insert right before the closing quote of the root class attribute
			let insert_at = template[pos + anchor.len()..]
				.find('"')
				.map(|offset| pos + anchor.len() + offset)
				.unwrap_or(pos + anchor.len());
			template.insert_str(insert_at, &modifiers);
		}
	}
	template.push_str(&slots);
	template
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::templates::{
		engine::TeraRenderer,
		renderer::Renderer,
		validate::validate,
		value::{PropMap, Value},
	};
	use pretty_assertions::assert_eq;
	use std::str::FromStr;
	use strum::IntoEnumIterator;

	#[test]
	fn category_parses_case_insensitively() {
		assert_eq!(Category::from_str("Atoms").unwrap(), Category::Atoms);
		assert_eq!(Category::from_str("pages").unwrap(), Category::Pages);
		assert!(Category::from_str("widgets").is_err());
		assert_eq!(Category::Organisms.to_string(), "organisms");
	}

	#[test]
	fn class_names_are_kebab_case() {
		assert_eq!(class_name("PrimaryButton"), "primary-button");
		assert_eq!(class_name("Search input"), "search-input");
		assert_eq!(class_name("  "), "component");
	}

	#[test]
	fn button_heuristic() {
		let template = default_template(Category::Atoms, "PrimaryButton", &PropSchema::default());
		assert!(template.starts_with("<button"));
		assert!(template.contains("{% if disabled %} disabled{% endif %}"));
	}

	#[test]
	fn input_heuristic_is_case_insensitive() {
		let template = default_template(Category::Atoms, "SearchInput", &PropSchema::default());
		assert!(template.starts_with("<input"));
	}

	#[test]
	fn every_category_produces_a_valid_template() {
		for category in Category::iter() {
			let template = default_template(category, "Card", &PropSchema::default());
			assert!(validate(&template).is_valid, "{category}: {template}");
		}
	}

	#[test]
	fn non_identifier_props_are_skipped() {
		let schema: PropSchema =
			serde_json::from_str(r#"{"is-active": {"type": "boolean"}, "label text": {"type": "string"}, "not": {"type": "boolean"}, "tone": {"type": "string"}}"#)
				.unwrap();
		let template = default_template(Category::Atoms, "Tag", &schema);
		assert_eq!(
			template,
			"<span class=\"tag\">{{ text|default('Tag') }}</span>\n<span class=\"tag__tone\">{{ tone }}</span>"
		);
		assert!(TeraRenderer::default().render(&template, &PropMap::new()).is_ok());
	}

	#[test]
	fn template_syntax_in_names_is_neutralised() {
		let template = default_template(Category::Atoms, "Fancy {{ x }} {% if %}", &PropSchema::default());
		assert!(!template.contains("{{ x"));
		assert!(validate(&template).is_valid, "{template}");
		let rendered = TeraRenderer::default().render(&template, &PropMap::new()).unwrap();
		assert!(rendered.starts_with("<span class=\"fancy-x-if\">Fancy"), "{rendered}");
	}

	#[test]
	fn generation_is_deterministic() {
		let schema: PropSchema = serde_json::from_str(r#"{"icon": {"type": "string"}, "active": {"type": "boolean"}}"#).unwrap();
		let first = default_template(Category::Molecules, "Nav Item", &schema);
		let second = default_template(Category::Molecules, "Nav Item", &schema);
		assert_eq!(first, second);
	}

	#[test]
	fn schema_props_are_wired_in() {
		let schema: PropSchema = serde_json::from_str(r#"{"icon": {"type": "string"}, "active": {"type": "boolean"}, "text": {"type": "string"}}"#).unwrap();
		let template = default_template(Category::Atoms, "Badge", &schema);
		assert_eq!(
			template,
			"<span class=\"badge{% if active %} badge--active{% endif %}\">{{ text|default('Badge') }}</span>\n<span class=\"badge__icon\">{{ icon }}</span>"
		);

		let props: PropMap = [("active".to_string(), Value::Bool(true)), ("icon".to_string(), Value::from("*"))].into_iter().collect();
		let rendered = TeraRenderer::default().render(&template, &props).unwrap();
		assert_eq!(rendered, "<span class=\"badge badge--active\">Badge</span>\n<span class=\"badge__icon\">*</span>");
	}
}
