use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::templates::engine;

lazy_static! {
	static ref BLOCK_OPEN: Regex = Regex::new(r"\{%-?\s*if\b").unwrap();
	static ref BLOCK_CLOSE: Regex = Regex::new(r"\{%-?\s*endif\b").unwrap();
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
	pub is_valid: bool,
	pub errors: Vec<String>,
}

/// Checks whether the full engine accepts a template.
///
/// When it doesn't, the engine's own message is reported along with a count of
/// unbalanced conditional tags, if any.
pub fn validate(template: &str) -> Validation {
	let err = match engine::compile(template) {
		Ok(()) => {
			return Validation {
				is_valid: true,
				errors: vec![],
			}
		}
		Err(err) => err,
	};

	let mut errors = vec![err.describe()];

	let opened = BLOCK_OPEN.find_iter(template).count();
	let closed = BLOCK_CLOSE.find_iter(template).count();
	if opened != closed {
		errors.push(format!(
			"Mismatched conditional blocks: found {opened} opening `{{% if %}}` tag(s) but {closed} closing `{{% endif %}}` tag(s)"
		));
	}

	Validation { is_valid: false, errors }
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn balanced_template_is_valid() {
		assert_eq!(validate("{% if x %}y{% endif %}"), Validation {
			is_valid: true,
			errors: vec![]
		});
	}

	#[test]
	fn missing_endif_reports_mismatch() {
		let validation = validate("{% if x %}y");
		assert!(!validation.is_valid);
		assert!(validation.errors.iter().any(|e| e.contains("Mismatched")));
	}

	#[test]
	fn extra_endif_reports_mismatch() {
		let validation = validate("y{% endif %}");
		assert!(!validation.is_valid);
		assert!(validation.errors.iter().any(|e| e.contains("0 opening") && e.contains("1 closing")));
	}

	#[test]
	fn syntax_errors_without_mismatch_report_engine_message_only() {
		let validation = validate("{{ name | }}");
		assert!(!validation.is_valid);
		assert_eq!(validation.errors.len(), 1);
	}

	#[test]
	fn author_dialect_is_accepted() {
		let validation = validate("{{ name|default('World') }}{% if a %}{% elseif b %}{% endif %}");
		assert!(validation.is_valid, "{:?}", validation.errors);
	}

	#[test]
	fn serializes_with_camel_case_keys() {
		let json = serde_json::to_string(&validate("ok")).unwrap();
		assert_eq!(json, r#"{"isValid":true,"errors":[]}"#);
	}
}
