use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::{schema::PropSchema, templates::dialect::KEYWORDS};

lazy_static! {
	static ref INTERPOLATED: Regex = Regex::new(r"(?s)\{\{-?(.*?)-?\}\}").unwrap();
	static ref GUARDED: Regex = Regex::new(r"(?s)\{%-?\s*(?:if|elif|elseif)\s+(.*?)-?%\}").unwrap();
	static ref STRING_LITERAL: Regex = Regex::new(r#"'[^']*'|"[^"]*""#).unwrap();
	// `x is defined`, `x is not odd`: the test name is not a prop
	static ref TEST_NAME: Regex = Regex::new(r"\bis\s+(?:not\s+)?[A-Za-z_][A-Za-z0-9_]*").unwrap();
	static ref IDENTIFIER: Regex = Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*").unwrap();
}

/// Variables an expression reads; filter names, attributes, function calls and literals are skipped.
fn variables(expression: &str) -> Vec<String> {
	let expression = STRING_LITERAL.replace_all(expression, "\"\"");
	let expression = TEST_NAME.replace_all(&expression, "");

	IDENTIFIER
		.find_iter(&expression)
		.filter(|m| {
			let before = expression[..m.start()].trim_end().chars().last();
			let after = expression[m.end()..].trim_start().chars().next();
			!matches!(before, Some('|' | '.')) && after != Some('(')
		})
		.map(|m| m.as_str().to_string())
		.filter(|name| !KEYWORDS.contains(&name.as_str()))
		.collect()
}

/// Every prop name a template depends on, either interpolated or used in a block guard.
pub fn referenced_props(template: &str) -> BTreeSet<String> {
	INTERPOLATED
		.captures_iter(template)
		.chain(GUARDED.captures_iter(template))
		.flat_map(|caps| variables(&caps[1]))
		.collect()
}

/// Differences between the props a template uses and the props its schema declares.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PropAudit {
	/// Referenced by the template but missing from the schema.
	pub unknown: BTreeSet<String>,
	/// Declared in the schema but never referenced.
	pub unused: BTreeSet<String>,
}

impl PropAudit {
	pub fn is_clean(&self) -> bool {
		self.unknown.is_empty() && self.unused.is_empty()
	}
}

pub fn audit(template: &str, schema: &PropSchema) -> PropAudit {
	let referenced = referenced_props(template);
	let declared: BTreeSet<String> = schema.names().map(str::to_string).collect();

	PropAudit {
		unknown: referenced.difference(&declared).cloned().collect(),
		unused: declared.difference(&referenced).cloned().collect(),
	}
}
