//! Rewrites the Nunjucks-flavoured syntax authors type into the form tera
//! understands. Only the inside of `{{ … }}` and `{% … %}` tags is rewritten;
//! markup between tags and `{% raw %}` regions pass through untouched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Names that are part of the expression language rather than props.
pub const KEYWORDS: &[&str] = &["not", "and", "or", "in", "is", "true", "false", "True", "False", "loop", "none"];

lazy_static! {
	static ref TAG: Regex = Regex::new(
		r"(?s)(?P<raw>\{%-?\s*raw\s*-?%\}.*?\{%-?\s*endraw\s*-?%\})|(?P<expr>\{\{.*?\}\})|(?P<stmt>\{%.*?%\})"
	)
	.unwrap();
	// `{{ n|default('x', true) }}` also replaces falsy values, which tera's `default` never does.
	static ref TRUTHY_DEFAULT: Regex = Regex::new(
		r#"^\{\{(-?)\s*([A-Za-z_][A-Za-z0-9_]*)\s*\|\s*default\(\s*('[^']*'|"[^"]*"|[^)=,'"\s]+)\s*,\s*(?:boolean\s*=\s*)?true\s*\)\s*(-?)\}\}$"#
	)
	.unwrap();
	// `default('x')` -> `default(value='x')`; named arguments contain `=` and are left alone.
	static ref POSITIONAL_DEFAULT: Regex = Regex::new(r#"\|\s*default\(\s*('[^']*'|"[^"]*"|[^)=,'"\s]+)\s*(?:,[^)]*)?\)"#).unwrap();
	static ref BARE_INTERPOLATION: Regex = Regex::new(r"^\{\{(-?)\s*([A-Za-z_][A-Za-z0-9_]*)\s*(-?)\}\}$").unwrap();
	static ref ELSEIF: Regex = Regex::new(r"^\{%(-?)\s*elseif\b").unwrap();
}

/// Rewrites every tag of `template` into tera syntax.
///
/// A truthy `default('x', true)` on a lone variable becomes an `if`/`else`
/// block. Anywhere else the second `default` argument is dropped, so the
/// fallback value only replaces missing props.
pub fn normalize(template: &str) -> String {
	TAG.replace_all(template, |caps: &Captures| {
		if let Some(expr) = caps.name("expr") {
			expression(expr.as_str())
		} else if let Some(stmt) = caps.name("stmt") {
			let stmt = POSITIONAL_DEFAULT.replace_all(stmt.as_str(), "| default(value=${1})");
			ELSEIF.replace(&stmt, "{%${1} elif").into_owned()
		} else {
			caps[0].to_string()
		}
	})
	.into_owned()
}

fn expression(tag: &str) -> String {
	if let Some(caps) = TRUTHY_DEFAULT.captures(tag) {
		let (name, fallback) = (&caps[2], &caps[3]);
		return format!(
			"{{%{} if {name} %}}{{{{ {name} }}}}{{% else %}}{{{{ {fallback} }}}}{{% endif {}%}}",
			&caps[1], &caps[4]
		);
	}

	if let Some(caps) = BARE_INTERPOLATION.captures(tag) {
		let name = &caps[2];
		if KEYWORDS.contains(&name) {
			return tag.to_string();
		}
		// missing props render as an empty string instead of failing the whole template
		return format!("{{{{{} {name} | default(value=\"\") {}}}}}", &caps[1], &caps[3]);
	}

	POSITIONAL_DEFAULT.replace_all(tag, "| default(value=${1})").into_owned()
}
