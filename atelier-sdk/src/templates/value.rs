use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize, Serializer};

/// A flat mapping from prop name to the value fed into a template.
pub type PropMap = BTreeMap<String, Value>;

/// Represents any value a prop can take at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Str(String),
	Bool(bool),
	Num(f64),
}

// Integral numbers within this bound print without a fractional part.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

fn as_integer(n: f64) -> Option<i64> {
	(n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER).then_some(n as i64)
}

impl Value {
	/// Guesses the kind of an untyped value, e.g. one passed on the command line.
	pub fn infer(raw: &str) -> Self {
		match raw {
			"true" => Value::Bool(true),
			"false" => Value::Bool(false),
			_ => raw
				.parse::<f64>()
				.ok()
				.filter(|n| n.is_finite())
				.map(Value::Num)
				.unwrap_or_else(|| Value::Str(raw.to_string())),
		}
	}

	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Str(s) => !s.is_empty(),
			Value::Bool(b) => *b,
			Value::Num(n) => *n != 0.0 && !n.is_nan(),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Str(s) => write!(f, "{s}"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Num(n) => match as_integer(*n) {
				Some(i) => write!(f, "{i}"),
				None => write!(f, "{n}"),
			},
		}
	}
}

impl Serialize for Value {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Value::Str(s) => serializer.serialize_str(s),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Num(n) => match as_integer(*n) {
				Some(i) => serializer.serialize_i64(i),
				None => serializer.serialize_f64(*n),
			},
		}
	}
}

impl From<&str> for Value {
	fn from(val: &str) -> Self {
		Value::Str(val.to_string())
	}
}

impl From<String> for Value {
	fn from(val: String) -> Self {
		Value::Str(val)
	}
}

impl From<bool> for Value {
	fn from(val: bool) -> Self {
		Value::Bool(val)
	}
}

impl From<f64> for Value {
	fn from(val: f64) -> Self {
		Value::Num(val)
	}
}

impl From<i64> for Value {
	fn from(val: i64) -> Self {
		Value::Num(val as f64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn integral_numbers_print_without_fraction() {
		assert_eq!(Value::Num(0.0).to_string(), "0");
		assert_eq!(Value::Num(-12.0).to_string(), "-12");
		assert_eq!(Value::Num(1.5).to_string(), "1.5");
	}

	#[test]
	fn truthiness_follows_value_kind() {
		assert!(Value::from("x").is_truthy());
		assert!(!Value::from("").is_truthy());
		assert!(!Value::Bool(false).is_truthy());
		assert!(!Value::Num(0.0).is_truthy());
		assert!(!Value::Num(f64::NAN).is_truthy());
		assert!(Value::Num(-1.0).is_truthy());
	}

	#[test]
	fn infer_untyped_values() {
		assert_eq!(Value::infer("true"), Value::Bool(true));
		assert_eq!(Value::infer("12"), Value::Num(12.0));
		assert_eq!(Value::infer("NaN"), Value::from("NaN"));
		assert_eq!(Value::infer("primary"), Value::from("primary"));
	}

	#[test]
	fn deserializes_untagged_json() {
		let props: PropMap = serde_json::from_str(r#"{"label": "Save", "disabled": true, "count": 3}"#).unwrap();
		assert_eq!(props["label"], Value::from("Save"));
		assert_eq!(props["disabled"], Value::Bool(true));
		assert_eq!(props["count"], Value::Num(3.0));
	}

	#[test]
	fn serializes_integral_numbers_as_integers() {
		let json = serde_json::to_string(&Value::Num(4.0)).unwrap();
		assert_eq!(json, "4");
	}
}
