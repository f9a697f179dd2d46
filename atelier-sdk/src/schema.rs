use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
	error::Error,
	templates::value::{PropMap, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PropType {
	String,
	Boolean,
	Select,
	Number,
}

/// One entry of a component's prop schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDefinition {
	#[serde(rename = "type")]
	pub kind: PropType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl PropDefinition {
	pub fn new(kind: PropType) -> Self {
		Self {
			kind,
			default: None,
			options: None,
			description: None,
		}
	}

	/// The value a freshly generated control starts with.
	pub fn initial_value(&self) -> Value {
		if let Some(default) = &self.default {
			return default.clone();
		}
		match self.kind {
			PropType::String => Value::Str(String::new()),
			PropType::Boolean => Value::Bool(false),
			PropType::Number => Value::Num(0.0),
			PropType::Select => Value::Str(self.options.iter().flatten().next().cloned().unwrap_or_default()),
		}
	}

	/// Parses a value typed into an editor control into this prop's kind.
	pub fn coerce(&self, name: &str, raw: &str) -> Result<Value, Error> {
		let invalid = |reason: String| Error::InvalidValue {
			prop: name.to_string(),
			value: raw.to_string(),
			reason,
		};

		match self.kind {
			PropType::String => Ok(Value::Str(raw.to_string())),
			PropType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
				"true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
				"false" | "0" | "no" | "off" | "" => Ok(Value::Bool(false)),
				_ => Err(invalid("expected a boolean".to_string())),
			},
			PropType::Number => raw
				.trim()
				.parse::<f64>()
				.map(Value::Num)
				.map_err(|e| invalid(e.to_string())),
			PropType::Select => match &self.options {
				Some(options) if !options.iter().any(|o| o == raw) => Err(invalid(format!("expected one of {options:?}"))),
				_ => Ok(Value::Str(raw.to_string())),
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ControlKind {
	Text,
	Checkbox,
	Dropdown { options: Vec<String> },
	Number,
}

/// An editable input derived from a schema entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
	pub name: String,
	#[serde(flatten)]
	pub kind: ControlKind,
	pub value: Value,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Maps each prop name of a component to its definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropSchema(pub BTreeMap<String, PropDefinition>);

impl PropSchema {
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn get(&self, name: &str) -> Option<&PropDefinition> {
		self.0.get(name)
	}

	pub fn insert(&mut self, name: impl Into<String>, definition: PropDefinition) {
		self.0.insert(name.into(), definition);
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &PropDefinition)> {
		self.0.iter()
	}

	/// Declared defaults only; entries without a default are left out so
	/// template-side fallbacks still apply.
	pub fn defaults(&self) -> PropMap {
		self.0
			.iter()
			.filter_map(|(name, def)| def.default.clone().map(|value| (name.clone(), value)))
			.collect()
	}

	pub fn controls(&self) -> Vec<Control> {
		self.0
			.iter()
			.map(|(name, def)| Control {
				name: name.clone(),
				kind: match def.kind {
					PropType::String => ControlKind::Text,
					PropType::Boolean => ControlKind::Checkbox,
					PropType::Number => ControlKind::Number,
					PropType::Select => ControlKind::Dropdown {
						options: def.options.clone().unwrap_or_default(),
					},
				},
				value: def.initial_value(),
				description: def.description.clone(),
			})
			.collect()
	}
}
