use std::{
	fs,
	io::{self, Read},
	path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use atelier_sdk::{
	schema::PropSchema,
	templates::{PropMap, Value},
};

/// Reads a file, or stdin when the path is `-`.
pub fn read_source(path: &Path) -> Result<String> {
	if path.as_os_str() == "-" {
		let mut buf = String::new();
		io::stdin().read_to_string(&mut buf).context("could not read from stdin")?;
		return Ok(buf);
	}
	fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

pub fn read_schema(path: &Path) -> Result<PropSchema> {
	let raw = read_source(path)?;
	serde_json::from_str(&raw).with_context(|| format!("{} is not a valid prop schema", path.display()))
}

pub fn read_props(path: &Path) -> Result<PropMap> {
	let raw = read_source(path)?;
	serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON object of prop values", path.display()))
}

/// Splits a `name=value` assignment given with `--set`.
pub fn split_assignment(raw: &str) -> Result<(&str, &str)> {
	let (name, value) = raw.split_once('=').ok_or_else(|| anyhow!("expected NAME=VALUE, got `{raw}`"))?;
	let name = name.trim();
	if name.is_empty() {
		bail!("missing prop name in `{raw}`");
	}
	Ok((name, value))
}

/// Applies `--set` assignments on top of `props`.
///
/// Props declared in `schema` are coerced to their declared type; anything else has its type guessed.
pub fn apply_assignments(props: &mut PropMap, assignments: &[String], schema: Option<&PropSchema>) -> Result<()> {
	for raw in assignments {
		let (name, value) = split_assignment(raw)?;
		let value = match schema.and_then(|schema| schema.get(name)) {
			Some(definition) => definition.coerce(name, value)?,
			None => Value::infer(value),
		};
		props.insert(name.to_string(), value);
	}
	Ok(())
}
