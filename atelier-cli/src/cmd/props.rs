use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use atelier_sdk::templates;
use clap::{Parser, ValueHint};
use itertools::Itertools;

use crate::{
	cmd::{Cmd, Session},
	input,
};

#[derive(Parser, Debug)]
pub struct Props {
	/// Template file, or `-` to read it from stdin
	#[arg(value_hint = ValueHint::FilePath)]
	template: PathBuf,
	/// Compare the referenced props against this schema
	#[arg(long, value_hint = ValueHint::FilePath)]
	schema: Option<PathBuf>,
}

#[async_trait]
impl Cmd for Props {
	async fn run(self, session: &Session) -> Result<()> {
		let template = input::read_source(&self.template)?;
		for name in templates::referenced_props(&template) {
			println!("{name}");
		}

		if let Some(path) = &self.schema {
			let schema = input::read_schema(path)?;
			let audit = templates::audit(&template, &schema);
			if !audit.unknown.is_empty() {
				session
					.ui
					.warning(&format!("Not declared in the schema: {}", audit.unknown.iter().join(", ")));
			}
			if !audit.unused.is_empty() {
				session
					.ui
					.warning(&format!("Declared but never used: {}", audit.unused.iter().join(", ")));
			}
			if audit.is_clean() {
				session.ui.success("Template and schema agree");
			}
		}
		Ok(())
	}
}
