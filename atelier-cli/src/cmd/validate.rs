use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use atelier_sdk::templates;
use clap::{Parser, ValueHint};

use crate::{
	cmd::{Cmd, Session},
	input,
};

#[derive(Parser, Debug)]
pub struct Validate {
	/// Template file, or `-` to read it from stdin
	#[arg(value_hint = ValueHint::FilePath)]
	template: PathBuf,
	/// Print the result as JSON
	#[arg(long)]
	json: bool,
}

#[async_trait]
impl Cmd for Validate {
	async fn run(self, session: &Session) -> Result<()> {
		let template = input::read_source(&self.template)?;
		let validation = templates::validate(&template);

		if self.json {
			println!("{}", serde_json::to_string_pretty(&validation)?);
		} else if validation.is_valid {
			session.ui.success(&format!("{} is valid", self.template.display()));
		} else {
			for error in &validation.errors {
				session.ui.error(error);
			}
		}

		if !validation.is_valid {
			bail!("{} has {} error(s)", self.template.display(), validation.errors.len());
		}
		Ok(())
	}
}
