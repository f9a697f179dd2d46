use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, ValueHint};

use crate::{
	cmd::{Cmd, Session},
	input,
};

#[derive(Parser, Debug)]
pub struct Preview {
	/// Template file, or `-` to read it from stdin
	#[arg(value_hint = ValueHint::FilePath)]
	template: PathBuf,
	#[arg(long, value_hint = ValueHint::FilePath)]
	schema: PathBuf,
	/// Print the editor controls derived from the schema as JSON instead of rendering
	#[arg(long)]
	controls: bool,
}

#[async_trait]
impl Cmd for Preview {
	async fn run(self, session: &Session) -> Result<()> {
		let schema = input::read_schema(&self.schema)?;
		if self.controls {
			println!("{}", serde_json::to_string_pretty(&schema.controls())?);
			return Ok(());
		}

		let template = input::read_source(&self.template)?;
		println!("{}", session.settings.templater().preview_with_defaults(&template, &schema));
		Ok(())
	}
}
