use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use atelier_sdk::templates::PropMap;
use clap::{Parser, ValueHint};

use crate::{
	cmd::{Cmd, Session},
	input,
};

#[derive(Parser, Debug)]
pub struct Render {
	/// Template file, or `-` to read it from stdin
	#[arg(value_hint = ValueHint::FilePath)]
	template: PathBuf,
	/// JSON object with the prop values
	#[arg(long, value_hint = ValueHint::FilePath)]
	props: Option<PathBuf>,
	/// Set a single prop, applied after --props
	#[arg(long = "set", value_name = "NAME=VALUE")]
	assignments: Vec<String>,
	/// Skip the template engine and only substitute props
	#[arg(long)]
	fallback: bool,
}

#[async_trait]
impl Cmd for Render {
	async fn run(self, session: &Session) -> Result<()> {
		let template = input::read_source(&self.template)?;
		let mut props = match &self.props {
			Some(path) => input::read_props(path)?,
			None => PropMap::new(),
		};
		input::apply_assignments(&mut props, &self.assignments, None)?;

		let templater = session.settings.templater();
		let html = if self.fallback {
			templater.render_fallback(&template, &props)
		} else {
			templater.render(&template, &props)
		};
		println!("{html}");
		Ok(())
	}
}
