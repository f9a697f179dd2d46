use std::{path::PathBuf, str::FromStr};

use anyhow::Result;
use async_trait::async_trait;
use atelier_sdk::{
	schema::PropSchema,
	templates::{self, Category},
};
use clap::{Parser, ValueHint};

use crate::{
	cmd::{Cmd, Session},
	input,
};

#[derive(Parser, Debug)]
pub struct Scaffold {
	/// atoms, molecules, organisms, templates or pages
	#[arg(long, value_parser = Category::from_str)]
	category: Category,
	#[arg(long)]
	name: String,
	/// Wire the props of this schema into the generated markup
	#[arg(long, value_hint = ValueHint::FilePath)]
	schema: Option<PathBuf>,
}

#[async_trait]
impl Cmd for Scaffold {
	async fn run(self, _session: &Session) -> Result<()> {
		let schema = match &self.schema {
			Some(path) => input::read_schema(path)?,
			None => PropSchema::default(),
		};
		println!("{}", templates::default_template(self.category, &self.name, &schema));
		Ok(())
	}
}
