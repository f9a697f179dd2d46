use std::{
	env,
	path::Path,
	process::{self, ExitStatus},
};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use clap::Parser;

use crate::cmd::{Cmd, Session};

#[derive(Parser, Debug)]
pub struct Edit {
	/// Print the effective settings as TOML instead of opening an editor
	#[arg(long)]
	show: bool,
}

#[async_trait]
impl Cmd for Edit {
	async fn run(self, session: &Session) -> Result<()> {
		if self.show {
			print!("{}", toml::to_string_pretty(&session.settings)?);
			return Ok(());
		}

		let status = Self::edit(&session.config_path)?;
		if !status.success() {
			bail!("editor exited with {status}");
		}
		Ok(())
	}
}

impl Edit {
	pub(crate) fn edit<T: AsRef<Path>>(path: T) -> Result<ExitStatus> {
		let editor = env::var("EDITOR").context("$EDITOR is not set")?;
		if let Some(parent) = path.as_ref().parent() {
			std::fs::create_dir_all(parent)?;
		}
		process::Command::new(&editor)
			.arg(path.as_ref())
			.spawn()
			.context(editor)?
			.wait()
			.context("command wasn't running")
	}
}
