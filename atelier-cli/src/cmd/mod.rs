use std::path::PathBuf;

use async_trait::async_trait;
use atelier_sdk::{settings::Settings, store::ComponentStore};
use clap::{Parser, Subcommand, ValueHint};

use crate::ui::Ui;
use component::ComponentCmd;
use edit::Edit;
use preview::Preview;
use props::Props;
use render::Render;
use scaffold::Scaffold;
use token::TokenCmd;
use validate::Validate;

mod component;
mod edit;
mod logs;
mod preview;
mod props;
mod render;
mod scaffold;
mod token;
mod validate;

#[derive(Subcommand)]
enum Command {
	/// Render a template with props
	Render(Render),
	/// Check that a template compiles
	Validate(Validate),
	/// List the props a template references
	Props(Props),
	/// Generate a starter template
	Scaffold(Scaffold),
	/// Render a template with the defaults of a prop schema
	Preview(Preview),
	/// Manage stored components
	#[command(subcommand)]
	Component(ComponentCmd),
	/// Manage design tokens
	#[command(subcommand)]
	Token(TokenCmd),
	/// Open the configuration file in $EDITOR
	Edit(Edit),
}

#[derive(Parser)]
#[command(about, author, version)]
pub struct App {
	#[command(subcommand)]
	command: Command,
	/// Path to the configuration file
	#[arg(long, global = true, value_hint = ValueHint::FilePath)]
	config: Option<PathBuf>,
	/// Print debug logs to stderr
	#[arg(long, short, global = true)]
	verbose: bool,
}

/// What every command gets to work with.
pub struct Session {
	pub settings: Settings,
	pub config_path: PathBuf,
	pub ui: Ui,
}

impl Session {
	pub async fn store(&self) -> anyhow::Result<ComponentStore> {
		Ok(ComponentStore::connect(&self.settings.database_url).await?)
	}
}

#[async_trait]
pub trait Cmd {
	async fn run(self, session: &Session) -> anyhow::Result<()>;
}

impl App {
	pub async fn run(self) -> anyhow::Result<()> {
		let config_path = Settings::resolve_path(self.config);
		let settings = Settings::load(Some(config_path.clone()))?;
		let _guard = logs::init(&settings.log_dir, self.verbose)?;
		let session = Session {
			settings,
			config_path,
			ui: Ui,
		};

		match self.command {
			Command::Render(cmd) => cmd.run(&session).await,
			Command::Validate(cmd) => cmd.run(&session).await,
			Command::Props(cmd) => cmd.run(&session).await,
			Command::Scaffold(cmd) => cmd.run(&session).await,
			Command::Preview(cmd) => cmd.run(&session).await,
			Command::Component(cmd) => cmd.run(&session).await,
			Command::Token(cmd) => cmd.run(&session).await,
			Command::Edit(cmd) => cmd.run(&session).await,
		}
	}
}
