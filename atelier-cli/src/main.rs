use crate::cmd::App;
use anyhow::Result;
use clap::Parser;

mod cmd;
mod input;
mod ui;

#[tokio::main]
async fn main() -> Result<()> {
	let app: App = App::parse();
	app.run().await
}
