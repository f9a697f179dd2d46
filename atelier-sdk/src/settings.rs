use std::path::PathBuf;

use config::{Config as LayeredConfig, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
	error::Error,
	templates::{RendererKind, Templater},
	PROJECT_NAME,
};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// Where components and tokens are persisted.
	pub database_url: String,
	pub renderer: RendererKind,
	/// Escape HTML in interpolated prop values.
	pub autoescape: bool,
	pub log_dir: PathBuf,
}

impl Settings {
	/// Layers the built-in defaults, the config file (if present) and `ATELIER_*` environment variables.
	pub fn load(path: Option<PathBuf>) -> Result<Self, Error> {
		let path = Self::resolve_path(path);
		let data_dir = Self::data_dir();
		tracing::debug!("Loading settings from {}", path.display());

		let settings = LayeredConfig::builder()
			.set_default("database_url", format!("sqlite://{}", data_dir.join(format!("{PROJECT_NAME}.db")).display()))?
			.set_default("renderer", RendererKind::default().to_string())?
			.set_default("autoescape", false)?
			.set_default("log_dir", data_dir.join("logs").to_string_lossy().to_string())?
			.add_source(File::from(path).required(false))
			.add_source(Environment::with_prefix(&PROJECT_NAME.to_uppercase()))
			.build()?
			.try_deserialize::<Settings>()?;

		Ok(settings)
	}

	pub fn resolve_path(path: Option<PathBuf>) -> PathBuf {
		match path {
			Some(path) => path,
			None => {
				let config_dir_var = format!("{}_CONFIG", PROJECT_NAME.to_uppercase());
				let dir = std::env::var(&config_dir_var)
					.map(PathBuf::from)
					.ok()
					.or_else(|| dirs::config_dir().map(|dir| dir.join(PROJECT_NAME)))
					.unwrap_or_else(|| PathBuf::from("."));
				dir.join("config.toml")
			}
		}
	}

	pub fn data_dir() -> PathBuf {
		dirs::data_dir()
			.map(|dir| dir.join(PROJECT_NAME))
			.unwrap_or_else(|| PathBuf::from("."))
	}

	/// Builds the templater with the configured primary renderer.
	pub fn templater(&self) -> Templater {
		Templater::from_kind(self.renderer, self.autoescape)
	}
}
