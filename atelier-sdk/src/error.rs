use thiserror::Error;

use crate::templates::engine::TemplateError;

/// The primary error type for the SDK.
#[derive(Error, Debug)]
pub enum Error {
	#[error(transparent)]
	TemplateError(#[from] TemplateError),

	#[error("Database error")]
	Sql(#[from] sqlx::Error),

	#[error("Could not apply database migrations")]
	Migrate(#[from] sqlx::migrate::MigrateError),

	#[error("Error converting to value")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("Error in configuration")]
	Config(#[from] config::ConfigError),

	#[error("No {kind} found with identifier `{id}`")]
	NotFound { kind: &'static str, id: String },

	#[error("Invalid value `{value}` for prop `{prop}`: {reason}")]
	InvalidValue { prop: String, value: String, reason: String },

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}
