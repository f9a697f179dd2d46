use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
	sqlite::{SqliteConnectOptions, SqlitePoolOptions},
	SqlitePool,
};

use crate::error::Error;

pub mod component;
pub mod token;

pub use component::{Component, ComponentDraft};
pub use token::{Token, TokenKind};

/// SQLite-backed storage for components and design tokens.
///
/// Templates, SCSS and prop schemas are stored as opaque text; nothing here
/// interprets them.
#[derive(Debug, Clone)]
pub struct ComponentStore {
	pool: SqlitePool,
}

impl ComponentStore {
	/// Connects to the database, creating it if needed, and runs migrations.
	pub async fn connect(url: &str) -> Result<Self, Error> {
		let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
		let in_memory = url.contains(":memory:");

		if !in_memory {
			if let Some(parent) = options.get_filename().parent().filter(|p| !p.as_os_str().is_empty()) {
				tokio::fs::create_dir_all(parent).await?;
			}
		}

		// every connection to an in-memory database sees its own empty database
		let pool_options = if in_memory {
			SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
		} else {
			SqlitePoolOptions::new().max_connections(5)
		};

		let pool = pool_options.connect_with(options).await?;
		sqlx::migrate!("./migrations").run(&pool).await?;
		tracing::debug!("Connected to component store at {url}");

		Ok(Self { pool })
	}

	pub(crate) fn pool(&self) -> &SqlitePool {
		&self.pool
	}
}

pub(crate) fn now() -> i64 {
	Utc::now().timestamp()
}

pub(crate) fn timestamp(secs: i64) -> DateTime<Utc> {
	DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
