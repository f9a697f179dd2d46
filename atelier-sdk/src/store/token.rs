use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumString};

use crate::{
	error::Error,
	store::{now, timestamp, ComponentStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TokenKind {
	Color,
	Spacing,
	Typography,
}

/// A named design value shared by components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	pub name: String,
	pub kind: TokenKind,
	pub value: String,
	pub updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct TokenRow {
	name: String,
	kind: String,
	value: String,
	updated_at: i64,
}

impl TryFrom<TokenRow> for Token {
	type Error = Error;

	fn try_from(row: TokenRow) -> Result<Self, Self::Error> {
		let kind = TokenKind::from_str(&row.kind).map_err(|_| anyhow!("unknown token kind `{}` stored for {}", row.kind, row.name))?;
		Ok(Self {
			name: row.name,
			kind,
			value: row.value,
			updated_at: timestamp(row.updated_at),
		})
	}
}

impl ComponentStore {
	/// Inserts a token or replaces the kind and value of an existing one.
	pub async fn upsert_token(&self, name: &str, kind: TokenKind, value: &str) -> Result<Token, Error> {
		sqlx::query(
			r#"
            INSERT INTO tokens (name, kind, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(name) DO UPDATE SET kind = excluded.kind, value = excluded.value, updated_at = excluded.updated_at
            "#,
		)
		.bind(name)
		.bind(kind.to_string())
		.bind(value)
		.bind(now())
		.execute(self.pool())
		.await?;

		tracing::info!(name, %kind, value, "Saved token");

		sqlx::query_as::<_, TokenRow>("SELECT name, kind, value, updated_at FROM tokens WHERE name = ?")
			.bind(name)
			.fetch_one(self.pool())
			.await?
			.try_into()
	}

	/// Tokens ordered by kind and name, optionally restricted to one kind.
	pub async fn list_tokens(&self, kind: Option<TokenKind>) -> Result<Vec<Token>, Error> {
		let mut tokens = sqlx::query_as::<_, TokenRow>("SELECT name, kind, value, updated_at FROM tokens")
			.fetch_all(self.pool())
			.await?
			.into_iter()
			.map(Token::try_from)
			.collect::<Result<Vec<_>, _>>()?;
		tokens.retain(|token| kind.is_none() || kind == Some(token.kind));
		tokens.sort_by(|a, b| (a.kind, &a.name).cmp(&(b.kind, &b.name)));
		Ok(tokens)
	}

	pub async fn delete_token(&self, name: &str) -> Result<bool, Error> {
		let result = sqlx::query("DELETE FROM tokens WHERE name = ?").bind(name).execute(self.pool()).await?;
		Ok(result.rows_affected() > 0)
	}
}
