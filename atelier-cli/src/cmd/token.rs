use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use atelier_sdk::store::TokenKind;
use clap::{Parser, Subcommand};
use console::style;

use crate::cmd::{Cmd, Session};

#[derive(Subcommand, Debug)]
pub enum TokenCmd {
	/// Create or replace a design token
	Set(Set),
	/// List design tokens
	List(List),
	/// Delete a design token
	Rm {
		name: String,
	},
}

#[derive(Parser, Debug)]
pub struct Set {
	name: String,
	/// color, spacing or typography
	#[arg(value_parser = TokenKind::from_str)]
	kind: TokenKind,
	value: String,
}

#[derive(Parser, Debug)]
pub struct List {
	#[arg(long, value_parser = TokenKind::from_str)]
	kind: Option<TokenKind>,
}

#[async_trait]
impl Cmd for TokenCmd {
	async fn run(self, session: &Session) -> Result<()> {
		let store = session.store().await?;
		match self {
			TokenCmd::Set(set) => {
				let token = store.upsert_token(&set.name, set.kind, &set.value).await?;
				session.ui.success(&format!("{} = {}", token.name, token.value));
			}
			TokenCmd::List(list) => {
				let tokens = store.list_tokens(list.kind).await?;
				if tokens.is_empty() {
					session.ui.warning("No tokens defined");
				}
				for token in tokens {
					println!("{:<12} {:<24} {}", style(token.kind).dim(), token.name, token.value);
				}
			}
			TokenCmd::Rm { name } => {
				if store.delete_token(&name).await? {
					session.ui.success(&format!("Deleted {name}"));
				} else {
					session.ui.warning(&format!("No token named {name}"));
				}
			}
		}
		Ok(())
	}
}
