use std::{path::PathBuf, str::FromStr};

use anyhow::{bail, Result};
use async_trait::async_trait;
use atelier_sdk::{
	store::{Component, ComponentDraft},
	templates::{self, Category},
};
use clap::{Parser, Subcommand, ValueHint};
use console::style;

use crate::{
	cmd::{Cmd, Session},
	input,
};

#[derive(Subcommand, Debug)]
pub enum ComponentCmd {
	/// Store a new component
	Add(Add),
	/// List stored components by category
	List,
	/// Print a component as JSON
	Show(Show),
	/// Replace parts of a stored component
	Update(Update),
	/// Render a stored component with its schema defaults
	Render(RenderComponent),
	/// Delete a stored component
	Rm(Remove),
}

#[derive(Parser, Debug)]
pub struct Add {
	#[arg(long)]
	name: String,
	#[arg(long, value_parser = Category::from_str)]
	category: Category,
	#[arg(long)]
	description: Option<String>,
	/// Template file, or `-` for stdin
	#[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "scaffold")]
	template: Option<PathBuf>,
	/// Generate a starter template from the category and schema
	#[arg(long)]
	scaffold: bool,
	#[arg(long, value_hint = ValueHint::FilePath)]
	scss: Option<PathBuf>,
	/// Prop schema as JSON
	#[arg(long, value_hint = ValueHint::FilePath)]
	schema: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct Show {
	/// Component id or name
	key: String,
}

#[derive(Parser, Debug)]
pub struct Update {
	/// Component id or name
	key: String,
	#[arg(long)]
	name: Option<String>,
	#[arg(long, value_parser = Category::from_str)]
	category: Option<Category>,
	#[arg(long)]
	description: Option<String>,
	#[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "clear_template")]
	template: Option<PathBuf>,
	/// Remove the template, leaving the component as a placeholder
	#[arg(long)]
	clear_template: bool,
	#[arg(long, value_hint = ValueHint::FilePath)]
	scss: Option<PathBuf>,
	#[arg(long, value_hint = ValueHint::FilePath)]
	schema: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct RenderComponent {
	/// Component id or name
	key: String,
	/// Override a prop, coerced to the type the schema declares
	#[arg(long = "set", value_name = "NAME=VALUE")]
	assignments: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct Remove {
	/// Component id or name
	key: String,
	/// Do not ask for confirmation
	#[arg(long, short)]
	yes: bool,
}

#[async_trait]
impl Cmd for ComponentCmd {
	async fn run(self, session: &Session) -> Result<()> {
		match self {
			ComponentCmd::Add(cmd) => cmd.run(session).await,
			ComponentCmd::List => list(session).await,
			ComponentCmd::Show(cmd) => cmd.run(session).await,
			ComponentCmd::Update(cmd) => cmd.run(session).await,
			ComponentCmd::Render(cmd) => cmd.run(session).await,
			ComponentCmd::Rm(cmd) => cmd.run(session).await,
		}
	}
}

#[async_trait]
impl Cmd for Add {
	async fn run(self, session: &Session) -> Result<()> {
		let mut draft = ComponentDraft::new(self.name, self.category);
		draft.description = self.description;
		if let Some(path) = &self.schema {
			draft.props = input::read_schema(path)?;
		}
		if let Some(path) = &self.scss {
			draft.scss = input::read_source(path)?;
		}
		draft.template = match &self.template {
			Some(path) => Some(input::read_source(path)?),
			None if self.scaffold => Some(templates::default_template(draft.category, &draft.name, &draft.props)),
			None => None,
		};
		if let Some(template) = &draft.template {
			warn_on_invalid(session, template);
		}

		let component = session.store().await?.create(draft).await?;
		session.ui.success(&format!("Created {} ({})", component.name, component.id));
		Ok(())
	}
}

async fn list(session: &Session) -> Result<()> {
	let components = session.store().await?.list().await?;
	if components.is_empty() {
		session.ui.warning("No components stored yet");
		return Ok(());
	}

	let mut current = None;
	for component in components {
		if current != Some(component.category) {
			println!("{}", style(component.category).bold().underlined());
			current = Some(component.category);
		}
		let marker = if component.template.is_some() { "" } else { " (no template)" };
		println!("  {}  {}{}", component.name, style(&component.id).dim(), marker);
	}
	Ok(())
}

#[async_trait]
impl Cmd for Show {
	async fn run(self, session: &Session) -> Result<()> {
		let component = session.store().await?.find(&self.key).await?;
		println!("{}", serde_json::to_string_pretty(&component)?);
		Ok(())
	}
}

#[async_trait]
impl Cmd for Update {
	async fn run(self, session: &Session) -> Result<()> {
		let store = session.store().await?;
		let current = store.find(&self.key).await?;
		let id = current.id.clone();

		let mut draft = draft_of(current);
		if let Some(name) = self.name {
			draft.name = name;
		}
		if let Some(category) = self.category {
			draft.category = category;
		}
		if self.description.is_some() {
			draft.description = self.description;
		}
		if let Some(path) = &self.template {
			let template = input::read_source(path)?;
			warn_on_invalid(session, &template);
			draft.template = Some(template);
		}
		if self.clear_template {
			draft.template = None;
		}
		if let Some(path) = &self.scss {
			draft.scss = input::read_source(path)?;
		}
		if let Some(path) = &self.schema {
			draft.props = input::read_schema(path)?;
		}

		let component = store.update(&id, draft).await?;
		session.ui.success(&format!("Updated {}", component.name));
		Ok(())
	}
}

#[async_trait]
impl Cmd for RenderComponent {
	async fn run(self, session: &Session) -> Result<()> {
		let component = session.store().await?.find(&self.key).await?;
		let Some(template) = &component.template else {
			println!("{}", placeholder(&component));
			return Ok(());
		};

		let mut props = component.props.defaults();
		input::apply_assignments(&mut props, &self.assignments, Some(&component.props))?;
		println!("{}", session.settings.templater().render(template, &props));
		Ok(())
	}
}

#[async_trait]
impl Cmd for Remove {
	async fn run(self, session: &Session) -> Result<()> {
		let store = session.store().await?;
		let component = store.find(&self.key).await?;

		if !self.yes && !session.ui.confirm(&format!("Delete {} ({})?", component.name, component.category))? {
			session.ui.warning("Nothing deleted");
			return Ok(());
		}
		if !store.delete(&component.id).await? {
			bail!("{} was removed concurrently", component.name);
		}
		session.ui.success(&format!("Deleted {}", component.name));
		Ok(())
	}
}

fn draft_of(component: Component) -> ComponentDraft {
	ComponentDraft {
		name: component.name,
		category: component.category,
		description: component.description,
		template: component.template,
		scss: component.scss,
		props: component.props,
	}
}

fn placeholder(component: &Component) -> String {
	format!(
		"<div class=\"component-placeholder\">No template defined for {} ({})</div>",
		component.name, component.category
	)
}

fn warn_on_invalid(session: &Session, template: &str) {
	let validation = templates::validate(template);
	for error in &validation.errors {
		session.ui.warning(error);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use atelier_sdk::schema::PropSchema;
	use chrono::Utc;
	use pretty_assertions::assert_eq;

	fn component(template: Option<&str>) -> Component {
		Component {
			id: "c1".into(),
			name: "Hero".into(),
			category: Category::Organisms,
			description: Some("Landing banner".into()),
			template: template.map(str::to_string),
			scss: String::new(),
			props: PropSchema::default(),
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	#[test]
	fn placeholder_names_the_component() {
		assert_eq!(
			placeholder(&component(None)),
			"<div class=\"component-placeholder\">No template defined for Hero (organisms)</div>"
		);
	}

	#[test]
	fn draft_keeps_editable_fields() {
		let draft = draft_of(component(Some("<section></section>")));
		assert_eq!(draft.name, "Hero");
		assert_eq!(draft.category, Category::Organisms);
		assert_eq!(draft.description.as_deref(), Some("Landing banner"));
		assert_eq!(draft.template.as_deref(), Some("<section></section>"));
	}
}
