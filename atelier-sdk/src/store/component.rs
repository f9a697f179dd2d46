use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
	error::Error,
	schema::PropSchema,
	store::{now, timestamp, ComponentStore},
	templates::Category,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
	pub id: String,
	pub name: String,
	pub category: Category,
	pub description: Option<String>,
	/// `None` until the author writes one; callers show a placeholder instead of rendering.
	pub template: Option<String>,
	pub scss: String,
	pub props: PropSchema,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// The author-editable part of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDraft {
	pub name: String,
	pub category: Category,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub template: Option<String>,
	#[serde(default)]
	pub scss: String,
	#[serde(default)]
	pub props: PropSchema,
}

impl ComponentDraft {
	pub fn new(name: impl Into<String>, category: Category) -> Self {
		Self {
			name: name.into(),
			category,
			description: None,
			template: None,
			scss: String::new(),
			props: PropSchema::default(),
		}
	}
}

#[derive(FromRow)]
struct ComponentRow {
	id: String,
	name: String,
	category: String,
	description: Option<String>,
	template: Option<String>,
	scss: String,
	props: String,
	created_at: i64,
	updated_at: i64,
}

impl TryFrom<ComponentRow> for Component {
	type Error = Error;

	fn try_from(row: ComponentRow) -> Result<Self, Self::Error> {
		let category = Category::from_str(&row.category).map_err(|_| anyhow!("unknown category `{}` stored for component {}", row.category, row.id))?;
		Ok(Self {
			props: serde_json::from_str(&row.props)?,
			id: row.id,
			name: row.name,
			category,
			description: row.description,
			template: row.template,
			scss: row.scss,
			created_at: timestamp(row.created_at),
			updated_at: timestamp(row.updated_at),
		})
	}
}

const SELECT_COMPONENT: &str = "SELECT id, name, category, description, template, scss, props, created_at, updated_at FROM components";

impl ComponentStore {
	pub async fn create(&self, draft: ComponentDraft) -> Result<Component, Error> {
		let id = Uuid::new_v4().to_string();
		let now = now();
		let props = serde_json::to_string(&draft.props)?;

		sqlx::query(
			r#"
            INSERT INTO components (id, name, category, description, template, scss, props, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            "#,
		)
		.bind(&id)
		.bind(&draft.name)
		.bind(draft.category.to_string())
		.bind(&draft.description)
		.bind(&draft.template)
		.bind(&draft.scss)
		.bind(props)
		.bind(now)
		.execute(self.pool())
		.await?;

		tracing::info!(id = %id, name = %draft.name, "Created component");
		self.get(&id).await
	}

	pub async fn get(&self, id: &str) -> Result<Component, Error> {
		sqlx::query_as::<_, ComponentRow>(&format!("{SELECT_COMPONENT} WHERE id = ?"))
			.bind(id)
			.fetch_optional(self.pool())
			.await?
			.ok_or_else(|| Error::NotFound {
				kind: "component",
				id: id.to_string(),
			})?
			.try_into()
	}

	pub async fn find_by_name(&self, name: &str) -> Result<Option<Component>, Error> {
		sqlx::query_as::<_, ComponentRow>(&format!("{SELECT_COMPONENT} WHERE name = ?"))
			.bind(name)
			.fetch_optional(self.pool())
			.await?
			.map(Component::try_from)
			.transpose()
	}

	/// Looks a component up by id, then by name.
	pub async fn find(&self, key: &str) -> Result<Component, Error> {
		match self.get(key).await {
			Err(Error::NotFound { .. }) => self.find_by_name(key).await?.ok_or_else(|| Error::NotFound {
				kind: "component",
				id: key.to_string(),
			}),
			other => other,
		}
	}

	/// All components, in atomic design order and then by name.
	pub async fn list(&self) -> Result<Vec<Component>, Error> {
		let mut components = sqlx::query_as::<_, ComponentRow>(SELECT_COMPONENT)
			.fetch_all(self.pool())
			.await?
			.into_iter()
			.map(Component::try_from)
			.collect::<Result<Vec<_>, _>>()?;
		components.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
		Ok(components)
	}

	pub async fn update(&self, id: &str, draft: ComponentDraft) -> Result<Component, Error> {
		let props = serde_json::to_string(&draft.props)?;
		let result = sqlx::query(
			r#"
            UPDATE components
            SET name = ?1, category = ?2, description = ?3, template = ?4, scss = ?5, props = ?6, updated_at = ?7
            WHERE id = ?8
            "#,
		)
		.bind(&draft.name)
		.bind(draft.category.to_string())
		.bind(&draft.description)
		.bind(&draft.template)
		.bind(&draft.scss)
		.bind(props)
		.bind(now())
		.bind(id)
		.execute(self.pool())
		.await?;

		if result.rows_affected() == 0 {
			return Err(Error::NotFound {
				kind: "component",
				id: id.to_string(),
			});
		}
		tracing::info!(id = %id, "Updated component");
		self.get(id).await
	}

	/// Returns whether a component was removed.
	pub async fn delete(&self, id: &str) -> Result<bool, Error> {
		let result = sqlx::query("DELETE FROM components WHERE id = ?").bind(id).execute(self.pool()).await?;
		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::info!(id = %id, "Deleted component");
		}
		Ok(deleted)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		schema::{PropDefinition, PropType},
		templates::Value,
	};
	use pretty_assertions::assert_eq;

	async fn store() -> ComponentStore {
		ComponentStore::connect("sqlite::memory:").await.unwrap()
	}

	fn button() -> ComponentDraft {
		let mut draft = ComponentDraft::new("Button", Category::Atoms);
		draft.template = Some("<button>{{ text }}</button>".into());
		draft.scss = ".button { color: red; }".into();
		let mut text = PropDefinition::new(PropType::String);
		text.default = Some("Click".into());
		draft.props.insert("text", text);
		draft
	}

	#[tokio::test]
	async fn create_then_get() {
		let store = store().await;
		let created = store.create(button()).await.unwrap();
		let fetched = store.get(&created.id).await.unwrap();
		assert_eq!(fetched, created);
		assert_eq!(fetched.props.defaults()["text"], Value::from("Click"));
		assert_eq!(fetched.template.as_deref(), Some("<button>{{ text }}</button>"));
	}

	#[tokio::test]
	async fn serializes_with_timestamps() {
		let store = store().await;
		let created = store.create(button()).await.unwrap();
		let json = serde_json::to_value(&created).unwrap();
		assert_eq!(json["name"], "Button");
		assert_eq!(json["category"], "atoms");
		assert_eq!(json["props"]["text"]["default"], "Click");
		assert_eq!(json["created_at"], serde_json::to_value(created.created_at).unwrap());
		assert!(json["updated_at"].is_string());
	}

	#[tokio::test]
	async fn missing_template_is_preserved_as_none() {
		let store = store().await;
		let created = store.create(ComponentDraft::new("Empty", Category::Pages)).await.unwrap();
		assert_eq!(store.get(&created.id).await.unwrap().template, None);
	}

	#[tokio::test]
	async fn find_by_id_or_name() {
		let store = store().await;
		let created = store.create(button()).await.unwrap();
		assert_eq!(store.find("Button").await.unwrap().id, created.id);
		assert_eq!(store.find(&created.id).await.unwrap().name, "Button");
		assert!(matches!(store.find("Nope").await, Err(Error::NotFound { .. })));
	}

	#[tokio::test]
	async fn list_is_in_atomic_design_order() {
		let store = store().await;
		store.create(ComponentDraft::new("Home", Category::Pages)).await.unwrap();
		store.create(ComponentDraft::new("Search", Category::Molecules)).await.unwrap();
		store.create(ComponentDraft::new("Icon", Category::Atoms)).await.unwrap();
		store.create(ComponentDraft::new("Badge", Category::Atoms)).await.unwrap();

		let names: Vec<_> = store.list().await.unwrap().into_iter().map(|c| c.name).collect();
		assert_eq!(names, vec!["Badge", "Icon", "Search", "Home"]);
	}

	#[tokio::test]
	async fn update_replaces_fields() {
		let store = store().await;
		let created = store.create(button()).await.unwrap();
		let mut draft = button();
		draft.template = None;
		draft.category = Category::Molecules;
		let updated = store.update(&created.id, draft).await.unwrap();
		assert_eq!(updated.template, None);
		assert_eq!(updated.category, Category::Molecules);
		assert_eq!(updated.created_at, created.created_at);
	}

	#[tokio::test]
	async fn update_unknown_id_is_not_found() {
		let store = store().await;
		assert!(matches!(store.update("missing", button()).await, Err(Error::NotFound { .. })));
	}

	#[tokio::test]
	async fn delete_reports_whether_a_row_went_away() {
		let store = store().await;
		let created = store.create(button()).await.unwrap();
		assert!(store.delete(&created.id).await.unwrap());
		assert!(!store.delete(&created.id).await.unwrap());
		assert!(store.list().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn duplicate_names_are_rejected() {
		let store = store().await;
		store.create(button()).await.unwrap();
		assert!(matches!(store.create(button()).await, Err(Error::Sql(_))));
	}
}
