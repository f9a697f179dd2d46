pub const PROJECT_NAME: &str = "atelier";

pub mod error;
pub mod schema;
pub mod settings;
pub mod store;
pub mod templates;
