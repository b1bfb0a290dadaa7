//! ScrolLearn items API: validated CRUD over a single `items` table, served with axum.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, FieldError};
pub use model::{Item, ItemChanges, ListParams, NewItem, DEFAULT_USER_ID};
pub use routes::{app, common_routes, item_routes};
pub use service::ItemService;
pub use state::AppState;
pub use store::{connect, ItemStore, PgItemStore, SqliteItemStore};
