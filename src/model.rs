//! Item record and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner assigned to every item until multi-user support exists.
pub const DEFAULT_USER_ID: i64 = 1;

/// A stored card. `id` and `date` are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub user_id: i64,
}

/// Body of `POST /items/`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /items/{id}`. `None` leaves the column unchanged; an explicit
/// JSON `null` deserializes to `None` as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Query string of `GET /items/`. Signed so negative values reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
