//! Item routes. Both `/items` and `/items/` are served.

use crate::handlers::items::{create, delete as delete_handler, delete_all, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list).post(create).delete(delete_all))
        .route("/items/", get(list).post(create).delete(delete_all))
        .route("/items/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
