//! Shared application state for all routes.

use crate::service::ItemService;
use crate::store::ItemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            items: ItemService::new(store),
        }
    }
}
