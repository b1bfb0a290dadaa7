//! Item operations: validate input, call the store, map missing rows to NotFound.

use crate::error::AppError;
use crate::model::{Item, ItemChanges, ListParams, NewItem};
use crate::service::RequestValidator;
use crate::store::ItemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    pub async fn create(&self, item: NewItem) -> Result<Item, AppError> {
        RequestValidator::validate_new(&item)?;
        let created = self.store.insert(&item).await?;
        tracing::info!(id = created.id, "item created");
        Ok(created)
    }

    pub async fn list(&self, params: &ListParams) -> Result<Vec<Item>, AppError> {
        let page = RequestValidator::validate_page(params)?;
        self.store.list(page.skip, page.limit).await
    }

    pub async fn get(&self, id: i64) -> Result<Item, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(AppError::item_not_found)
    }

    /// With no supplied fields the row is still looked up so a missing id is reported.
    pub async fn update(&self, id: i64, changes: ItemChanges) -> Result<Item, AppError> {
        RequestValidator::validate_changes(&changes)?;
        if changes.is_empty() {
            return self.get(id).await;
        }
        let updated = self
            .store
            .update(id, &changes)
            .await?
            .ok_or_else(AppError::item_not_found)?;
        tracing::info!(id, "item updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::item_not_found());
        }
        tracing::info!(id, "item deleted");
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let removed = self.store.delete_all().await?;
        tracing::info!(removed, "all items deleted");
        Ok(removed)
    }
}
