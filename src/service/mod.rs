//! Request handling between HTTP and the store.

mod items;
mod validation;
pub use items::ItemService;
pub use validation::{Page, RequestValidator};
