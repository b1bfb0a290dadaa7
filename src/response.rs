//! Acknowledgement bodies for delete endpoints.

use serde::Serialize;

/// `{"ok": true}` after a single delete.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deleted {
    pub ok: bool,
}

/// `{"deleted": true}` after clearing the table.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleared {
    pub deleted: bool,
}

pub fn deleted() -> Deleted {
    Deleted { ok: true }
}

pub fn cleared() -> Cleared {
    Cleared { deleted: true }
}
