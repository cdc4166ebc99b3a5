//! Shared application state handed to every handler.

use voucher_db::{Database, VoucherRepository};

use crate::config::Settings;

/// State behind `State<Arc<AppState>>`.
#[derive(Debug)]
pub struct AppState {
    pub db: Database,
    pub settings: Settings,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Self {
        AppState { db, settings }
    }

    /// Shortcut for `self.db.vouchers()`.
    pub fn vouchers(&self) -> VoucherRepository {
        self.db.vouchers()
    }
}
