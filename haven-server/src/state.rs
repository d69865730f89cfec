use std::{fmt, sync::Arc};

use haven_core::listings::ListingService;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<ListingService>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
