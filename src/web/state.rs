//! # Web API State
//!
//! Shared state handed to every handler.

use crate::cache::{CacheProvider, TypedCache};
use crate::config::StudentRecordsConfig;
use crate::database::StudentStore;
use crate::facade::StudentFacade;
use crate::services::StudentService;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<StudentRecordsConfig>,
    pub facade: Arc<StudentFacade>,
    /// Kept for readiness checks
    pub cache: CacheProvider,
}

impl AppState {
    /// Wire the facade over `store` and `cache`
    pub fn new(
        config: StudentRecordsConfig,
        store: Arc<dyn StudentStore>,
        cache: CacheProvider,
    ) -> Self {
        let facade = StudentFacade::new(
            StudentService::new(store),
            TypedCache::new(cache.clone()),
        );
        Self {
            config: Arc::new(config),
            facade: Arc::new(facade),
            cache,
        }
    }

    pub fn store(&self) -> &Arc<dyn StudentStore> {
        self.facade.service().store()
    }
}
