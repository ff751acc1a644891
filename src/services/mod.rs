//! Business logic services

pub mod book_instances;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub book_instances: book_instances::BookInstanceService,
    store: Arc<dyn CatalogStore>,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            book_instances: book_instances::BookInstanceService::new(store.clone()),
            store,
        }
    }

    /// Check that the store is reachable
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.store.ping().await
    }
}
