//! Business logic services

pub mod audit;
pub mod catalog;
pub mod ingestion;
pub mod relations;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub ingestion: ingestion::IngestionService,
    pub relations: relations::RelationsService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            ingestion: ingestion::IngestionService::new(repository.clone()),
            relations: relations::RelationsService::new(repository),
        }
    }
}
