//! Port for reading and creating plant types.
//!
//! Inbound adapters consume the port without coupling to Diesel or any
//! specific data store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::plant_type::PlantType;
use crate::domain::slug::Slug;

use super::define_port_error;

define_port_error! {
    /// Errors raised by plant type persistence.
    pub enum PlantTypeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "plant type connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "plant type query failed: {message}",
        /// The slug is already taken by another plant type.
        DuplicateSlug { slug: String } =>
            "slug {slug} already exists",
    }
}

impl From<PlantTypeRepositoryError> for Error {
    fn from(error: PlantTypeRepositoryError) -> Self {
        match error {
            PlantTypeRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("plant type repository unavailable: {message}"))
            }
            PlantTypeRepositoryError::Query { message } => {
                Error::internal(format!("plant type repository error: {message}"))
            }
            PlantTypeRepositoryError::DuplicateSlug { slug } => {
                Error::conflict(format!("slug {slug} already exists"))
            }
        }
    }
}

/// Port for plant type reads and inserts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlantTypeRepository: Send + Sync {
    /// List every plant type, ordered by genus then cultivar.
    async fn list(&self) -> Result<Vec<PlantType>, PlantTypeRepositoryError>;

    /// Look up one plant type by its slug.
    async fn find_by_slug(&self, slug: &Slug)
    -> Result<Option<PlantType>, PlantTypeRepositoryError>;

    /// Fetch the plant types with the given ids (missing ids are skipped).
    async fn list_by_ids(&self, ids: &[Uuid])
    -> Result<Vec<PlantType>, PlantTypeRepositoryError>;

    /// Persist a new plant type.
    ///
    /// Fails with [`PlantTypeRepositoryError::DuplicateSlug`] when the slug
    /// is already in use.
    async fn insert(&self, plant_type: &PlantType) -> Result<(), PlantTypeRepositoryError>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlantTypeRepository;

#[async_trait]
impl PlantTypeRepository for FixturePlantTypeRepository {
    async fn list(&self) -> Result<Vec<PlantType>, PlantTypeRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_slug(
        &self,
        _slug: &Slug,
    ) -> Result<Option<PlantType>, PlantTypeRepositoryError> {
        Ok(None)
    }

    async fn list_by_ids(
        &self,
        _ids: &[Uuid],
    ) -> Result<Vec<PlantType>, PlantTypeRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _plant_type: &PlantType) -> Result<(), PlantTypeRepositoryError> {
        Ok(())
    }
}
