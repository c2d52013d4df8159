//! Port for reading and creating plant instances.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::plant_instance::PlantInstance;

use super::define_port_error;

define_port_error! {
    /// Errors raised by plant instance persistence.
    pub enum PlantInstanceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "plant instance connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "plant instance query failed: {message}",
    }
}

impl From<PlantInstanceRepositoryError> for Error {
    fn from(error: PlantInstanceRepositoryError) -> Self {
        match error {
            PlantInstanceRepositoryError::Connection { message } => Error::service_unavailable(
                format!("plant instance repository unavailable: {message}"),
            ),
            PlantInstanceRepositoryError::Query { message } => {
                Error::internal(format!("plant instance repository error: {message}"))
            }
        }
    }
}

/// Port for plant instance reads and inserts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlantInstanceRepository: Send + Sync {
    /// List the instances of one plant type, newest first.
    async fn list_for_type(
        &self,
        type_id: Uuid,
    ) -> Result<Vec<PlantInstance>, PlantInstanceRepositoryError>;

    /// List every instance offered for swap, newest first.
    async fn list_for_swap(&self) -> Result<Vec<PlantInstance>, PlantInstanceRepositoryError>;

    /// Look up one instance by id.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PlantInstance>, PlantInstanceRepositoryError>;

    /// Persist a new instance.
    async fn insert(&self, instance: &PlantInstance)
    -> Result<(), PlantInstanceRepositoryError>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlantInstanceRepository;

#[async_trait]
impl PlantInstanceRepository for FixturePlantInstanceRepository {
    async fn list_for_type(
        &self,
        _type_id: Uuid,
    ) -> Result<Vec<PlantInstance>, PlantInstanceRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_swap(&self) -> Result<Vec<PlantInstance>, PlantInstanceRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<PlantInstance>, PlantInstanceRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        _instance: &PlantInstance,
    ) -> Result<(), PlantInstanceRepositoryError> {
        Ok(())
    }
}
