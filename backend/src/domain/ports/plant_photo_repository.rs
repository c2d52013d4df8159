//! Port for reading, creating, and featuring plant photos.
//!
//! `set_featured` is specified as a single atomic conditional update: the
//! adapter clears the instance's featured flags and sets the named photo in
//! one transaction, so the at-most-one-featured invariant never transiently
//! reads as zero-featured remotely.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::plant_photo::PlantPhoto;

use super::define_port_error;

define_port_error! {
    /// Errors raised by plant photo persistence.
    pub enum PlantPhotoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "plant photo connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "plant photo query failed: {message}",
        /// The photo does not exist for the given instance.
        PhotoNotFound { photo_id: Uuid } =>
            "photo {photo_id} not found",
    }
}

impl From<PlantPhotoRepositoryError> for Error {
    fn from(error: PlantPhotoRepositoryError) -> Self {
        match error {
            PlantPhotoRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("plant photo repository unavailable: {message}"))
            }
            PlantPhotoRepositoryError::Query { message } => {
                Error::internal(format!("plant photo repository error: {message}"))
            }
            PlantPhotoRepositoryError::PhotoNotFound { photo_id } => {
                Error::not_found(format!("photo {photo_id} not found"))
            }
        }
    }
}

/// Port for plant photo reads and writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlantPhotoRepository: Send + Sync {
    /// List one instance's photos, most recently taken first.
    async fn list_for_instance(
        &self,
        instance_id: Uuid,
    ) -> Result<Vec<PlantPhoto>, PlantPhotoRepositoryError>;

    /// List the photos of several instances in one call.
    async fn list_for_instances(
        &self,
        instance_ids: &[Uuid],
    ) -> Result<Vec<PlantPhoto>, PlantPhotoRepositoryError>;

    /// Persist a batch of new photos.
    async fn insert_many(&self, photos: &[PlantPhoto])
    -> Result<(), PlantPhotoRepositoryError>;

    /// Atomically make `photo_id` the only featured photo of `instance_id`.
    ///
    /// Fails with [`PlantPhotoRepositoryError::PhotoNotFound`] (and rolls the
    /// clearing step back) when the photo does not belong to the instance.
    async fn set_featured(
        &self,
        instance_id: Uuid,
        photo_id: Uuid,
    ) -> Result<(), PlantPhotoRepositoryError>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlantPhotoRepository;

#[async_trait]
impl PlantPhotoRepository for FixturePlantPhotoRepository {
    async fn list_for_instance(
        &self,
        _instance_id: Uuid,
    ) -> Result<Vec<PlantPhoto>, PlantPhotoRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_instances(
        &self,
        _instance_ids: &[Uuid],
    ) -> Result<Vec<PlantPhoto>, PlantPhotoRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_many(
        &self,
        _photos: &[PlantPhoto],
    ) -> Result<(), PlantPhotoRepositoryError> {
        Ok(())
    }

    async fn set_featured(
        &self,
        _instance_id: Uuid,
        photo_id: Uuid,
    ) -> Result<(), PlantPhotoRepositoryError> {
        Err(PlantPhotoRepositoryError::photo_not_found(photo_id))
    }
}
