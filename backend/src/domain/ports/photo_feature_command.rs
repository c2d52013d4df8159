//! Driving port for the featured-photo use case.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::plant_photo::PlantPhoto;

/// Request to feature one photo of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetFeaturedPhotoRequest {
    /// The owning instance.
    pub instance_id: Uuid,
    /// The photo to feature.
    pub photo_id: Uuid,
}

/// Result of a feature operation: the re-sequenced working set with the
/// navigation cursor reset to the front item.
#[derive(Debug, Clone, PartialEq)]
pub struct SetFeaturedPhotoResponse {
    /// Photos in display order; exactly one carries the featured flag.
    pub photos: Vec<PlantPhoto>,
    /// Cursor position after the operation (always the front item).
    pub active_index: usize,
}

/// Port for featuring photos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoFeatureCommand: Send + Sync {
    /// Make the named photo the instance's only featured photo.
    async fn set_featured(
        &self,
        request: SetFeaturedPhotoRequest,
    ) -> Result<SetFeaturedPhotoResponse, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhotoFeatureCommand;

#[async_trait]
impl PhotoFeatureCommand for FixturePhotoFeatureCommand {
    async fn set_featured(
        &self,
        request: SetFeaturedPhotoRequest,
    ) -> Result<SetFeaturedPhotoResponse, Error> {
        Err(Error::not_found(format!(
            "photo {} not found for instance {}",
            request.photo_id, request.instance_id
        )))
    }
}
