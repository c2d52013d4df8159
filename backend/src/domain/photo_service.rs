//! Featured-photo domain service.
//!
//! Implements the [`PhotoFeatureCommand`] driving port over the photo
//! repository. The local working set is only mutated after the repository
//! acknowledges the (transactional) remote write, so a failed write leaves
//! both the remote state and the local ordering untouched and the operation
//! is safe to retry.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{
    PhotoFeatureCommand, PlantPhotoRepository, SetFeaturedPhotoRequest, SetFeaturedPhotoResponse,
};
use crate::domain::sequencer::PhotoSequencer;

/// Photo feature service backed by the photo repository.
#[derive(Clone)]
pub struct PhotoFeatureService<R> {
    photo_repo: Arc<R>,
}

impl<R> PhotoFeatureService<R> {
    /// Create a new service with the photo repository.
    pub fn new(photo_repo: Arc<R>) -> Self {
        Self { photo_repo }
    }
}

#[async_trait]
impl<R> PhotoFeatureCommand for PhotoFeatureService<R>
where
    R: PlantPhotoRepository,
{
    async fn set_featured(
        &self,
        request: SetFeaturedPhotoRequest,
    ) -> Result<SetFeaturedPhotoResponse, Error> {
        let photos = self
            .photo_repo
            .list_for_instance(request.instance_id)
            .await?;
        let mut sequencer = PhotoSequencer::new(photos);
        if !sequencer.contains(request.photo_id) {
            return Err(Error::not_found(format!(
                "photo {} not found for instance {}",
                request.photo_id, request.instance_id
            )));
        }

        // Remote write first; the working set stays untouched on failure.
        self.photo_repo
            .set_featured(request.instance_id, request.photo_id)
            .await?;

        sequencer
            .set_featured(request.photo_id)
            .map_err(|err| Error::internal(format!("sequencer rejected verified photo: {err}")))?;
        let active_index = sequencer.cursor();
        Ok(SetFeaturedPhotoResponse {
            photos: sequencer.into_photos(),
            active_index,
        })
    }
}

#[cfg(test)]
#[path = "photo_service_tests.rs"]
mod tests;
