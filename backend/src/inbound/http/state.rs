//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    PhotoFeatureCommand, PlantInstanceRepository, PlantPhotoRepository, PlantTypeRepository,
};

use super::auth::AdminCredentials;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Plant type reads and inserts.
    pub plant_types: Arc<dyn PlantTypeRepository>,
    /// Plant instance reads and inserts.
    pub plant_instances: Arc<dyn PlantInstanceRepository>,
    /// Plant photo reads and inserts.
    pub plant_photos: Arc<dyn PlantPhotoRepository>,
    /// Featured-photo use case.
    pub photo_features: Arc<dyn PhotoFeatureCommand>,
    /// Administrator credentials for login and the admin gate.
    pub admin: AdminCredentials,
}

impl HttpState {
    /// Construct state from port implementations and admin credentials.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixturePhotoFeatureCommand, FixturePlantInstanceRepository,
    ///     FixturePlantPhotoRepository, FixturePlantTypeRepository,
    /// };
    /// use backend::inbound::http::auth::AdminCredentials;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixturePlantTypeRepository),
    ///     Arc::new(FixturePlantInstanceRepository),
    ///     Arc::new(FixturePlantPhotoRepository),
    ///     Arc::new(FixturePhotoFeatureCommand),
    ///     AdminCredentials::new("julie@example.test", "password"),
    /// );
    /// let _types = state.plant_types.clone();
    /// ```
    #[must_use]
    pub fn new(
        plant_types: Arc<dyn PlantTypeRepository>,
        plant_instances: Arc<dyn PlantInstanceRepository>,
        plant_photos: Arc<dyn PlantPhotoRepository>,
        photo_features: Arc<dyn PhotoFeatureCommand>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            plant_types,
            plant_instances,
            plant_photos,
            photo_features,
            admin,
        }
    }
}
