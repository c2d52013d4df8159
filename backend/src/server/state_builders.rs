//! Builders selecting Diesel-backed or fixture port implementations.

use std::sync::Arc;

use actix_web::web;

use backend::domain::PhotoFeatureService;
use backend::domain::ports::{
    FixturePhotoFeatureCommand, FixturePlantInstanceRepository, FixturePlantPhotoRepository,
    FixturePlantTypeRepository,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselPlantInstanceRepository, DieselPlantPhotoRepository, DieselPlantTypeRepository,
};

use super::ServerConfig;

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let photos = Arc::new(DieselPlantPhotoRepository::new(pool.clone()));
            HttpState::new(
                Arc::new(DieselPlantTypeRepository::new(pool.clone())),
                Arc::new(DieselPlantInstanceRepository::new(pool.clone())),
                photos.clone(),
                Arc::new(PhotoFeatureService::new(photos)),
                config.admin.clone(),
            )
        }
        None => HttpState::new(
            Arc::new(FixturePlantTypeRepository),
            Arc::new(FixturePlantInstanceRepository),
            Arc::new(FixturePlantPhotoRepository),
            Arc::new(FixturePhotoFeatureCommand),
            config.admin.clone(),
        ),
    };
    web::Data::new(state)
}
