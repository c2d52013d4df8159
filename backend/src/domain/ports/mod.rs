//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod photo_feature_command;
mod plant_instance_repository;
mod plant_photo_repository;
mod plant_type_repository;

#[cfg(test)]
pub use photo_feature_command::MockPhotoFeatureCommand;
pub use photo_feature_command::{
    FixturePhotoFeatureCommand, PhotoFeatureCommand, SetFeaturedPhotoRequest,
    SetFeaturedPhotoResponse,
};
#[cfg(test)]
pub use plant_instance_repository::MockPlantInstanceRepository;
pub use plant_instance_repository::{
    FixturePlantInstanceRepository, PlantInstanceRepository, PlantInstanceRepositoryError,
};
#[cfg(test)]
pub use plant_photo_repository::MockPlantPhotoRepository;
pub use plant_photo_repository::{
    FixturePlantPhotoRepository, PlantPhotoRepository, PlantPhotoRepositoryError,
};
#[cfg(test)]
pub use plant_type_repository::MockPlantTypeRepository;
pub use plant_type_repository::{
    FixturePlantTypeRepository, PlantTypeRepository, PlantTypeRepositoryError,
};
