//! PostgreSQL persistence adapters for the domain ports.

mod diesel_helpers;
mod diesel_plant_instance_repository;
mod diesel_plant_photo_repository;
mod diesel_plant_type_repository;
mod models;
mod pool;
pub mod schema;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use diesel_plant_instance_repository::DieselPlantInstanceRepository;
pub use diesel_plant_photo_repository::DieselPlantPhotoRepository;
pub use diesel_plant_type_repository::DieselPlantTypeRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Embedded SQL migrations, applied at startup when a database is configured.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
