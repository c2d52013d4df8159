//! PostgreSQL-backed plant type adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PlantTypeRepository, PlantTypeRepositoryError};
use crate::domain::{PlantType, PlantTypeDraft, Slug};

use super::diesel_helpers::{
    collect_rows, is_unique_violation, map_diesel_error_message, map_pool_error_message,
};
use super::models::{NewPlantTypeRow, PlantTypeRow};
use super::pool::{DbPool, PoolError};
use super::schema::plant_types;

/// Diesel-backed implementation of the plant type port.
#[derive(Clone)]
pub struct DieselPlantTypeRepository {
    pool: DbPool,
}

impl DieselPlantTypeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlantTypeRepositoryError {
    PlantTypeRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> PlantTypeRepositoryError {
    PlantTypeRepositoryError::query(map_diesel_error_message(error, "plant type"))
}

fn row_to_plant_type(row: PlantTypeRow) -> Result<PlantType, String> {
    let slug = Slug::new(row.slug).map_err(|e| e.to_string())?;
    PlantType::new(PlantTypeDraft {
        id: row.id,
        genus: row.genus,
        cultivar: row.cultivar,
        variegation: row.variegation,
        slug,
        cover_image_url: row.cover_image_url,
    })
    .map_err(|e| e.to_string())
}

fn plant_type_to_new_row(plant_type: &PlantType) -> NewPlantTypeRow {
    NewPlantTypeRow {
        id: plant_type.id(),
        genus: plant_type.genus().to_owned(),
        cultivar: plant_type.cultivar().to_owned(),
        variegation: plant_type.variegation().map(str::to_owned),
        slug: plant_type.slug().to_string(),
        cover_image_url: plant_type.cover_image_url().map(str::to_owned),
    }
}

#[async_trait]
impl PlantTypeRepository for DieselPlantTypeRepository {
    async fn list(&self) -> Result<Vec<PlantType>, PlantTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlantTypeRow> = plant_types::table
            .select(PlantTypeRow::as_select())
            .order_by((plant_types::genus, plant_types::cultivar))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(
            rows.into_iter().map(row_to_plant_type),
            PlantTypeRepositoryError::query,
        )
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<PlantType>, PlantTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlantTypeRow> = plant_types::table
            .filter(plant_types::slug.eq(slug.as_ref()))
            .select(PlantTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_plant_type)
            .transpose()
            .map_err(PlantTypeRepositoryError::query)
    }

    async fn list_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PlantType>, PlantTypeRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlantTypeRow> = plant_types::table
            .filter(plant_types::id.eq_any(ids))
            .select(PlantTypeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(
            rows.into_iter().map(row_to_plant_type),
            PlantTypeRepositoryError::query,
        )
    }

    async fn insert(&self, plant_type: &PlantType) -> Result<(), PlantTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = plant_type_to_new_row(plant_type);
        diesel::insert_into(plant_types::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                if is_unique_violation(&error, "plant_types_slug_key") {
                    PlantTypeRepositoryError::duplicate_slug(plant_type.slug().to_string())
                } else {
                    map_diesel_error(error)
                }
            })
    }
}
