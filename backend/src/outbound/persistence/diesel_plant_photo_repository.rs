//! PostgreSQL-backed plant photo adapter.
//!
//! `set_featured` performs the clear-all and set-one writes inside a single
//! transaction so the at-most-one-featured invariant holds at every commit
//! point; a missing photo rolls the clearing step back.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{PlantPhotoRepository, PlantPhotoRepositoryError};
use crate::domain::{PlantPhoto, PlantPhotoDraft};

use super::diesel_helpers::{collect_rows, map_diesel_error_message, map_pool_error_message};
use super::models::{NewPlantPhotoRow, PlantPhotoRow};
use super::pool::{DbPool, PoolError};
use super::schema::plant_photos;

/// Diesel-backed implementation of the plant photo port.
#[derive(Clone)]
pub struct DieselPlantPhotoRepository {
    pool: DbPool,
}

impl DieselPlantPhotoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlantPhotoRepositoryError {
    PlantPhotoRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> PlantPhotoRepositoryError {
    PlantPhotoRepositoryError::query(map_diesel_error_message(error, "plant photo"))
}

fn row_to_photo(row: PlantPhotoRow) -> Result<PlantPhoto, String> {
    PlantPhoto::new(PlantPhotoDraft {
        id: row.id,
        instance_id: row.instance_id,
        url: row.url,
        caption: row.caption,
        taken_at: row.taken_at,
        created_at: row.created_at,
        is_featured: row.is_featured,
    })
    .map_err(|e| e.to_string())
}

fn photo_to_new_row(photo: &PlantPhoto) -> NewPlantPhotoRow {
    NewPlantPhotoRow {
        id: photo.id(),
        instance_id: photo.instance_id(),
        url: photo.url().to_owned(),
        caption: photo.caption().map(str::to_owned),
        taken_at: photo.taken_at(),
        created_at: photo.created_at(),
        is_featured: photo.is_featured(),
    }
}

#[async_trait]
impl PlantPhotoRepository for DieselPlantPhotoRepository {
    async fn list_for_instance(
        &self,
        instance_id: Uuid,
    ) -> Result<Vec<PlantPhoto>, PlantPhotoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlantPhotoRow> = plant_photos::table
            .filter(plant_photos::instance_id.eq(instance_id))
            .select(PlantPhotoRow::as_select())
            .order_by(plant_photos::taken_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(
            rows.into_iter().map(row_to_photo),
            PlantPhotoRepositoryError::query,
        )
    }

    async fn list_for_instances(
        &self,
        instance_ids: &[Uuid],
    ) -> Result<Vec<PlantPhoto>, PlantPhotoRepositoryError> {
        if instance_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlantPhotoRow> = plant_photos::table
            .filter(plant_photos::instance_id.eq_any(instance_ids))
            .select(PlantPhotoRow::as_select())
            .order_by(plant_photos::taken_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(
            rows.into_iter().map(row_to_photo),
            PlantPhotoRepositoryError::query,
        )
    }

    async fn insert_many(&self, photos: &[PlantPhoto]) -> Result<(), PlantPhotoRepositoryError> {
        if photos.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewPlantPhotoRow> = photos.iter().map(photo_to_new_row).collect();
        diesel::insert_into(plant_photos::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn set_featured(
        &self,
        instance_id: Uuid,
        photo_id: Uuid,
    ) -> Result<(), PlantPhotoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                diesel::update(
                    plant_photos::table.filter(plant_photos::instance_id.eq(instance_id)),
                )
                .set(plant_photos::is_featured.eq(false))
                .execute(conn)
                .await?;

                let updated = diesel::update(
                    plant_photos::table.filter(
                        plant_photos::id
                            .eq(photo_id)
                            .and(plant_photos::instance_id.eq(instance_id)),
                    ),
                )
                .set(plant_photos::is_featured.eq(true))
                .execute(conn)
                .await?;

                if updated == 0 {
                    // Rolls the clearing step back as well.
                    return Err(diesel::result::Error::NotFound);
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| match error {
            diesel::result::Error::NotFound => {
                PlantPhotoRepositoryError::photo_not_found(photo_id)
            }
            other => map_diesel_error(other),
        })
    }
}
