//! PostgreSQL-backed plant instance adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PlantInstanceRepository, PlantInstanceRepositoryError};
use crate::domain::{PlantInstance, PlantInstanceDraft};

use super::diesel_helpers::{collect_rows, map_diesel_error_message, map_pool_error_message};
use super::models::{NewPlantInstanceRow, PlantInstanceRow};
use super::pool::{DbPool, PoolError};
use super::schema::plant_instances;

/// Diesel-backed implementation of the plant instance port.
#[derive(Clone)]
pub struct DieselPlantInstanceRepository {
    pool: DbPool,
}

impl DieselPlantInstanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlantInstanceRepositoryError {
    PlantInstanceRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> PlantInstanceRepositoryError {
    PlantInstanceRepositoryError::query(map_diesel_error_message(error, "plant instance"))
}

fn row_to_instance(row: PlantInstanceRow) -> Result<PlantInstance, String> {
    PlantInstance::new(PlantInstanceDraft {
        id: row.id,
        type_id: row.type_id,
        acquired_at: row.acquired_at,
        price: row.price,
        currency: row.currency,
        size_type: row.size_type,
        size_note: row.size_note,
        seller_name: row.seller_name,
        source_type: row.source_type,
        notes: row.notes,
        plant_number: row.plant_number,
        for_swap: row.for_swap,
        created_at: row.created_at,
    })
    .map_err(|e| e.to_string())
}

fn instance_to_new_row(instance: &PlantInstance) -> NewPlantInstanceRow {
    NewPlantInstanceRow {
        id: instance.id(),
        type_id: instance.type_id(),
        acquired_at: instance.acquired_at(),
        price: instance.price().map(|price| price.amount),
        currency: instance.price().map(|price| price.currency.clone()),
        size_type: instance.size_type().map(str::to_owned),
        size_note: instance.size_note().map(str::to_owned),
        seller_name: instance.seller_name().map(str::to_owned),
        source_type: instance.source_type().map(str::to_owned),
        notes: instance.notes().map(str::to_owned),
        plant_number: instance.plant_number(),
        for_swap: instance.for_swap(),
        created_at: instance.created_at(),
    }
}

#[async_trait]
impl PlantInstanceRepository for DieselPlantInstanceRepository {
    async fn list_for_type(
        &self,
        type_id: Uuid,
    ) -> Result<Vec<PlantInstance>, PlantInstanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlantInstanceRow> = plant_instances::table
            .filter(plant_instances::type_id.eq(type_id))
            .select(PlantInstanceRow::as_select())
            .order_by(plant_instances::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(
            rows.into_iter().map(row_to_instance),
            PlantInstanceRepositoryError::query,
        )
    }

    async fn list_for_swap(&self) -> Result<Vec<PlantInstance>, PlantInstanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlantInstanceRow> = plant_instances::table
            .filter(plant_instances::for_swap.eq(true))
            .select(PlantInstanceRow::as_select())
            .order_by(plant_instances::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(
            rows.into_iter().map(row_to_instance),
            PlantInstanceRepositoryError::query,
        )
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<PlantInstance>, PlantInstanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlantInstanceRow> = plant_instances::table
            .filter(plant_instances::id.eq(id))
            .select(PlantInstanceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_instance)
            .transpose()
            .map_err(PlantInstanceRepositoryError::query)
    }

    async fn insert(
        &self,
        instance: &PlantInstance,
    ) -> Result<(), PlantInstanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = instance_to_new_row(instance);
        diesel::insert_into(plant_instances::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
