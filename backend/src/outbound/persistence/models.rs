//! Diesel queryable and insertable rows for the plant catalog tables.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::outbound::persistence::schema::{plant_instances, plant_photos, plant_types};

/// Queryable row for plant types.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plant_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlantTypeRow {
    pub id: Uuid,
    pub genus: String,
    pub cultivar: String,
    pub variegation: Option<String>,
    pub slug: String,
    pub cover_image_url: Option<String>,
}

/// Insertable row for plant types.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plant_types)]
pub(crate) struct NewPlantTypeRow {
    pub id: Uuid,
    pub genus: String,
    pub cultivar: String,
    pub variegation: Option<String>,
    pub slug: String,
    pub cover_image_url: Option<String>,
}

/// Queryable row for plant instances.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plant_instances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlantInstanceRow {
    pub id: Uuid,
    pub type_id: Uuid,
    pub acquired_at: Option<NaiveDate>,
    pub price: Option<i32>,
    pub currency: Option<String>,
    pub size_type: Option<String>,
    pub size_note: Option<String>,
    pub seller_name: Option<String>,
    pub source_type: Option<String>,
    pub notes: Option<String>,
    pub plant_number: Option<i32>,
    pub for_swap: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Insertable row for plant instances.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plant_instances)]
pub(crate) struct NewPlantInstanceRow {
    pub id: Uuid,
    pub type_id: Uuid,
    pub acquired_at: Option<NaiveDate>,
    pub price: Option<i32>,
    pub currency: Option<String>,
    pub size_type: Option<String>,
    pub size_note: Option<String>,
    pub seller_name: Option<String>,
    pub source_type: Option<String>,
    pub notes: Option<String>,
    pub plant_number: Option<i32>,
    pub for_swap: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Queryable row for plant photos.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plant_photos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlantPhotoRow {
    pub id: Uuid,
    pub instance_id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub taken_at: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
}

/// Insertable row for plant photos.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plant_photos)]
pub(crate) struct NewPlantPhotoRow {
    pub id: Uuid,
    pub instance_id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub taken_at: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
}
