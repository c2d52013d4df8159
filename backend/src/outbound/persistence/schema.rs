//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Plant type catalog table.
    ///
    /// One row per taxon/cultivar identity. Rows are created by an
    /// administrative action and never updated or deleted.
    plant_types (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Botanical genus.
        genus -> Varchar,
        /// Cultivar or species epithet.
        cultivar -> Varchar,
        /// Optional variegation descriptor.
        variegation -> Nullable<Varchar>,
        /// Unique URL-safe key used in navigation.
        slug -> Varchar,
        /// Public URL of the uploaded cover image.
        cover_image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Owned specimen table; each row references one plant type.
    plant_instances (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning plant type.
        type_id -> Uuid,
        /// Date the specimen was acquired.
        acquired_at -> Nullable<Date>,
        /// Purchase price in whole currency units.
        price -> Nullable<Int4>,
        /// Currency for `price`.
        currency -> Nullable<Varchar>,
        /// Size category (free string).
        size_type -> Nullable<Varchar>,
        /// Free-form size note.
        size_note -> Nullable<Varchar>,
        /// Seller or source name.
        seller_name -> Nullable<Varchar>,
        /// Acquisition channel (free string).
        source_type -> Nullable<Varchar>,
        /// Free-form notes.
        notes -> Nullable<Text>,
        /// Display number within the collection.
        plant_number -> Nullable<Int4>,
        /// Whether the specimen is offered for swap.
        for_swap -> Bool,
        /// Record creation timestamp (defaults to now()).
        created_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Photo table; each row references one plant instance.
    plant_photos (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning plant instance.
        instance_id -> Uuid,
        /// Public URL of the stored image.
        url -> Text,
        /// Optional caption.
        caption -> Nullable<Text>,
        /// Date the photo was taken, when known.
        taken_at -> Nullable<Date>,
        /// Record creation timestamp (defaults to now()).
        created_at -> Nullable<Timestamptz>,
        /// Whether this is the instance's primary display photo.
        is_featured -> Bool,
    }
}

diesel::joinable!(plant_instances -> plant_types (type_id));
diesel::joinable!(plant_photos -> plant_instances (instance_id));

diesel::allow_tables_to_appear_in_same_query!(plant_types, plant_instances, plant_photos);
