//! Domain entities, pure catalog logic, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the two pure algorithm modules — the catalog
//! filter and the photo sequencer. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.

pub mod catalogue;
pub mod error;
pub mod photo_service;
pub mod plant_instance;
pub mod plant_photo;
pub mod plant_type;
pub mod ports;
pub mod sequencer;
pub mod slug;
pub mod trace_id;
pub mod validation;

pub use self::catalogue::{ALL_GENERA, GenusSelection, filter_plants, genus_facets};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::photo_service::PhotoFeatureService;
pub use self::plant_instance::{
    PlantInstance, PlantInstanceDraft, Price, SIZE_TYPE_OPTIONS, SOURCE_TYPE_OPTIONS,
};
pub use self::plant_photo::{PlantPhoto, PlantPhotoDraft};
pub use self::plant_type::{PlantType, PlantTypeDraft};
pub use self::sequencer::{PhotoSequencer, SequenceError};
pub use self::slug::{Slug, SlugValidationError, slugify};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::PlantValidationError;
