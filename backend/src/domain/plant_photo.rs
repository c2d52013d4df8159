//! Plant photo entity: one image attached to a plant instance.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{PlantValidationError, normalise_optional_field, validate_non_empty_field};

/// Input payload for [`PlantPhoto::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlantPhotoDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning plant instance.
    pub instance_id: Uuid,
    /// Public URL of the stored image.
    pub url: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// Date the photo was taken, when known.
    pub taken_at: Option<NaiveDate>,
    /// Record creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Whether this is the instance's primary display photo.
    pub is_featured: bool,
}

/// One image attached to exactly one plant instance.
///
/// ## Invariants
/// - `url` is non-empty.
/// - At most one photo per instance carries `is_featured = true`; the photo
///   sequencer's feature operation maintains this, not a database constraint
///   visible to this entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlantPhoto {
    id: Uuid,
    instance_id: Uuid,
    url: String,
    caption: Option<String>,
    taken_at: Option<NaiveDate>,
    created_at: Option<DateTime<Utc>>,
    is_featured: bool,
}

impl PlantPhoto {
    /// Validate and construct a plant photo.
    pub fn new(draft: PlantPhotoDraft) -> Result<Self, PlantValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning plant instance.
    #[must_use]
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Public URL of the stored image.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Caption, when present.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Date the photo was taken, when known.
    #[must_use]
    pub fn taken_at(&self) -> Option<NaiveDate> {
        self.taken_at
    }

    /// Record creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Whether this is the instance's primary display photo.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.is_featured
    }

    /// Ordering key for display: `taken_at` when present (at midnight UTC),
    /// else `created_at`. Photos with neither sort after all dated photos.
    #[must_use]
    pub fn effective_taken_at(&self) -> Option<DateTime<Utc>> {
        self.taken_at
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .or(self.created_at)
    }

    pub(crate) fn set_featured_flag(&mut self, featured: bool) {
        self.is_featured = featured;
    }
}

impl TryFrom<PlantPhotoDraft> for PlantPhoto {
    type Error = PlantValidationError;

    fn try_from(draft: PlantPhotoDraft) -> Result<Self, Self::Error> {
        let url = validate_non_empty_field(draft.url, "plant_photo.url")?;
        Ok(Self {
            id: draft.id,
            instance_id: draft.instance_id,
            url,
            caption: normalise_optional_field(draft.caption),
            taken_at: draft.taken_at,
            created_at: draft.created_at,
            is_featured: draft.is_featured,
        })
    }
}

impl<'de> Deserialize<'de> for PlantPhoto {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PlantPhotoDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> PlantPhotoDraft {
        PlantPhotoDraft {
            id: Uuid::new_v4(),
            instance_id: Uuid::new_v4(),
            url: "https://storage.example/plants/a/1.jpg".into(),
            caption: None,
            taken_at: None,
            created_at: None,
            is_featured: false,
        }
    }

    #[rstest]
    fn blank_url_is_rejected(mut draft: PlantPhotoDraft) {
        draft.url = " ".into();
        assert_eq!(
            PlantPhoto::new(draft),
            Err(PlantValidationError::EmptyField {
                field: "plant_photo.url"
            })
        );
    }

    #[rstest]
    fn effective_date_prefers_taken_at(mut draft: PlantPhotoDraft) {
        let taken = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let created = Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        draft.taken_at = Some(taken);
        draft.created_at = Some(created);
        let photo = PlantPhoto::new(draft).expect("valid photo");
        assert_eq!(
            photo.effective_taken_at(),
            Some(taken.and_time(NaiveTime::MIN).and_utc())
        );
    }

    #[rstest]
    fn effective_date_falls_back_to_created_at(mut draft: PlantPhotoDraft) {
        let created = Utc
            .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        draft.created_at = Some(created);
        let photo = PlantPhoto::new(draft).expect("valid photo");
        assert_eq!(photo.effective_taken_at(), Some(created));
    }

    #[rstest]
    fn effective_date_is_none_without_dates(draft: PlantPhotoDraft) {
        let photo = PlantPhoto::new(draft).expect("valid photo");
        assert_eq!(photo.effective_taken_at(), None);
    }
}
