//! Plant type entity: a taxon/cultivar identity at the catalog level.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::Slug;
use super::validation::{PlantValidationError, normalise_optional_field, validate_non_empty_field};

/// Input payload for [`PlantType::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlantTypeDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Botanical genus, e.g. `Alocasia`.
    pub genus: String,
    /// Cultivar or species epithet, e.g. `Dragon Scale`.
    pub cultivar: String,
    /// Optional variegation descriptor, e.g. `Mint`.
    pub variegation: Option<String>,
    /// Unique URL-safe key used in navigation.
    pub slug: Slug,
    /// Public URL of the cover image, when one was uploaded.
    pub cover_image_url: Option<String>,
}

/// A taxon/cultivar identity owned by the catalog.
///
/// ## Invariants
/// - `genus` and `cultivar` are non-empty.
/// - `slug` is unique across all plant types (enforced by persistence) and
///   immutable once assigned.
///
/// Plant types are created by an administrative action and never edited or
/// deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlantType {
    id: Uuid,
    genus: String,
    cultivar: String,
    variegation: Option<String>,
    slug: Slug,
    cover_image_url: Option<String>,
}

impl PlantType {
    /// Validate and construct a plant type.
    pub fn new(draft: PlantTypeDraft) -> Result<Self, PlantValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Botanical genus.
    #[must_use]
    pub fn genus(&self) -> &str {
        self.genus.as_str()
    }

    /// Cultivar or species epithet.
    #[must_use]
    pub fn cultivar(&self) -> &str {
        self.cultivar.as_str()
    }

    /// Variegation descriptor, when present.
    #[must_use]
    pub fn variegation(&self) -> Option<&str> {
        self.variegation.as_deref()
    }

    /// Unique URL-safe key.
    #[must_use]
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Public URL of the cover image, when present.
    #[must_use]
    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image_url.as_deref()
    }

    /// Human-readable name: genus, cultivar, and variegation when present.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{PlantType, PlantTypeDraft, Slug};
    /// use uuid::Uuid;
    ///
    /// let plant = PlantType::new(PlantTypeDraft {
    ///     id: Uuid::new_v4(),
    ///     genus: "Alocasia".into(),
    ///     cultivar: "Dragon Scale".into(),
    ///     variegation: Some("Mint".into()),
    ///     slug: Slug::new("alocasia-dragon-scale-mint").expect("valid slug"),
    ///     cover_image_url: None,
    /// })
    /// .expect("valid plant type");
    /// assert_eq!(plant.display_name(), "Alocasia Dragon Scale Mint");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.variegation.as_deref() {
            Some(variegation) => format!("{} {} {variegation}", self.genus, self.cultivar),
            None => format!("{} {}", self.genus, self.cultivar),
        }
    }

    /// Derive the canonical slug for the given naming fields.
    ///
    /// Joins the present fields with spaces and slugifies the result, exactly
    /// as the administrative form previews it.
    pub fn derive_slug(
        genus: &str,
        cultivar: &str,
        variegation: Option<&str>,
    ) -> Result<Slug, super::slug::SlugValidationError> {
        let display = [Some(genus), Some(cultivar), variegation]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Slug::from_text(&display)
    }
}

impl TryFrom<PlantTypeDraft> for PlantType {
    type Error = PlantValidationError;

    fn try_from(draft: PlantTypeDraft) -> Result<Self, Self::Error> {
        let genus = validate_non_empty_field(draft.genus, "plant_type.genus")?;
        let cultivar = validate_non_empty_field(draft.cultivar, "plant_type.cultivar")?;
        Ok(Self {
            id: draft.id,
            genus,
            cultivar,
            variegation: normalise_optional_field(draft.variegation),
            slug: draft.slug,
            cover_image_url: normalise_optional_field(draft.cover_image_url),
        })
    }
}

impl<'de> Deserialize<'de> for PlantType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PlantTypeDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> PlantTypeDraft {
        PlantTypeDraft {
            id: Uuid::new_v4(),
            genus: "Alocasia".into(),
            cultivar: "Dragon Scale".into(),
            variegation: None,
            slug: Slug::new("alocasia-dragon-scale").expect("valid slug"),
            cover_image_url: None,
        }
    }

    #[rstest]
    fn display_name_omits_missing_variegation(draft: PlantTypeDraft) {
        let plant = PlantType::new(draft).expect("valid plant type");
        assert_eq!(plant.display_name(), "Alocasia Dragon Scale");
    }

    #[rstest]
    fn blank_genus_is_rejected(mut draft: PlantTypeDraft) {
        draft.genus = "  ".into();
        assert_eq!(
            PlantType::new(draft),
            Err(PlantValidationError::EmptyField {
                field: "plant_type.genus"
            })
        );
    }

    #[rstest]
    fn blank_variegation_normalises_to_none(mut draft: PlantTypeDraft) {
        draft.variegation = Some("  ".into());
        let plant = PlantType::new(draft).expect("valid plant type");
        assert_eq!(plant.variegation(), None);
    }

    #[rstest]
    #[case("Alocasia", "Dragon Scale", None, "alocasia-dragon-scale")]
    #[case("Alocasia", "Dragon Scale", Some("Mint"), "alocasia-dragon-scale-mint")]
    #[case("Philodendron", "Pink Princess", Some(""), "philodendron-pink-princess")]
    fn derive_slug_joins_present_fields(
        #[case] genus: &str,
        #[case] cultivar: &str,
        #[case] variegation: Option<&str>,
        #[case] expected: &str,
    ) {
        let slug = PlantType::derive_slug(genus, cultivar, variegation).expect("valid slug");
        assert_eq!(slug.as_ref(), expected);
    }

    #[rstest]
    fn serde_round_trips_through_draft(draft: PlantTypeDraft) {
        let plant = PlantType::new(draft).expect("valid plant type");
        let json = serde_json::to_string(&plant).expect("serialise");
        let back: PlantType = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, plant);
    }
}
