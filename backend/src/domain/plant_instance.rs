//! Plant instance entity: one physically-owned specimen of a plant type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{PlantValidationError, ensure_non_negative, normalise_optional_field};

/// Suggested values for [`PlantInstance::size_type`]. The field itself is a
/// free string; these are the options the administrative form offers.
pub const SIZE_TYPE_OPTIONS: [&str; 7] =
    ["corm", "baby", "juvenile", "mature", "cutting", "tc", "rescue"];

/// Suggested values for [`PlantInstance::source_type`]. Free string, see
/// [`SIZE_TYPE_OPTIONS`].
pub const SOURCE_TYPE_OPTIONS: [&str; 5] = ["shop", "privateSeller", "exchange", "gift", "import"];

/// Purchase price with its currency.
///
/// Price and currency only exist together: a draft carrying one without the
/// other is normalised to "no price" rather than rejected, matching how the
/// catalog displays instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Price {
    /// Whole currency units.
    pub amount: i32,
    /// Currency code or symbol as entered, e.g. `CZK`.
    pub currency: String,
}

impl Price {
    /// Display label, e.g. `1200 CZK`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }
}

/// Input payload for [`PlantInstance::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlantInstanceDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning plant type.
    pub type_id: Uuid,
    /// Date the specimen was acquired.
    pub acquired_at: Option<NaiveDate>,
    /// Purchase price in whole currency units.
    pub price: Option<i32>,
    /// Currency for `price`.
    pub currency: Option<String>,
    /// Size category (free string, see [`SIZE_TYPE_OPTIONS`]).
    pub size_type: Option<String>,
    /// Free-form size note, e.g. `2 leaves`.
    pub size_note: Option<String>,
    /// Seller or source name.
    pub seller_name: Option<String>,
    /// Acquisition channel (free string, see [`SOURCE_TYPE_OPTIONS`]).
    pub source_type: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Display number within the collection.
    pub plant_number: Option<i32>,
    /// Whether the specimen is offered for swap.
    pub for_swap: bool,
    /// Record creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// One physically-owned specimen belonging to exactly one plant type.
///
/// ## Invariants
/// - A price without a currency (or vice versa) is treated as "no price";
///   the constructor normalises the pair into [`Price`].
/// - `price` and `plant_number` are non-negative when present.
///
/// Instances are created by an administrative action and never edited or
/// deleted within this system's scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PlantInstance {
    id: Uuid,
    type_id: Uuid,
    acquired_at: Option<NaiveDate>,
    price: Option<Price>,
    size_type: Option<String>,
    size_note: Option<String>,
    seller_name: Option<String>,
    source_type: Option<String>,
    notes: Option<String>,
    plant_number: Option<i32>,
    for_swap: bool,
    created_at: Option<DateTime<Utc>>,
}

impl PlantInstance {
    /// Validate and construct a plant instance.
    pub fn new(draft: PlantInstanceDraft) -> Result<Self, PlantValidationError> {
        Self::try_from(draft)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning plant type.
    #[must_use]
    pub fn type_id(&self) -> Uuid {
        self.type_id
    }

    /// Acquisition date, when recorded.
    #[must_use]
    pub fn acquired_at(&self) -> Option<NaiveDate> {
        self.acquired_at
    }

    /// Purchase price, present only when both amount and currency were given.
    #[must_use]
    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    /// Price display label, when a price exists.
    #[must_use]
    pub fn price_label(&self) -> Option<String> {
        self.price.as_ref().map(Price::label)
    }

    /// Size category.
    #[must_use]
    pub fn size_type(&self) -> Option<&str> {
        self.size_type.as_deref()
    }

    /// Free-form size note.
    #[must_use]
    pub fn size_note(&self) -> Option<&str> {
        self.size_note.as_deref()
    }

    /// Seller or source name.
    #[must_use]
    pub fn seller_name(&self) -> Option<&str> {
        self.seller_name.as_deref()
    }

    /// Acquisition channel.
    #[must_use]
    pub fn source_type(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    /// Free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Display number within the collection.
    #[must_use]
    pub fn plant_number(&self) -> Option<i32> {
        self.plant_number
    }

    /// Whether the specimen is offered for swap.
    #[must_use]
    pub fn for_swap(&self) -> bool {
        self.for_swap
    }

    /// Record creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Metadata fragments shown on instance cards, in display order:
    /// size type, size note, source type, seller name.
    #[must_use]
    pub fn meta_parts(&self) -> Vec<&str> {
        [
            self.size_type.as_deref(),
            self.size_note.as_deref(),
            self.source_type.as_deref(),
            self.seller_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl TryFrom<PlantInstanceDraft> for PlantInstance {
    type Error = PlantValidationError;

    fn try_from(draft: PlantInstanceDraft) -> Result<Self, Self::Error> {
        if let Some(amount) = draft.price {
            ensure_non_negative(amount, "plant_instance.price")?;
        }
        if let Some(number) = draft.plant_number {
            ensure_non_negative(number, "plant_instance.plant_number")?;
        }
        let currency = normalise_optional_field(draft.currency);
        let price = match (draft.price, currency) {
            (Some(amount), Some(currency)) => Some(Price { amount, currency }),
            // One half missing means no price, per the display invariant.
            _ => None,
        };
        Ok(Self {
            id: draft.id,
            type_id: draft.type_id,
            acquired_at: draft.acquired_at,
            price,
            size_type: normalise_optional_field(draft.size_type),
            size_note: normalise_optional_field(draft.size_note),
            seller_name: normalise_optional_field(draft.seller_name),
            source_type: normalise_optional_field(draft.source_type),
            notes: normalise_optional_field(draft.notes),
            plant_number: draft.plant_number,
            for_swap: draft.for_swap,
            created_at: draft.created_at,
        })
    }
}

impl<'de> Deserialize<'de> for PlantInstance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        PlantInstanceDraft::deserialize(deserializer)?
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
    fn draft() -> PlantInstanceDraft {
        PlantInstanceDraft {
            id: Uuid::new_v4(),
            type_id: Uuid::new_v4(),
            acquired_at: None,
            price: None,
            currency: None,
            size_type: Some("baby".into()),
            size_note: Some("2 leaves".into()),
            seller_name: Some("GreenHaven".into()),
            source_type: Some("shop".into()),
            notes: None,
            plant_number: None,
            for_swap: false,
            created_at: Some(Utc::now()),
        }
    }

    #[rstest]
    fn price_requires_both_amount_and_currency(mut draft: PlantInstanceDraft) {
        draft.price = Some(1200);
        draft.currency = None;
        let instance = PlantInstance::new(draft.clone()).expect("valid instance");
        assert_eq!(instance.price(), None);
        assert_eq!(instance.price_label(), None);

        draft.currency = Some("CZK".into());
        let priced = PlantInstance::new(draft).expect("valid instance");
        assert_eq!(priced.price_label().as_deref(), Some("1200 CZK"));
    }

    #[rstest]
    fn currency_without_amount_is_no_price(mut draft: PlantInstanceDraft) {
        draft.price = None;
        draft.currency = Some("CZK".into());
        let instance = PlantInstance::new(draft).expect("valid instance");
        assert_eq!(instance.price(), None);
    }

    #[rstest]
    fn negative_price_is_rejected(mut draft: PlantInstanceDraft) {
        draft.price = Some(-5);
        draft.currency = Some("CZK".into());
        assert_eq!(
            PlantInstance::new(draft),
            Err(PlantValidationError::NegativeValue {
                field: "plant_instance.price",
                value: -5
            })
        );
    }

    #[rstest]
    fn meta_parts_keep_display_order(draft: PlantInstanceDraft) {
        let instance = PlantInstance::new(draft).expect("valid instance");
        assert_eq!(
            instance.meta_parts(),
            vec!["baby", "2 leaves", "shop", "GreenHaven"]
        );
    }

    #[rstest]
    fn blank_optionals_normalise_to_none(mut draft: PlantInstanceDraft) {
        draft.size_note = Some("  ".into());
        draft.seller_name = Some(String::new());
        let instance = PlantInstance::new(draft).expect("valid instance");
        assert_eq!(instance.size_note(), None);
        assert_eq!(instance.seller_name(), None);
        assert_eq!(instance.meta_parts(), vec!["baby", "shop"]);
    }
}
