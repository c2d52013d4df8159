//! Catalog filtering: free-text search combined with a genus facet.
//!
//! Pure functions over in-memory plant type lists. Handlers fetch the data;
//! these functions only compute the visible subset and the facet domain.

use serde::{Deserialize, Serialize};

use super::plant_type::PlantType;

/// Sentinel facet value matching every genus.
pub const ALL_GENERA: &str = "all";

/// Selected genus facet: either the `"all"` sentinel or one exact genus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenusSelection {
    /// Match every genus.
    All,
    /// Match one genus exactly (case-sensitive).
    Genus(String),
}

impl GenusSelection {
    /// Parse a facet parameter; the `"all"` sentinel (or blank input) selects
    /// every genus.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL_GENERA {
            Self::All
        } else {
            Self::Genus(trimmed.to_owned())
        }
    }

    fn matches(&self, plant: &PlantType) -> bool {
        match self {
            Self::All => true,
            Self::Genus(genus) => plant.genus() == genus,
        }
    }
}

impl From<String> for GenusSelection {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<GenusSelection> for String {
    fn from(value: GenusSelection) -> Self {
        match value {
            GenusSelection::All => ALL_GENERA.to_owned(),
            GenusSelection::Genus(genus) => genus,
        }
    }
}

/// Facet domain for the genus selector: distinct non-empty genus values in
/// lexicographic (ordinal) order, prefixed with the `"all"` sentinel.
///
/// # Examples
/// ```
/// use backend::domain::genus_facets;
///
/// assert_eq!(genus_facets(&[]), vec!["all".to_string()]);
/// ```
#[must_use]
pub fn genus_facets(plants: &[PlantType]) -> Vec<String> {
    let mut genera: Vec<String> = plants
        .iter()
        .map(PlantType::genus)
        .filter(|genus| !genus.is_empty())
        .map(str::to_owned)
        .collect();
    genera.sort();
    genera.dedup();
    let mut facets = Vec::with_capacity(genera.len() + 1);
    facets.push(ALL_GENERA.to_owned());
    facets.extend(genera);
    facets
}

/// Compute the visible subset of `plants` for a query and genus selection.
///
/// A plant passes the genus filter iff the selection is [`GenusSelection::All`]
/// or equals its genus exactly. It passes the text filter iff the query,
/// trimmed and lower-cased, is empty or is a substring of the lower-cased
/// haystack `"{genus} {cultivar} {variegation-or-empty} {slug}"`. Input order
/// is preserved; re-running with identical inputs yields an identical result.
#[must_use]
pub fn filter_plants<'a>(
    plants: &'a [PlantType],
    query: &str,
    genus: &GenusSelection,
) -> Vec<&'a PlantType> {
    let needle = query.trim().to_lowercase();
    plants
        .iter()
        .filter(|plant| genus.matches(plant))
        .filter(|plant| needle.is_empty() || search_haystack(plant).contains(&needle))
        .collect()
}

/// Lower-cased text a plant type is searchable by. An absent variegation
/// contributes an empty segment, so the haystack may contain a double space;
/// substring containment is the only documented contract.
fn search_haystack(plant: &PlantType) -> String {
    format!(
        "{} {} {} {}",
        plant.genus(),
        plant.cultivar(),
        plant.variegation().unwrap_or_default(),
        plant.slug()
    )
    .to_lowercase()
}
