//! Plant catalog endpoints: filtered listing, detail, and creation.
//!
//! ```text
//! GET /api/v1/plants?q=dragon&genus=Alocasia
//! GET /api/v1/plants/{slug}
//! POST /api/v1/plants
//! ```

use std::collections::HashMap;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{
    Error, GenusSelection, PhotoSequencer, PlantInstance, PlantPhoto, PlantType, PlantTypeDraft,
    Slug, filter_plants, genus_facets, slugify,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::photos::PhotoResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_plant_validation_error;

/// One plant type in a listing or detail response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantTypeResponse {
    /// Plant type identifier.
    pub id: Uuid,
    /// Botanical genus.
    pub genus: String,
    /// Cultivar or species epithet.
    pub cultivar: String,
    /// Variegation descriptor, when present.
    pub variegation: Option<String>,
    /// Unique URL-safe key.
    pub slug: String,
    /// Public URL of the cover image, when present.
    pub cover_image_url: Option<String>,
    /// Human-readable name.
    #[schema(example = "Alocasia Dragon Scale")]
    pub display_name: String,
}

impl From<&PlantType> for PlantTypeResponse {
    fn from(plant: &PlantType) -> Self {
        Self {
            id: plant.id(),
            genus: plant.genus().to_owned(),
            cultivar: plant.cultivar().to_owned(),
            variegation: plant.variegation().map(str::to_owned),
            slug: plant.slug().to_string(),
            cover_image_url: plant.cover_image_url().map(str::to_owned),
            display_name: plant.display_name(),
        }
    }
}

/// Query parameters for the catalog listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PlantListQuery {
    /// Free-text query matched against genus, cultivar, variegation, and slug.
    pub q: Option<String>,
    /// Genus facet; `all` (the default) matches every genus.
    pub genus: Option<String>,
}

/// Response payload for the catalog listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantListResponse {
    /// Facet domain for the genus selector, starting with `all`.
    pub facets: Vec<String>,
    /// Plant types passing both filters, in catalog order.
    pub plants: Vec<PlantTypeResponse>,
}

/// One owned instance in the plant detail response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResponse {
    /// Instance identifier.
    pub id: Uuid,
    /// Card label, e.g. `Plant 3fa85f`.
    pub label: String,
    /// Metadata fragments in display order.
    pub meta_parts: Vec<String>,
    /// Acquisition date as `YYYY-MM-DD`, when recorded.
    pub acquired_at: Option<String>,
    /// Price label such as `1200 CZK`, when a price exists.
    pub price_label: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Display number within the collection.
    pub plant_number: Option<i32>,
    /// Whether the specimen is offered for swap.
    pub for_swap: bool,
    /// ISO 8601 creation timestamp, when recorded.
    pub created_at: Option<String>,
    /// URL of the hero image (front photo of the sequence), when any.
    pub hero_url: Option<String>,
    /// Number of photos attached to the instance.
    pub photo_count: usize,
    /// Photos in display order.
    pub photos: Vec<PhotoResponse>,
}

/// Card label for an instance on the type detail page: `Plant ` followed by
/// the first six characters of the id.
fn instance_label(instance: &PlantInstance) -> String {
    let short: String = instance.id().to_string().chars().take(6).collect();
    format!("Plant {short}")
}

fn instance_response(instance: &PlantInstance, photos: Vec<PlantPhoto>) -> InstanceResponse {
    let sequencer = PhotoSequencer::new(photos);
    let hero_url = sequencer.current().map(|photo| photo.url().to_owned());
    InstanceResponse {
        id: instance.id(),
        label: instance_label(instance),
        meta_parts: instance
            .meta_parts()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        acquired_at: instance.acquired_at().map(|date| date.to_string()),
        price_label: instance.price_label(),
        notes: instance.notes().map(str::to_owned),
        plant_number: instance.plant_number(),
        for_swap: instance.for_swap(),
        created_at: instance.created_at().map(|at| at.to_rfc3339()),
        hero_url,
        photo_count: sequencer.len(),
        photos: sequencer.photos().iter().map(PhotoResponse::from).collect(),
    }
}

/// Group fetched photos by their owning instance.
pub(crate) fn photos_by_instance(photos: Vec<PlantPhoto>) -> HashMap<Uuid, Vec<PlantPhoto>> {
    let mut map: HashMap<Uuid, Vec<PlantPhoto>> = HashMap::new();
    for photo in photos {
        map.entry(photo.instance_id()).or_default().push(photo);
    }
    map
}

/// Response payload for the plant detail page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetailResponse {
    /// The plant type.
    pub plant_type: PlantTypeResponse,
    /// Owned instances, newest first, each with sequenced photos.
    pub instances: Vec<InstanceResponse>,
}

/// Request body for `POST /api/v1/plants`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantTypeRequest {
    /// Botanical genus.
    pub genus: String,
    /// Cultivar or species epithet.
    pub cultivar: String,
    /// Optional variegation descriptor.
    pub variegation: Option<String>,
    /// Optional slug override; slugified before use.
    pub slug: Option<String>,
    /// Public URL of an uploaded cover image.
    pub cover_image_url: Option<String>,
}

/// Response for a successful plant type creation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantTypeResponse {
    /// The created plant type.
    pub plant_type: PlantTypeResponse,
    /// Confirmation message for the presentation layer.
    #[schema(example = "Plant saved")]
    pub message: String,
}

/// List the catalog, filtered by free-text query and genus facet.
#[utoipa::path(
    get,
    path = "/api/v1/plants",
    params(PlantListQuery),
    responses(
        (status = 200, description = "Filtered catalog with facet domain", body = PlantListResponse),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["plants"],
    operation_id = "listPlants",
    security([])
)]
#[get("/plants")]
pub async fn list_plants(
    state: web::Data<HttpState>,
    query: web::Query<PlantListQuery>,
) -> ApiResult<HttpResponse> {
    let plants = state.plant_types.list().await?;
    let facets = genus_facets(&plants);
    let selection = query
        .genus
        .as_deref()
        .map_or(GenusSelection::All, GenusSelection::parse);
    let filtered = filter_plants(&plants, query.q.as_deref().unwrap_or_default(), &selection);
    let response = PlantListResponse {
        facets,
        plants: filtered.into_iter().map(PlantTypeResponse::from).collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Fetch one plant type with its instances and sequenced photos.
#[utoipa::path(
    get,
    path = "/api/v1/plants/{slug}",
    params(("slug" = String, Path, description = "Plant type slug")),
    responses(
        (status = 200, description = "Plant detail", body = PlantDetailResponse),
        (status = 404, description = "Unknown slug", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["plants"],
    operation_id = "getPlant",
    security([])
)]
#[get("/plants/{slug}")]
pub async fn get_plant(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    // A key that is not even a valid slug cannot be in the catalog.
    let slug = Slug::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("plant type with slug \"{raw}\" was not found")))?;
    let plant_type = state
        .plant_types
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::not_found(format!("plant type with slug \"{slug}\" was not found")))?;

    let instances = state.plant_instances.list_for_type(plant_type.id()).await?;
    let instance_ids: Vec<Uuid> = instances.iter().map(PlantInstance::id).collect();
    let photos = state.plant_photos.list_for_instances(&instance_ids).await?;
    let mut grouped = photos_by_instance(photos);

    let response = PlantDetailResponse {
        plant_type: PlantTypeResponse::from(&plant_type),
        instances: instances
            .iter()
            .map(|instance| {
                let photos = grouped.remove(&instance.id()).unwrap_or_default();
                instance_response(instance, photos)
            })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Create a plant type.
#[utoipa::path(
    post,
    path = "/api/v1/plants",
    request_body = CreatePlantTypeRequest,
    responses(
        (status = 201, description = "Plant type created", body = CreatePlantTypeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Slug already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["plants"],
    operation_id = "createPlant",
    security(("SessionCookie" = []))
)]
#[post("/plants")]
pub async fn create_plant(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePlantTypeRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&session, &state.admin)?;
    let request = payload.into_inner();

    let slug = resolve_slug(&request)?;
    let plant_type = PlantType::new(PlantTypeDraft {
        id: Uuid::new_v4(),
        genus: request.genus,
        cultivar: request.cultivar,
        variegation: request.variegation,
        slug,
        cover_image_url: request.cover_image_url,
    })
    .map_err(map_plant_validation_error)?;

    state.plant_types.insert(&plant_type).await?;

    let response = CreatePlantTypeResponse {
        plant_type: PlantTypeResponse::from(&plant_type),
        message: "Plant saved".to_owned(),
    };
    Ok(HttpResponse::Created().json(response))
}

/// Slug override when given (slugified), otherwise derived from the naming
/// fields.
fn resolve_slug(request: &CreatePlantTypeRequest) -> ApiResult<Slug> {
    let override_text = request
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());
    let candidate = match override_text {
        Some(raw) => Slug::new(slugify(raw)),
        None => PlantType::derive_slug(
            &request.genus,
            &request.cultivar,
            request.variegation.as_deref(),
        ),
    };
    candidate.map_err(|_| {
        Error::invalid_request("a slug could not be derived; provide one explicitly")
            .with_details(serde_json::json!({ "field": "slug" }))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockPlantTypeRepository, PlantTypeRepositoryError};
    use crate::inbound::http::test_utils::{TestPorts, test_app_with_state, test_login};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn plant(genus: &str, cultivar: &str, variegation: Option<&str>) -> PlantType {
        let slug = PlantType::derive_slug(genus, cultivar, variegation).expect("valid slug");
        PlantType::new(PlantTypeDraft {
            id: Uuid::new_v4(),
            genus: genus.into(),
            cultivar: cultivar.into(),
            variegation: variegation.map(str::to_owned),
            slug,
            cover_image_url: None,
        })
        .expect("valid plant type")
    }

    fn catalog() -> Vec<PlantType> {
        vec![
            plant("Alocasia", "Dragon Scale", None),
            plant("Philodendron", "Pink Princess", None),
        ]
    }

    fn listing_repo() -> MockPlantTypeRepository {
        let mut types = MockPlantTypeRepository::new();
        types.expect_list().returning(|| Ok(catalog()));
        types
    }

    async fn listing_response(uri: &str) -> Value {
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_types: Arc::new(listing_repo()),
            ..TestPorts::default()
        }))
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        actix_test::read_body_json(response).await
    }

    fn cultivars(value: &Value) -> Vec<&str> {
        value
            .get("plants")
            .and_then(Value::as_array)
            .expect("plants array")
            .iter()
            .filter_map(|plant| plant.get("cultivar").and_then(Value::as_str))
            .collect()
    }

    #[actix_web::test]
    async fn listing_returns_facets_and_every_plant() {
        let value = listing_response("/api/v1/plants").await;
        assert_eq!(
            value.get("facets").and_then(Value::as_array).map(Vec::len),
            Some(3)
        );
        assert_eq!(
            cultivars(&value),
            vec!["Dragon Scale", "Pink Princess"]
        );
    }

    #[actix_web::test]
    async fn listing_applies_the_text_filter() {
        let value = listing_response("/api/v1/plants?q=drag").await;
        assert_eq!(cultivars(&value), vec!["Dragon Scale"]);
    }

    #[actix_web::test]
    async fn listing_applies_the_genus_facet() {
        let value = listing_response("/api/v1/plants?genus=Philodendron").await;
        assert_eq!(cultivars(&value), vec!["Pink Princess"]);
    }

    #[actix_web::test]
    async fn unknown_slug_is_not_found() {
        let mut types = MockPlantTypeRepository::new();
        types.expect_find_by_slug().returning(|_| Ok(None));
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_types: Arc::new(types),
            ..TestPorts::default()
        }))
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/plants/no-such-plant")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn creation_requires_a_session() {
        let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/plants")
                .set_json(CreatePlantTypeRequest {
                    genus: "Alocasia".into(),
                    cultivar: "Dragon Scale".into(),
                    variegation: None,
                    slug: None,
                    cover_image_url: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn creation_derives_the_slug_and_confirms() {
        let mut types = MockPlantTypeRepository::new();
        types
            .expect_insert()
            .withf(|plant| plant.slug().as_ref() == "alocasia-dragon-scale-mint")
            .times(1)
            .returning(|_| Ok(()));
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_types: Arc::new(types),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/plants")
                .cookie(cookie)
                .set_json(CreatePlantTypeRequest {
                    genus: "Alocasia".into(),
                    cultivar: "Dragon Scale".into(),
                    variegation: Some("Mint".into()),
                    slug: None,
                    cover_image_url: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Plant saved")
        );
        assert_eq!(
            value
                .pointer("/plantType/slug")
                .and_then(Value::as_str),
            Some("alocasia-dragon-scale-mint")
        );
    }

    #[actix_web::test]
    async fn slug_override_wins_over_derivation() {
        let mut types = MockPlantTypeRepository::new();
        types
            .expect_insert()
            .withf(|plant| plant.slug().as_ref() == "my-favourite")
            .times(1)
            .returning(|_| Ok(()));
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_types: Arc::new(types),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/plants")
                .cookie(cookie)
                .set_json(CreatePlantTypeRequest {
                    genus: "Alocasia".into(),
                    cultivar: "Dragon Scale".into(),
                    variegation: None,
                    slug: Some("My Favourite".into()),
                    cover_image_url: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn duplicate_slug_maps_to_conflict() {
        let mut types = MockPlantTypeRepository::new();
        types.expect_insert().returning(|plant| {
            Err(PlantTypeRepositoryError::duplicate_slug(
                plant.slug().to_string(),
            ))
        });
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_types: Arc::new(types),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/plants")
                .cookie(cookie)
                .set_json(CreatePlantTypeRequest {
                    genus: "Alocasia".into(),
                    cultivar: "Dragon Scale".into(),
                    variegation: None,
                    slug: None,
                    cover_image_url: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn blank_genus_is_a_bad_request() {
        let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/plants")
                .cookie(cookie)
                .set_json(CreatePlantTypeRequest {
                    genus: "  ".into(),
                    cultivar: "Dragon Scale".into(),
                    variegation: None,
                    slug: Some("dragon-scale".into()),
                    cover_image_url: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
