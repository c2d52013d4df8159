//! Plant photo endpoints: listing, registering uploads, and featuring.
//!
//! ```text
//! GET /api/v1/instances/{instanceId}/photos
//! POST /api/v1/instances/{instanceId}/photos
//! PUT /api/v1/instances/{instanceId}/photos/{photoId}/feature
//! ```
//!
//! File storage is delegated to the object store; these endpoints only record
//! the resulting public URLs.

use actix_web::{HttpResponse, get, post, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::SetFeaturedPhotoRequest;
use crate::domain::{Error, PhotoSequencer, PlantPhoto, PlantPhotoDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_plant_validation_error, parse_optional_date, parse_uuid,
};

/// One photo in display order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    /// Photo identifier.
    pub id: Uuid,
    /// Owning instance.
    pub instance_id: Uuid,
    /// Public URL of the stored image.
    pub url: String,
    /// Caption, when present.
    pub caption: Option<String>,
    /// Date taken as `YYYY-MM-DD`, when known.
    pub taken_at: Option<String>,
    /// ISO 8601 creation timestamp, when recorded.
    pub created_at: Option<String>,
    /// Whether this is the instance's primary display photo.
    pub is_featured: bool,
}

impl From<&PlantPhoto> for PhotoResponse {
    fn from(photo: &PlantPhoto) -> Self {
        Self {
            id: photo.id(),
            instance_id: photo.instance_id(),
            url: photo.url().to_owned(),
            caption: photo.caption().map(str::to_owned),
            taken_at: photo.taken_at().map(|date| date.to_string()),
            created_at: photo.created_at().map(|at| at.to_rfc3339()),
            is_featured: photo.is_featured(),
        }
    }
}

/// Photos of one instance in display order, plus the navigation cursor.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotosResponse {
    /// Photos in display order (featured first, then newest).
    pub photos: Vec<PhotoResponse>,
    /// Cursor position for the carousel (always the front item).
    pub active_index: usize,
}

fn photos_response(photos: &[PlantPhoto], active_index: usize) -> PhotosResponse {
    PhotosResponse {
        photos: photos.iter().map(PhotoResponse::from).collect(),
        active_index,
    }
}

/// One uploaded photo to register.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotoRequest {
    /// Public URL of the uploaded image.
    pub url: String,
    /// Optional caption.
    pub caption: Option<String>,
    /// Optional `YYYY-MM-DD` date the photo was taken.
    pub taken_at: Option<String>,
}

/// Request body for `POST /api/v1/instances/{instanceId}/photos`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotosRequest {
    /// Uploaded photos to attach to the instance.
    pub photos: Vec<AddPhotoRequest>,
}

/// Response for a successful photo registration.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotosResponse {
    /// The instance's photos in display order, including the new ones.
    pub photos: Vec<PhotoResponse>,
    /// Cursor position for the carousel.
    pub active_index: usize,
    /// Confirmation message for the presentation layer.
    #[schema(example = "Photos added")]
    pub message: String,
}

/// Response for a successful feature operation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePhotoResponse {
    /// Re-sequenced photos; exactly one carries the featured flag.
    pub photos: Vec<PhotoResponse>,
    /// Cursor position after the operation (reset to the front).
    pub active_index: usize,
}

async fn require_instance(state: &HttpState, instance_id: Uuid) -> ApiResult<()> {
    state
        .plant_instances
        .find_by_id(instance_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| Error::not_found(format!("instance {instance_id} not found")))
}

/// List one instance's photos in display order.
#[utoipa::path(
    get,
    path = "/api/v1/instances/{instance_id}/photos",
    params(("instance_id" = String, Path, description = "Plant instance id")),
    responses(
        (status = 200, description = "Photos in display order", body = PhotosResponse),
        (status = 404, description = "Unknown instance", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "listInstancePhotos",
    security([])
)]
#[get("/instances/{instance_id}/photos")]
pub async fn list_instance_photos(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let instance_id = parse_uuid(&path.into_inner(), FieldName::new("instanceId"))?;
    require_instance(&state, instance_id).await?;
    let photos = state.plant_photos.list_for_instance(instance_id).await?;
    let sequencer = PhotoSequencer::new(photos);
    let response = photos_response(sequencer.photos(), sequencer.cursor());
    Ok(HttpResponse::Ok().json(response))
}

/// Register uploaded photos for an instance.
#[utoipa::path(
    post,
    path = "/api/v1/instances/{instance_id}/photos",
    params(("instance_id" = String, Path, description = "Plant instance id")),
    request_body = AddPhotosRequest,
    responses(
        (status = 201, description = "Photos registered", body = AddPhotosResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown instance", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "addInstancePhotos",
    security(("SessionCookie" = []))
)]
#[post("/instances/{instance_id}/photos")]
pub async fn add_instance_photos(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AddPhotosRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&session, &state.admin)?;
    let instance_id = parse_uuid(&path.into_inner(), FieldName::new("instanceId"))?;
    require_instance(&state, instance_id).await?;

    let request = payload.into_inner();
    if request.photos.is_empty() {
        return Err(Error::invalid_request("select at least one photo"));
    }

    let mut new_photos = Vec::with_capacity(request.photos.len());
    for photo in request.photos {
        let taken_at = parse_optional_date(photo.taken_at, FieldName::new("takenAt"))?;
        let entity = PlantPhoto::new(PlantPhotoDraft {
            id: Uuid::new_v4(),
            instance_id,
            url: photo.url,
            caption: photo.caption,
            taken_at,
            created_at: Some(Utc::now()),
            is_featured: false,
        })
        .map_err(map_plant_validation_error)?;
        new_photos.push(entity);
    }
    state.plant_photos.insert_many(&new_photos).await?;

    let photos = state.plant_photos.list_for_instance(instance_id).await?;
    let sequencer = PhotoSequencer::new(photos);
    let response = AddPhotosResponse {
        photos: sequencer.photos().iter().map(PhotoResponse::from).collect(),
        active_index: sequencer.cursor(),
        message: "Photos added".to_owned(),
    };
    Ok(HttpResponse::Created().json(response))
}

/// Make a photo the instance's only featured one.
#[utoipa::path(
    put,
    path = "/api/v1/instances/{instance_id}/photos/{photo_id}/feature",
    params(
        ("instance_id" = String, Path, description = "Plant instance id"),
        ("photo_id" = String, Path, description = "Photo id")
    ),
    responses(
        (status = 200, description = "Photo featured", body = FeaturePhotoResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown instance or photo", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "featureInstancePhoto",
    security(("SessionCookie" = []))
)]
#[put("/instances/{instance_id}/photos/{photo_id}/feature")]
pub async fn feature_instance_photo(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    require_admin(&session, &state.admin)?;
    let (raw_instance_id, raw_photo_id) = path.into_inner();
    let instance_id = parse_uuid(&raw_instance_id, FieldName::new("instanceId"))?;
    let photo_id = parse_uuid(&raw_photo_id, FieldName::new("photoId"))?;
    require_instance(&state, instance_id).await?;

    let outcome = state
        .photo_features
        .set_featured(SetFeaturedPhotoRequest {
            instance_id,
            photo_id,
        })
        .await?;
    let response = FeaturePhotoResponse {
        photos: outcome.photos.iter().map(PhotoResponse::from).collect(),
        active_index: outcome.active_index,
    };
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        FixturePhotoFeatureCommand, MockPhotoFeatureCommand, MockPlantInstanceRepository,
        MockPlantPhotoRepository, SetFeaturedPhotoResponse,
    };
    use crate::domain::{PlantInstance, PlantInstanceDraft};
    use crate::inbound::http::test_utils::{TestPorts, test_app_with_state, test_login};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    const INSTANCE_ID: Uuid = Uuid::from_u128(0x10);
    const PHOTO_A: Uuid = Uuid::from_u128(0xa);
    const PHOTO_B: Uuid = Uuid::from_u128(0xb);

    fn instance() -> PlantInstance {
        PlantInstance::new(PlantInstanceDraft {
            id: INSTANCE_ID,
            type_id: Uuid::from_u128(0x99),
            acquired_at: None,
            price: None,
            currency: None,
            size_type: None,
            size_note: None,
            seller_name: None,
            source_type: None,
            notes: None,
            plant_number: None,
            for_swap: false,
            created_at: Some(Utc::now()),
        })
        .expect("valid instance")
    }

    fn photo(id: Uuid, taken_at: &str, is_featured: bool) -> PlantPhoto {
        PlantPhoto::new(PlantPhotoDraft {
            id,
            instance_id: INSTANCE_ID,
            url: format!("https://storage.example/{id}.jpg"),
            caption: None,
            taken_at: Some(
                chrono::NaiveDate::parse_from_str(taken_at, "%Y-%m-%d")
                    .expect("valid fixture date"),
            ),
            created_at: None,
            is_featured,
        })
        .expect("valid photo")
    }

    fn instance_repo() -> MockPlantInstanceRepository {
        let mut instances = MockPlantInstanceRepository::new();
        instances
            .expect_find_by_id()
            .returning(|id| Ok((id == INSTANCE_ID).then(instance)));
        instances
    }

    #[actix_web::test]
    async fn photos_are_listed_featured_first() {
        let mut photos = MockPlantPhotoRepository::new();
        photos.expect_list_for_instance().returning(|_| {
            Ok(vec![
                photo(PHOTO_A, "2024-01-01", true),
                photo(PHOTO_B, "2024-06-01", false),
            ])
        });
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_instances: Arc::new(instance_repo()),
            plant_photos: Arc::new(photos),
            ..TestPorts::default()
        }))
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/instances/{INSTANCE_ID}/photos"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        let ids: Vec<&str> = value
            .get("photos")
            .and_then(Value::as_array)
            .expect("photos array")
            .iter()
            .filter_map(|photo| photo.get("id").and_then(Value::as_str))
            .collect();
        assert_eq!(
            ids,
            vec![PHOTO_A.to_string().as_str(), PHOTO_B.to_string().as_str()]
        );
        assert_eq!(
            value.get("activeIndex").and_then(Value::as_u64),
            Some(0)
        );
    }

    #[actix_web::test]
    async fn unknown_instance_is_not_found() {
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_instances: Arc::new(instance_repo()),
            ..TestPorts::default()
        }))
        .await;

        let missing = Uuid::from_u128(0xdead);
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/instances/{missing}/photos"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn adding_photos_requires_a_session() {
        let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/instances/{INSTANCE_ID}/photos"))
                .set_json(AddPhotosRequest { photos: vec![] })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn adding_zero_photos_is_rejected() {
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_instances: Arc::new(instance_repo()),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/instances/{INSTANCE_ID}/photos"))
                .cookie(cookie)
                .set_json(AddPhotosRequest { photos: vec![] })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn added_photos_are_persisted_and_resequenced() {
        let mut photos = MockPlantPhotoRepository::new();
        photos
            .expect_insert_many()
            .withf(|photos| photos.len() == 1 && !photos.iter().any(PlantPhoto::is_featured))
            .times(1)
            .returning(|_| Ok(()));
        photos.expect_list_for_instance().returning(|_| {
            Ok(vec![
                photo(PHOTO_A, "2024-01-01", false),
                photo(PHOTO_B, "2024-06-01", false),
            ])
        });
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_instances: Arc::new(instance_repo()),
            plant_photos: Arc::new(photos),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/instances/{INSTANCE_ID}/photos"))
                .cookie(cookie)
                .set_json(AddPhotosRequest {
                    photos: vec![AddPhotoRequest {
                        url: "https://storage.example/new.jpg".into(),
                        caption: Some("new leaf".into()),
                        taken_at: Some("2024-06-01".into()),
                    }],
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Photos added")
        );
    }

    #[actix_web::test]
    async fn featuring_goes_through_the_command_port() {
        let mut features = MockPhotoFeatureCommand::new();
        features
            .expect_set_featured()
            .withf(|request| {
                request.instance_id == INSTANCE_ID && request.photo_id == PHOTO_A
            })
            .times(1)
            .returning(|_| {
                Ok(SetFeaturedPhotoResponse {
                    photos: vec![
                        photo(PHOTO_A, "2024-01-01", true),
                        photo(PHOTO_B, "2024-06-01", false),
                    ],
                    active_index: 0,
                })
            });
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_instances: Arc::new(instance_repo()),
            photo_features: Arc::new(features),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!(
                    "/api/v1/instances/{INSTANCE_ID}/photos/{PHOTO_A}/feature"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("activeIndex").and_then(Value::as_u64), Some(0));
        let featured: Vec<bool> = value
            .get("photos")
            .and_then(Value::as_array)
            .expect("photos array")
            .iter()
            .filter_map(|photo| photo.get("isFeatured").and_then(Value::as_bool))
            .collect();
        assert_eq!(featured, vec![true, false]);
    }

    #[actix_web::test]
    async fn featuring_an_unknown_photo_is_not_found() {
        let app = actix_test::init_service(test_app_with_state(TestPorts {
            plant_instances: Arc::new(instance_repo()),
            photo_features: Arc::new(FixturePhotoFeatureCommand),
            ..TestPorts::default()
        }))
        .await;
        let cookie = test_login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!(
                    "/api/v1/instances/{INSTANCE_ID}/photos/{PHOTO_A}/feature"
                ))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
