//! Plant instance endpoints: creation and the swap listing.
//!
//! ```text
//! POST /api/v1/plants/{slug}/instances
//! GET /api/v1/swap
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Error, PhotoSequencer, PlantInstance, PlantInstanceDraft, PlantPhoto, PlantPhotoDraft,
    PlantType, Slug,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::catalogue::photos_by_instance;
use crate::inbound::http::photos::PhotoResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_plant_validation_error, parse_optional_date,
};

/// Request body for `POST /api/v1/plants/{slug}/instances`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    /// Acquisition date as `YYYY-MM-DD`.
    pub acquired_at: Option<String>,
    /// Purchase price in whole currency units.
    pub price: Option<i32>,
    /// Currency for `price`; ignored without an amount.
    pub currency: Option<String>,
    /// Size category (free string).
    pub size_type: Option<String>,
    /// Free-form size note.
    pub size_note: Option<String>,
    /// Seller or source name.
    pub seller_name: Option<String>,
    /// Acquisition channel (free string).
    pub source_type: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Display number within the collection.
    pub plant_number: Option<i32>,
    /// Whether the specimen is offered for swap.
    #[serde(default)]
    pub for_swap: bool,
    /// Public URL of an uploaded cover photo to attach immediately.
    pub photo_url: Option<String>,
}

/// Response for a successful instance creation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceResponse {
    /// Identifier of the created instance.
    pub id: Uuid,
    /// Slug of the owning plant type.
    pub type_slug: String,
    /// Confirmation message for the presentation layer.
    #[schema(example = "Instance saved")]
    pub message: String,
}

/// One instance on the swap page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapInstanceResponse {
    /// Instance identifier.
    pub id: Uuid,
    /// Owning plant type identifier.
    pub type_id: Uuid,
    /// Card label: the type's display name plus `#<plantNumber>` when set.
    #[schema(example = "Alocasia Dragon Scale #3")]
    pub label: String,
    /// Metadata fragments in display order.
    pub meta_parts: Vec<String>,
    /// Acquisition date as `YYYY-MM-DD`, when recorded.
    pub acquired_at: Option<String>,
    /// Price label such as `1200 CZK`, when a price exists.
    pub price_label: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// URL of the hero image: the type's cover image, else the front photo.
    pub hero_url: Option<String>,
    /// Number of photos attached to the instance.
    pub photo_count: usize,
    /// Photos in display order.
    pub photos: Vec<PhotoResponse>,
}

/// Response payload for the swap listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapListResponse {
    /// Instances offered for swap, newest first.
    pub instances: Vec<SwapInstanceResponse>,
}

fn swap_label(plant_type: Option<&PlantType>, instance: &PlantInstance) -> String {
    let display_name = plant_type
        .map(PlantType::display_name)
        .unwrap_or_else(|| "Unknown plant".to_owned());
    match instance.plant_number() {
        Some(number) => format!("{display_name} #{number}"),
        None => display_name,
    }
}

fn swap_instance_response(
    plant_type: Option<&PlantType>,
    instance: &PlantInstance,
    photos: Vec<PlantPhoto>,
) -> SwapInstanceResponse {
    let sequencer = PhotoSequencer::new(photos);
    let hero_url = plant_type
        .and_then(|t| t.cover_image_url().map(str::to_owned))
        .or_else(|| sequencer.current().map(|photo| photo.url().to_owned()));
    SwapInstanceResponse {
        id: instance.id(),
        type_id: instance.type_id(),
        label: swap_label(plant_type, instance),
        meta_parts: instance
            .meta_parts()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        acquired_at: instance.acquired_at().map(|date| date.to_string()),
        price_label: instance.price_label(),
        notes: instance.notes().map(str::to_owned),
        hero_url,
        photo_count: sequencer.len(),
        photos: sequencer.photos().iter().map(PhotoResponse::from).collect(),
    }
}

/// Create an instance of a plant type.
#[utoipa::path(
    post,
    path = "/api/v1/plants/{slug}/instances",
    params(("slug" = String, Path, description = "Plant type slug")),
    request_body = CreateInstanceRequest,
    responses(
        (status = 201, description = "Instance created", body = CreateInstanceResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown slug", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instances"],
    operation_id = "createInstance",
    security(("SessionCookie" = []))
)]
#[post("/plants/{slug}/instances")]
pub async fn create_instance(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateInstanceRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&session, &state.admin)?;
    let raw = path.into_inner();
    let slug = Slug::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("plant type with slug \"{raw}\" was not found")))?;
    let plant_type = state
        .plant_types
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| Error::not_found(format!("plant type with slug \"{slug}\" was not found")))?;

    let request = payload.into_inner();
    let acquired_at = parse_optional_date(request.acquired_at, FieldName::new("acquiredAt"))?;
    let instance = PlantInstance::new(PlantInstanceDraft {
        id: Uuid::new_v4(),
        type_id: plant_type.id(),
        acquired_at,
        price: request.price,
        // The form only submits a currency alongside an amount.
        currency: request.price.is_some().then_some(request.currency).flatten(),
        size_type: request.size_type,
        size_note: request.size_note,
        seller_name: request.seller_name,
        source_type: request.source_type,
        notes: request.notes,
        plant_number: request.plant_number,
        for_swap: request.for_swap,
        created_at: Some(Utc::now()),
    })
    .map_err(map_plant_validation_error)?;
    state.plant_instances.insert(&instance).await?;

    if let Some(url) = request.photo_url.filter(|url| !url.trim().is_empty()) {
        let photo = PlantPhoto::new(PlantPhotoDraft {
            id: Uuid::new_v4(),
            instance_id: instance.id(),
            url,
            caption: None,
            taken_at: None,
            created_at: Some(Utc::now()),
            is_featured: false,
        })
        .map_err(map_plant_validation_error)?;
        state.plant_photos.insert_many(&[photo]).await?;
    }

    let response = CreateInstanceResponse {
        id: instance.id(),
        type_slug: slug.to_string(),
        message: "Instance saved".to_owned(),
    };
    Ok(HttpResponse::Created().json(response))
}

/// List every instance offered for swap.
#[utoipa::path(
    get,
    path = "/api/v1/swap",
    responses(
        (status = 200, description = "Instances offered for swap", body = SwapListResponse),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instances"],
    operation_id = "listSwapInstances",
    security([])
)]
#[get("/swap")]
pub async fn list_swap_instances(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let instances = state.plant_instances.list_for_swap().await?;

    let mut type_ids: Vec<Uuid> = instances.iter().map(PlantInstance::type_id).collect();
    type_ids.sort();
    type_ids.dedup();
    let types = state.plant_types.list_by_ids(&type_ids).await?;
    let types_by_id: std::collections::HashMap<Uuid, PlantType> =
        types.into_iter().map(|t| (t.id(), t)).collect();

    let instance_ids: Vec<Uuid> = instances.iter().map(PlantInstance::id).collect();
    let photos = state.plant_photos.list_for_instances(&instance_ids).await?;
    let mut grouped = photos_by_instance(photos);

    let response = SwapListResponse {
        instances: instances
            .iter()
            .map(|instance| {
                let photos = grouped.remove(&instance.id()).unwrap_or_default();
                swap_instance_response(types_by_id.get(&instance.type_id()), instance, photos)
            })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}
