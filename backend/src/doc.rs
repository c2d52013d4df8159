//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every HTTP endpoint from the
//! inbound layer plus the session cookie security scheme. The generated
//! specification is used by Swagger UI (debug builds) and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::catalogue::{
    CreatePlantTypeRequest, CreatePlantTypeResponse, InstanceResponse, PlantDetailResponse,
    PlantListResponse, PlantTypeResponse,
};
use crate::inbound::http::instances::{
    CreateInstanceRequest, CreateInstanceResponse, SwapInstanceResponse, SwapListResponse,
};
use crate::inbound::http::photos::{
    AddPhotoRequest, AddPhotosRequest, AddPhotosResponse, FeaturePhotoResponse, PhotoResponse,
    PhotosResponse,
};
use crate::inbound::http::users::{LoginRequest, SessionResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Plantfolio backend API",
        description = "HTTP interface for the plant catalog: browse types, \
            instances, and photos; administrative creation and photo featuring."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_session,
        crate::inbound::http::catalogue::list_plants,
        crate::inbound::http::catalogue::get_plant,
        crate::inbound::http::catalogue::create_plant,
        crate::inbound::http::instances::create_instance,
        crate::inbound::http::instances::list_swap_instances,
        crate::inbound::http::photos::list_instance_photos,
        crate::inbound::http::photos::add_instance_photos,
        crate::inbound::http::photos::feature_instance_photo,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        SessionResponse,
        PlantTypeResponse,
        PlantListResponse,
        PlantDetailResponse,
        InstanceResponse,
        CreatePlantTypeRequest,
        CreatePlantTypeResponse,
        CreateInstanceRequest,
        CreateInstanceResponse,
        SwapInstanceResponse,
        SwapListResponse,
        PhotoResponse,
        PhotosResponse,
        AddPhotoRequest,
        AddPhotosRequest,
        AddPhotosResponse,
        FeaturePhotoResponse,
    )),
    tags(
        (name = "users", description = "Session management"),
        (name = "plants", description = "Plant type catalog"),
        (name = "instances", description = "Owned specimens and the swap listing"),
        (name = "photos", description = "Instance photos and featuring"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
