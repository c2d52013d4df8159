//! Test helpers for inbound HTTP components.
//!
//! Compiled for unit tests and, via the `test-support` feature, for the
//! integration tests under `tests/`.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use crate::domain::ports::{
    FixturePhotoFeatureCommand, FixturePlantInstanceRepository, FixturePlantPhotoRepository,
    FixturePlantTypeRepository, PhotoFeatureCommand, PlantInstanceRepository,
    PlantPhotoRepository, PlantTypeRepository,
};
use crate::inbound::http::auth::AdminCredentials;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{catalogue, instances, photos, users};

/// Admin email used by [`test_app_with_state`].
pub const TEST_ADMIN_EMAIL: &str = "julie@example.test";
/// Admin password used by [`test_app_with_state`].
pub const TEST_ADMIN_PASSWORD: &str = "password";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
#[must_use]
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Port bundle for [`test_app_with_state`], defaulting every port to its
/// fixture implementation.
pub struct TestPorts {
    /// Plant type port.
    pub plant_types: Arc<dyn PlantTypeRepository>,
    /// Plant instance port.
    pub plant_instances: Arc<dyn PlantInstanceRepository>,
    /// Plant photo port.
    pub plant_photos: Arc<dyn PlantPhotoRepository>,
    /// Featured-photo use case port.
    pub photo_features: Arc<dyn PhotoFeatureCommand>,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            plant_types: Arc::new(FixturePlantTypeRepository),
            plant_instances: Arc::new(FixturePlantInstanceRepository),
            plant_photos: Arc::new(FixturePlantPhotoRepository),
            photo_features: Arc::new(FixturePhotoFeatureCommand),
        }
    }
}

/// Assemble the full `/api/v1` route tree over the given ports.
#[must_use]
pub fn test_app_with_state(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        ports.plant_types,
        ports.plant_instances,
        ports.plant_photos,
        ports.photo_features,
        AdminCredentials::new(TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD),
    );
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .service(users::login)
            .service(users::logout)
            .service(users::current_session)
            .service(catalogue::list_plants)
            .service(catalogue::get_plant)
            .service(catalogue::create_plant)
            .service(instances::create_instance)
            .service(instances::list_swap_instances)
            .service(photos::list_instance_photos)
            .service(photos::add_instance_photos)
            .service(photos::feature_instance_photo),
    )
}

/// Log in with the test admin credentials and return the session cookie.
///
/// # Panics
/// Panics when the login round-trip fails; tests treat that as a broken
/// fixture rather than a scenario under test.
pub async fn test_login<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "email": TEST_ADMIN_EMAIL,
                "password": TEST_ADMIN_PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "test login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
