//! End-to-end smoke tests over the assembled API route tree.
//!
//! These run against fixture ports (no database): they exercise routing,
//! session handling, the admin gate, and response envelopes.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use backend::inbound::http::test_utils::{
    TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD, TestPorts, test_app_with_state, test_login,
};

#[actix_web::test]
async fn empty_catalog_lists_only_the_all_facet() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/plants")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value.get("facets"), Some(&json!(["all"])));
    assert_eq!(value.get("plants"), Some(&json!([])));
}

#[actix_web::test]
async fn filters_are_accepted_on_the_listing() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/plants?q=dragon&genus=Alocasia")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn swap_listing_is_public_and_empty_by_default() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/swap").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value.get("instances"), Some(&json!([])));
}

#[actix_web::test]
async fn mutations_require_authentication() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;

    let create_plant = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/plants")
            .set_json(json!({ "genus": "Alocasia", "cultivar": "Dragon Scale" }))
            .to_request(),
    )
    .await;
    assert_eq!(create_plant.status(), StatusCode::UNAUTHORIZED);

    let feature = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(
                "/api/v1/instances/00000000-0000-0000-0000-000000000001\
                 /photos/00000000-0000-0000-0000-000000000002/feature",
            )
            .to_request(),
    )
    .await;
    assert_eq!(feature.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn wrong_credentials_do_not_establish_a_session() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": TEST_ADMIN_EMAIL, "password": "nope" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_can_create_a_plant_type_end_to_end() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
    let cookie = test_login(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/plants")
            .cookie(cookie)
            .set_json(json!({
                "genus": "Alocasia",
                "cultivar": "Dragon Scale",
                "variegation": "Mint",
            }))
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
        value.pointer("/plantType/slug").and_then(Value::as_str),
        Some("alocasia-dragon-scale-mint")
    );
    assert_eq!(
        value
            .pointer("/plantType/displayName")
            .and_then(Value::as_str),
        Some("Alocasia Dragon Scale Mint")
    );
}

#[actix_web::test]
async fn session_survives_login_and_dies_on_logout() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;

    let login = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "email": TEST_ADMIN_EMAIL,
                "password": TEST_ADMIN_PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let login_body: Value = actix_test::read_body_json(login).await;
    assert_eq!(
        login_body.get("isAdmin").and_then(Value::as_bool),
        Some(true)
    );

    let cookie = test_login(&app).await;
    let logout = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn unknown_plant_detail_is_not_found() {
    let app = actix_test::init_service(test_app_with_state(TestPorts::default())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/plants/alocasia-dragon-scale")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("not_found")
    );
}
