mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::NaiveDate;
use serde_json::{json, Value};

use common::{bearer, login, register, register_body, TestState, BCRYPT_TEST_COST, PASSWORD};
use delivery_account_service::domain::entities::users::User;
use delivery_account_service::repositories::UserStore;

#[actix_web::test]
async fn test_register_returns_projection_and_working_tokens() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;

    let body = register(&app, "ivan").await;

    for field in ["id", "username", "email", "first_name", "last_name", "birthday", "created_at"] {
        assert!(body.get(field).is_some(), "missing {}", field);
    }
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let access = body["tokens"]["access"].as_str().unwrap();
    let identity = state.tokens.verify_access(access).unwrap();
    assert_eq!(identity.user_id, body["id"].as_str().unwrap());
}

#[actix_web::test]
async fn test_duplicate_username_is_field_error_without_new_row() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;

    let mut duplicate = register_body("ivan");
    duplicate["email"] = json!("someone-else@example.com");
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(duplicate)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["username"].is_array());
    assert_eq!(state.store.user_count().unwrap(), 1);
}

#[actix_web::test]
async fn test_register_reports_missing_fields() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;

    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "username": "ivan" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["password"].is_array());
    assert!(body["fields"]["birthday"].is_array());
}

#[actix_web::test]
async fn test_login_projection() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": "ivan", "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["username"], "ivan");
    assert!(body.get("email").is_none());
    assert!(body["tokens"]["refresh"].is_string());
}

#[actix_web::test]
async fn test_inactive_user_cannot_login() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;

    let mut user = User::new(
        "dormant".to_string(),
        "dormant@example.com".to_string(),
        bcrypt::hash(PASSWORD, BCRYPT_TEST_COST).unwrap(),
        "Olga".to_string(),
        "Sokolova".to_string(),
        NaiveDate::from_ymd_opt(1980, 2, 29).unwrap(),
    );
    user.is_active = false;
    UserStore::insert(state.store.as_ref(), user).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": "dormant", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["non_field_errors"].is_array());
}

#[actix_web::test]
async fn test_wrong_password_is_400_with_same_message() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;

    let attempt = |username: &str, password: &str| {
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request()
    };

    let resp = test::call_service(&app, attempt("ivan", "wrong-pass-1")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let wrong_password: Value = test::read_body_json(resp).await;

    let resp = test::call_service(&app, attempt("nobody", PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let unknown_user: Value = test::read_body_json(resp).await;

    assert_eq!(wrong_password, unknown_user);
}

#[actix_web::test]
async fn test_logout_twice_is_205_then_400() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, refresh) = login(&app, "ivan").await;

    let logout = || {
        test::TestRequest::post()
            .uri("/users/logout")
            .insert_header(bearer(&access))
            .set_json(json!({ "refresh": refresh }))
            .to_request()
    };

    let first = test::call_service(&app, logout()).await;
    assert_eq!(first.status(), StatusCode::RESET_CONTENT);

    let second = test::call_service(&app, logout()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/users/token/refresh")
        .set_json(json!({ "refresh": refresh }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_requires_bearer() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (_, refresh) = login(&app, "ivan").await;

    let req = test::TestRequest::post()
        .uri("/users/logout")
        .set_json(json!({ "refresh": refresh }))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_with_garbage_is_400() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, _) = login(&app, "ivan").await;

    let req = test::TestRequest::post()
        .uri("/users/logout")
        .insert_header(bearer(&access))
        .set_json(json!({ "refresh": "definitely-not-a-token" }))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_refresh_returns_access_only() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, refresh) = login(&app, "ivan").await;

    let req = test::TestRequest::post()
        .uri("/users/token/refresh")
        .set_json(json!({ "refresh": refresh }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let renewed = body["access"].as_str().unwrap();
    assert!(body.get("refresh").is_none());
    assert_eq!(
        state.tokens.verify_access(renewed).unwrap().user_id,
        state.tokens.verify_access(&access).unwrap().user_id
    );

    let req = test::TestRequest::post()
        .uri("/users/token/refresh")
        .set_json(json!({ "refresh": access }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_reset_password_mismatch_keeps_hash() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, _) = login(&app, "ivan").await;
    let before = state.store.find_by_username("ivan").await.unwrap().unwrap().password_hash;

    let req = test::TestRequest::put()
        .uri("/users/reset_password")
        .insert_header(bearer(&access))
        .set_json(json!({ "password1": "brand-new-pass", "password2": "brand-new-pasz" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["non_field_errors"].is_array());

    let after = state.store.find_by_username("ivan").await.unwrap().unwrap().password_hash;
    assert_eq!(before, after);
}

#[actix_web::test]
async fn test_reset_password_changes_credentials() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, _) = login(&app, "ivan").await;

    let req = test::TestRequest::put()
        .uri("/users/reset_password")
        .insert_header(bearer(&access))
        .set_json(json!({ "password1": "brand-new-pass", "password2": "brand-new-pass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": "ivan", "password": "brand-new-pass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_account_partial() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    register(&app, "petr").await;
    let (access, _) = login(&app, "ivan").await;

    let req = test::TestRequest::patch()
        .uri("/users/update")
        .insert_header(bearer(&access))
        .set_json(json!({ "first_name": "Ivan II" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["first_name"], "Ivan II");
    assert_eq!(body["last_name"], "Petrov");

    let req = test::TestRequest::put()
        .uri("/users/update")
        .insert_header(bearer(&access))
        .set_json(json!({ "email": "petr@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["email"].is_array());
}

#[actix_web::test]
async fn test_update_rejects_blank_name() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, _) = login(&app, "ivan").await;

    let req = test::TestRequest::patch()
        .uri("/users/update")
        .insert_header(bearer(&access))
        .set_json(json!({ "first_name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["first_name"].is_array());
    let stored = state.store.find_by_username("ivan").await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Ivan");
}

#[actix_web::test]
async fn test_delete_account_cascades_addresses() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;
    register(&app, "ivan").await;
    let (access, _) = login(&app, "ivan").await;

    let req = test::TestRequest::post()
        .uri("/users/addresses")
        .insert_header(bearer(&access))
        .set_json(json!({ "city": "Kazan", "street": "Baumana", "house": "12" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    assert_eq!(state.store.address_count().unwrap(), 1);

    let req = test::TestRequest::delete()
        .uri("/users/delete")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    assert_eq!(state.store.user_count().unwrap(), 0);
    assert_eq!(state.store.address_count().unwrap(), 0);
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health() {
    let state = TestState::new();
    let app = test::init_service(state.app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}
