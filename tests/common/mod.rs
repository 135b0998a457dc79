//! HTTP 통합 테스트 공용 구성
//!
//! 운영과 같은 라우트/미들웨어 구성을 `MemoryStore` 위에 올립니다.

#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use delivery_account_service::config::JwtSettings;
use delivery_account_service::repositories::MemoryStore;
use delivery_account_service::routes::configure_all_routes;
use delivery_account_service::services::addresses::AddressService;
use delivery_account_service::services::auth::TokenService;
use delivery_account_service::services::users::{AccountService, CredentialService};

pub const PASSWORD: &str = "s3cure-pass";
pub const BCRYPT_TEST_COST: u32 = 4;

pub struct TestState {
    pub store: Arc<MemoryStore>,
    pub tokens: web::Data<TokenService>,
    pub accounts: web::Data<AccountService>,
    pub addresses: web::Data<AddressService>,
}

impl TestState {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenService::new(
            store.clone(),
            JwtSettings::new("integration-secret", Duration::minutes(5), Duration::days(1)),
        );
        let credentials = CredentialService::new(store.clone(), BCRYPT_TEST_COST).unwrap();
        let accounts = AccountService::new(store.clone(), credentials, tokens.clone());
        let addresses = AddressService::new(store.clone());

        Self {
            store,
            tokens: web::Data::new(tokens),
            accounts: web::Data::new(accounts),
            addresses: web::Data::new(addresses),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.tokens.clone())
            .app_data(self.accounts.clone())
            .app_data(self.addresses.clone())
            .configure(configure_all_routes)
    }
}

pub fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": PASSWORD,
        "email": format!("{}@example.com", username),
        "first_name": "Ivan",
        "last_name": "Petrov",
        "birthday": "1990-05-17"
    })
}

/// 가입 후 응답 본문 (id, tokens 포함)
pub async fn register<S, B>(app: &S, username: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(register_body(username))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "registration of {} failed", username);
    test::read_body_json(resp).await
}

/// 로그인 후 (access, refresh)
pub async fn login<S, B>(app: &S, username: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "login of {} failed", username);
    let body: Value = test::read_body_json(resp).await;

    (
        body["tokens"]["access"].as_str().unwrap().to_string(),
        body["tokens"]["refresh"].as_str().unwrap().to_string(),
    )
}

pub fn bearer(access: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", access))
}
