//! 배송 계정 서비스 메인 애플리케이션
//!
//! MongoDB, Redis 연결을 설정하고 리포지토리 싱글톤을 초기화한 뒤
//! 서비스를 조립해 Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use delivery_account_service::caching::redis::RedisClient;
use delivery_account_service::config::{
    Environment, JwtSettings, PasswordConfig, RateLimitConfig, ServerConfig,
};
use delivery_account_service::core::registry::ServiceLocator;
use delivery_account_service::core::AppError;
use delivery_account_service::db::Database;
use delivery_account_service::domain::dto::users::request::RegisterRequest;
use delivery_account_service::repositories::{
    AddressRepository, AddressStore, TokenRepository, TokenStore, UserRepository, UserStore,
};
use delivery_account_service::routes::configure_all_routes;
use delivery_account_service::services::addresses::AddressService;
use delivery_account_service::services::auth::TokenService;
use delivery_account_service::services::users::{AccountService, CredentialService};
use delivery_account_service::utils::display_terminal;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 배송 계정 서비스 시작중... ({:?})", Environment::current());

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| std::io::Error::other(format!("리포지토리 초기화 실패: {}", e)))?;

    create_indexes().await.map_err(std::io::Error::other)?;

    let services = build_services().map_err(std::io::Error::other)?;
    provision_superuser(&services.credentials).await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(services).await
}

/// 핸들러에 주입되는 서비스 묶음
#[derive(Clone)]
struct AppServices {
    tokens: TokenService,
    credentials: CredentialService,
    accounts: AccountService,
    addresses: AddressService,
}

/// 리포지토리 싱글톤 위에 서비스 조립
///
/// 서명 키, 토큰 수명, bcrypt 비용은 여기서 한 번 읽고 이후 바뀌지 않습니다.
fn build_services() -> Result<AppServices, AppError> {
    let users: Arc<dyn UserStore> = UserRepository::instance();
    let addresses: Arc<dyn AddressStore> = AddressRepository::instance();
    let token_store: Arc<dyn TokenStore> = TokenRepository::instance();

    let settings = JwtSettings::from_env();
    info!("🔑 JWT 설정: {:?}", settings);

    let tokens = TokenService::new(token_store, settings);
    let credentials = CredentialService::new(users.clone(), PasswordConfig::bcrypt_cost())?;
    let accounts = AccountService::new(users, credentials.clone(), tokens.clone());

    Ok(AppServices {
        tokens,
        credentials,
        accounts,
        addresses: AddressService::new(addresses),
    })
}

async fn create_indexes() -> Result<(), AppError> {
    UserRepository::instance().create_indexes().await?;
    AddressRepository::instance().create_indexes().await?;
    TokenRepository::instance().create_indexes().await?;
    Ok(())
}

/// `SUPERUSER_USERNAME`, `SUPERUSER_EMAIL`, `SUPERUSER_PASSWORD`가 모두 있으면 관리자 계정 생성
///
/// 이미 있는 계정이면 경고만 남기고 계속 진행합니다.
async fn provision_superuser(credentials: &CredentialService) {
    let (Ok(username), Ok(email), Ok(password)) = (
        std::env::var("SUPERUSER_USERNAME"),
        std::env::var("SUPERUSER_EMAIL"),
        std::env::var("SUPERUSER_PASSWORD"),
    ) else {
        return;
    };

    let birthday = std::env::var("SUPERUSER_BIRTHDAY")
        .ok()
        .and_then(|v| chrono::NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
        .or_else(|| chrono::NaiveDate::from_ymd_opt(1970, 1, 1));

    let request = RegisterRequest {
        username,
        password,
        email,
        first_name: std::env::var("SUPERUSER_FIRST_NAME").unwrap_or_else(|_| "Admin".to_string()),
        last_name: std::env::var("SUPERUSER_LAST_NAME").unwrap_or_else(|_| "Admin".to_string()),
        birthday,
    };

    match credentials.provision_superuser(request).await {
        Ok(admin) => info!("👑 관리자 계정 준비 완료: {} ({})", admin.username, admin.full_name()),
        Err(AppError::InvalidFields(fields)) => {
            warn!("관리자 계정을 생성하지 않았습니다: {:?}", fields)
        }
        Err(e) => error!("관리자 계정 생성 실패: {}", e),
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 접근 로그, 경로 정규화 미들웨어를 포함합니다.
async fn start_http_server(services: AppServices) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    display_terminal::print_endpoints(
        &bind_address,
        &[
            ("GET", "/health"),
            ("POST", "/users/register"),
            ("POST", "/users/login"),
            ("POST", "/users/logout"),
            ("POST", "/users/token/refresh"),
            ("PUT", "/users/reset_password"),
            ("PATCH", "/users/update"),
            ("DELETE", "/users/delete"),
            ("GET/POST", "/users/addresses"),
            ("GET/PUT/PATCH/DELETE", "/users/addresses/{id}"),
            ("POST", "/orders/addresses/{id}/complete"),
        ],
    );

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let tokens = web::Data::new(services.tokens);
    let accounts = web::Data::new(services.accounts);
    let addresses = web::Data::new(services.addresses);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(tokens.clone())
            .app_data(accounts.clone())
            .app_data(addresses.clone())
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new().await.map_err(|e| {
        error!("MongoDB 연결 실패: {}", e);
        std::io::Error::other(e)
    })?;
    info!("✅ MongoDB 연결 성공 ({})", database.database_name());

    let redis_client = RedisClient::new().await.map_err(|e| {
        error!("Redis 연결 실패: {}", e);
        std::io::Error::other(e)
    })?;
    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// 프론트엔드 개발 서버와의 통신을 위한 CORS 설정
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
