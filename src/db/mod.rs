//! MongoDB 연결 관리
//!
//! 애플리케이션 전체에서 하나의 `Client`를 공유합니다.
//! `main`에서 생성해 `ServiceLocator::set()`으로 등록하면
//! `#[repository]` 리포지토리의 `db` 필드로 주입됩니다.
//!
//! ## Unit of Work
//!
//! 여러 문서를 함께 바꾸는 작업(중복 확인 후 가입, 사용자+배송지 삭제, 주문 카운터 증가)은
//! [`Database::begin_unit_of_work`]가 돌려주는 세션 안에서 실행합니다.
//! `commit_transaction()` 없이 세션이 drop 되면 드라이버가 트랜잭션을 중단합니다.
//! 트랜잭션은 레플리카 셋(단일 노드 포함)에서만 동작합니다.
//!
//! 같은 문서를 건드리는 트랜잭션이 겹치면 서버는 기다리지 않고 WriteConflict를 돌려줍니다.
//! 이런 오류에는 `TransientTransactionError` 라벨이 붙으므로 [`retry_transient`]로
//! 작업 단위 전체를 다시 실행합니다.

use std::env;
use std::future::Future;

use log::info;
use mongodb::error::TRANSIENT_TRANSACTION_ERROR;
use mongodb::{options::ClientOptions, Client, ClientSession};

/// 작업 단위 최대 실행 횟수
pub const TRANSACTION_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// `MONGODB_URI`, `DATABASE_NAME` 환경 변수로 연결하고 ping으로 확인
    pub async fn new() -> Result<Self, mongodb::error::Error> {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/?replicaSet=rs0".to_string());

        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| "delivery_accounts_dev".to_string());

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("delivery_account_service".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// 트랜잭션이 시작된 세션 반환
    pub async fn begin_unit_of_work(&self) -> Result<ClientSession, mongodb::error::Error> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(session)
    }
}

/// WriteConflict 등 처음부터 다시 실행하면 성공할 수 있는 트랜잭션 오류
pub fn is_transient_transaction_error(err: &mongodb::error::Error) -> bool {
    err.contains_label(TRANSIENT_TRANSACTION_ERROR)
}

/// 일시적 오류면 `unit`을 최대 `attempts`번까지 다시 실행
///
/// ```rust,ignore
/// let user = retry_transient(TRANSACTION_ATTEMPTS, is_transient_transaction_error, || {
///     self.insert_once(user.clone())
/// })
/// .await?;
/// ```
pub async fn retry_transient<T, E, F, Fut, P>(attempts: usize, is_transient: P, mut unit: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut attempt = 1;

    loop {
        match unit().await {
            Err(e) if attempt < attempts && is_transient(&e) => {
                log::warn!("일시적 트랜잭션 오류, 다시 실행 ({}/{})", attempt, attempts);
                attempt += 1;
            }
            result => return result,
        }
    }
}
