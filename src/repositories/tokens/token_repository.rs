use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::core::registry::Repository;
use crate::core::AppResult;
use crate::db::Database;
use crate::domain::models::token::{BlacklistedToken, OutstandingToken};
use crate::repositories::{is_duplicate_key, TokenStore};

const OUTSTANDING_COLLECTION: &str = "outstanding_tokens";

/// 리프레시 토큰 수명주기 Repository
///
/// - `outstanding_tokens`: 발급된 모든 리프레시 토큰 (jti unique)
/// - `token_blacklist`: 로그아웃으로 폐기된 토큰 (jti unique)
///
/// 두 컬렉션 모두 `expires_at` TTL 인덱스로 만료된 기록을 MongoDB가 지웁니다.
///
/// 폐기 여부는 Redis에 양성 결과만 캐시합니다.
/// 캐시 TTL은 원래 토큰의 남은 수명이므로 만료 후에는 DB 조회로 돌아갑니다.
#[repository(name = "token", collection = "token_blacklist")]
pub struct TokenRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl TokenRepository {
    fn outstanding(&self) -> Collection<OutstandingToken> {
        self.db.get_database().collection(OUTSTANDING_COLLECTION)
    }

    /// 두 컬렉션 공통 인덱스: jti unique, `expires_at` TTL
    ///
    /// 만료된 토큰은 서명 검증 단계에서 이미 거부되므로 기록이 사라져도 결과가 같습니다.
    fn token_indexes() -> Vec<IndexModel> {
        let jti_unique = IndexModel::builder()
            .keys(doc! { "jti": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("jti_unique".to_string())
                    .build(),
            )
            .build();

        let expiry = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::ZERO)
                    .name("expires_at_ttl".to_string())
                    .build(),
            )
            .build();

        vec![jti_unique, expiry]
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        self.outstanding().create_indexes(Self::token_indexes()).await?;
        self.collection::<BlacklistedToken>()
            .create_indexes(Self::token_indexes())
            .await?;

        log::info!(
            "✅ {}, {} 인덱스 생성 완료",
            OUTSTANDING_COLLECTION,
            self.collection_name()
        );
        Ok(())
    }
}

#[async_trait]
impl TokenStore for TokenRepository {
    async fn record_outstanding(&self, token: OutstandingToken) -> AppResult<()> {
        self.outstanding().insert_one(&token).await?;
        log::debug!("리프레시 토큰 발급 기록 - user_id: {}", token.user_id);
        Ok(())
    }

    async fn is_outstanding(&self, jti: &str) -> AppResult<bool> {
        Ok(self
            .outstanding()
            .find_one(doc! { "jti": jti })
            .await?
            .is_some())
    }

    async fn blacklist(&self, entry: BlacklistedToken) -> AppResult<bool> {
        match self.collection::<BlacklistedToken>().insert_one(&entry).await {
            Ok(_) => {}
            Err(e) if is_duplicate_key(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        }

        if let Err(e) = self
            .redis
            .set_with_expiry(&self.cache_key(&entry.jti), &true, entry.remaining_seconds())
            .await
        {
            log::warn!("폐기 토큰 캐시 저장 실패 - jti: {}, 에러: {}", entry.jti, e);
        }

        log::info!("리프레시 토큰 폐기 - user_id: {}", entry.user_id);
        Ok(true)
    }

    async fn is_blacklisted(&self, jti: &str) -> AppResult<bool> {
        if let Ok(true) = self.redis.exists(&self.cache_key(jti)).await {
            return Ok(true);
        }

        Ok(self
            .collection::<BlacklistedToken>()
            .find_one(doc! { "jti": jti })
            .await?
            .is_some())
    }
}
