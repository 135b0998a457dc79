//! 인증 관련 설정
//!
//! JWT 서명 키와 토큰 수명을 환경 변수에서 읽습니다.
//! 서버 기동 시 한 번 [`JwtSettings`]로 고정되어 `TokenService`에 주입되며,
//! 이후에는 읽기 전용으로만 사용됩니다.
//!
//! | 변수 | 기본값 |
//! |------|--------|
//! | `JWT_SECRET` | 개발용 기본 키 (경고 로그) |
//! | `JWT_ACCESS_EXPIRATION_MINUTES` | 5 |
//! | `JWT_REFRESH_EXPIRATION_DAYS` | 1 |

use std::env;

use chrono::Duration;

const DEFAULT_ACCESS_MINUTES: i64 = 5;
const DEFAULT_REFRESH_DAYS: i64 = 1;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "delivery-account-dev-secret".to_string()
        })
    }

    /// 액세스 토큰 수명 (분)
    pub fn access_expiration_minutes() -> i64 {
        parse_positive("JWT_ACCESS_EXPIRATION_MINUTES", DEFAULT_ACCESS_MINUTES)
    }

    /// 리프레시 토큰 수명 (일)
    pub fn refresh_expiration_days() -> i64 {
        parse_positive("JWT_REFRESH_EXPIRATION_DAYS", DEFAULT_REFRESH_DAYS)
    }
}

fn parse_positive(key: &str, default: i64) -> i64 {
    match env::var(key).ok().and_then(|v| v.parse::<i64>().ok()) {
        Some(value) if value > 0 => value,
        Some(value) => {
            log::warn!("{}={} 은(는) 유효하지 않습니다. 기본값 {} 사용", key, value, default);
            default
        }
        None => default,
    }
}

/// 서명 키와 토큰 수명 묶음 (기동 후 불변)
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// 환경 변수에서 설정을 읽어 고정
    pub fn from_env() -> Self {
        Self::new(
            JwtConfig::secret(),
            Duration::minutes(JwtConfig::access_expiration_minutes()),
            Duration::days(JwtConfig::refresh_expiration_days()),
        )
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"***")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        if env::var("JWT_ACCESS_EXPIRATION_MINUTES").is_err() {
            assert_eq!(JwtConfig::access_expiration_minutes(), 5);
        }
        if env::var("JWT_REFRESH_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::refresh_expiration_days(), 1);
        }
    }

    #[test]
    fn test_parse_positive_falls_back() {
        assert_eq!(parse_positive("DELIVERY_TEST_UNSET_VARIABLE", 42), 42);
    }

    #[test]
    fn test_debug_hides_secret() {
        let settings = JwtSettings::new("super-secret", Duration::minutes(5), Duration::days(1));
        let rendered = format!("{:?}", settings);

        assert!(!rendered.contains("super-secret"));
        assert_eq!(settings.secret(), b"super-secret");
    }
}
