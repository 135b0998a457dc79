//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 트레이트(`UserStore`, `AddressStore`, `TokenStore`)에만 의존하며,
//! `main`에서 한 번 조립된 뒤 `web::Data`로 핸들러에 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryStore::new());
//! let tokens = TokenService::new(store.clone(), JwtSettings::from_env());
//! let credentials = CredentialService::new(store.clone(), PasswordConfig::bcrypt_cost())?;
//! let accounts = AccountService::new(store.clone(), credentials, tokens.clone());
//! let addresses = AddressService::new(store);
//! ```

pub mod users;
pub mod auth;
pub mod addresses;
