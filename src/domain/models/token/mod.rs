pub mod token;

pub use token::{BlacklistReason, BlacklistedToken, OutstandingToken, TokenClaims, TokenPair, TokenType};
