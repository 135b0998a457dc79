pub mod token_repository;

pub use token_repository::TokenRepository;
