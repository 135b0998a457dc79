pub mod user;

pub use user::{ProfileChanges, Role, User};
