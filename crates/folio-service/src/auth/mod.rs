//! Login sessions and password hashing.

pub mod password;
pub mod service;

pub use password::PasswordHasher;
pub use service::AuthService;
