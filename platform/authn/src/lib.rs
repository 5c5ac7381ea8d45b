//! Platform authentication helpers.
//!
//! Stateless JWT sessions with a sliding refresh window, and argon2 password
//! hashing for locally stored credentials.

mod jwt;
mod password;

pub use jwt::{Claims, JwtConfig, JwtService, TokenError, extract_token};
pub use password::{PasswordError, hash_password, verify_password};
