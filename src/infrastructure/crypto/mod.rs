pub mod jwt;
pub mod password;

pub use jwt::{create_token, create_token_at, verify_token, JwtConfig, SessionClaims, TokenError};
pub use password::{hash_password, verify_password, PASSWORD_COST};
