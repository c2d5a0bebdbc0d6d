//! Authentication: password hashing, access/refresh tokens, and the
//! register/login/refresh flow.

pub mod extractor;
pub mod handlers;
pub mod password;
mod service;
pub mod token;

pub use extractor::AuthenticatedUser;
pub use password::PasswordHasher;
pub use service::{AuthService, TokenPair};
pub use token::{Claims, TokenCodec, TokenKind};
