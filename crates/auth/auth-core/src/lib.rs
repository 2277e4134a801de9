//! Authentication Core
//!
//! - [`StaticCredentials`]: one configured username/password pair
//! - [`StaticSecrets`]: a fixed signing secret plus retired ones still accepted
//! - [`TokenService`]: issues and verifies HS256 bearer tokens
//! - [`AuthService`]: login and request authorization

mod credentials;
mod secrets;
mod service;
mod token;

pub use auth_spi::*;
pub use credentials::StaticCredentials;
pub use secrets::StaticSecrets;
pub use service::AuthService;
pub use token::{TokenService, DEFAULT_LIFETIME_SECS};
