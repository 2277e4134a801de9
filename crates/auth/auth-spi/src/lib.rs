//! Authentication Service Provider Interface
//!
//! Where credentials are checked and which secrets sign tokens are both
//! pluggable, so rotating a secret or moving users out of the environment
//! does not touch the token logic.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{CredentialStore, SecretProvider};
pub use error::{AuthError, Result};
pub use model::{Claims, IssuedToken, TOKEN_TYPE};
