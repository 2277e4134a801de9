//! Authentication contracts.

mod credential_store;
mod secret_provider;

pub use credential_store::CredentialStore;
pub use secret_provider::SecretProvider;
