pub mod connector;
pub mod credential_loader;

pub use connector::{connect, connect_with};
pub use credential_loader::{
    CredentialRecord, DEFAULT_SECTION, fetch_credentials, load_with_fallback,
};
