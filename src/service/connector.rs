use crate::config::Config;
use crate::db::Engine;
use crate::db::uri::{connection_uri, redact};
use crate::error::Result;
use crate::service::credential_loader::load_with_fallback_under;
use std::path::Path;
use tracing::info;

/// Load credentials from `path` (falling back to `../path`) and open an autocommit connection.
///
/// A record missing a required field fails before any network I/O.
pub async fn connect(path: impl AsRef<Path>, section: &str) -> Result<Engine> {
    connect_with(path, &Config::for_section(section)).await
}

/// [`connect`] reading the section and the fallback prefix from `cfg`.
pub async fn connect_with(path: impl AsRef<Path>, cfg: &Config) -> Result<Engine> {
    let path = path.as_ref();
    let record = load_with_fallback_under(path, &cfg.section, &cfg.fallback_prefix)?;
    let url = connection_uri(&record)?;
    info!(url = %redact(&url), section = %cfg.section, "connecting");
    Engine::connect(&url).await
}
