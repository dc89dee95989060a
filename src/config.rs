//! Defaults for the connection and binding helpers.
//!
//! Nothing here is read implicitly. [`crate::service::connect_with`] and
//! [`crate::notebook::connect_and_bind_with`] take a `&Config`; the plain helpers build one
//! from their arguments over [`Config::default`]. Callers that want settings from the
//! environment call [`Config::load`] themselves.

use crate::db::table::{InsertMethod, InsertOptions};
use crate::error::Result;
use crate::notebook::sql_magic::{DEFAULT_CONN_NAME, EXTENSION_NAME};
use crate::service::credential_loader::{DEFAULT_FALLBACK_PREFIX, DEFAULT_SECTION};
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "DBCONNECT_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential section to read.
    pub section: String,
    /// Global the connection is bound to in a shell.
    pub conn_name: String,
    /// Shell extension loaded before binding.
    pub extension: String,
    /// Directory the credential path is re-rooted under for the single retry.
    pub fallback_prefix: PathBuf,
    pub insert_method: InsertMethod,
    pub chunksize: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            conn_name: DEFAULT_CONN_NAME.to_string(),
            extension: EXTENSION_NAME.to_string(),
            fallback_prefix: PathBuf::from(DEFAULT_FALLBACK_PREFIX),
            insert_method: InsertMethod::default(),
            chunksize: None,
        }
    }
}

impl Config {
    /// Defaults with another credential section.
    pub fn for_section(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            ..Self::default()
        }
    }

    /// Built-in defaults, overridden by `DBCONNECT_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn insert_options(&self) -> InsertOptions {
        InsertOptions {
            method: self.insert_method,
            chunksize: self.chunksize,
        }
    }
}
