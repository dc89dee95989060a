use crate::error::{DbConnectError, Result};
use crate::notebook::shell::{Extension, Shell};
use std::any::Any;

pub const EXTENSION_NAME: &str = "sql_magic";
pub const CONFIG_CLASS: &str = "SQL";
/// Global the extension runs queries against.
pub const CONN_NAME_KEY: &str = "SQL.conn_name";
pub const DEFAULT_CONN_NAME: &str = "conn";

/// The SQL convenience extension.
pub struct SqlMagic;

impl Extension for SqlMagic {
    fn name(&self) -> &'static str {
        EXTENSION_NAME
    }

    fn config_class(&self) -> Option<&'static str> {
        Some(CONFIG_CLASS)
    }

    fn config_defaults(&self) -> Vec<(&'static str, &'static str)> {
        vec![("conn_name", DEFAULT_CONN_NAME)]
    }
}

impl SqlMagic {
    /// Name of the global the extension currently resolves its connection from.
    pub fn active_connection_name<S: Shell>(shell: &S) -> Result<&str> {
        if !shell.is_extension_loaded(EXTENSION_NAME) {
            return Err(DbConnectError::UnknownConfigurable(CONFIG_CLASS.to_string()));
        }
        Ok(shell.config(CONN_NAME_KEY).unwrap_or(DEFAULT_CONN_NAME))
    }

    /// The connection object the extension would run a query with.
    pub fn active_connection<T: Any, S: Shell>(shell: &mut S) -> Result<&mut T> {
        let name = Self::active_connection_name(shell)?.to_string();
        shell.global_mut::<T>(&name)
    }
}
