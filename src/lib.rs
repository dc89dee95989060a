pub mod config;
pub mod db;
pub mod error;
pub mod notebook;
pub mod service;
pub mod types;

pub use config::Config;
pub use db::{Engine, InsertMethod, InsertOptions, SqlTable, connection_uri};
pub use error::{DbConnectError, Result};
pub use notebook::{
    InteractiveShell, Shell, bind_connection, connect_and_bind, connect_and_bind_with,
    register_extension,
};
pub use service::{CredentialRecord, DEFAULT_SECTION, connect, connect_with, fetch_credentials};
pub use types::SqlValue;
