use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DbConnectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("INI parse error: {0}")]
    IniParse(#[from] ini::ParseError),

    #[error("section [{section}] not found in {}", .path.display())]
    SectionNotFound { section: String, path: PathBuf },

    #[error("option '{key}' given twice in section [{section}] of {}", .path.display())]
    DuplicateOption {
        section: String,
        key: String,
        path: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("missing credential field '{key}'")]
    MissingCredential { key: &'static str },

    #[error("URL parse error: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("no extension named '{0}' is available")]
    ExtensionNotFound(String),

    #[error("no loaded extension provides configurable '{0}'")]
    UnknownConfigurable(String),

    #[error("name '{0}' is not defined in the user namespace")]
    GlobalNotFound(String),

    #[error("global '{0}' has an unexpected type")]
    GlobalTypeMismatch(String),

    #[error("table {table} has no columns")]
    NoColumns { table: String },

    #[error("no rows to insert into {table}")]
    NoRows { table: String },

    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("statement needs {count} parameters, the limit is {limit}")]
    TooManyParameters { count: usize, limit: usize },
}

impl From<ini::Error> for DbConnectError {
    fn from(e: ini::Error) -> Self {
        match e {
            ini::Error::Io(io) => DbConnectError::Io(io),
            ini::Error::Parse(parse) => DbConnectError::IniParse(parse),
        }
    }
}

impl DbConnectError {
    /// Errors raised before any network I/O, caused by the credential file or its content.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DbConnectError::Io(_)
                | DbConnectError::IniParse(_)
                | DbConnectError::SectionNotFound { .. }
                | DbConnectError::DuplicateOption { .. }
                | DbConnectError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DbConnectError>;
