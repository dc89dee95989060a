use crate::error::{DbConnectError, Result};
use crate::service::credential_loader::CredentialRecord;
use url::{ParseError, Url};

pub const SCHEME: &str = "postgresql";

/// Fields a credential record must provide, in the order they are looked up.
pub const REQUIRED_FIELDS: [&str; 5] = ["user", "password", "host", "port", "database"];

/// Format `postgresql://{user}:{password}@{host}:{port}/{database}` from a record.
///
/// The first absent field fails with [`DbConnectError::MissingCredential`]. User and password
/// are percent-encoded, so values made of unreserved characters come out unchanged. An empty
/// or malformed host and a non-numeric port fail with [`DbConnectError::InvalidUri`].
pub fn connection_uri(record: &CredentialRecord) -> Result<Url> {
    let field = |key: &'static str| {
        record
            .get(key)
            .map(String::as_str)
            .ok_or(DbConnectError::MissingCredential { key })
    };
    let user = field("user")?;
    let password = field("password")?;
    let host = field("host")?;
    let port = field("port")?;
    let database = field("database")?;

    if host.is_empty() {
        return Err(ParseError::EmptyHost.into());
    }
    let port: u16 = port.trim().parse().map_err(|_| ParseError::InvalidPort)?;

    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };

    // Setters only fail on URLs without a host, which the parse above rules out.
    let mut url = Url::parse(&format!("{SCHEME}://{host}"))?;
    url.set_port(Some(port)).map_err(|_| ParseError::EmptyHost)?;
    url.set_path(&format!("/{database}"));
    url.set_username(user).map_err(|_| ParseError::EmptyHost)?;
    url.set_password(Some(password))
        .map_err(|_| ParseError::EmptyHost)?;
    Ok(url)
}

/// The URI with its password masked, for logs.
pub fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    if masked.password().is_some() {
        let _ = masked.set_password(Some("***"));
    }
    masked.to_string()
}
