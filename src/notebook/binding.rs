use crate::config::Config;
use crate::error::Result;
use crate::notebook::shell::Shell;
use crate::notebook::sql_magic::{CONN_NAME_KEY, DEFAULT_CONN_NAME, EXTENSION_NAME};
use crate::service::connector::connect_with;
use std::any::Any;
use std::path::Path;
use tracing::info;

/// Load the SQL extension into `shell`.
pub fn register_extension<S: Shell>(shell: &mut S) -> Result<()> {
    shell.load_extension(EXTENSION_NAME)
}

/// Put `connection` into the user namespace under `name`.
///
/// `SQL.conn_name` is always set to `conn`, whatever `name` is; binding under another name
/// leaves the extension looking for a global called `conn`. The global is stored even when
/// the extension is not loaded, in which case the config update fails.
pub fn bind_connection<S, C>(shell: &mut S, connection: C, name: &str) -> Result<()>
where
    S: Shell,
    C: Any + Send,
{
    shell.set_global(name, Box::new(connection));
    shell.set_config(CONN_NAME_KEY, DEFAULT_CONN_NAME)?;
    info!(global = name, "connection bound");
    Ok(())
}

/// Connect with the credentials in `path`/`section`, load the SQL extension and bind the
/// connection under `name`, then report the name on the shell output.
pub async fn connect_and_bind<S: Shell>(
    shell: &mut S,
    path: impl AsRef<Path>,
    section: &str,
    name: &str,
) -> Result<()> {
    let cfg = Config {
        conn_name: name.to_string(),
        ..Config::for_section(section)
    };
    connect_and_bind_with(shell, path, &cfg).await
}

/// [`connect_and_bind`] taking the section, fallback prefix, extension and global name
/// from `cfg`.
pub async fn connect_and_bind_with<S: Shell>(
    shell: &mut S,
    path: impl AsRef<Path>,
    cfg: &Config,
) -> Result<()> {
    let connection = connect_with(path, cfg).await?;
    shell.load_extension(&cfg.extension)?;
    bind_connection(shell, connection, &cfg.conn_name)?;
    shell.write_line(&format!(
        "Connection object assigned to `{}`",
        cfg.conn_name
    ));
    Ok(())
}
