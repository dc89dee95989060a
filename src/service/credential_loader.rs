use crate::error::{DbConnectError, Result};
use ini::{Ini, ParseOption, Properties};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Section read when the caller does not name one.
pub const DEFAULT_SECTION: &str = "database_creds";

/// Directory prepended to a credential path for the single retry.
pub const DEFAULT_FALLBACK_PREFIX: &str = "..";

/// Section whose entries every other section inherits.
const DEFAULTS_SECTION: &str = "DEFAULT";

/// Field name to value, exactly as found in one credential section.
pub type CredentialRecord = HashMap<String, String>;

/// Read `section` of the INI file at `path` into a [`CredentialRecord`].
///
/// Option names are lower-cased, values are kept verbatim. Entries of a `[DEFAULT]`
/// section are included unless the section overrides them. An option given twice in one
/// section, in any letter case, is rejected. Field presence is not checked here; see
/// [`crate::db::uri::connection_uri`].
pub fn fetch_credentials(path: &Path, section: &str) -> Result<CredentialRecord> {
    let opt = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let conf = Ini::load_from_file_opt(path, opt)?;

    let props = conf
        .section(Some(section))
        .ok_or_else(|| DbConnectError::SectionNotFound {
            section: section.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut record = CredentialRecord::new();
    if section != DEFAULTS_SECTION {
        if let Some(defaults) = conf.section(Some(DEFAULTS_SECTION)) {
            record.extend(unique_options(defaults, DEFAULTS_SECTION, path)?);
        }
    }
    record.extend(unique_options(props, section, path)?);

    debug!(path = %path.display(), section, fields = record.len(), "credential section read");
    Ok(record)
}

fn unique_options(props: &Properties, section: &str, path: &Path) -> Result<CredentialRecord> {
    let mut options = CredentialRecord::new();
    for (key, value) in props.iter() {
        let key = key.to_ascii_lowercase();
        if options.contains_key(&key) {
            return Err(DbConnectError::DuplicateOption {
                section: section.to_string(),
                key,
                path: path.to_path_buf(),
            });
        }
        options.insert(key, value.to_string());
    }
    Ok(options)
}

/// Path tried when `path` cannot be loaded: the same path one directory up.
pub fn fallback_path(path: &Path) -> PathBuf {
    fallback_path_under(Path::new(DEFAULT_FALLBACK_PREFIX), path)
}

/// `path` re-rooted under `prefix`. Absolute paths are returned as they are.
pub fn fallback_path_under(prefix: &Path, path: &Path) -> PathBuf {
    prefix.join(path)
}

/// Load credentials, retrying once from [`fallback_path`] if the first attempt fails.
///
/// When both attempts fail the error of the retry is returned.
pub fn load_with_fallback(path: &Path, section: &str) -> Result<CredentialRecord> {
    load_with_fallback_under(path, section, Path::new(DEFAULT_FALLBACK_PREFIX))
}

/// [`load_with_fallback`] with the retry rooted under `prefix` instead of `..`.
pub fn load_with_fallback_under(
    path: &Path,
    section: &str,
    prefix: &Path,
) -> Result<CredentialRecord> {
    match fetch_credentials(path, section) {
        Ok(record) => {
            info!(path = %path.display(), section, "credentials loaded");
            Ok(record)
        }
        Err(first) => {
            let retry = fallback_path_under(prefix, path);
            warn!(
                path = %path.display(),
                retry = %retry.display(),
                error = %first,
                "failed to load credentials; retrying under fallback prefix"
            );
            fetch_credentials(&retry, section)
                .inspect(|_| {
                    info!(path = %retry.display(), section, "credentials loaded");
                })
                .inspect_err(|e| {
                    error!(path = %retry.display(), section, error = %e, "can't find credentials");
                })
        }
    }
}
