use crate::error::{DbConnectError, Result};
use crate::notebook::sql_magic::SqlMagic;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// Add-on loaded into a shell by name.
pub trait Extension: Send + Sync {
    fn name(&self) -> &'static str;

    /// Config class this extension owns, e.g. `SQL` for `SQL.conn_name`.
    fn config_class(&self) -> Option<&'static str> {
        None
    }

    /// `(option, value)` pairs applied under [`Extension::config_class`] on load.
    fn config_defaults(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}

/// The parts of an interactive session the binding code touches.
pub trait Shell {
    /// Load an extension by name. Loading one twice is a no-op.
    fn load_extension(&mut self, name: &str) -> Result<()>;

    fn is_extension_loaded(&self, name: &str) -> bool;

    /// Insert or replace an entry of the user namespace.
    fn set_global(&mut self, name: &str, value: Box<dyn Any + Send>);

    fn global_any(&self, name: &str) -> Option<&(dyn Any + Send)>;

    fn global_any_mut(&mut self, name: &str) -> Option<&mut (dyn Any + Send)>;

    /// Set `Class.option`. The class must belong to a loaded extension.
    fn set_config(&mut self, key: &str, value: &str) -> Result<()>;

    fn config(&self, key: &str) -> Option<&str>;

    /// Print a line to the session output.
    fn write_line(&mut self, line: &str);

    fn global<T: Any>(&self, name: &str) -> Result<&T> {
        self.global_any(name)
            .ok_or_else(|| DbConnectError::GlobalNotFound(name.to_string()))?
            .downcast_ref::<T>()
            .ok_or_else(|| DbConnectError::GlobalTypeMismatch(name.to_string()))
    }

    fn global_mut<T: Any>(&mut self, name: &str) -> Result<&mut T> {
        self.global_any_mut(name)
            .ok_or_else(|| DbConnectError::GlobalNotFound(name.to_string()))?
            .downcast_mut::<T>()
            .ok_or_else(|| DbConnectError::GlobalTypeMismatch(name.to_string()))
    }
}

/// In-process session: a user namespace, extensions and a config table.
///
/// `new()` makes [`SqlMagic`] available; `empty()` starts with no extensions at all.
pub struct InteractiveShell {
    user_ns: HashMap<String, Box<dyn Any + Send>>,
    available: HashMap<&'static str, Box<dyn Extension>>,
    loaded: BTreeSet<&'static str>,
    config: BTreeMap<String, String>,
    output: Vec<String>,
}

impl Default for InteractiveShell {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractiveShell {
    pub fn new() -> Self {
        let mut shell = Self::empty();
        shell.make_available(SqlMagic);
        shell
    }

    pub fn empty() -> Self {
        Self {
            user_ns: HashMap::new(),
            available: HashMap::new(),
            loaded: BTreeSet::new(),
            config: BTreeMap::new(),
            output: Vec::new(),
        }
    }

    /// Make `ext` loadable by name.
    pub fn make_available(&mut self, ext: impl Extension + 'static) {
        self.available.insert(ext.name(), Box::new(ext));
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn globals(&self) -> impl Iterator<Item = &str> {
        self.user_ns.keys().map(String::as_str)
    }

    fn owns_class(&self, class: &str) -> bool {
        self.loaded.iter().any(|name| {
            self.available
                .get(name)
                .and_then(|ext| ext.config_class())
                == Some(class)
        })
    }
}

impl Shell for InteractiveShell {
    fn load_extension(&mut self, name: &str) -> Result<()> {
        let ext = self
            .available
            .get(name)
            .ok_or_else(|| DbConnectError::ExtensionNotFound(name.to_string()))?;
        let key = ext.name();
        if self.loaded.contains(key) {
            debug!(extension = key, "extension already loaded");
            return Ok(());
        }
        if let Some(class) = ext.config_class() {
            for (option, value) in ext.config_defaults() {
                self.config
                    .entry(format!("{class}.{option}"))
                    .or_insert_with(|| value.to_string());
            }
        }
        self.loaded.insert(key);
        info!(extension = key, "extension loaded");
        Ok(())
    }

    fn is_extension_loaded(&self, name: &str) -> bool {
        self.loaded.contains(name)
    }

    fn set_global(&mut self, name: &str, value: Box<dyn Any + Send>) {
        self.user_ns.insert(name.to_string(), value);
    }

    fn global_any(&self, name: &str) -> Option<&(dyn Any + Send)> {
        self.user_ns.get(name).map(|v| &**v)
    }

    fn global_any_mut(&mut self, name: &str) -> Option<&mut (dyn Any + Send)> {
        self.user_ns.get_mut(name).map(|v| &mut **v)
    }

    fn set_config(&mut self, key: &str, value: &str) -> Result<()> {
        let class = key.split_once('.').map(|(class, _)| class).unwrap_or(key);
        if !self.owns_class(class) {
            return Err(DbConnectError::UnknownConfigurable(class.to_string()));
        }
        self.config.insert(key.to_string(), value.to_string());
        debug!(key, value, "config set");
        Ok(())
    }

    fn config(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
