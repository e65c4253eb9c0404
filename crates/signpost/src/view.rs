//! Key/value view backed by MiniJinja templates.
//!
//! Handlers collect values with [`View::set`] and render a named template
//! from the template directory with all of them in scope:
//!
//! ```rust
//! use signpost::View;
//!
//! let mut view = View::new("views");
//! view.set("name", "Bob").unwrap();
//! assert_eq!(view.render_str("Hello {{ name }}").unwrap(), "Hello Bob");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Unable to serialize view value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Values plus a template environment rooted at one directory.
pub struct View {
    dir: PathBuf,
    env: Environment<'static>,
    values: BTreeMap<String, serde_json::Value>,
}

impl View {
    /// Creates a view loading templates from `dir`.
    ///
    /// The directory is read lazily, on the first render of each template.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&dir));
        Self {
            dir,
            env,
            values: BTreeMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores a value, replacing any previous one under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<(), ViewError> {
        let value = serde_json::to_value(value)?;
        self.values.insert(key.into(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    pub fn values(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.values
    }

    /// Renders `<dir>/<name>` with every stored value in scope.
    pub fn render(&self, name: &str) -> Result<String, ViewError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(&self.values)?)
    }

    /// Renders an inline template with every stored value in scope.
    pub fn render_str(&self, source: &str) -> Result<String, ViewError> {
        Ok(self.env.render_str(source, &self.values)?)
    }

    /// Access to the underlying environment, for custom filters and globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("dir", &self.dir)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
