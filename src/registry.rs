//! Known-persons registry and administrator list.
//!
//! Both are JSON arrays maintained outside this crate and loaded read-only:
//!
//! ```text
//! students.json  [{"first_name": "Иван", "last_name": "Иванов", "telegram": "@ivanov", "chat_id": 123}, ...]
//! admins.json    [{"username": "@ivanov"}, ...]
//! ```

use crate::KnownPerson;
use serde::Deserialize;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading a registry or admin list.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only snapshot of the known persons, in file order.
///
/// Dereferences to `[KnownPerson]`, so it can be passed anywhere a registry
/// slice is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    people: Vec<KnownPerson>,
}

impl Registry {
    pub fn new(people: Vec<KnownPerson>) -> Self {
        Registry { people }
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Ok(Registry { people: serde_json::from_str(json)? })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let registry = Self::from_json(&read(path.as_ref())?)?;
        tracing::debug!(path = %path.as_ref().display(), entries = registry.len(), "registry loaded");
        Ok(registry)
    }

    pub fn as_slice(&self) -> &[KnownPerson] {
        &self.people
    }

    /// Attach a delivery id to the first person whose handle is `@username`.
    ///
    /// `username` is given without the leading `@`. Returns whether anyone
    /// matched; the file on disk is left untouched.
    pub fn set_delivery_id(&mut self, username: &str, id: impl Into<String>) -> bool {
        let handle = format!("@{username}");
        let Some(person) = self.people.iter_mut().find(|p| p.handle.as_deref() == Some(handle.as_str())) else {
            tracing::debug!(%handle, "no registry entry for delivery id");
            return false;
        };
        person.delivery_id = Some(id.into());
        true
    }
}

impl Deref for Registry {
    type Target = [KnownPerson];

    fn deref(&self) -> &[KnownPerson] {
        &self.people
    }
}

/// An administrator allowed to publish announcements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Admin {
    /// Username with the leading `@`.
    pub username: String,
}

pub fn load_admins(path: impl AsRef<Path>) -> Result<Vec<Admin>, RegistryError> {
    Ok(serde_json::from_str(&read(path.as_ref())?)?)
}

fn read(path: &Path) -> Result<String, RegistryError> {
    std::fs::read_to_string(path).map_err(|source| RegistryError::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PersonRecord, resolve};

    const STUDENTS: &str = r#"[
        {"first_name": "Иван", "middle_name": "Петрович", "last_name": "Иванов", "telegram": "@ivanov", "chat_id": 101},
        {"first_name": "Мария", "middle_name": null, "last_name": "Петрова", "telegram": "@petrova", "chat_id": null}
    ]"#;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("vestnik-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_students_in_order() {
        let registry = Registry::from_json(STUDENTS).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry[0].handle.as_deref(), Some("@ivanov"));
        assert_eq!(registry[0].delivery_id.as_deref(), Some("101"));
        assert_eq!(registry[1].middle_name, None);
        assert_eq!(registry[1].delivery_id, None);
    }

    #[test]
    fn registry_derefs_to_a_slice_for_resolution() {
        let registry = Registry::from_json(STUDENTS).unwrap();
        let record = PersonRecord { first: Some("Мария".into()), ..Default::default() };
        let found = resolve(&record, &registry).unwrap();
        assert_eq!(found.last_name.as_deref(), Some("Петрова"));
        assert_eq!(registry.as_slice().len(), 2);
    }

    #[test]
    fn delivery_id_goes_to_the_first_matching_handle() {
        let mut registry = Registry::from_json(
            r#"[
                {"first_name": "Иван", "last_name": "Иванов", "telegram": "@ivanov"},
                {"first_name": "Пётр", "last_name": "Иванов", "telegram": "@ivanov"},
                {"first_name": "Мария", "last_name": "Петрова", "telegram": "@petrova"}
            ]"#,
        )
        .unwrap();

        assert!(registry.set_delivery_id("ivanov", "555"));
        assert_eq!(registry[0].delivery_id.as_deref(), Some("555"));
        assert_eq!(registry[1].delivery_id, None);

        assert!(registry.set_delivery_id("petrova", "777"));
        assert_eq!(registry[2].delivery_id.as_deref(), Some("777"));

        assert!(!registry.set_delivery_id("@petrova", "1"));
        assert!(!registry.set_delivery_id("nobody", "1"));
        assert_eq!(registry[2].delivery_id.as_deref(), Some("777"));
    }

    #[test]
    fn loads_from_disk() {
        let path = temp_file("students.json", STUDENTS);
        let registry = Registry::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Registry::load("/nonexistent/vestnik/students.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/vestnik/students.json"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Registry::from_json("{not json"), Err(RegistryError::Json(_))));
        assert!(matches!(Registry::from_json(r#"{"first_name": "Иван"}"#), Err(RegistryError::Json(_))));
    }

    #[test]
    fn loads_admins() {
        let path = temp_file("admins.json", r#"[{"username": "@boss"}, {"username": "@deputy"}]"#);
        let admins = load_admins(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(admins, vec![Admin { username: "@boss".into() }, Admin { username: "@deputy".into() }]);
    }
}
