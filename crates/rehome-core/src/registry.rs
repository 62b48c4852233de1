//! Module registry: bare module name → canonical folder
//!
//! Built once per run and shared read-only between every file being
//! processed. Lookup is exact and case-sensitive.

use rehome_foundation::{ModuleRecord, RehomeError, RehomeResult};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    folders: BTreeMap<String, String>,
}

impl ModuleRegistry {
    /// Build a registry from records.
    ///
    /// The same name listed twice with the same folder is accepted once; the
    /// same name listed under two different folders is a
    /// [`RehomeError::RegistryNameCollision`].
    pub fn from_records<I>(records: I) -> RehomeResult<Self>
    where
        I: IntoIterator<Item = ModuleRecord>,
    {
        let mut folders: BTreeMap<String, String> = BTreeMap::new();

        for record in records {
            validate_record(&record)?;

            match folders.get(&record.name) {
                Some(existing) if *existing == record.canonical_folder => {
                    debug!(module = %record.name, "Duplicate registry entry ignored");
                }
                Some(existing) => {
                    return Err(RehomeError::name_collision(
                        record.name,
                        existing.clone(),
                        record.canonical_folder,
                    ));
                }
                None => {
                    folders.insert(record.name, record.canonical_folder);
                }
            }
        }

        Ok(Self { folders })
    }

    /// Canonical folder of `name`, if registered
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.folders.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

fn validate_record(record: &ModuleRecord) -> RehomeResult<()> {
    if record.name.is_empty() || record.name.contains('/') {
        return Err(RehomeError::config(format!(
            "Invalid module name '{}': must be a bare, non-empty name",
            record.name
        )));
    }
    if record.canonical_folder.is_empty() || record.canonical_folder.contains('/') {
        return Err(RehomeError::config(format!(
            "Invalid folder '{}' for module '{}': must be a single folder name",
            record.canonical_folder, record.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(&str, &str)]) -> RehomeResult<ModuleRegistry> {
        ModuleRegistry::from_records(
            entries
                .iter()
                .map(|(name, folder)| ModuleRecord::new(*name, *folder)),
        )
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let reg = registry(&[("Button", "common"), ("SideNavigation", "view")]).unwrap();
        assert_eq!(reg.lookup("Button"), Some("common"));
        assert_eq!(reg.lookup("button"), None);
        assert_eq!(reg.lookup("Butto"), None);
        assert_eq!(reg.lookup("SideNavigation"), Some("view"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_collision_is_rejected() {
        let err = registry(&[("Button", "common"), ("Button", "view")]).unwrap_err();
        match err {
            RehomeError::RegistryNameCollision {
                name,
                first_folder,
                second_folder,
            } => {
                assert_eq!(name, "Button");
                assert_eq!(first_folder, "common");
                assert_eq!(second_folder, "view");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_in_same_folder_is_accepted() {
        let reg = registry(&[("Button", "common"), ("Button", "common")]).unwrap();
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_invalid_names_are_config_errors() {
        assert!(matches!(
            registry(&[("", "common")]),
            Err(RehomeError::Config { .. })
        ));
        assert!(matches!(
            registry(&[("common/Button", "common")]),
            Err(RehomeError::Config { .. })
        ));
        assert!(matches!(
            registry(&[("Button", "a/b")]),
            Err(RehomeError::Config { .. })
        ));
    }
}
