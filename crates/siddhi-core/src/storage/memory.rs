use crate::form::{lookup, upsert_in_place};
use crate::resource::{sample_catalog, Resource};

use super::error::StorageError;
use super::ResourceStore;

/// In-process resource store backed by a `Vec`.
///
/// Nothing is written to disk; the catalogue lives as long as the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    resources: Vec<Resource>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the sample catalogue.
    pub fn seeded() -> Self {
        Self::with_resources(sample_catalog())
    }

    /// Creates a store from existing resources. Later duplicates of an id
    /// replace earlier ones.
    pub fn with_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut store = Self::new();
        for resource in resources {
            upsert_in_place(&mut store.resources, resource);
        }
        store
    }

    /// Borrows the resources without cloning.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceStore for MemoryStore {
    fn list(&self) -> Result<Vec<Resource>, StorageError> {
        Ok(self.resources.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Resource>, StorageError> {
        Ok(lookup(id, &self.resources).into_option())
    }

    fn save(&mut self, resource: Resource) -> Result<bool, StorageError> {
        if resource.id.trim().is_empty() {
            return Err(StorageError::EmptyId);
        }
        Ok(upsert_in_place(&mut self.resources, resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MediumType;

    #[test]
    fn test_seeded() {
        let store = MemoryStore::seeded();
        assert_eq!(store.len(), 3);
        assert!(store.get("RES002").unwrap().is_some());
        assert!(store.get("RES404").unwrap().is_none());
        assert_eq!(store.get(" RES002 ").unwrap(), store.get("RES002").unwrap());
    }

    #[test]
    fn test_save_reports_update() {
        let mut store = MemoryStore::seeded();
        let added = Resource::object("RES010", "X", MediumType::Physical, "RES001");

        assert!(!store.save(added.clone()).unwrap());
        assert!(store.save(added).unwrap());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_rejects_empty_id() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.save(Resource::draft(" ")),
            Err(StorageError::EmptyId)
        ));
        assert!(store.is_empty());
    }
}
