mod error;
mod memory;

pub use error::StorageError;
pub use memory::MemoryStore;

use crate::form::lookup;
use crate::resource::Resource;

/// Trait for resource store backends.
///
/// The store keeps resources in insertion order with unique ids. It does
/// not check parent references; that happens at submission time.
pub trait ResourceStore {
    /// Lists every known resource in store order.
    fn list(&self) -> Result<Vec<Resource>, StorageError>;

    /// Gets a resource by id, matching the way `lookup` does.
    fn get(&self, id: &str) -> Result<Option<Resource>, StorageError> {
        Ok(lookup(id, &self.list()?).into_option())
    }

    /// Inserts or replaces a resource. Returns `true` if an existing entry
    /// was replaced.
    fn save(&mut self, resource: Resource) -> Result<bool, StorageError>;
}
