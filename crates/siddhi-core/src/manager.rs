use thiserror::Error;
use tracing::{debug, info};

use crate::form::{parent_options, prepare_submission, ParentOption, ValidationError};
use crate::resource::Resource;
use crate::session::{FormSession, IdOutcome};
use crate::storage::{ResourceStore, StorageError};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The resource as stored, after normalization.
    pub resource: Resource,
    /// `true` if an existing resource was overwritten.
    pub was_update: bool,
}

impl SubmitOutcome {
    /// Confirmation text for the user.
    pub fn message(&self) -> &'static str {
        if self.was_update {
            "Resource updated successfully"
        } else {
            "Resource created successfully"
        }
    }
}

/// Drives one resource form against a store.
///
/// Front ends call into the manager with discrete events (id entered,
/// field changed, submit, reset) and render from `session()`.
pub struct ResourceManager<S: ResourceStore> {
    store: S,
    session: FormSession,
}

impl<S: ResourceStore> ResourceManager<S> {
    /// Creates a new ResourceManager with the given store and an empty form.
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: FormSession::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Mutable access for field edits.
    pub fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }

    /// Lists all known resources.
    pub fn resources(&self) -> Result<Vec<Resource>, ManagerError> {
        Ok(self.store.list()?)
    }

    /// Containers that can be picked as a parent.
    pub fn parent_options(&self) -> Result<Vec<ParentOption>, ManagerError> {
        Ok(parent_options(&self.store.list()?))
    }

    /// Looks up `id` and switches the form into editing or creating mode.
    pub fn enter_id(&mut self, id: &str) -> Result<IdOutcome, ManagerError> {
        let known = self.store.list()?;
        let outcome = self.session.on_id_entered(id, &known);

        match &outcome {
            IdOutcome::Found(r) => debug!(id = %r.id, name = %r.name, "Resource found"),
            IdOutcome::New(id) => debug!(id = %id, "New resource"),
            IdOutcome::Blank => debug!("Blank resource id, form cleared"),
        }

        Ok(outcome)
    }

    /// Validates the draft and saves it.
    ///
    /// Whether this is an update is decided by the store, not by the mode
    /// the form was in.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ManagerError> {
        let draft = self
            .session
            .draft()
            .cloned()
            .ok_or(ValidationError::MissingId)?;

        let outcome = save_resource(&mut self.store, &draft)?;
        self.session
            .complete_submit(outcome.resource.clone(), outcome.was_update);
        Ok(outcome)
    }

    /// Clears the form.
    pub fn reset(&mut self) {
        self.session.on_reset();
    }
}

/// Validates `resource` against the store's contents and saves it.
///
/// Every submission path ends here. Nothing is written if validation fails.
pub fn save_resource<S: ResourceStore + ?Sized>(
    store: &mut S,
    resource: &Resource,
) -> Result<SubmitOutcome, ManagerError> {
    let known = store.list()?;
    let resource = prepare_submission(resource, &known)?;

    let was_update = store.save(resource.clone())?;
    if was_update {
        info!(id = %resource.id, name = %resource.name, "Updated resource");
    } else {
        info!(id = %resource.id, name = %resource.name, "Created resource");
    }

    Ok(SubmitOutcome {
        resource,
        was_update,
    })
}

/// Errors that can occur in ResourceManager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

impl ManagerError {
    /// The validation failure, if that is what this is.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Storage(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{MediumType, ResourceKind};
    use crate::session::SessionState;
    use crate::storage::MemoryStore;

    fn create_test_manager() -> ResourceManager<MemoryStore> {
        ResourceManager::new(MemoryStore::seeded())
    }

    #[test]
    fn test_create_resource() {
        let mut manager = create_test_manager();

        manager.enter_id("RES010").unwrap();
        let session = manager.session_mut();
        session.set_name("X");
        session.set_kind(Some(ResourceKind::Object));
        session.set_medium(Some(MediumType::Physical));
        session.set_parent("RES001");

        let outcome = manager.submit().unwrap();
        assert!(!outcome.was_update);
        assert_eq!(outcome.message(), "Resource created successfully");
        assert_eq!(manager.resources().unwrap().len(), 4);
        assert_eq!(
            manager.session().state(),
            &SessionState::Submitted {
                id: "RES010".to_string(),
                was_update: false
            }
        );
    }

    #[test]
    fn test_update_resource() {
        let mut manager = create_test_manager();

        manager.enter_id("RES001").unwrap();
        manager.session_mut().set_location("Floor 2");

        let outcome = manager.submit().unwrap();
        assert!(outcome.was_update);
        assert_eq!(
            manager.store().get("RES001").unwrap().unwrap().location,
            "Floor 2"
        );
    }

    #[test]
    fn test_invalid_submit_leaves_store_untouched() {
        let mut manager = create_test_manager();

        manager.enter_id("RES020").unwrap();
        let err = manager.submit().unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::MissingRequiredFields));
        assert_eq!(manager.resources().unwrap().len(), 3);
        assert!(matches!(manager.session().state(), SessionState::Creating { .. }));
    }

    #[test]
    fn test_parent_options_follow_new_containers() {
        let mut manager = create_test_manager();

        manager.enter_id("RES030").unwrap();
        let session = manager.session_mut();
        session.set_name("Drawer");
        session.set_kind(Some(ResourceKind::Container));
        session.set_medium(Some(MediumType::Physical));
        session.set_parent("RES001");
        manager.submit().unwrap();

        let ids: Vec<_> = manager
            .parent_options()
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["RES001", "RES002", "RES030"]);
    }
}
