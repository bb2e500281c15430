use serde::Serialize;
use thiserror::Error;

use crate::resource::{Resource, ResourceKind};

/// Why a resource cannot be submitted.
///
/// The `Display` text is the message front ends show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "id", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Resource ID is required")]
    MissingId,

    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("Location is required for base containers")]
    MissingLocation,

    #[error("Parent container is required for objects and non-base containers")]
    MissingParent,

    #[error("Parent container not found: {0}")]
    UnknownParent(String),

    #[error("Parent {0} is not a container")]
    ParentNotContainer(String),

    #[error("A resource cannot be its own parent")]
    SelfParent,
}

pub type ValidationResult = Result<(), ValidationError>;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks the structural rules in fixed order and reports the first failure.
///
/// 1. id present
/// 2. name, kind and medium present
/// 3. base containers have a location
/// 4. objects and non-base containers have a parent
pub fn validate(resource: &Resource) -> ValidationResult {
    match violations(resource).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every failing structural rule, in the same order `validate` checks them.
pub fn violations(resource: &Resource) -> Vec<ValidationError> {
    let mut found = Vec::new();

    if blank(&resource.id) {
        found.push(ValidationError::MissingId);
    }

    if blank(&resource.name) || resource.kind.is_none() || resource.medium.is_none() {
        found.push(ValidationError::MissingRequiredFields);
    }

    match resource.kind {
        Some(ResourceKind::Container) if resource.is_base_container => {
            if blank(&resource.location) {
                found.push(ValidationError::MissingLocation);
            }
        }
        Some(ResourceKind::Container) | Some(ResourceKind::Object) => {
            if blank(&resource.parent_id) {
                found.push(ValidationError::MissingParent);
            }
        }
        None => {}
    }

    found
}

/// Checks that a non-empty parent reference names an existing container
/// other than the resource itself.
pub fn check_references(resource: &Resource, known: &[Resource]) -> ValidationResult {
    let parent_id = resource.parent_id.trim();
    if parent_id.is_empty() {
        return Ok(());
    }

    if parent_id == resource.id.trim() {
        return Err(ValidationError::SelfParent);
    }

    match known.iter().find(|r| r.id == parent_id) {
        None => Err(ValidationError::UnknownParent(parent_id.to_string())),
        Some(parent) if !parent.is_container() => {
            Err(ValidationError::ParentNotContainer(parent_id.to_string()))
        }
        Some(_) => Ok(()),
    }
}

/// Normalizes `resource` and runs every submission check against `known`:
/// structural rules first, then the parent reference.
pub fn prepare_submission(
    resource: &Resource,
    known: &[Resource],
) -> Result<Resource, ValidationError> {
    let resource = resource.normalized();
    validate(&resource)?;
    check_references(&resource, known)?;
    Ok(resource)
}
