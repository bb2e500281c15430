//! The resource form engine.
//!
//! Pure functions shared by every front end: look an id up, decide which
//! optional fields are relevant, validate a record and merge it into the
//! known list. Nothing here performs I/O or notifies the user.

mod lookup;
mod parents;
mod upsert;
mod validation;
mod visibility;

pub use lookup::{lookup, LookupResult};
pub use parents::{parent_options, ParentOption};
pub use upsert::{upsert, upsert_in_place};
pub use validation::{
    check_references, prepare_submission, validate, violations, ValidationError, ValidationResult,
};
pub use visibility::{visible_fields, FieldVisibility};
