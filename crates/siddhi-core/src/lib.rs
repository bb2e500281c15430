pub mod config;
pub mod crash;
pub mod form;
pub mod manager;
pub mod resource;
pub mod scanner;
pub mod session;
pub mod storage;

pub use config::{CatalogConfig, Config, ConfigError, ScannerConfig, ServerConfig, StorageConfig};
pub use crash::CrashReporter;
pub use form::{
    check_references, lookup, parent_options, prepare_submission, upsert, upsert_in_place,
    validate, violations, visible_fields, FieldVisibility, LookupResult, ParentOption,
    ValidationError, ValidationResult,
};
pub use manager::{save_resource, ManagerError, ResourceManager, SubmitOutcome};
pub use resource::{sample_catalog, MediumType, Resource, ResourceKind, UnknownVariant};
pub use scanner::{
    scan_with_fallback, ScanError, ScanOutcome, ScannedId, ScannerProvider, SimulatedScanner,
    SyntheticIdGenerator,
};
pub use session::{FormSession, IdOutcome, SessionState};
pub use storage::{MemoryStore, ResourceStore, StorageError};
