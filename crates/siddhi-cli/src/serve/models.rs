//! API request and response models for the web form.
//!
//! These are Data Transfer Objects (DTOs) that define the shape of
//! JSON exchanged with the page script.

use serde::{Deserialize, Serialize};

use siddhi_core::{FieldVisibility, Resource, SessionState, ValidationError};

// =============================================================================
// Lookup (`/api/resources/{id}`)
// =============================================================================

/// What the form should show after an id is entered.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    /// Whether the id matched a known resource.
    pub found: bool,
    /// Session state after the lookup (`creating` or `editing`).
    pub state: SessionState,
    /// The stored record, or a blank draft for a new id.
    pub resource: Resource,
    pub visibility: FieldVisibility,
    /// "Editing: ..." or "Creating: ...".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub submit_label: &'static str,
}

// =============================================================================
// Field visibility (`/api/fields`)
// =============================================================================

/// Query parameters for the visibility endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FieldsQuery {
    /// `object`, `container` or empty.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub base: bool,
}

// =============================================================================
// Submission (`POST /api/resources`)
// =============================================================================

/// Successful save.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub was_update: bool,
    pub message: &'static str,
    /// The record as stored, with hidden fields cleared.
    pub resource: Resource,
}

/// Error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Message to show the user.
    pub error: String,
    /// Machine-readable validation reason, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationError>,
}

impl ErrorResponse {
    pub fn message(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            reason: None,
        }
    }

    pub fn invalid(reason: ValidationError) -> Self {
        Self {
            error: reason.to_string(),
            reason: Some(reason),
        }
    }
}

// =============================================================================
// Scan (`/api/scan`)
// =============================================================================

/// Result of a scan request.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub id: String,
    /// True when no barcode was captured and the id was generated.
    pub synthetic: bool,
}
