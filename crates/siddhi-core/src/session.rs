use serde::{Deserialize, Serialize};

use crate::form::{
    lookup, prepare_submission, upsert_in_place, visible_fields, FieldVisibility, LookupResult,
    ValidationError,
};
use crate::resource::{MediumType, Resource, ResourceKind};

/// Where a form session currently stands.
///
/// Sessions move `Empty → Creating | Editing → Submitted`; `reset` returns
/// to `Empty` from anywhere. Submission completes synchronously, so there
/// is no in-between state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Empty,
    Creating { id: String },
    Editing { id: String },
    Submitted { id: String, was_update: bool },
}

impl SessionState {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Creating { .. } => "Creating",
            Self::Editing { .. } => "Editing",
            Self::Submitted { .. } => "Submitted",
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

/// What entering an id did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOutcome {
    /// The id was blank; the form is empty again.
    Blank,
    /// An existing resource was loaded into the form.
    Found(Resource),
    /// No match; a blank draft for this id was started.
    New(String),
}

/// State of one resource form: the draft being edited plus its mode.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    state: SessionState,
    draft: Option<Resource>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The resource being edited, if an id has been entered.
    pub fn draft(&self) -> Option<&Resource> {
        self.draft.as_ref()
    }

    /// Loads `id` from `known`, or starts a blank draft for it.
    pub fn on_id_entered(&mut self, id: &str, known: &[Resource]) -> IdOutcome {
        let id = id.trim();
        if id.is_empty() {
            self.on_reset();
            return IdOutcome::Blank;
        }

        match lookup(id, known) {
            LookupResult::Found(resource) => {
                self.state = SessionState::Editing {
                    id: resource.id.clone(),
                };
                self.draft = Some(resource.clone());
                IdOutcome::Found(resource)
            }
            LookupResult::NotFound => {
                self.state = SessionState::Creating { id: id.to_string() };
                self.draft = Some(Resource::draft(id));
                IdOutcome::New(id.to_string())
            }
        }
    }

    /// Normalizes and validates the draft for submission.
    ///
    /// Structural rules are checked before the parent reference.
    pub fn prepare_submit(&self, known: &[Resource]) -> Result<Resource, ValidationError> {
        let draft = self.draft.as_ref().ok_or(ValidationError::MissingId)?;
        prepare_submission(draft, known)
    }

    /// Records a successful save of `resource`.
    ///
    /// The draft keeps the saved values, so a second submit edits the same
    /// record.
    pub fn complete_submit(&mut self, resource: Resource, was_update: bool) {
        self.state = SessionState::Submitted {
            id: resource.id.clone(),
            was_update,
        };
        self.draft = Some(resource);
    }

    /// Validates the draft and upserts it into `known`.
    ///
    /// Returns whether an existing entry was replaced. On failure nothing
    /// changes, neither `known` nor the session.
    pub fn on_submit(&mut self, known: &mut Vec<Resource>) -> Result<bool, ValidationError> {
        let resource = self.prepare_submit(known.as_slice())?;
        let was_update = upsert_in_place(known, resource.clone());
        self.complete_submit(resource, was_update);
        Ok(was_update)
    }

    /// Clears the form back to `Empty`.
    pub fn on_reset(&mut self) {
        self.state = SessionState::Empty;
        self.draft = None;
    }

    fn draft_mut(&mut self) -> Option<&mut Resource> {
        self.draft.as_mut()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.name = name.into();
        }
    }

    pub fn set_kind(&mut self, kind: Option<ResourceKind>) {
        if let Some(draft) = self.draft_mut() {
            draft.kind = kind;
        }
    }

    pub fn set_base_container(&mut self, is_base: bool) {
        if let Some(draft) = self.draft_mut() {
            draft.is_base_container = is_base;
        }
    }

    pub fn set_medium(&mut self, medium: Option<MediumType>) {
        if let Some(draft) = self.draft_mut() {
            draft.medium = medium;
        }
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.location = location.into();
        }
    }

    pub fn set_parent(&mut self, parent_id: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.parent_id = parent_id.into();
        }
    }

    /// Fields to show for the draft's current kind.
    pub fn visibility(&self) -> FieldVisibility {
        match &self.draft {
            Some(d) => visible_fields(d.kind, d.is_base_container),
            None => FieldVisibility::default(),
        }
    }

    /// Banner text describing the current mode, if any.
    pub fn status_line(&self) -> Option<String> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Creating { id } => Some(format!("Creating new resource: {}", id)),
            SessionState::Editing { id } => Some(format!("Editing existing resource: {}", id)),
            SessionState::Submitted { id, was_update: true } => {
                Some(format!("Resource updated: {}", id))
            }
            SessionState::Submitted { id, was_update: false } => {
                Some(format!("Resource created: {}", id))
            }
        }
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.state {
            SessionState::Editing { .. } | SessionState::Submitted { .. } => "Update Resource",
            _ => "Create Resource",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::sample_catalog;

    #[test]
    fn test_found_enters_editing() {
        let known = sample_catalog();
        let mut session = FormSession::new();

        let outcome = session.on_id_entered("RES003", &known);
        assert_eq!(outcome, IdOutcome::Found(known[2].clone()));
        assert!(session.state().is_editing());
        assert_eq!(session.draft(), Some(&known[2]));
        assert_eq!(session.submit_label(), "Update Resource");
        assert_eq!(
            session.status_line().as_deref(),
            Some("Editing existing resource: RES003")
        );
    }

    #[test]
    fn test_miss_clears_everything_but_id() {
        let known = sample_catalog();
        let mut session = FormSession::new();
        session.on_id_entered("RES001", &known);

        let outcome = session.on_id_entered("RES777", &known);
        assert_eq!(outcome, IdOutcome::New("RES777".to_string()));
        assert_eq!(session.draft(), Some(&Resource::draft("RES777")));
        assert_eq!(session.submit_label(), "Create Resource");
    }

    #[test]
    fn test_blank_id_resets() {
        let mut session = FormSession::new();
        session.on_id_entered("RES001", &sample_catalog());
        assert_eq!(session.on_id_entered("  ", &sample_catalog()), IdOutcome::Blank);
        assert_eq!(session.state(), &SessionState::Empty);
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_setters_require_a_draft() {
        let mut session = FormSession::new();
        session.set_name("ignored");
        assert!(session.draft().is_none());
        assert_eq!(session.visibility(), FieldVisibility::default());
    }

    #[test]
    fn test_prepare_submit_without_draft() {
        let session = FormSession::new();
        assert_eq!(
            session.prepare_submit(&sample_catalog()),
            Err(ValidationError::MissingId)
        );
    }

    #[test]
    fn test_reset_from_submitted() {
        let known = sample_catalog();
        let mut session = FormSession::new();
        session.on_id_entered("RES001", &known);
        let resource = session.prepare_submit(&known).unwrap();
        session.complete_submit(resource, true);
        assert_eq!(session.state().display_name(), "Submitted");

        session.on_reset();
        assert_eq!(session.state(), &SessionState::Empty);
    }
}
