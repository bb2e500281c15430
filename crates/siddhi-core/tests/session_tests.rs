use siddhi_core::{
    lookup, FieldVisibility, FormSession, LookupResult, MediumType, Resource, ResourceKind,
    SessionState, ValidationError,
};

fn catalog() -> Vec<Resource> {
    siddhi_core::sample_catalog()
}

#[test]
fn test_state_progression() {
    let known = catalog();
    let mut session = FormSession::new();
    assert_eq!(session.state(), &SessionState::Empty);

    session.on_id_entered("RES500", &known);
    assert_eq!(
        session.state(),
        &SessionState::Creating {
            id: "RES500".to_string()
        }
    );

    session.on_id_entered("RES001", &known);
    assert_eq!(
        session.state(),
        &SessionState::Editing {
            id: "RES001".to_string()
        }
    );

    let resource = session.prepare_submit(&known).unwrap();
    session.complete_submit(resource, true);
    assert!(matches!(session.state(), SessionState::Submitted { was_update: true, .. }));

    session.on_reset();
    assert_eq!(session.state(), &SessionState::Empty);
}

#[test]
fn test_visibility_follows_draft() {
    let mut session = FormSession::new();
    session.on_id_entered("RES600", &catalog());
    assert_eq!(session.visibility(), FieldVisibility::default());

    session.set_kind(Some(ResourceKind::Container));
    assert!(session.visibility().base_toggle);
    assert!(session.visibility().parent_selector);

    session.set_base_container(true);
    assert!(session.visibility().location);
    assert!(!session.visibility().parent_selector);

    session.set_kind(Some(ResourceKind::Object));
    assert!(!session.visibility().base_toggle);
    assert!(session.visibility().parent_selector);
}

#[test]
fn test_prepare_submit_normalizes() {
    let known = catalog();
    let mut session = FormSession::new();
    session.on_id_entered("RES601", &known);
    session.set_name("  Tablet ");
    session.set_kind(Some(ResourceKind::Object));
    session.set_medium(Some(MediumType::Physical));
    session.set_location("stale location");
    session.set_parent(" RES002 ");

    let resource = session.prepare_submit(&known).unwrap();
    assert_eq!(resource.name, "Tablet");
    assert_eq!(resource.parent_id, "RES002");
    assert!(resource.location.is_empty());
}

#[test]
fn test_on_submit_appends_new_resource() {
    let mut known = catalog();
    let mut session = FormSession::new();
    session.on_id_entered("RES010", &known);
    session.set_name("X");
    session.set_kind(Some(ResourceKind::Object));
    session.set_medium(Some(MediumType::Physical));
    session.set_parent("RES001");

    assert_eq!(session.on_submit(&mut known), Ok(false));
    assert_eq!(known.len(), 4);
    assert_eq!(known[3].id, "RES010");
    assert_eq!(session.submit_label(), "Update Resource");
    assert!(matches!(lookup("RES010", &known), LookupResult::Found(_)));
}

#[test]
fn test_on_submit_rejection_leaves_list_alone() {
    let mut known = catalog();
    let before = known.clone();
    let mut session = FormSession::new();
    session.on_id_entered("RES003", &known);
    session.set_parent("");

    assert_eq!(
        session.on_submit(&mut known),
        Err(ValidationError::MissingParent)
    );
    assert_eq!(known, before);
    assert!(session.state().is_editing());
}
