use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;

/// Which optional form fields are currently relevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVisibility {
    /// The "is base container" switch.
    pub base_toggle: bool,
    pub location: bool,
    pub parent_selector: bool,
}

/// Derives field visibility from the selected kind and base flag.
///
/// | kind      | base  | toggle | location | parent |
/// |-----------|-------|--------|----------|--------|
/// | unset     | any   | no     | no       | no     |
/// | object    | any   | no     | no       | yes    |
/// | container | true  | yes    | yes      | no     |
/// | container | false | yes    | no       | yes    |
///
/// Front ends must take visibility from here and never branch on kind
/// themselves.
pub fn visible_fields(kind: Option<ResourceKind>, is_base_container: bool) -> FieldVisibility {
    match kind {
        None => FieldVisibility::default(),
        Some(ResourceKind::Object) => FieldVisibility {
            base_toggle: false,
            location: false,
            parent_selector: true,
        },
        Some(ResourceKind::Container) => FieldVisibility {
            base_toggle: true,
            location: is_base_container,
            parent_selector: !is_base_container,
        },
    }
}
