use serde::Serialize;

use crate::resource::Resource;

/// One entry in the parent container picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentOption {
    pub id: String,
    pub label: String,
}

/// The containers a resource may be placed in, in store order.
pub fn parent_options(known: &[Resource]) -> Vec<ParentOption> {
    known
        .iter()
        .filter(|r| r.is_container())
        .map(|r| ParentOption {
            id: r.id.clone(),
            label: r.picker_label(),
        })
        .collect()
}
