use crate::resource::Resource;

/// Merges `resource` into `known`, returning the new list and whether an
/// existing entry was replaced.
///
/// A matching id is overwritten in place, keeping its position; otherwise
/// the resource is appended. The caller must validate first.
pub fn upsert(resource: Resource, known: &[Resource]) -> (Vec<Resource>, bool) {
    let mut next = known.to_vec();
    let was_update = upsert_in_place(&mut next, resource);
    (next, was_update)
}

/// Same as [`upsert`] on a list the caller holds exclusively.
pub fn upsert_in_place(known: &mut Vec<Resource>, resource: Resource) -> bool {
    match known.iter_mut().find(|r| r.id == resource.id) {
        Some(slot) => {
            *slot = resource;
            true
        }
        None => {
            known.push(resource);
            false
        }
    }
}
