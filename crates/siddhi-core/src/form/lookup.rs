use crate::resource::Resource;

/// Outcome of looking an id up in the known resources.
///
/// A miss is a normal outcome: the caller starts a new draft for that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Found(Resource),
    NotFound,
}

impl LookupResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_option(self) -> Option<Resource> {
        match self {
            Self::Found(resource) => Some(resource),
            Self::NotFound => None,
        }
    }
}

/// Scans `known` in order and returns the first resource whose id equals
/// the trimmed `id`.
pub fn lookup(id: &str, known: &[Resource]) -> LookupResult {
    let id = id.trim();
    if id.is_empty() {
        return LookupResult::NotFound;
    }

    known
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map_or(LookupResult::NotFound, LookupResult::Found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::sample_catalog;

    #[test]
    fn test_found_returns_stored_record() {
        let known = sample_catalog();
        assert_eq!(lookup("RES002", &known), LookupResult::Found(known[1].clone()));
    }

    #[test]
    fn test_trims_input() {
        let known = sample_catalog();
        assert!(lookup("  RES001 ", &known).is_found());
    }

    #[test]
    fn test_miss_and_blank() {
        let known = sample_catalog();
        assert_eq!(lookup("RES404", &known), LookupResult::NotFound);
        assert_eq!(lookup("", &known), LookupResult::NotFound);
        assert_eq!(lookup("RES001", &[]), LookupResult::NotFound);
    }
}
