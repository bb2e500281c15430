use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::visible_fields;

/// Whether a resource is a leaf object or can hold other resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Object,
    Container,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Container => "container",
        }
    }

    /// Parses the form representation, where an empty string means "unset".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, UnknownVariant> {
        let value = value.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}

impl FromStr for ResourceKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "object" => Ok(Self::Object),
            "container" => Ok(Self::Container),
            other => Err(UnknownVariant {
                field: "kind",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a resource is digital or exists physically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumType {
    Virtual,
    Physical,
}

impl MediumType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::Physical => "physical",
        }
    }

    /// Parses the form representation, where an empty string means "unset".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, UnknownVariant> {
        let value = value.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}

impl FromStr for MediumType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "virtual" => Ok(Self::Virtual),
            "physical" => Ok(Self::Physical),
            other => Err(UnknownVariant {
                field: "medium",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MediumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that does not name any variant of a resource enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {field}: '{value}'")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

/// A catalogued resource.
///
/// Containers form a tree through `parent_id`: base containers sit at a
/// `location`, everything else points at the container that holds it.
/// Parent chains are not checked for cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Lookup key, usually the scanned barcode.
    pub id: String,
    pub name: String,
    /// `None` while the form has no kind selected.
    pub kind: Option<ResourceKind>,
    /// Only meaningful for containers.
    #[serde(default)]
    pub is_base_container: bool,
    /// `None` while the form has no medium selected.
    pub medium: Option<MediumType>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub parent_id: String,
}

impl Resource {
    /// Creates a blank draft holding only an id.
    pub fn draft(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind: None,
            is_base_container: false,
            medium: None,
            location: String::new(),
            parent_id: String::new(),
        }
    }

    /// A base container placed at a physical location.
    pub fn base_container(
        id: impl Into<String>,
        name: impl Into<String>,
        medium: MediumType,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(ResourceKind::Container),
            is_base_container: true,
            medium: Some(medium),
            location: location.into(),
            ..Self::draft(id)
        }
    }

    /// A container nested inside another container.
    pub fn nested_container(
        id: impl Into<String>,
        name: impl Into<String>,
        medium: MediumType,
        parent_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(ResourceKind::Container),
            medium: Some(medium),
            parent_id: parent_id.into(),
            ..Self::draft(id)
        }
    }

    /// A leaf object held by a container.
    pub fn object(
        id: impl Into<String>,
        name: impl Into<String>,
        medium: MediumType,
        parent_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(ResourceKind::Object),
            medium: Some(medium),
            parent_id: parent_id.into(),
            ..Self::draft(id)
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind == Some(ResourceKind::Container)
    }

    /// Returns a copy with every text field trimmed and the fields hidden
    /// by the current kind cleared, so location and parent never coexist.
    pub fn normalized(&self) -> Self {
        let visibility = visible_fields(self.kind, self.is_base_container);
        let keep = |shown: bool, value: &str| {
            if shown {
                value.trim().to_string()
            } else {
                String::new()
            }
        };

        Self {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            kind: self.kind,
            is_base_container: visibility.base_toggle && self.is_base_container,
            medium: self.medium,
            location: keep(visibility.location, &self.location),
            parent_id: keep(visibility.parent_selector, &self.parent_id),
        }
    }

    /// Label used by parent pickers, e.g. `RES001 - Shelf A`.
    pub fn picker_label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

/// The catalogue a fresh install starts with.
pub fn sample_catalog() -> Vec<Resource> {
    vec![
        Resource::base_container("RES001", "Shelf A", MediumType::Physical, "Floor 1"),
        Resource::nested_container("RES002", "Box 1", MediumType::Physical, "RES001"),
        Resource::object("RES003", "E-Book", MediumType::Virtual, "RES002"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_kind() {
        assert_eq!(ResourceKind::parse_optional("").unwrap(), None);
        assert_eq!(
            ResourceKind::parse_optional(" Container ").unwrap(),
            Some(ResourceKind::Container)
        );
        assert!(ResourceKind::parse_optional("crate").is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&sample_catalog()[2]).unwrap();
        assert!(json.contains("\"kind\":\"object\""));
        assert!(json.contains("\"medium\":\"virtual\""));

        let draft = serde_json::to_string(&Resource::draft("X")).unwrap();
        assert!(draft.contains("\"kind\":null"));
    }

    #[test]
    fn test_normalized_clears_hidden_fields() {
        let mut resource = Resource::base_container("C1", " Rack ", MediumType::Physical, "Hall");
        resource.parent_id = "RES001".to_string();

        let normalized = resource.normalized();
        assert_eq!(normalized.name, "Rack");
        assert_eq!(normalized.location, "Hall");
        assert!(normalized.parent_id.is_empty());

        let mut object = Resource::object("O1", "Pen", MediumType::Physical, "RES002");
        object.is_base_container = true;
        object.location = "Desk".to_string();

        let normalized = object.normalized();
        assert!(!normalized.is_base_container);
        assert!(normalized.location.is_empty());
        assert_eq!(normalized.parent_id, "RES002");
    }

    #[test]
    fn test_picker_label() {
        assert_eq!(sample_catalog()[0].picker_label(), "RES001 - Shelf A");
    }
}
