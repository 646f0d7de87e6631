//! Attribute metadata of one domain class.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::attribute::AttributeMetadata;
use crate::reflection::ClassReflection;

/// Resolved metadata of a class: its attributes keyed by name.
///
/// Created empty before the loaders run and filled in by them. Attributes keep
/// the order in which they were first added.
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetadata {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    attributes: IndexMap<String, AttributeMetadata>,
    #[serde(skip)]
    reflection: Arc<ClassReflection>,
}

impl ClassMetadata {
    /// Create empty metadata for the class described by `reflection`.
    pub fn new(reflection: Arc<ClassReflection>) -> Self {
        Self {
            name: reflection.name().to_string(),
            description: None,
            iri: None,
            identifier: None,
            attributes: IndexMap::new(),
            reflection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    pub fn set_iri(&mut self, iri: impl Into<String>) {
        self.iri = Some(iri.into());
    }

    /// Declared members of the class.
    pub fn reflection(&self) -> &Arc<ClassReflection> {
        &self.reflection
    }

    /// Add an attribute, replacing any attribute of the same name in place.
    pub fn add_attribute(&mut self, attribute: AttributeMetadata) {
        let name = attribute.name().to_string();
        if attribute.is_identifier() {
            self.identifier = Some(name.clone());
        } else if self.identifier.as_deref() == Some(name.as_str()) {
            self.identifier = None;
        }
        self.attributes.insert(name, attribute);
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeMetadata> {
        self.attributes.get(name)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeMetadata> {
        self.attributes.values()
    }

    /// The attribute currently flagged as identifier.
    pub fn identifier(&self) -> Option<&AttributeMetadata> {
        self.identifier
            .as_deref()
            .and_then(|name| self.attributes.get(name))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl PartialEq for ClassMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.iri == other.iri
            && self.identifier == other.identifier
            && self.attributes == other.attributes
    }
}
