//! Resolved visibility state of a single attribute.

use serde::Serialize;

use crate::reflection::SemanticType;
use crate::types::{Direction, DEFAULT_IDENTIFIER_NAME};

/// Visibility metadata of one attribute of a class.
///
/// Type and link information is derived once by the attribute factory and
/// changed only through the consuming `with_*` methods, which return a new
/// value. Visibility flags accumulate across loaders and are set in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeMetadata {
    name: String,
    identifier: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    semantic_type: Option<SemanticType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iri: Option<String>,
    readable: bool,
    writable: bool,
    required: bool,
    link: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_class: Option<String>,
    normalization_link: bool,
    denormalization_link: bool,
}

impl AttributeMetadata {
    /// Create attribute metadata with every flag unset.
    ///
    /// The attribute is an identifier iff its name is `"id"`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let identifier = name == DEFAULT_IDENTIFIER_NAME;
        Self {
            name,
            identifier,
            semantic_type: None,
            description: None,
            iri: None,
            readable: false,
            writable: false,
            required: false,
            link: false,
            link_class: None,
            normalization_link: false,
            denormalization_link: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_identifier(&self) -> bool {
        self.identifier
    }

    /// Override the name-based identifier default.
    pub fn with_identifier(mut self, identifier: bool) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn set_identifier(&mut self, identifier: bool) {
        self.identifier = identifier;
    }

    pub fn semantic_type(&self) -> Option<&SemanticType> {
        self.semantic_type.as_ref()
    }

    pub fn with_type(mut self, semantic_type: SemanticType) -> Self {
        self.semantic_type = Some(semantic_type);
        self
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

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn set_readable(&mut self, readable: bool) {
        self.readable = readable;
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn set_writable(&mut self, writable: bool) {
        self.writable = writable;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// True when the attribute refers to another exposed resource.
    pub fn is_link(&self) -> bool {
        self.link
    }

    /// Mark the attribute as a link or not.
    ///
    /// Clearing the link also clears the embedding flags.
    pub fn with_link(mut self, link: bool) -> Self {
        self.link = link;
        if !link {
            self.normalization_link = false;
            self.denormalization_link = false;
        }
        self
    }

    pub fn link_class(&self) -> Option<&str> {
        self.link_class.as_deref()
    }

    pub fn with_link_class(mut self, link_class: Option<String>) -> Self {
        self.link_class = link_class;
        self
    }

    /// Whether the relation is embedded in full when producing output.
    pub fn is_normalization_link(&self) -> bool {
        self.normalization_link
    }

    /// Ignored on non-link attributes.
    pub fn set_normalization_link(&mut self, embed: bool) {
        self.normalization_link = embed && self.link;
    }

    /// Whether the relation is accepted in full when consuming input.
    pub fn is_denormalization_link(&self) -> bool {
        self.denormalization_link
    }

    /// Ignored on non-link attributes.
    pub fn set_denormalization_link(&mut self, embed: bool) {
        self.denormalization_link = embed && self.link;
    }

    /// Visibility for one direction: readable for normalization, writable for
    /// denormalization.
    pub fn is_visible(&self, direction: Direction) -> bool {
        match direction {
            Direction::Normalization => self.readable,
            Direction::Denormalization => self.writable,
        }
    }

    pub fn set_visible(&mut self, direction: Direction, visible: bool) {
        match direction {
            Direction::Normalization => self.readable = visible,
            Direction::Denormalization => self.writable = visible,
        }
    }

    /// Embedding flag for one direction.
    pub fn is_embedded(&self, direction: Direction) -> bool {
        match direction {
            Direction::Normalization => self.normalization_link,
            Direction::Denormalization => self.denormalization_link,
        }
    }

    pub fn set_embedded(&mut self, direction: Direction, embed: bool) {
        match direction {
            Direction::Normalization => self.set_normalization_link(embed),
            Direction::Denormalization => self.set_denormalization_link(embed),
        }
    }
}
