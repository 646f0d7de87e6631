//! Human-authored class and attribute annotations (IRIs, descriptions).

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Annotations declared on a single attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// Annotations declared on a class and its attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeAnnotation>,
}

impl ClassAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iri(mut self, iri: impl Into<String>) -> Self {
        self.iri = Some(iri.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, annotation: AttributeAnnotation) -> Self {
        self.attributes.insert(name.into(), annotation);
        self
    }
}

/// Source of class annotations.
pub trait AnnotationProvider: Send + Sync {
    fn annotations_for(&self, class_name: &str) -> Option<&ClassAnnotation>;
}

/// In-memory annotations keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    classes: HashMap<String, ClassAnnotation>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_name: impl Into<String>, annotation: ClassAnnotation) {
        self.classes.insert(class_name.into(), annotation);
    }

    pub fn with_class(mut self, class_name: impl Into<String>, annotation: ClassAnnotation) -> Self {
        self.insert(class_name, annotation);
        self
    }
}

impl AnnotationProvider for AnnotationTable {
    fn annotations_for(&self, class_name: &str) -> Option<&ClassAnnotation> {
        self.classes.get(class_name)
    }
}
