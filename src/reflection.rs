//! Reflection data: the declared members of a domain class.
//!
//! Classes are described ahead of time by a [`ClassReflection`] table instead of
//! being inspected at runtime. A table lists the declared attributes with their
//! candidate semantic types, the public methods with their arity, and the
//! public fields.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Primitive kind of a semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinType {
    Int,
    Float,
    String,
    Bool,
    Array,
    #[default]
    Object,
    Null,
}

/// The type of an attribute as reported by reflection.
///
/// Collections carry their element type, which in turn may point at a class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SemanticType {
    #[serde(default)]
    pub builtin: BuiltinType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collection: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<SemanticType>>,
}

impl SemanticType {
    /// A scalar or untyped value.
    pub fn builtin(builtin: BuiltinType) -> Self {
        Self {
            builtin,
            ..Self::default()
        }
    }

    /// An instance of the named class.
    pub fn object(class: impl Into<String>) -> Self {
        Self {
            builtin: BuiltinType::Object,
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// A collection of `element`.
    pub fn collection_of(element: SemanticType) -> Self {
        Self {
            builtin: BuiltinType::Array,
            collection: true,
            element: Some(Box::new(element)),
            ..Self::default()
        }
    }

    /// Mark the type as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn builtin_type(&self) -> BuiltinType {
        self.builtin
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Element type of a collection, if declared.
    pub fn element_type(&self) -> Option<&SemanticType> {
        self.element.as_deref()
    }

    /// Class this type points at, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

/// A public method of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    /// Number of parameters without a default value.
    #[serde(default)]
    pub required_parameters: usize,
}

impl Method {
    pub fn new(name: impl Into<String>, required_parameters: usize) -> Self {
        Self {
            name: name.into(),
            required_parameters,
        }
    }
}

/// Declared members of one class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassReflection {
    name: String,
    properties: IndexMap<String, Vec<SemanticType>>,
    methods: Vec<Method>,
    public_fields: Vec<String>,
}

impl ClassReflection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare an attribute with its candidate types, most specific first.
    pub fn property(mut self, name: impl Into<String>, types: Vec<SemanticType>) -> Self {
        self.properties.insert(name.into(), types);
        self
    }

    /// Declare a public field. The field is also declared as an attribute
    /// (with no types) unless it already has one.
    pub fn public_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.properties.entry(name.clone()).or_default();
        if !self.public_fields.contains(&name) {
            self.public_fields.push(name);
        }
        self
    }

    /// Declare a public method.
    pub fn method(mut self, name: impl Into<String>, required_parameters: usize) -> Self {
        self.methods.push(Method::new(name, required_parameters));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate types of a declared attribute.
    ///
    /// Returns `None` when the class declares no such attribute.
    pub fn candidate_types(&self, attribute: &str) -> Option<&[SemanticType]> {
        self.properties.get(attribute).map(Vec::as_slice)
    }

    /// Public methods in declaration order.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Public fields in declaration order.
    pub fn public_fields(&self) -> &[String] {
        &self.public_fields
    }
}

/// Source of class reflection data.
pub trait ReflectionProvider: Send + Sync {
    /// Look up the declared members of a class.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::UnknownClass` when the class cannot be resolved.
    fn reflect(&self, class_name: &str) -> Result<Arc<ClassReflection>, ResolveError>;
}

/// In-memory reflection data keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct ReflectionTable {
    classes: HashMap<String, Arc<ClassReflection>>,
}

impl ReflectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any previous entry of the same name.
    pub fn insert(&mut self, reflection: ClassReflection) {
        self.classes
            .insert(reflection.name().to_string(), Arc::new(reflection));
    }

    pub fn with_class(mut self, reflection: ClassReflection) -> Self {
        self.insert(reflection);
        self
    }
}

impl ReflectionProvider for ReflectionTable {
    fn reflect(&self, class_name: &str) -> Result<Arc<ClassReflection>, ResolveError> {
        self.classes
            .get(class_name)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownClass {
                class: class_name.to_string(),
            })
    }
}
