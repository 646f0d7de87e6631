//! Mapping documents: classes, resources, groups and annotations in one JSON file.
//!
//! ```json
//! {
//!   "resources": { "Person": "people" },
//!   "classes": {
//!     "Article": {
//!       "attributes": {
//!         "title":  { "types": [{ "builtin": "string" }], "public": true },
//!         "author": { "types": [{ "class": "Person" }] }
//!       },
//!       "methods": [{ "name": "getAuthor" }],
//!       "groups": { "title": ["list"] }
//!     },
//!     "Person": {}
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::annotations::{AnnotationTable, ClassAnnotation};
use crate::groups::{GroupTable, GroupedAttribute};
use crate::reflection::{ClassReflection, Method, ReflectionTable, SemanticType};
use crate::registry::ResourceCollection;

/// A parsed mapping document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    /// Exposed classes, keyed by class name, valued by resource short name.
    #[serde(default)]
    pub resources: IndexMap<String, String>,
    #[serde(default)]
    pub classes: IndexMap<String, ClassDefinition>,
}

/// Declared members, groups and annotations of one class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeDefinition>,
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Group membership per attribute. Absent means the class has no group table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<IndexMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ClassAnnotation>,
}

/// A declared attribute: its candidate types and whether it is a public field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(default)]
    pub types: Vec<SemanticType>,
    #[serde(default)]
    pub public: bool,
}

/// Collaborator tables built from a [`Mapping`].
#[derive(Debug, Clone, Default)]
pub struct MappingTables {
    pub reflection: ReflectionTable,
    pub resources: ResourceCollection,
    pub groups: GroupTable,
    pub annotations: AnnotationTable,
}

impl Mapping {
    /// Names of classes referenced by any attribute type, in document order.
    pub fn referenced_classes(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.classes.iter().flat_map(|(class, definition)| {
            definition.attributes.iter().flat_map(move |(attribute, def)| {
                def.types.iter().flat_map(move |ty| {
                    let own = ty.class_name();
                    let element = ty.element_type().and_then(SemanticType::class_name);
                    own.into_iter()
                        .chain(element)
                        .map(move |referenced| (class.as_str(), attribute.as_str(), referenced))
                })
            })
        })
    }

    /// Split the document into the tables consumed by the class metadata factory.
    pub fn into_tables(self) -> MappingTables {
        let mut tables = MappingTables {
            resources: self.resources.into_iter().collect(),
            ..MappingTables::default()
        };

        for (class_name, definition) in self.classes {
            let ClassDefinition {
                description,
                iri,
                attributes,
                methods,
                groups,
                annotations,
            } = definition;

            let mut reflection = ClassReflection::new(class_name.clone());
            for (name, attribute) in attributes {
                let public = attribute.public;
                reflection = reflection.property(name.clone(), attribute.types);
                if public {
                    reflection = reflection.public_field(name);
                }
            }
            for method in methods {
                reflection = reflection.method(method.name, method.required_parameters);
            }
            tables.reflection.insert(reflection);

            if let Some(groups) = groups {
                let entries = groups
                    .into_iter()
                    .map(|(name, groups)| GroupedAttribute::new(name, groups))
                    .collect();
                tables.groups.insert(class_name.clone(), entries);
            }

            // Class-level description and IRI are annotations of the class.
            let annotation = match (annotations, description.is_some() || iri.is_some()) {
                (Some(mut annotation), _) => {
                    annotation.iri = annotation.iri.or(iri);
                    annotation.description = annotation.description.or(description);
                    Some(annotation)
                }
                (None, true) => Some(ClassAnnotation {
                    iri,
                    description,
                    ..ClassAnnotation::default()
                }),
                (None, false) => None,
            };
            if let Some(annotation) = annotation {
                tables.annotations.insert(class_name, annotation);
            }
        }

        tables
    }
}
