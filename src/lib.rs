//! Resource Mapping
//!
//! Decides, per class and per group context, which attributes of a domain
//! class are readable (normalization), writable (denormalization), and which
//! relations are embedded rather than referenced by link.
//!
//! Visibility comes from three sources, applied in order: accessor naming
//! conventions, group membership tables, and annotations.
//!
//! # Example
//!
//! ```
//! use resource_mapping::{load_document_str, parse_mapping, ClassMetadataFactory, ResolveOptions};
//!
//! let document = load_document_str(r#"{
//!     "resources": { "Person": "people" },
//!     "classes": {
//!         "Article": {
//!             "attributes": {
//!                 "title":  { "types": [{ "builtin": "string" }] },
//!                 "author": { "types": [{ "class": "Person" }] }
//!             },
//!             "methods": [
//!                 { "name": "getTitle" },
//!                 { "name": "setTitle", "required_parameters": 1 },
//!                 { "name": "getAuthor" }
//!             ],
//!             "groups": { "title": ["list"] }
//!         },
//!         "Person": {}
//!     }
//! }"#).unwrap();
//!
//! let factory = ClassMetadataFactory::from_mapping(parse_mapping(document).unwrap());
//!
//! // Without groups, accessors decide.
//! let article = factory.resolve_class("Article", &ResolveOptions::new()).unwrap();
//! assert!(article.attribute("title").unwrap().is_writable());
//! assert!(article.attribute("author").unwrap().is_normalization_link());
//!
//! // With read groups, only group members are readable.
//! let options = ResolveOptions::new().normalization_groups(["list"]);
//! let article = factory.resolve_class("Article", &options).unwrap();
//! assert!(article.attribute("title").unwrap().is_readable());
//! assert!(article.attribute("author").is_none());
//! ```
//!
//! # Visibility Rules
//!
//! | Direction groups | Readable / writable from | Related link embedded when |
//! |------------------|--------------------------|----------------------------|
//! | (none) | `get`/`has`/`is` and `set`/`add`/`remove` methods, public fields | always |
//! | given | attributes listed in a matching group | the related class's table has no matching entry |
//!
//! A class without a group table exposes nothing for a scoped direction, and
//! a related class without a group table is always embedded.

mod annotations;
mod attribute;
mod class;
mod error;
mod factory;
mod groups;
mod linter;
mod loader;
mod mapping;
mod metadata;
mod reflection;
mod registry;
mod strategy;
mod types;
mod validator;

pub use annotations::{AnnotationProvider, AnnotationTable, AttributeAnnotation, ClassAnnotation};
pub use attribute::AttributeMetadata;
pub use class::ClassMetadata;
pub use error::{DocumentError, LoadError, ResolveError, ValidateError};
pub use factory::AttributeMetadataFactory;
pub use groups::{GroupProvider, GroupTable, GroupedAttribute};
pub use linter::{lint, lint_file, Diagnostic, FileResult, FileStatus, LintResult, Severity};
pub use loader::{
    is_url, load_document, load_document_auto, load_document_str, load_mapping, parse_mapping,
};
pub use mapping::{AttributeDefinition, ClassDefinition, Mapping, MappingTables};
pub use metadata::{CachedClassMetadataFactory, ClassMetadataFactory};
pub use reflection::{
    BuiltinType, ClassReflection, Method, ReflectionProvider, ReflectionTable, SemanticType,
};
pub use registry::{ResourceCollection, ResourceRegistry};
pub use strategy::{AnnotationLoader, ConventionLoader, GroupLoader, Loader};
pub use types::{Direction, GroupSet, ResolveOptions, DEFAULT_IDENTIFIER_NAME};
pub use validator::{document_errors, document_schema, validate_document};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
