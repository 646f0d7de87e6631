//! Attribute metadata factory - derives type and link state of attributes.

use std::sync::Arc;

use tracing::trace;

use crate::attribute::AttributeMetadata;
use crate::class::ClassMetadata;
use crate::reflection::SemanticType;
use crate::registry::ResourceRegistry;
use crate::types::ResolveOptions;

/// Builds [`AttributeMetadata`] from reflection data and the resource registry.
///
/// This is the only place where link detection happens; loaders only set
/// visibility flags on what the factory returns.
#[derive(Clone)]
pub struct AttributeMetadataFactory {
    registry: Arc<dyn ResourceRegistry>,
}

impl AttributeMetadataFactory {
    pub fn new(registry: Arc<dyn ResourceRegistry>) -> Self {
        Self { registry }
    }

    /// Fetch or create the metadata of `attribute_name` in `class`.
    ///
    /// An attribute already held by `class` is returned as a copy. Otherwise a
    /// new value is derived from the first candidate type reported by
    /// reflection:
    ///
    /// - no declared type: returned with every flag unset,
    /// - type (or collection element type) names a registered resource: the
    ///   attribute is a link, fully embedded in each direction the caller did
    ///   not scope with groups.
    ///
    /// The returned value is not added to `class`; callers add it back once
    /// they have set its visibility.
    pub fn get_attribute_metadata_for(
        &self,
        class: &ClassMetadata,
        attribute_name: &str,
        options: &ResolveOptions,
    ) -> AttributeMetadata {
        if let Some(existing) = class.attribute(attribute_name) {
            return existing.clone();
        }

        let attribute = AttributeMetadata::new(attribute_name);

        let Some(semantic_type) = class
            .reflection()
            .candidate_types(attribute_name)
            .and_then(|types| types.first())
        else {
            trace!(class = class.name(), attribute = attribute_name, "no declared type");
            return attribute;
        };

        let link_class = self.link_class(semantic_type);
        let mut attribute = attribute
            .with_type(semantic_type.clone())
            .with_link(link_class.is_some())
            .with_link_class(link_class);

        if !attribute.is_link() {
            return attribute;
        }

        if options.normalization_groups.is_none() {
            attribute.set_normalization_link(true);
        }
        if options.denormalization_groups.is_none() {
            attribute.set_denormalization_link(true);
        }

        trace!(
            class = class.name(),
            attribute = attribute_name,
            link_class = attribute.link_class(),
            normalization_link = attribute.is_normalization_link(),
            denormalization_link = attribute.is_denormalization_link(),
            "link detected"
        );

        attribute
    }

    /// Class that makes `semantic_type` a link, if any.
    ///
    /// The type's own class wins; a collection falls back to its element class.
    pub fn link_class(&self, semantic_type: &SemanticType) -> Option<String> {
        if let Some(class) = semantic_type.class_name() {
            if self.registry.resource_for_class(class).is_some() {
                return Some(class.to_string());
            }
        }

        if !semantic_type.is_collection() {
            return None;
        }

        semantic_type
            .element_type()
            .and_then(SemanticType::class_name)
            .filter(|class| self.registry.resource_for_class(class).is_some())
            .map(str::to_string)
    }
}

impl std::fmt::Debug for AttributeMetadataFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeMetadataFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{BuiltinType, ClassReflection};
    use crate::registry::ResourceCollection;

    fn factory() -> AttributeMetadataFactory {
        let registry = ResourceCollection::new()
            .with_resource("Person")
            .with_resource("Tag");
        AttributeMetadataFactory::new(Arc::new(registry))
    }

    fn article() -> ClassMetadata {
        let reflection = ClassReflection::new("Article")
            .property("id", vec![SemanticType::builtin(BuiltinType::Int)])
            .property("title", vec![SemanticType::builtin(BuiltinType::String)])
            .property(
                "author",
                vec![
                    SemanticType::object("Person"),
                    SemanticType::builtin(BuiltinType::Null),
                ],
            )
            .property(
                "tags",
                vec![SemanticType::collection_of(SemanticType::object("Tag"))],
            )
            .property(
                "notes",
                vec![SemanticType::collection_of(SemanticType::builtin(
                    BuiltinType::String,
                ))],
            )
            .property("publisher", vec![SemanticType::object("Publisher")])
            .property("untyped", vec![]);
        ClassMetadata::new(Arc::new(reflection))
    }

    #[test]
    fn undeclared_attribute_has_no_type() {
        let attr = factory().get_attribute_metadata_for(&article(), "dynamic", &ResolveOptions::new());
        assert!(attr.semantic_type().is_none());
        assert!(!attr.is_link());
        assert!(!attr.is_readable());
        assert!(!attr.is_writable());
    }

    #[test]
    fn empty_type_list_has_no_type() {
        let attr = factory().get_attribute_metadata_for(&article(), "untyped", &ResolveOptions::new());
        assert!(attr.semantic_type().is_none());
        assert!(!attr.is_link());
    }

    #[test]
    fn scalar_attribute_is_not_a_link() {
        let attr = factory().get_attribute_metadata_for(&article(), "title", &ResolveOptions::new());
        assert_eq!(
            attr.semantic_type().map(SemanticType::builtin_type),
            Some(BuiltinType::String)
        );
        assert!(!attr.is_link());
        assert!(attr.link_class().is_none());
        assert!(!attr.is_normalization_link());
        assert!(!attr.is_denormalization_link());
    }

    #[test]
    fn first_candidate_type_wins() {
        let attr = factory().get_attribute_metadata_for(&article(), "author", &ResolveOptions::new());
        assert_eq!(
            attr.semantic_type().and_then(SemanticType::class_name),
            Some("Person")
        );
    }

    #[test]
    fn unscoped_link_is_fully_embedded() {
        let attr = factory().get_attribute_metadata_for(&article(), "author", &ResolveOptions::new());
        assert!(attr.is_link());
        assert_eq!(attr.link_class(), Some("Person"));
        assert!(attr.is_normalization_link());
        assert!(attr.is_denormalization_link());
    }

    #[test]
    fn scoped_direction_defaults_to_reference() {
        let options = ResolveOptions::new().normalization_groups(["list"]);
        let attr = factory().get_attribute_metadata_for(&article(), "author", &options);
        assert!(attr.is_link());
        assert!(!attr.is_normalization_link());
        assert!(attr.is_denormalization_link());
    }

    #[test]
    fn collection_of_resources_is_a_link() {
        let attr = factory().get_attribute_metadata_for(&article(), "tags", &ResolveOptions::new());
        assert!(attr.is_link());
        assert_eq!(attr.link_class(), Some("Tag"));
    }

    #[test]
    fn collection_of_scalars_is_not_a_link() {
        let attr = factory().get_attribute_metadata_for(&article(), "notes", &ResolveOptions::new());
        assert!(!attr.is_link());
    }

    #[test]
    fn unregistered_class_is_not_a_link() {
        let attr = factory().get_attribute_metadata_for(&article(), "publisher", &ResolveOptions::new());
        assert!(!attr.is_link());
        assert!(attr.link_class().is_none());
    }

    #[test]
    fn existing_attribute_is_returned_as_copy() {
        let factory = factory();
        let mut class = article();
        let mut title = factory.get_attribute_metadata_for(&class, "title", &ResolveOptions::new());
        title.set_readable(true);
        class.add_attribute(title);

        let mut copy = factory.get_attribute_metadata_for(&class, "title", &ResolveOptions::new());
        assert!(copy.is_readable());

        copy.set_writable(true);
        assert!(!class.attribute("title").unwrap().is_writable());
    }

    #[test]
    fn identifier_default_follows_name() {
        let factory = factory();
        let class = article();
        assert!(factory
            .get_attribute_metadata_for(&class, "id", &ResolveOptions::new())
            .is_identifier());
        assert!(!factory
            .get_attribute_metadata_for(&class, "title", &ResolveOptions::new())
            .is_identifier());
    }
}
