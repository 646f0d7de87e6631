//! Overlay of human-authored IRIs, descriptions and required flags.

use std::sync::Arc;

use tracing::debug;

use super::Loader;
use crate::annotations::AnnotationProvider;
use crate::class::ClassMetadata;
use crate::factory::AttributeMetadataFactory;
use crate::types::ResolveOptions;

/// Copies class and attribute annotations onto already loaded metadata.
///
/// Runs for every group context and never adds attributes: an annotation on
/// an attribute that no other loader exposed is ignored.
#[derive(Clone)]
pub struct AnnotationLoader {
    annotations: Arc<dyn AnnotationProvider>,
}

impl AnnotationLoader {
    pub fn new(annotations: Arc<dyn AnnotationProvider>) -> Self {
        Self { annotations }
    }
}

impl Loader for AnnotationLoader {
    fn name(&self) -> &'static str {
        "annotation"
    }

    fn load_class_metadata(
        &self,
        class: &mut ClassMetadata,
        options: &ResolveOptions,
        factory: &AttributeMetadataFactory,
    ) {
        let Some(annotation) = self.annotations.annotations_for(class.name()) else {
            return;
        };

        if let Some(iri) = &annotation.iri {
            class.set_iri(iri.clone());
        }
        if let Some(description) = &annotation.description {
            class.set_description(description.clone());
        }

        let mut applied = 0;
        for (name, overlay) in &annotation.attributes {
            if !class.has_attribute(name) {
                continue;
            }
            let mut attribute = factory.get_attribute_metadata_for(class, name, options);
            if let Some(iri) = &overlay.iri {
                attribute.set_iri(iri.clone());
            }
            if let Some(description) = &overlay.description {
                attribute.set_description(description.clone());
            }
            if overlay.required {
                attribute.set_required(true);
            }
            class.add_attribute(attribute);
            applied += 1;
        }

        debug!(class = class.name(), applied, "annotation loader done");
    }
}

impl std::fmt::Debug for AnnotationLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{AnnotationTable, AttributeAnnotation, ClassAnnotation};
    use crate::attribute::AttributeMetadata;
    use crate::reflection::ClassReflection;
    use crate::registry::ResourceCollection;

    fn load(class: &mut ClassMetadata, table: AnnotationTable) {
        let factory = AttributeMetadataFactory::new(Arc::new(ResourceCollection::new()));
        AnnotationLoader::new(Arc::new(table)).load_class_metadata(
            class,
            &ResolveOptions::new().normalization_groups(["list"]),
            &factory,
        );
    }

    #[test]
    fn overlays_class_and_attribute_annotations() {
        let mut class = ClassMetadata::new(Arc::new(ClassReflection::new("Article")));
        let mut title = AttributeMetadata::new("title");
        title.set_readable(true);
        class.add_attribute(title);

        let table = AnnotationTable::new().with_class(
            "Article",
            ClassAnnotation::new()
                .iri("http://schema.org/Article")
                .description("A news article")
                .attribute(
                    "title",
                    AttributeAnnotation {
                        iri: Some("http://schema.org/headline".into()),
                        description: Some("The headline".into()),
                        required: true,
                    },
                ),
        );
        load(&mut class, table);

        assert_eq!(class.iri(), Some("http://schema.org/Article"));
        assert_eq!(class.description(), Some("A news article"));
        let title = class.attribute("title").unwrap();
        assert_eq!(title.iri(), Some("http://schema.org/headline"));
        assert_eq!(title.description(), Some("The headline"));
        assert!(title.is_required());
        assert!(title.is_readable());
    }

    #[test]
    fn does_not_add_unexposed_attributes() {
        let mut class = ClassMetadata::new(Arc::new(ClassReflection::new("Article")));
        let table = AnnotationTable::new().with_class(
            "Article",
            ClassAnnotation::new().attribute("secret", AttributeAnnotation::default()),
        );
        load(&mut class, table);
        assert!(class.is_empty());
    }

    #[test]
    fn unannotated_class_is_untouched() {
        let mut class = ClassMetadata::new(Arc::new(ClassReflection::new("Article")));
        load(&mut class, AnnotationTable::new());
        assert!(class.iri().is_none());
        assert!(class.description().is_none());
    }
}
