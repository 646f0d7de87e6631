//! Class metadata resolution - runs the configured loaders over a class.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, debug_span};

use crate::annotations::AnnotationProvider;
use crate::class::ClassMetadata;
use crate::error::ResolveError;
use crate::factory::AttributeMetadataFactory;
use crate::groups::GroupProvider;
use crate::mapping::Mapping;
use crate::reflection::ReflectionProvider;
use crate::registry::ResourceRegistry;
use crate::strategy::{AnnotationLoader, ConventionLoader, GroupLoader, Loader};
use crate::types::ResolveOptions;

/// Resolves the attribute metadata of a class for a group context.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use resource_mapping::{
///     AnnotationTable, BuiltinType, ClassMetadataFactory, ClassReflection, GroupTable,
///     ReflectionTable, ResolveOptions, ResourceCollection, SemanticType,
/// };
///
/// let reflection = ReflectionTable::new().with_class(
///     ClassReflection::new("Article")
///         .property("title", vec![SemanticType::builtin(BuiltinType::String)])
///         .public_field("title"),
/// );
/// let factory = ClassMetadataFactory::standard(
///     Arc::new(reflection),
///     Arc::new(ResourceCollection::new()),
///     Arc::new(GroupTable::new()),
///     Arc::new(AnnotationTable::new()),
/// );
///
/// let article = factory.resolve_class("Article", &ResolveOptions::new()).unwrap();
/// assert!(article.attribute("title").unwrap().is_readable());
/// ```
pub struct ClassMetadataFactory {
    reflection: Arc<dyn ReflectionProvider>,
    attributes: AttributeMetadataFactory,
    loaders: Vec<Box<dyn Loader>>,
}

impl ClassMetadataFactory {
    /// Create a factory with no loaders.
    pub fn new(reflection: Arc<dyn ReflectionProvider>, registry: Arc<dyn ResourceRegistry>) -> Self {
        Self {
            reflection,
            attributes: AttributeMetadataFactory::new(registry),
            loaders: Vec::new(),
        }
    }

    /// Create a factory with the standard loader chain:
    /// conventions, then groups, then annotations.
    pub fn standard(
        reflection: Arc<dyn ReflectionProvider>,
        registry: Arc<dyn ResourceRegistry>,
        groups: Arc<dyn GroupProvider>,
        annotations: Arc<dyn AnnotationProvider>,
    ) -> Self {
        Self::new(reflection, registry)
            .with_loader(ConventionLoader::new())
            .with_loader(GroupLoader::new(groups))
            .with_loader(AnnotationLoader::new(annotations))
    }

    /// Create a standard factory from a mapping document.
    pub fn from_mapping(mapping: Mapping) -> Self {
        let tables = mapping.into_tables();
        Self::standard(
            Arc::new(tables.reflection),
            Arc::new(tables.resources),
            Arc::new(tables.groups),
            Arc::new(tables.annotations),
        )
    }

    /// Append a loader; loaders run in the order they were added.
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    /// Resolve the metadata of `class_name` for the given group context.
    ///
    /// Each call builds a fresh [`ClassMetadata`]; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the reflection provider's error when the class is unknown.
    pub fn resolve_class(
        &self,
        class_name: &str,
        options: &ResolveOptions,
    ) -> Result<ClassMetadata, ResolveError> {
        let span = debug_span!("resolve_class", class = class_name);
        let _guard = span.enter();

        let reflection = self.reflection.reflect(class_name)?;
        let mut class = ClassMetadata::new(reflection);

        debug!(
            normalization_groups = ?options.normalization_groups,
            denormalization_groups = ?options.denormalization_groups,
            "resolving"
        );

        for loader in &self.loaders {
            loader.load_class_metadata(&mut class, options, &self.attributes);
            debug!(loader = loader.name(), attributes = class.len(), "loader applied");
        }

        Ok(class)
    }
}

impl std::fmt::Debug for ClassMetadataFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loaders: Vec<_> = self.loaders.iter().map(|l| l.name()).collect();
        f.debug_struct("ClassMetadataFactory")
            .field("loaders", &loaders)
            .finish_non_exhaustive()
    }
}

/// Memoizing wrapper around [`ClassMetadataFactory`].
///
/// Results are keyed by class name and group context. Collaborator data is
/// assumed not to change while the cache is alive; call [`clear`](Self::clear)
/// after changing it.
#[derive(Debug)]
pub struct CachedClassMetadataFactory {
    inner: ClassMetadataFactory,
    cache: RwLock<HashMap<(String, ResolveOptions), ClassMetadata>>,
}

impl CachedClassMetadataFactory {
    pub fn new(inner: ClassMetadataFactory) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve through the cache. Errors are not cached.
    ///
    /// # Errors
    ///
    /// Returns the reflection provider's error when the class is unknown.
    pub fn resolve_class(
        &self,
        class_name: &str,
        options: &ResolveOptions,
    ) -> Result<ClassMetadata, ResolveError> {
        let key = (class_name.to_string(), options.clone());

        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
        }

        let resolved = self.inner.resolve_class(class_name, options)?;
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, resolved.clone());
        }
        Ok(resolved)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }
}
