//! Loaders that populate [`ClassMetadata`] from one source of visibility information.
//!
//! Loaders are composed in a fixed order by the class metadata factory:
//!
//! 1. [`ConventionLoader`] - accessor naming conventions and public fields, for
//!    the directions the caller did not scope with groups,
//! 2. [`GroupLoader`] - group membership tables, for the scoped directions,
//! 3. [`AnnotationLoader`] - IRIs, descriptions and required flags.

mod annotation;
mod convention;
mod groups;

pub use annotation::AnnotationLoader;
pub use convention::ConventionLoader;
pub(crate) use convention::convention_attribute;
pub use groups::GroupLoader;

use crate::class::ClassMetadata;
use crate::factory::AttributeMetadataFactory;
use crate::types::ResolveOptions;

/// Populates class metadata from one source of visibility information.
pub trait Loader: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Add or update attributes of `class` for the given group context.
    ///
    /// Attributes are fetched through `factory` so that their type and link
    /// state is derived before visibility is set.
    fn load_class_metadata(
        &self,
        class: &mut ClassMetadata,
        options: &ResolveOptions,
        factory: &AttributeMetadataFactory,
    );
}
