//! Visibility from accessor naming conventions and public fields.

use tracing::{debug, trace};

use super::Loader;
use crate::class::ClassMetadata;
use crate::factory::AttributeMetadataFactory;
use crate::reflection::Method;
use crate::types::{Direction, ResolveOptions, ACCESSOR_PREFIXES, ISSER_PREFIX, MUTATOR_PREFIXES};

/// Marks attributes readable or writable from the class's public members.
///
/// - `setFoo(x)`, `addFoo(x)`, `removeFoo(x)` make `foo` writable,
/// - `getFoo()`, `hasFoo()`, then `isFoo()` make `foo` readable,
/// - public fields are both readable and writable.
///
/// The name after the prefix must start with an uppercase letter, so `issue()`
/// and `settle(x)` expose nothing.
///
/// Only the directions without caller-supplied groups are affected; when both
/// directions are scoped the loader does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionLoader;

impl ConventionLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for ConventionLoader {
    fn name(&self) -> &'static str {
        "convention"
    }

    fn load_class_metadata(
        &self,
        class: &mut ClassMetadata,
        options: &ResolveOptions,
        factory: &AttributeMetadataFactory,
    ) {
        if options.is_fully_scoped() {
            return;
        }

        let reflection = class.reflection().clone();

        for method in reflection.methods() {
            if let Some(attribute) = mutator_attribute(method, options) {
                mark(class, &attribute, Direction::Denormalization, options, factory);
                continue;
            }

            if method.required_parameters != 0 {
                continue;
            }

            if let Some(attribute) = accessor_attribute(&method.name, options) {
                mark(class, &attribute, Direction::Normalization, options, factory);
                continue;
            }

            if let Some(attribute) = isser_attribute(&method.name, options) {
                mark(class, &attribute, Direction::Normalization, options, factory);
            }
        }

        for field in reflection.public_fields() {
            let mut attribute = factory.get_attribute_metadata_for(class, field, options);
            for direction in Direction::ALL {
                if direction.groups(options).is_none() {
                    attribute.set_visible(direction, true);
                }
            }
            class.add_attribute(attribute);
        }

        debug!(
            class = class.name(),
            methods = reflection.methods().len(),
            fields = reflection.public_fields().len(),
            attributes = class.len(),
            "convention loader done"
        );
    }
}

/// Fetch `name` through the factory, make it visible for `direction` and store it.
fn mark(
    class: &mut ClassMetadata,
    name: &str,
    direction: Direction,
    options: &ResolveOptions,
    factory: &AttributeMetadataFactory,
) {
    trace!(class = class.name(), attribute = name, ?direction, "accessor convention");
    let mut attribute = factory.get_attribute_metadata_for(class, name, options);
    attribute.set_visible(direction, true);
    class.add_attribute(attribute);
}

/// Attribute a method exposes under unscoped conventions, in either direction.
pub(crate) fn convention_attribute(method: &Method) -> Option<String> {
    let unscoped = ResolveOptions::new();
    if let Some(attribute) = mutator_attribute(method, &unscoped) {
        return Some(attribute);
    }
    if method.required_parameters != 0 {
        return None;
    }
    accessor_attribute(&method.name, &unscoped).or_else(|| isser_attribute(&method.name, &unscoped))
}

/// Attribute written by a one-argument `set`/`add`/`remove` method.
///
/// Returns `None` when the write direction is group-scoped.
fn mutator_attribute(method: &Method, options: &ResolveOptions) -> Option<String> {
    if options.denormalization_groups.is_some() || method.required_parameters != 1 {
        return None;
    }

    MUTATOR_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix_ignore_ascii_case(&method.name, prefix))
        .and_then(attribute_name)
}

/// Attribute read by a zero-argument `get`/`has` method.
fn accessor_attribute(method_name: &str, options: &ResolveOptions) -> Option<String> {
    if options.normalization_groups.is_some() {
        return None;
    }

    ACCESSOR_PREFIXES
        .iter()
        .find_map(|prefix| method_name.strip_prefix(prefix))
        .and_then(attribute_name)
}

/// Attribute read by a zero-argument `is` method.
fn isser_attribute(method_name: &str, options: &ResolveOptions) -> Option<String> {
    if options.normalization_groups.is_some() {
        return None;
    }

    method_name
        .strip_prefix(ISSER_PREFIX)
        .and_then(attribute_name)
}

fn strip_prefix_ignore_ascii_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&name[prefix.len()..])
    } else {
        None
    }
}

/// `FirstName` -> `firstName`; `None` unless the remainder starts with an uppercase letter.
fn attribute_name(remainder: &str) -> Option<String> {
    let mut chars = remainder.chars();
    let first = chars.next()?;
    if !first.is_uppercase() {
        return None;
    }
    Some(first.to_lowercase().chain(chars).collect())
}
