//! Visibility from group membership tables.

use std::sync::Arc;

use tracing::{debug, trace};

use super::Loader;
use crate::attribute::AttributeMetadata;
use crate::class::ClassMetadata;
use crate::factory::AttributeMetadataFactory;
use crate::groups::GroupProvider;
use crate::types::{Direction, ResolveOptions};

/// Marks attributes readable or writable when their groups intersect the
/// caller's groups, and decides how scoped relations are embedded.
///
/// Does nothing when neither direction is scoped.
#[derive(Clone)]
pub struct GroupLoader {
    groups: Arc<dyn GroupProvider>,
}

impl GroupLoader {
    pub fn new(groups: Arc<dyn GroupProvider>) -> Self {
        Self { groups }
    }

    /// Decide embedding for a link attribute in the directions not already embedded.
    ///
    /// The related class's whole group table is consulted:
    ///
    /// - no table: embed in both directions,
    /// - some entry intersects the caller's groups for a direction: keep a
    ///   reference for that direction, the related class exposes its own
    ///   scoped attributes,
    /// - no entry intersects: embed, since a scoped reference would be empty.
    ///
    /// The outcome depends only on set intersection, never on entry order.
    pub fn refine_link(&self, attribute: &mut AttributeMetadata, options: &ResolveOptions) {
        if !attribute.is_link() {
            return;
        }
        let Some(related) = attribute.link_class() else {
            return;
        };

        let Some(table) = self.groups.attributes_for(related) else {
            trace!(attribute = attribute.name(), related, "related class has no group table");
            attribute.set_normalization_link(true);
            attribute.set_denormalization_link(true);
            return;
        };

        for direction in Direction::ALL {
            if attribute.is_embedded(direction) {
                continue;
            }
            let referenced = direction
                .groups(options)
                .is_some_and(|groups| table.iter().any(|entry| entry.matches(groups)));
            if !referenced {
                attribute.set_embedded(direction, true);
            }
        }
    }
}

impl Loader for GroupLoader {
    fn name(&self) -> &'static str {
        "groups"
    }

    fn load_class_metadata(
        &self,
        class: &mut ClassMetadata,
        options: &ResolveOptions,
        factory: &AttributeMetadataFactory,
    ) {
        if options.is_unscoped() {
            return;
        }

        if let Some(table) = self.groups.attributes_for(class.name()) {
            for entry in table {
                let matched: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|direction| {
                        direction
                            .groups(options)
                            .is_some_and(|groups| entry.matches(groups))
                    })
                    .collect();
                if matched.is_empty() {
                    continue;
                }

                let mut attribute = factory.get_attribute_metadata_for(class, &entry.name, options);
                for direction in matched {
                    attribute.set_visible(direction, true);
                }
                class.add_attribute(attribute);
            }
        }

        // Relations added by any loader so far, including the convention pass.
        let pending: Vec<AttributeMetadata> = class
            .attributes()
            .filter(|a| a.is_link() && !(a.is_normalization_link() && a.is_denormalization_link()))
            .cloned()
            .collect();
        for mut attribute in pending {
            self.refine_link(&mut attribute, options);
            class.add_attribute(attribute);
        }

        debug!(class = class.name(), attributes = class.len(), "group loader done");
    }
}

impl std::fmt::Debug for GroupLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupLoader").finish_non_exhaustive()
    }
}
