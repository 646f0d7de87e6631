//! Resource registry: which domain classes are exposed as API resources.

use indexmap::IndexMap;

/// Lookup from a domain class to the resource that exposes it.
pub trait ResourceRegistry: Send + Sync {
    /// Returns the resource identifier for `class_name`, or `None` when the
    /// class is not exposed.
    fn resource_for_class(&self, class_name: &str) -> Option<&str>;
}

/// In-memory registry mapping class names to resource short names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceCollection {
    resources: IndexMap<String, String>,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `class_name` under `short_name`.
    pub fn insert(&mut self, class_name: impl Into<String>, short_name: impl Into<String>) {
        self.resources.insert(class_name.into(), short_name.into());
    }

    /// Register a class using its own name as the short name.
    pub fn with_resource(mut self, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        self.insert(class_name.clone(), class_name);
        self
    }

    pub fn with_named_resource(
        mut self,
        class_name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        self.insert(class_name, short_name);
        self
    }

    /// Registered class names in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceRegistry for ResourceCollection {
    fn resource_for_class(&self, class_name: &str) -> Option<&str> {
        self.resources.get(class_name).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for ResourceCollection {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_for_registered_class() {
        let registry = ResourceCollection::new()
            .with_resource("Person")
            .with_named_resource("Tag", "tags");

        assert_eq!(registry.resource_for_class("Person"), Some("Person"));
        assert_eq!(registry.resource_for_class("Tag"), Some("tags"));
        assert_eq!(registry.resource_for_class("Comment"), None);
        assert_eq!(registry.classes().collect::<Vec<_>>(), ["Person", "Tag"]);
    }
}
