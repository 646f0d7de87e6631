//! Group membership tables: which serialization groups each attribute belongs to.

use std::collections::HashMap;

use crate::types::{groups_intersect, GroupSet};

/// One attribute of a class together with the groups it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedAttribute {
    pub name: String,
    pub groups: GroupSet,
}

impl GroupedAttribute {
    pub fn new<I, S>(name: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the attribute belongs to any of `groups`.
    pub fn matches(&self, groups: &GroupSet) -> bool {
        groups_intersect(&self.groups, groups)
    }
}

/// Source of per-class group membership.
pub trait GroupProvider: Send + Sync {
    /// Ordered `(attribute, groups)` pairs declared for `class_name`.
    ///
    /// `None` means the class has no group table at all, which is distinct
    /// from a table with no entries.
    fn attributes_for(&self, class_name: &str) -> Option<&[GroupedAttribute]>;
}

/// In-memory group tables keyed by class name.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    classes: HashMap<String, Vec<GroupedAttribute>>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whole table for a class.
    pub fn insert(&mut self, class_name: impl Into<String>, attributes: Vec<GroupedAttribute>) {
        self.classes.insert(class_name.into(), attributes);
    }

    /// Append one attribute entry to a class table, creating the table if needed.
    pub fn with_attribute<I, S>(
        mut self,
        class_name: impl Into<String>,
        attribute: impl Into<String>,
        groups: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes
            .entry(class_name.into())
            .or_default()
            .push(GroupedAttribute::new(attribute, groups));
        self
    }

    /// Declare an empty table for a class.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.classes.entry(class_name.into()).or_default();
        self
    }
}

impl GroupProvider for GroupTable {
    fn attributes_for(&self, class_name: &str) -> Option<&[GroupedAttribute]> {
        self.classes.get(class_name).map(Vec::as_slice)
    }
}
