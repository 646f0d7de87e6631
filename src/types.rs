//! Core types for attribute metadata resolution.

use std::collections::BTreeSet;

/// Attribute name that is treated as the identifier unless overridden.
pub const DEFAULT_IDENTIFIER_NAME: &str = "id";

/// Method prefixes that mark a one-argument mutator (`setName`, `addTag`, `removeTag`).
pub const MUTATOR_PREFIXES: &[&str] = &["set", "add", "remove"];

/// Method prefixes that mark a zero-argument accessor, checked in order.
pub const ACCESSOR_PREFIXES: &[&str] = &["get", "has"];

/// Method prefix for boolean accessors, checked after [`ACCESSOR_PREFIXES`].
pub const ISSER_PREFIX: &str = "is";

/// A set of serialization group names.
pub type GroupSet = BTreeSet<String>;

/// Returns true when the two group sets share at least one group.
pub fn groups_intersect(left: &GroupSet, right: &GroupSet) -> bool {
    left.intersection(right).next().is_some()
}

/// Direction of a (de)serialization.
///
/// Normalization produces output (read), denormalization consumes input (write).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Normalization,
    Denormalization,
}

impl Direction {
    /// Both directions, read first.
    pub const ALL: [Direction; 2] = [Direction::Normalization, Direction::Denormalization];

    /// Returns the caller's group set for this direction, if one was supplied.
    pub fn groups<'a>(&self, options: &'a ResolveOptions) -> Option<&'a GroupSet> {
        match self {
            Direction::Normalization => options.normalization_groups.as_ref(),
            Direction::Denormalization => options.denormalization_groups.as_ref(),
        }
    }
}

/// Group context for one class resolution.
///
/// `None` for a direction means the caller did not scope that direction:
/// accessor conventions decide visibility and relations are fully embedded.
/// `Some` (even an empty set) means only group-matching attributes take part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolveOptions {
    /// Groups used when producing output.
    pub normalization_groups: Option<GroupSet>,
    /// Groups used when accepting input.
    pub denormalization_groups: Option<GroupSet>,
}

impl ResolveOptions {
    /// Create options with both directions unscoped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope the read direction to the given groups.
    pub fn normalization_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.normalization_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Scope the write direction to the given groups.
    pub fn denormalization_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denormalization_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// True when neither direction is scoped by groups.
    pub fn is_unscoped(&self) -> bool {
        self.normalization_groups.is_none() && self.denormalization_groups.is_none()
    }

    /// True when both directions are scoped by groups.
    pub fn is_fully_scoped(&self) -> bool {
        self.normalization_groups.is_some() && self.denormalization_groups.is_some()
    }
}
