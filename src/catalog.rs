//! Resource catalog: the immutable input of one problem instance.
//!
//! Each [`Resource`] offers a fixed finite set of integer values (the faces of
//! a die in the reference problem). Resources are addressed by their *slot*,
//! i.e. their position in the catalog; the [`ResourceId`] is only the
//! caller-visible identity and is checked for uniqueness when indexing.

use std::fmt;

/// Caller-visible identity of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub usize);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A resource offering a fixed set of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub values: Vec<i64>,
}

impl Resource {
    pub fn new(id: usize, values: impl Into<Vec<i64>>) -> Self {
        Self {
            id: ResourceId(id),
            values: values.into(),
        }
    }

    /// Whether this resource can back `value`.
    pub fn offers(&self, value: i64) -> bool {
        self.values.contains(&value)
    }
}

/// Ordered, immutable collection of resources for one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceCatalog {
    resources: Vec<Resource>,
}

impl ResourceCatalog {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    /// Build a catalog from bare value sets, numbering ids `0..n` in order.
    pub fn from_values<I, V>(sets: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<i64>>,
    {
        let resources = sets
            .into_iter()
            .enumerate()
            .map(|(id, values)| Resource::new(id, values))
            .collect();
        Self { resources }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resource stored at `slot`.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&Resource> {
        self.resources.get(slot)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.resources.iter()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

impl From<Vec<Resource>> for ResourceCatalog {
    fn from(resources: Vec<Resource>) -> Self {
        Self::new(resources)
    }
}

impl<'a> IntoIterator for &'a ResourceCatalog {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
