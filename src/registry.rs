//! Explicit registry of live galleries.
//!
//! The host application owns one registry for its lifetime and passes it by
//! reference to whatever needs to find a gallery by handle.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle returned by [`GalleryRegistry::insert`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GalleryId(u32);

impl GalleryId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GalleryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gallery#{}", self.0)
    }
}

/// Instances keyed by auto-incrementing id.
#[derive(Debug)]
pub struct GalleryRegistry<G> {
    next_id: u32,
    entries: BTreeMap<GalleryId, G>,
}

impl<G> Default for GalleryRegistry<G> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }
}

impl<G> GalleryRegistry<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `gallery` under a fresh id (ids start at 1).
    pub fn insert(&mut self, gallery: G) -> GalleryId {
        self.next_id = self.next_id.wrapping_add(1).max(1);
        let id = GalleryId(self.next_id);
        self.entries.insert(id, gallery);
        id
    }

    pub fn get(&self, id: GalleryId) -> Option<&G> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: GalleryId) -> Option<&mut G> {
        self.entries.get_mut(&id)
    }

    /// Remove on teardown, returning the instance.
    pub fn remove(&mut self, id: GalleryId) -> Option<G> {
        self.entries.remove(&id)
    }

    /// First instance matching `pred`, e.g. by owned element.
    pub fn find(&self, mut pred: impl FnMut(&G) -> bool) -> Option<GalleryId> {
        self.entries
            .iter()
            .find_map(|(id, gallery)| pred(gallery).then_some(*id))
    }

    pub fn ids(&self) -> impl Iterator<Item = GalleryId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increment_and_are_not_reused() {
        let mut registry = GalleryRegistry::new();
        let a = registry.insert("a");
        let b = registry.insert("b");
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);

        assert_eq!(registry.remove(a), Some("a"));
        let c = registry.insert("c");
        assert_eq!(c.get(), 3);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(a).is_none());
    }

    #[test]
    fn test_find_and_get_mut() {
        let mut registry = GalleryRegistry::new();
        registry.insert(10);
        let id = registry.insert(20);
        assert_eq!(registry.find(|g| *g == 20), Some(id));
        *registry.get_mut(id).unwrap() += 1;
        assert_eq!(registry.get(id), Some(&21));
        assert_eq!(registry.ids().collect::<Vec<_>>().len(), 2);
    }
}
