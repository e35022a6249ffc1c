//! Spatial Index Module
//!
//! R-tree over element bounding boxes so long-press and tap hit testing stay
//! O(log n) on plans with many objects. Entries are keyed by any copyable id;
//! the scene keeps one index for objects and one for labels.

use kurbo::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;
use std::hash::Hash;

/// A bounding box tagged with the id of the element it covers.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry<K> {
    pub key: K,
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl<K: Copy> SpatialEntry<K> {
    pub fn new(key: K, bounds: Rect) -> Self {
        let bounds = bounds.abs();
        Self {
            key,
            min: [bounds.x0, bounds.y0],
            max: [bounds.x1, bounds.y1],
        }
    }

    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min[0]
            && point.x <= self.max[0]
            && point.y >= self.min[1]
            && point.y <= self.max[1]
    }
}

impl<K> RTreeObject for SpatialEntry<K> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl<K: PartialEq> PartialEq for SpatialEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// R-tree spatial index answering point queries.
pub struct SpatialIndex<K> {
    tree: RTree<SpatialEntry<K>>,
    entries: HashMap<K, SpatialEntry<K>>,
}

impl<K: Copy + Eq + Hash> SpatialIndex<K> {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the entry for `key`.
    pub fn insert(&mut self, key: K, bounds: Rect) {
        if let Some(old_entry) = self.entries.remove(&key) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(key, bounds);
        self.tree.insert(entry);
        self.entries.insert(key, entry);
    }

    pub fn remove(&mut self, key: K) -> bool {
        if let Some(entry) = self.entries.remove(&key) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Keys whose bounds contain `point`, in no particular order.
    pub fn query_point(&self, point: Point) -> Vec<K> {
        let envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(point))
            .map(|entry| entry.key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + Eq + Hash> Default for SpatialIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
