use std::collections::HashMap;

use crate::{DotId, Float};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("collection of {found} dots doesn't match registry arity {expected}")]
    Arity { expected: usize, found: usize },
}

/// Order independent identity of `N` dots: members sorted by id, descending.
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key<const N: usize>([DotId; N]);

pub type EdgeKey = Key<2>;
pub type TriangleKey = Key<3>;

impl<const N: usize> Key<N> {
    pub fn new(mut members: [DotId; N]) -> Self {
        members.sort_unstable_by(|a, b| b.cmp(a));
        Self(members)
    }

    /// members in canonical order
    pub fn members(&self) -> [DotId; N] {
        self.0
    }

    pub fn contains(&self, dot_id: DotId) -> bool {
        self.0.contains(&dot_id)
    }
}

/// How repeated insertions heat an entry up and how fast it cools down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heat {
    /// counts never exceed this
    pub max: Float,
    /// subtracted from every count by [`Registry::decay`]
    pub decay: Float,
    /// intensity is `count / (max / amplification)`
    pub amplification: Float,
}

impl Default for Heat {
    fn default() -> Self {
        Self {
            max: 100.,
            decay: 0.5,
            amplification: 2.,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<const N: usize> {
    key: Key<N>,
    count: Float,
}

/// Deduplicated set of edges (`N = 2`) or triangles (`N = 3`).
///
/// Inserting an already known collection bumps its count instead of storing it
/// twice. Iteration yields every canonical collection exactly once.
#[derive(Debug, Clone)]
pub struct Registry<const N: usize> {
    entries: Vec<Entry<N>>,
    index: HashMap<Key<N>, usize>,
    heat: Heat,
}

pub type EdgeRegistry = Registry<2>;
pub type TriangleRegistry = Registry<3>;

impl<const N: usize> Default for Registry<N> {
    fn default() -> Self {
        Self::new(Heat::default())
    }
}

impl<const N: usize> Registry<N> {
    pub fn new(heat: Heat) -> Self {
        Self {
            entries: vec![],
            index: HashMap::new(),
            heat,
        }
    }

    pub fn with_capacity(capacity: usize, heat: Heat) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            heat,
        }
    }

    /// number of members per collection
    pub fn arity(&self) -> usize {
        N
    }

    pub fn heat(&self) -> Heat {
        self.heat
    }

    /// Returns number of distinct collections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a collection, returns its canonical key
    pub fn add(&mut self, members: [DotId; N]) -> Key<N> {
        let key = Key::new(members);
        match self.index.get(&key) {
            Some(&idx) => {
                let entry = &mut self.entries[idx];
                entry.count = (entry.count + 1.).min(self.heat.max);
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(Entry { key, count: 1. });
            }
        }
        key
    }

    /// Insert a collection of runtime length, rejected when it doesn't match the arity
    pub fn try_add(&mut self, members: &[DotId]) -> Result<Key<N>, RegistryError> {
        let members = <[DotId; N]>::try_from(members).map_err(|_| RegistryError::Arity {
            expected: N,
            found: members.len(),
        })?;
        Ok(self.add(members))
    }

    pub fn contains(&self, key: &Key<N>) -> bool {
        self.index.contains_key(key)
    }

    /// current count of `key`
    pub fn count(&self, key: &Key<N>) -> Option<Float> {
        self.index.get(key).map(|&idx| self.entries[idx].count)
    }

    /// Count scaled for rendering, 0 for unknown keys
    pub fn intensity(&self, key: &Key<N>) -> Float {
        self.count(key)
            .map(|count| count / (self.heat.max / self.heat.amplification))
            .unwrap_or(0.)
    }

    /// Cool every entry down by one decay step, dropping the ones that reach zero.
    /// Returns how many entries were dropped.
    pub fn decay(&mut self) -> usize {
        let before = self.entries.len();
        let step = self.heat.decay;
        self.entries.retain_mut(|entry| {
            entry.count -= step;
            entry.count > 0.
        });

        let dropped = before - self.entries.len();
        if dropped > 0 {
            self.reindex();
        }
        dropped
    }

    /// Empty the registry and its key index
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Key<N>> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    /// iterate keys together with their intensity
    pub fn iter_intensity(&self) -> impl Iterator<Item = (Key<N>, Float)> + '_ {
        let scale = self.heat.max / self.heat.amplification;
        self.entries.iter().map(move |e| (e.key, e.count / scale))
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (idx, entry) in self.entries.iter().enumerate() {
            self.index.insert(entry.key, idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>(raw: [u32; N]) -> [DotId; N] {
        raw.map(DotId)
    }

    #[test]
    fn test_key_is_order_independent() {
        assert_eq!(Key::new(ids([1, 2])), Key::new(ids([2, 1])));
        assert_eq!(Key::new(ids([3, 1, 2])), Key::new(ids([2, 3, 1])));
        assert_eq!(Key::new(ids([3, 1, 2])).members(), ids([3, 2, 1]));
        // no collision between "1"+"23" and "12"+"3" like ids
        assert_ne!(Key::new(ids([1, 23])), Key::new(ids([12, 3])));
    }

    #[test]
    fn test_duplicate_edge_stored_once() {
        let mut edges = EdgeRegistry::default();
        let k1 = edges.add(ids([0, 1]));
        let k2 = edges.add(ids([1, 0]));

        assert_eq!(k1, k2);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges.iter().count(), 1);
        assert_eq!(edges.count(&k1), Some(2.));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut triangles = TriangleRegistry::default();
        assert_eq!(
            triangles.try_add(&ids([0, 1])),
            Err(RegistryError::Arity {
                expected: 3,
                found: 2
            })
        );

        let mut edges = EdgeRegistry::default();
        assert_eq!(
            edges.try_add(&ids([0, 1, 2])),
            Err(RegistryError::Arity {
                expected: 2,
                found: 3
            })
        );
        assert!(edges.is_empty());

        assert!(triangles.try_add(&ids([2, 0, 1])).is_ok());
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles.arity(), 3);
    }

    #[test]
    fn test_count_capped() {
        let heat = Heat {
            max: 3.,
            ..Default::default()
        };
        let mut triangles = TriangleRegistry::new(heat);
        for _ in 0..10 {
            triangles.add(ids([0, 1, 2]));
        }
        assert_eq!(triangles.count(&Key::new(ids([0, 1, 2]))), Some(3.));
    }

    #[test]
    fn test_decay_removes_entry() {
        let mut triangles = TriangleRegistry::default();
        let once = triangles.add(ids([0, 1, 2]));
        let twice = triangles.add(ids([1, 2, 3]));
        triangles.add(ids([3, 2, 1]));

        // count 1, step 0.5
        assert_eq!(triangles.decay(), 0);
        assert!(triangles.contains(&once));
        assert_eq!(triangles.decay(), 1);
        assert!(!triangles.contains(&once));
        assert_eq!(triangles.iter().collect::<Vec<_>>(), vec![twice]);
        assert_eq!(triangles.count(&twice), Some(1.));

        // index still valid after eviction
        triangles.add(ids([2, 3, 1]));
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles.count(&twice), Some(2.));
    }

    #[test]
    fn test_intensity() {
        let mut triangles = TriangleRegistry::default();
        let key = triangles.add(ids([0, 1, 2]));
        triangles.add(ids([0, 1, 2]));

        // 2 / (100 / 2)
        assert!((triangles.intensity(&key) - 0.04).abs() < 1e-6);
        assert_eq!(triangles.intensity(&Key::new(ids([5, 6, 7]))), 0.);
        let (k, intensity) = triangles.iter_intensity().next().unwrap();
        assert_eq!(k, key);
        assert_eq!(intensity, triangles.intensity(&key));
    }

    #[test]
    fn test_clear() {
        let mut edges = EdgeRegistry::default();
        let key = edges.add(ids([4, 5]));
        edges.clear();
        assert!(edges.is_empty());
        assert!(!edges.contains(&key));
        edges.add(ids([5, 4]));
        assert_eq!(edges.count(&key), Some(1.));
    }
}
