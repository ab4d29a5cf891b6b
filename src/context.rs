use crate::{
    dots::{DotId, Dots},
    neighbors::Neighborhoods,
    registry::{EdgeRegistry, TriangleRegistry},
};

/// State of one traversal. Registries are borrowed so a caller decides whether
/// they survive the frame, visited flags and own-connections live and die here.
pub struct Context<'a> {
    pub dots: &'a Dots,
    pub neighborhoods: &'a Neighborhoods,
    pub edges: &'a mut EdgeRegistry,
    pub triangles: &'a mut TriangleRegistry,

    visited: Vec<bool>,
    own_connections: Vec<Vec<DotId>>,
}

impl<'a> Context<'a> {
    pub fn new(
        dots: &'a Dots,
        neighborhoods: &'a Neighborhoods,
        edges: &'a mut EdgeRegistry,
        triangles: &'a mut TriangleRegistry,
    ) -> Self {
        Self {
            dots,
            neighborhoods,
            edges,
            triangles,
            visited: vec![false; dots.len()],
            own_connections: vec![vec![]; dots.len()],
        }
    }

    pub fn is_visited(&self, dot_id: DotId) -> bool {
        self.visited.get(dot_id.as_usize()).copied().unwrap_or(false)
    }

    pub(crate) fn mark_visited(&mut self, dot_id: DotId) {
        if let Some(v) = self.visited.get_mut(dot_id.as_usize()) {
            *v = true;
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    /// edges admitted with `dot_id` as the spoke center
    pub fn own_connections(&self, dot_id: DotId) -> &[DotId] {
        self.own_connections
            .get(dot_id.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn connect(&mut self, dot_id: DotId, other: DotId) {
        if let Some(connections) = self.own_connections.get_mut(dot_id.as_usize()) {
            connections.push(other);
        }
    }

    /// Release the borrowed registries, keeping what the traversal produced
    pub fn finish(self) -> Grouping {
        Grouping {
            visited: self.visited,
            own_connections: self.own_connections,
        }
    }
}

/// What remains of a traversal once the registries are handed back
#[derive(Debug, Default, Clone)]
pub struct Grouping {
    visited: Vec<bool>,
    own_connections: Vec<Vec<DotId>>,
}

impl Grouping {
    pub fn is_visited(&self, dot_id: DotId) -> bool {
        self.visited.get(dot_id.as_usize()).copied().unwrap_or(false)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    pub fn own_connections(&self, dot_id: DotId) -> &[DotId] {
        self.own_connections
            .get(dot_id.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// every (dot, connected dot) pair, grouped by dot
    pub fn iter_connections(&self) -> impl Iterator<Item = (DotId, DotId)> + '_ {
        self.own_connections
            .iter()
            .enumerate()
            .flat_map(|(idx, others)| {
                let dot_id = DotId(idx as u32);
                others.iter().map(move |other| (dot_id, *other))
            })
    }
}
