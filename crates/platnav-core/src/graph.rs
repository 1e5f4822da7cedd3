//! # Navigation Graph
//!
//! Directed, maneuver-annotated reachability between platforms.
//!
//! Edges are stored once in an arena indexed by [`EdgeId`]; each platform
//! keeps its outgoing edge ids in build order. Visit bookkeeping is a side
//! set of edge ids owned by the graph, so edges themselves stay immutable.

use crate::{Coordinate, EdgeId, ManeuverKind, NavError, Platform, PlatformId, Reach};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One directed reachability relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: PlatformId,
    pub to: PlatformId,
    /// Left end of the interval the maneuver can start from.
    pub lower: Coordinate,
    /// Right end of the interval the maneuver can start from.
    pub upper: Coordinate,
    pub maneuver: ManeuverKind,
}

/// Platform -> ordered outgoing edges, plus visited state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationGraph {
    /// Platform arena: every source and destination is a key here.
    platforms: BTreeMap<PlatformId, Platform>,

    /// Adjacency: from_platform -> edge ids in build order
    adjacency: BTreeMap<PlatformId, Vec<EdgeId>>,

    /// Edge arena, indexed by `EdgeId.0`.
    edges: Vec<Edge>,

    /// Edges visited since the last reset.
    visited: BTreeSet<EdgeId>,
}

impl NavigationGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a platform. A platform without edges still gets an empty
    /// adjacency list.
    pub(crate) fn insert_platform(&mut self, id: PlatformId, platform: Platform) {
        self.platforms.insert(id, platform);
        self.adjacency.entry(id).or_default();
    }

    /// Append an edge to `from`'s adjacency list.
    ///
    /// Both endpoints must already be registered; edges touching unknown
    /// platforms are refused.
    pub(crate) fn push_edge(
        &mut self,
        from: PlatformId,
        to: PlatformId,
        reach: Reach,
    ) -> Result<EdgeId, NavError> {
        if !self.platforms.contains_key(&to) {
            return Err(NavError::UnknownPlatform(to));
        }
        let targets = self
            .adjacency
            .get_mut(&from)
            .ok_or(NavError::UnknownPlatform(from))?;

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            from,
            to,
            lower: reach.lower,
            upper: reach.upper,
            maneuver: reach.maneuver,
        });
        targets.push(id);
        Ok(id)
    }

    /// Outgoing edges of a platform, in build order.
    pub fn edges_from(&self, platform: PlatformId) -> Result<Vec<&Edge>, NavError> {
        let ids = self
            .adjacency
            .get(&platform)
            .ok_or(NavError::UnknownPlatform(platform))?;
        Ok(ids.iter().filter_map(|id| self.edge(*id)).collect())
    }

    /// Get an edge by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0 as usize)
    }

    /// All edges in build order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get a platform by id.
    #[must_use]
    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(&id)
    }

    /// All platform keys in id order.
    pub fn platform_ids(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.platforms.keys().copied()
    }

    #[must_use]
    pub fn contains_platform(&self, id: PlatformId) -> bool {
        self.platforms.contains_key(&id)
    }

    #[must_use]
    pub fn is_visited(&self, edge: EdgeId) -> bool {
        self.visited.contains(&edge)
    }

    /// Mark every edge whose destination is `to`, from any platform.
    ///
    /// Returns the number of edges newly marked.
    pub(crate) fn mark_arrivals(&mut self, to: PlatformId) -> usize {
        let mut marked = 0;
        for edge in self.edges.iter().filter(|edge| edge.to == to) {
            if self.visited.insert(edge.id) {
                marked += 1;
            }
        }
        marked
    }

    /// True iff no platform has an unvisited outgoing edge.
    #[must_use]
    pub fn is_fully_covered(&self) -> bool {
        self.adjacency
            .values()
            .all(|ids| ids.iter().all(|id| self.visited.contains(id)))
    }

    /// Clear every visited flag.
    pub(crate) fn reset_visits(&mut self) {
        self.visited.clear();
    }

    #[must_use]
    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
