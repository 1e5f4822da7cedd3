//! # Map Metrics
//!
//! Summary numbers for a [`SegmentStore`] and the [`NavigationGraph`] built
//! from it. All ratios are fixed-point integers.

use crate::ManeuverKind;
use crate::graph::NavigationGraph;
use crate::segments::SegmentStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of map and exploration state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMetrics {
    pub platform_count: usize,
    pub oneway_count: usize,
    pub ladder_count: usize,
    pub visited_coordinates: usize,
    pub edge_count: usize,
    pub visited_edges: usize,
    /// Platforms with no outgoing edge. The selector cannot leave these.
    pub dead_ends: usize,
    /// Visited edges per thousand edges (0 for an empty graph).
    pub coverage_per_thousand: u64,
    /// Edge count per maneuver, keyed by maneuver name.
    pub maneuvers: BTreeMap<String, usize>,
}

impl MapMetrics {
    /// Compute metrics from a store and its graph.
    #[must_use]
    pub fn collect(store: &SegmentStore, graph: &NavigationGraph) -> Self {
        let edge_count = graph.edge_count();
        let visited_edges = graph.visited_count();

        let coverage_per_thousand = if edge_count > 0 {
            (visited_edges as u64).saturating_mul(1000) / (edge_count as u64)
        } else {
            0
        };

        let dead_ends = graph
            .platform_ids()
            .filter(|id| graph.edges_from(*id).is_ok_and(|edges| edges.is_empty()))
            .count();

        let mut maneuvers: BTreeMap<String, usize> = ManeuverKind::ALL
            .iter()
            .map(|kind| (kind.name().to_string(), 0))
            .collect();
        for edge in graph.edges() {
            *maneuvers.entry(edge.maneuver.name().to_string()).or_insert(0) += 1;
        }

        Self {
            platform_count: store.platform_count(),
            oneway_count: store.oneway_count(),
            ladder_count: store.ladders().len(),
            visited_coordinates: store.visited_count(),
            edge_count,
            visited_edges,
            dead_ends,
            coverage_per_thousand,
            maneuvers,
        }
    }

    /// Number of edges using `kind`.
    #[must_use]
    pub fn maneuver_count(&self, kind: ManeuverKind) -> usize {
        self.maneuvers.get(kind.name()).copied().unwrap_or(0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::config::TerrainConfig;
    use crate::selector::MoveSelector;
    use crate::{Coordinate, Platform, PlatformKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn platform(x1: i32, x2: i32, y: i32) -> Platform {
        Platform::new(Coordinate::new(x1, y), Coordinate::new(x2, y)).expect("platform")
    }

    #[test]
    fn empty_map_has_zero_metrics() {
        let store = SegmentStore::new();
        let graph = GraphBuilder::default().build(&store);
        let metrics = MapMetrics::collect(&store, &graph);

        assert_eq!(metrics.platform_count, 0);
        assert_eq!(metrics.edge_count, 0);
        assert_eq!(metrics.coverage_per_thousand, 0);
        assert_eq!(metrics.maneuvers.len(), ManeuverKind::ALL.len());
    }

    #[test]
    fn counts_maneuvers_and_dead_ends() {
        let mut store = SegmentStore::new();
        store.insert_platform(PlatformKind::Ordinary, platform(0, 100, 100));
        store.insert_platform(PlatformKind::Ordinary, platform(20, 60, 85));
        store.insert_platform(PlatformKind::Ordinary, platform(400, 420, 100));
        let graph = GraphBuilder::new(TerrainConfig::default()).build(&store);

        let metrics = MapMetrics::collect(&store, &graph);
        assert_eq!(metrics.edge_count, 2);
        assert_eq!(metrics.maneuver_count(ManeuverKind::Drop), 1);
        assert_eq!(metrics.maneuver_count(ManeuverKind::DoubleJumpHalf), 1);
        assert_eq!(metrics.maneuver_count(ManeuverKind::JumpLeft), 0);
        assert_eq!(metrics.dead_ends, 1);
    }

    #[test]
    fn coverage_tracks_visited_edges() {
        let mut store = SegmentStore::new();
        let floor = store.insert_platform(PlatformKind::Ordinary, platform(0, 100, 100));
        let a = store.insert_platform(PlatformKind::Ordinary, platform(10, 30, 85));
        store.insert_platform(PlatformKind::Ordinary, platform(60, 80, 85));
        let graph = GraphBuilder::new(TerrainConfig::default()).build(&store);
        let mut selector = MoveSelector::new(graph, ChaCha8Rng::seed_from_u64(5));

        selector.mark_visited(floor, a);
        let metrics = MapMetrics::collect(&store, selector.graph());
        assert_eq!(metrics.visited_edges, 1);
        assert_eq!(metrics.coverage_per_thousand, 250);
    }
}
