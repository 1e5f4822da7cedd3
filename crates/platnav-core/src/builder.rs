//! # Graph Builder
//!
//! Computes platform-to-platform reachability from a frozen [`SegmentStore`].
//!
//! Sources are ordinary platforms followed by one-way platforms; destinations
//! are ordinary platforms only. For each ordered pair:
//!
//! | Geometry                        | Condition                          | Maneuver         |
//! |---------------------------------|------------------------------------|------------------|
//! | x-spans overlap, target below   | `from.y < to.y`                    | `Drop`           |
//! | x-spans overlap, target above   | `dy <= dbljump_half_height`        | `DoubleJumpHalf` |
//! | x-spans overlap, target above   | `dy <= doublejump_max_height`      | `DoubleJumpFull` |
//! | disjoint spans                  | `|from.start - to.end| <= range`   | `JumpLeft`       |
//! | disjoint spans                  | `|from.end - to.start| <= range`   | `JumpRight`      |
//!
//! The output depends only on the store and the config.

use crate::config::TerrainConfig;
use crate::graph::NavigationGraph;
use crate::segments::SegmentStore;
use crate::{Coordinate, ManeuverKind, Platform, Reach};
use tracing::{info, warn};

/// Builds a [`NavigationGraph`] from segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    config: TerrainConfig,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(config: TerrainConfig) -> Self {
        Self { config }
    }

    /// Build the navigation graph for every platform in the store.
    #[must_use]
    pub fn build(&self, store: &SegmentStore) -> NavigationGraph {
        let mut graph = NavigationGraph::new();
        let sources: Vec<_> = store.platforms().chain(store.oneway_platforms()).collect();

        for (id, platform) in &sources {
            graph.insert_platform(*id, **platform);
        }

        for (from_id, from) in &sources {
            for (to_id, to) in store.platforms() {
                if *from == to {
                    continue;
                }
                for reach in self.classify(from, to) {
                    if let Err(e) = graph.push_edge(*from_id, to_id, reach) {
                        warn!(?from_id, ?to_id, "edge skipped: {}", e);
                    }
                }
            }
        }

        info!(
            platforms = graph.platform_count(),
            edges = graph.edge_count(),
            "navigation graph built"
        );
        graph
    }

    /// Every way `to` can be reached from `from`, in emission order.
    #[must_use]
    pub fn classify(&self, from: &Platform, to: &Platform) -> Vec<Reach> {
        if from.overlaps_horizontally(to) {
            return self.classify_vertical(from, to).into_iter().collect();
        }

        let range = u64::from(self.config.jump_range);
        let range_squared = range * range;
        let mut reaches = Vec::new();

        if from.start().distance_squared(to.end()) <= range_squared {
            reaches.push(Reach {
                lower: from.start(),
                upper: from.start(),
                maneuver: ManeuverKind::JumpLeft,
            });
        }
        if from.end().distance_squared(to.start()) <= range_squared {
            reaches.push(Reach {
                lower: from.end(),
                upper: from.end(),
                maneuver: ManeuverKind::JumpRight,
            });
        }
        reaches
    }

    fn classify_vertical(&self, from: &Platform, to: &Platform) -> Option<Reach> {
        let y = from.y();
        let lower = Coordinate::new(from.start().x.max(to.start().x), y);
        let upper = Coordinate::new(from.end().x.min(to.end().x), y);

        // y grows downwards: a larger y is lower on screen
        let maneuver = if y < to.y() {
            ManeuverKind::Drop
        } else {
            let height = y.abs_diff(to.y());
            if height <= self.config.dbljump_half_height {
                ManeuverKind::DoubleJumpHalf
            } else if height <= self.config.doublejump_max_height {
                ManeuverKind::DoubleJumpFull
            } else {
                return None;
            }
        };

        Some(Reach {
            lower,
            upper,
            maneuver,
        })
    }
}

/// Build a graph with the given configuration.
#[must_use]
pub fn build_graph(store: &SegmentStore, config: TerrainConfig) -> NavigationGraph {
    GraphBuilder::new(config).build(store)
}

// =============================================================================
// TESTS
// =============================================================================
