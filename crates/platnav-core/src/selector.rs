//! # Move Selector
//!
//! Exploration-biased choice of the next edge to traverse.
//!
//! - A platform with a single edge always takes it
//! - Otherwise unvisited edges are preferred, uniformly at random
//! - When every edge of the platform is visited, any edge may be chosen
//! - Once the whole graph is covered, all visited flags reset
//!
//! Randomness comes from an injected [`Rng`] so runs are reproducible with
//! a seeded generator.

use crate::graph::{Edge, NavigationGraph};
use crate::{Coordinate, NavError, PlatformId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Random movement the control loop can fall back to when it cannot
/// locate itself or has no route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    StepLeft,
    StepRight,
    Drop,
    DoubleJump,
    /// Stay put for one tick.
    Hold,
}

impl Recovery {
    pub const ALL: [Self; 5] = [
        Self::StepLeft,
        Self::StepRight,
        Self::Drop,
        Self::DoubleJump,
        Self::Hold,
    ];
}

/// Owns a [`NavigationGraph`] and picks edges from it.
#[derive(Debug, Clone)]
pub struct MoveSelector<R> {
    graph: NavigationGraph,
    rng: R,
    completed_cycles: u64,
}

impl<R: Rng> MoveSelector<R> {
    #[must_use]
    pub fn new(graph: NavigationGraph, rng: R) -> Self {
        Self {
            graph,
            rng,
            completed_cycles: 0,
        }
    }

    /// Choose the next edge to traverse from `current`.
    pub fn select(&mut self, current: PlatformId) -> Result<Edge, NavError> {
        let edges = self.graph.edges_from(current)?;

        if let [only] = edges.as_slice() {
            return Ok(**only);
        }

        let unvisited: Vec<&Edge> = edges
            .iter()
            .copied()
            .filter(|edge| !self.graph.is_visited(edge.id))
            .collect();

        let pool = if unvisited.is_empty() {
            &edges
        } else {
            &unvisited
        };

        pool.choose(&mut self.rng)
            .map(|edge| **edge)
            .ok_or(NavError::NoRouteAvailable(current))
    }

    /// Record a confirmed arrival on `to`.
    ///
    /// Every edge into `to` becomes visited. When that leaves no platform
    /// with an unvisited edge, all flags reset and a new cycle starts.
    pub fn mark_visited(&mut self, from: PlatformId, to: PlatformId) {
        let marked = self.graph.mark_arrivals(to);
        debug!(?from, ?to, marked, "arrival recorded");

        if self.graph.edge_count() > 0 && self.graph.is_fully_covered() {
            self.graph.reset_visits();
            self.completed_cycles = self.completed_cycles.saturating_add(1);
            info!(cycle = self.completed_cycles, "graph fully covered, visits reset");
        }
    }

    /// Uniform x within the edge's start interval, at the source height.
    pub fn pick_anchor(&mut self, edge: &Edge) -> Coordinate {
        let (lo, hi) = (edge.lower.x.min(edge.upper.x), edge.lower.x.max(edge.upper.x));
        Coordinate::new(self.rng.gen_range(lo..=hi), edge.lower.y)
    }

    /// Uniform random recovery move.
    pub fn recovery(&mut self) -> Recovery {
        Recovery::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Recovery::Hold)
    }

    #[must_use]
    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> NavigationGraph {
        self.graph
    }

    /// Number of full-coverage resets so far.
    #[must_use]
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }
}

// =============================================================================
// TESTS
// =============================================================================
