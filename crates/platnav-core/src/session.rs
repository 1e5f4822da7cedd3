//! # Session Module
//!
//! Per-tick bookkeeping for a control loop driving the navigation core.
//!
//! A session owns the frozen [`SegmentStore`] and a [`MoveSelector`] over the
//! graph built from it. The control loop calls [`NavSession::tick`] with each
//! fresh position; the session works out where it is, confirms whether the
//! previous goal was reached, and hands back the next plan.
//!
//! Arrival is confirmed one tick after the maneuver, so a maneuver that had
//! no effect or overshot is simply a new starting point.

use crate::builder::GraphBuilder;
use crate::config::TerrainConfig;
use crate::graph::{Edge, NavigationGraph};
use crate::segments::SegmentStore;
use crate::selector::{MoveSelector, Recovery};
use crate::{Coordinate, NavError, PlatformId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the control loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Platform the position was located on.
    pub from: PlatformId,
    /// Edge to traverse.
    pub edge: Edge,
    /// Where to stand before starting the maneuver.
    pub anchor: Coordinate,
    /// Likely follow-up edge from the goal, if it has any.
    pub lookahead: Option<Edge>,
}

/// Control-loop state over a built navigation graph.
#[derive(Debug, Clone)]
pub struct NavSession<R> {
    store: SegmentStore,
    selector: MoveSelector<R>,
    last_platform: Option<PlatformId>,
    goal: Option<PlatformId>,
}

impl<R: Rng> NavSession<R> {
    /// Build the graph for `store` and start a session over it.
    pub fn new(store: SegmentStore, config: TerrainConfig, rng: R) -> Result<Self, NavError> {
        config.validate()?;
        let graph = GraphBuilder::new(config).build(&store);
        Ok(Self {
            store,
            selector: MoveSelector::new(graph, rng),
            last_platform: None,
            goal: None,
        })
    }

    /// Platform under the given position.
    pub fn locate(&self, x: i32, y: i32) -> Result<PlatformId, NavError> {
        self.store
            .locate(x, y)
            .ok_or(NavError::PlatformNotFound { x, y })
    }

    /// Process one position sample and choose the next maneuver.
    ///
    /// `PlatformNotFound` and `NoRouteAvailable` leave the pending goal in
    /// place; the caller is expected to recover and tick again.
    pub fn tick(&mut self, x: i32, y: i32) -> Result<Plan, NavError> {
        let current = self.locate(x, y)?;

        if self.goal == Some(current) {
            let from = self.last_platform.unwrap_or(current);
            self.selector.mark_visited(from, current);
        }
        self.last_platform = Some(current);

        let edge = self.selector.select(current)?;
        self.goal = Some(edge.to);

        let anchor = self.selector.pick_anchor(&edge);
        let lookahead = self.selector.select(edge.to).ok();

        debug!(
            ?current,
            goal = ?edge.to,
            maneuver = %edge.maneuver,
            %anchor,
            "plan chosen"
        );

        Ok(Plan {
            from: current,
            edge,
            anchor,
            lookahead,
        })
    }

    /// Random move for getting unstuck.
    pub fn recovery(&mut self) -> Recovery {
        self.selector.recovery()
    }

    /// Goal of the last plan, not yet confirmed.
    #[must_use]
    pub fn goal(&self) -> Option<PlatformId> {
        self.goal
    }

    #[must_use]
    pub fn last_platform(&self) -> Option<PlatformId> {
        self.last_platform
    }

    #[must_use]
    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    #[must_use]
    pub fn graph(&self) -> &NavigationGraph {
        self.selector.graph()
    }

    #[must_use]
    pub fn completed_cycles(&self) -> u64 {
        self.selector.completed_cycles()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Platform, PlatformKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn platform(x1: i32, x2: i32, y: i32) -> Platform {
        Platform::new(Coordinate::new(x1, y), Coordinate::new(x2, y)).expect("platform")
    }

    fn session() -> (NavSession<ChaCha8Rng>, PlatformId, PlatformId) {
        let mut store = SegmentStore::new();
        let floor = store.insert_platform(PlatformKind::Ordinary, platform(0, 100, 100));
        let ledge = store.insert_platform(PlatformKind::Ordinary, platform(20, 60, 85));
        let session = NavSession::new(
            store,
            TerrainConfig::default(),
            ChaCha8Rng::seed_from_u64(3),
        )
        .expect("session");
        (session, floor, ledge)
    }

    #[test]
    fn tick_plans_from_located_platform() {
        let (mut session, floor, ledge) = session();
        let plan = session.tick(50, 100).expect("tick");

        assert_eq!(plan.from, floor);
        assert_eq!(plan.edge.to, ledge);
        assert!(plan.anchor.x >= 20 && plan.anchor.x <= 60);
        assert_eq!(plan.lookahead.map(|e| e.to), Some(floor));
        assert_eq!(session.goal(), Some(ledge));
    }

    #[test]
    fn off_platform_position_is_not_found() {
        let (mut session, _, _) = session();
        assert!(matches!(
            session.tick(50, 97),
            Err(NavError::PlatformNotFound { x: 50, y: 97 })
        ));
        assert_eq!(session.goal(), None);
    }

    #[test]
    fn reaching_goal_marks_visits() {
        let (mut session, _, ledge) = session();
        session.tick(50, 100).expect("tick");

        // arrived on the ledge: floor -> ledge is now visited
        session.tick(40, 85).expect("tick");
        assert_eq!(session.graph().visited_count(), 1);
        assert_eq!(session.last_platform(), Some(ledge));
    }

    #[test]
    fn failed_maneuver_marks_nothing() {
        let (mut session, floor, _) = session();
        session.tick(50, 100).expect("tick");
        session.tick(52, 100).expect("tick");

        assert_eq!(session.graph().visited_count(), 0);
        assert_eq!(session.last_platform(), Some(floor));
    }

    #[test]
    fn round_trip_completes_a_cycle() {
        let (mut session, _, _) = session();
        session.tick(50, 100).expect("tick");
        session.tick(40, 85).expect("tick");
        session.tick(40, 100).expect("tick");

        assert_eq!(session.completed_cycles(), 1);
        assert_eq!(session.graph().visited_count(), 0);
    }
}
