//! # Stream Segmenter
//!
//! Turns a stream of position samples into platform and ladder segments.
//!
//! - One sample per call, no lookahead
//! - Continuity decided against the previous sample only
//! - Runs are committed when continuity breaks (or on `finish`)
//! - Degenerate runs are rejected, never stored

use crate::config::TerrainConfig;
use crate::segments::SegmentStore;
use crate::{Coordinate, NavError, PlatformKind};
use tracing::{debug, warn};

/// Accumulates position samples into runs and commits them to a
/// [`SegmentStore`].
///
/// The platform and one-way paths share the previous sample; a caller
/// decides per sample which path it belongs to. Only the ordinary path
/// feeds the ladder buffer.
#[derive(Debug, Clone)]
pub struct StreamSegmenter {
    config: TerrainConfig,
    store: SegmentStore,
    last: Option<Coordinate>,
    platform_run: Vec<Coordinate>,
    oneway_run: Vec<Coordinate>,
    ladder_run: Vec<Coordinate>,
}

impl StreamSegmenter {
    /// Start mapping into an empty store.
    pub fn new(config: TerrainConfig) -> Result<Self, NavError> {
        Self::resume(config, SegmentStore::new())
    }

    /// Continue mapping on top of an existing store.
    pub fn resume(config: TerrainConfig, store: SegmentStore) -> Result<Self, NavError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            last: None,
            platform_run: Vec::new(),
            oneway_run: Vec::new(),
            ladder_run: Vec::new(),
        })
    }

    /// Feed one sample taken on ordinary terrain.
    ///
    /// A pending one-way run is closed first, so a run never spans both
    /// paths.
    pub fn observe(&mut self, x: i32, y: i32) {
        let sample = Coordinate::new(x, y);
        self.store.record_visit(sample);
        self.close_platform_run(PlatformKind::Oneway);
        self.feed_horizontal(PlatformKind::Ordinary, sample);
        self.feed_vertical(sample);
        self.last = Some(sample);
    }

    /// Feed one sample taken on a one-way platform.
    ///
    /// Pending ordinary platform and ladder runs are closed first.
    pub fn observe_oneway(&mut self, x: i32, y: i32) {
        let sample = Coordinate::new(x, y);
        self.store.record_visit(sample);
        self.close_platform_run(PlatformKind::Ordinary);
        self.close_ladder_run();
        self.feed_horizontal(PlatformKind::Oneway, sample);
        self.last = Some(sample);
    }

    /// Commit the pending run of `kind` if it is long enough, then clear it.
    fn close_platform_run(&mut self, kind: PlatformKind) {
        let run = match kind {
            PlatformKind::Ordinary => std::mem::take(&mut self.platform_run),
            PlatformKind::Oneway => std::mem::take(&mut self.oneway_run),
        };
        if run.len() >= self.config.minimum_platform_length {
            commit_platform_run(&mut self.store, kind, &run);
        }
    }

    fn close_ladder_run(&mut self) {
        let run = std::mem::take(&mut self.ladder_run);
        if run.len() >= self.config.minimum_ladder_length {
            commit_ladder_run(&mut self.store, &run);
        }
    }

    fn feed_horizontal(&mut self, kind: PlatformKind, sample: Coordinate) {
        let variance = self.config.platform_variance;
        let continues = self
            .last
            .is_some_and(|last| sample.y == last.y && sample.x.abs_diff(last.x) <= variance);

        let run = match kind {
            PlatformKind::Ordinary => &mut self.platform_run,
            PlatformKind::Oneway => &mut self.oneway_run,
        };

        if continues {
            if !run.contains(&sample) {
                run.push(sample);
            }
            return;
        }

        let closed = std::mem::take(run);
        if closed.len() >= self.config.minimum_platform_length {
            commit_platform_run(&mut self.store, kind, &closed);
        }
        if !closed.contains(&sample) {
            run.push(sample);
        }
    }

    fn feed_vertical(&mut self, sample: Coordinate) {
        let variance = self.config.ladder_variance;
        let continues = self
            .last
            .is_some_and(|last| sample.x == last.x && sample.y.abs_diff(last.y) <= variance);

        if continues {
            if !self.ladder_run.contains(&sample) {
                self.ladder_run.push(sample);
            }
            return;
        }

        let closed = std::mem::take(&mut self.ladder_run);
        if closed.len() >= self.config.minimum_ladder_length {
            commit_ladder_run(&mut self.store, &closed);
        }
        if !closed.contains(&sample) {
            self.ladder_run.push(sample);
        }
    }

    /// Commit every pending run long enough to count and return the store.
    pub fn finish(mut self) -> SegmentStore {
        self.close_platform_run(PlatformKind::Ordinary);
        self.close_platform_run(PlatformKind::Oneway);
        self.close_ladder_run();
        self.store
    }

    /// The segments committed so far.
    #[must_use]
    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Samples of the pending ordinary platform run.
    #[must_use]
    pub fn pending_platform(&self) -> &[Coordinate] {
        &self.platform_run
    }

    /// Samples of the pending one-way platform run.
    #[must_use]
    pub fn pending_oneway(&self) -> &[Coordinate] {
        &self.oneway_run
    }

    /// Samples of the pending ladder run.
    #[must_use]
    pub fn pending_ladder(&self) -> &[Coordinate] {
        &self.ladder_run
    }
}

fn commit_platform_run(store: &mut SegmentStore, kind: PlatformKind, run: &[Coordinate]) {
    let (Some(start), Some(end)) = (
        run.iter().min_by_key(|c| c.x),
        run.iter().max_by_key(|c| c.x),
    ) else {
        return;
    };

    match store.commit_platform(kind, *start, *end) {
        Ok(id) => debug!(?id, ?kind, %start, %end, samples = run.len(), "platform committed"),
        Err(e) => warn!(?kind, samples = run.len(), "platform run rejected: {}", e),
    }
}

fn commit_ladder_run(store: &mut SegmentStore, run: &[Coordinate]) {
    let (Some(start), Some(end)) = (
        run.iter().min_by_key(|c| c.y),
        run.iter().max_by_key(|c| c.y),
    ) else {
        return;
    };

    match store.commit_ladder(*start, *end) {
        Ok(()) => debug!(%start, %end, samples = run.len(), "ladder committed"),
        Err(e) => warn!(samples = run.len(), "ladder run rejected: {}", e),
    }
}

// =============================================================================
// TESTS
// =============================================================================
