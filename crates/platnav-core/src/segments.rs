//! # Segment Store
//!
//! Finalized terrain segments inferred from position samples.
//!
//! Platforms live in an arena keyed by [`PlatformId`]; a reverse index keyed
//! by `(kind, platform)` keeps structural identity, so committing the same
//! endpoints twice yields the same id. All containers are `BTreeMap`/
//! `BTreeSet` for deterministic iteration.

use crate::{Coordinate, Ladder, NavError, Platform, PlatformId, PlatformKind};
use std::collections::{BTreeMap, BTreeSet};

/// A committed platform together with the set it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRecord {
    pub platform: Platform,
    pub kind: PlatformKind,
}

/// Platforms, one-way platforms, ladders and every coordinate seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentStore {
    /// Platform arena: PlatformId -> record
    platforms: BTreeMap<PlatformId, PlatformRecord>,

    /// Reverse lookup: (kind, platform) -> PlatformId
    platform_index: BTreeMap<(PlatformKind, Platform), PlatformId>,

    /// Ladders in commit order, without duplicates.
    ladders: Vec<Ladder>,

    /// All-time visited coordinates.
    visited: BTreeSet<Coordinate>,

    /// Next available PlatformId
    next_platform_id: u32,
}

impl SegmentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and commit a platform run.
    ///
    /// Returns the id of the committed platform, or of the structurally
    /// identical platform of the same kind committed earlier.
    pub fn commit_platform(
        &mut self,
        kind: PlatformKind,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<PlatformId, NavError> {
        let platform = Platform::new(start, end)?;
        Ok(self.insert_platform(kind, platform))
    }

    /// Insert an already validated platform.
    pub fn insert_platform(&mut self, kind: PlatformKind, platform: Platform) -> PlatformId {
        if let Some(&id) = self.platform_index.get(&(kind, platform)) {
            return id;
        }

        let id = PlatformId(self.next_platform_id);
        self.next_platform_id = self.next_platform_id.saturating_add(1);

        self.platforms.insert(id, PlatformRecord { platform, kind });
        self.platform_index.insert((kind, platform), id);
        id
    }

    /// Validate and commit a ladder run. Duplicate ladders are ignored.
    pub fn commit_ladder(&mut self, start: Coordinate, end: Coordinate) -> Result<(), NavError> {
        let ladder = Ladder::new(start, end)?;
        self.insert_ladder(ladder);
        Ok(())
    }

    /// Insert an already validated ladder.
    pub fn insert_ladder(&mut self, ladder: Ladder) {
        if !self.ladders.contains(&ladder) {
            self.ladders.push(ladder);
        }
    }

    /// Record a sampled position. Returns `true` if it was never seen before.
    pub fn record_visit(&mut self, coordinate: Coordinate) -> bool {
        self.visited.insert(coordinate)
    }

    /// Ordinary platforms in id order.
    pub fn platforms(&self) -> impl Iterator<Item = (PlatformId, &Platform)> {
        self.platforms_of(PlatformKind::Ordinary)
    }

    /// One-way platforms in id order.
    pub fn oneway_platforms(&self) -> impl Iterator<Item = (PlatformId, &Platform)> {
        self.platforms_of(PlatformKind::Oneway)
    }

    fn platforms_of(&self, kind: PlatformKind) -> impl Iterator<Item = (PlatformId, &Platform)> {
        self.platforms
            .iter()
            .filter(move |(_, record)| record.kind == kind)
            .map(|(id, record)| (*id, &record.platform))
    }

    /// Get a platform by id.
    #[must_use]
    pub fn platform(&self, id: PlatformId) -> Option<&PlatformRecord> {
        self.platforms.get(&id)
    }

    /// Get the id of a committed platform by structure.
    #[must_use]
    pub fn platform_id(&self, kind: PlatformKind, platform: &Platform) -> Option<PlatformId> {
        self.platform_index.get(&(kind, *platform)).copied()
    }

    /// Ladders in commit order.
    #[must_use]
    pub fn ladders(&self) -> &[Ladder] {
        &self.ladders
    }

    /// Every coordinate ever recorded, in coordinate order.
    pub fn visited(&self) -> impl Iterator<Item = &Coordinate> {
        self.visited.iter()
    }

    #[must_use]
    pub fn has_visited(&self, coordinate: &Coordinate) -> bool {
        self.visited.contains(coordinate)
    }

    /// Find the platform standing under `(x, y)`.
    ///
    /// One-way platforms are checked before ordinary ones; the first match
    /// wins.
    #[must_use]
    pub fn locate(&self, x: i32, y: i32) -> Option<PlatformId> {
        self.oneway_platforms()
            .chain(self.platforms())
            .find(|(_, platform)| platform.contains(x, y))
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn platform_count(&self) -> usize {
        self.platforms().count()
    }

    #[must_use]
    pub fn oneway_count(&self) -> usize {
        self.oneway_platforms().count()
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty() && self.ladders.is_empty()
    }

    /// Drop every segment and visited coordinate.
    ///
    /// Ids keep counting up so stale ids from before the reset never alias
    /// new platforms.
    pub fn clear(&mut self) {
        self.platforms.clear();
        self.platform_index.clear();
        self.ladders.clear();
        self.visited.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
