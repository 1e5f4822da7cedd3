//! # Core Type Definitions
//!
//! This module contains all core types for the platnav terrain model:
//! - Positions and identifiers (`Coordinate`, `PlatformId`, `EdgeId`)
//! - Segments (`Platform`, `Ladder`, `PlatformKind`)
//! - Reachability annotations (`ManeuverKind`, `Reach`)
//! - The minimap reference rectangle (`Rect`)
//! - Error types (`NavError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they serve as `BTreeMap`/`BTreeSet` keys
//! - Validate segment invariants at construction, including on deserialize

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// COORDINATES & IDENTIFIERS
// =============================================================================

/// A position in minimap pixel space. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, exact in integer arithmetic.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        (dx * dx).saturating_add(dy * dy)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable identifier of a committed platform.
///
/// Assigned in commit order; never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

/// Identifier of an edge in a navigation graph, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

// =============================================================================
// SEGMENTS
// =============================================================================

/// Which segment set a platform belongs to.
///
/// One-way platforms can be left toward ordinary platforms but are never
/// chosen as a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Ordinary,
    Oneway,
}

/// A horizontal walkable segment.
///
/// Invariants: `start.y == end.y` and `start.x < end.x`. Identity is
/// structural: two platforms are the same iff their endpoints are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Coordinate, Coordinate)", into = "(Coordinate, Coordinate)")]
pub struct Platform {
    start: Coordinate,
    end: Coordinate,
}

impl Platform {
    /// Create a platform from its left and right endpoints.
    ///
    /// Returns `NavError::DegenerateSegment` for sloped, reversed, or
    /// zero-length input.
    pub fn new(start: Coordinate, end: Coordinate) -> Result<Self, NavError> {
        if start.y != end.y {
            return Err(NavError::DegenerateSegment(format!(
                "platform {start} -> {end} is not horizontal"
            )));
        }
        if start.x >= end.x {
            return Err(NavError::DegenerateSegment(format!(
                "platform {start} -> {end} has no positive length"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }

    /// The height shared by both endpoints.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.start.y
    }

    /// True iff `(x, y)` lies on the platform (span inclusive, exact y).
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        y == self.start.y && x >= self.start.x && x <= self.end.x
    }

    /// True iff the open x-intervals of the two platforms intersect.
    #[must_use]
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.start.x < other.end.x && self.end.x > other.start.x
    }
}

impl TryFrom<(Coordinate, Coordinate)> for Platform {
    type Error = NavError;

    fn try_from((start, end): (Coordinate, Coordinate)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<Platform> for (Coordinate, Coordinate) {
    fn from(platform: Platform) -> Self {
        (platform.start, platform.end)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}@{}", self.start.x, self.end.x, self.start.y)
    }
}

/// A vertical climbable segment.
///
/// Invariants: `start.x == end.x` and `start.y < end.y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Coordinate, Coordinate)", into = "(Coordinate, Coordinate)")]
pub struct Ladder {
    start: Coordinate,
    end: Coordinate,
}

impl Ladder {
    /// Create a ladder from its top and bottom endpoints.
    pub fn new(start: Coordinate, end: Coordinate) -> Result<Self, NavError> {
        if start.x != end.x {
            return Err(NavError::DegenerateSegment(format!(
                "ladder {start} -> {end} is not vertical"
            )));
        }
        if start.y >= end.y {
            return Err(NavError::DegenerateSegment(format!(
                "ladder {start} -> {end} has no positive length"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }
}

impl TryFrom<(Coordinate, Coordinate)> for Ladder {
    type Error = NavError;

    fn try_from((start, end): (Coordinate, Coordinate)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<Ladder> for (Coordinate, Coordinate) {
    fn from(ladder: Ladder) -> Self {
        (ladder.start, ladder.end)
    }
}

// =============================================================================
// MANEUVERS
// =============================================================================

/// The movement needed to get from one platform to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverKind {
    /// Fall through to a platform below.
    Drop,
    /// Glide jump off the left end.
    JumpLeft,
    /// Glide jump off the right end.
    JumpRight,
    /// Double jump at full height.
    DoubleJumpFull,
    /// Double jump at partial height.
    DoubleJumpHalf,
}

impl ManeuverKind {
    /// All maneuvers, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Drop,
        Self::JumpLeft,
        Self::JumpRight,
        Self::DoubleJumpFull,
        Self::DoubleJumpHalf,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::JumpLeft => "jump_left",
            Self::JumpRight => "jump_right",
            Self::DoubleJumpFull => "double_jump_full",
            Self::DoubleJumpHalf => "double_jump_half",
        }
    }
}

impl fmt::Display for ManeuverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where and how a destination can be reached from a source platform.
///
/// `lower`..=`upper` is the x-interval (at the source platform's height)
/// from which the maneuver should be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reach {
    pub lower: Coordinate,
    pub upper: Coordinate,
    pub maneuver: ManeuverKind,
}

// =============================================================================
// MINIMAP
// =============================================================================

/// On-screen bounding box of the minimap the coordinates were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the platnav system.
///
/// - No silent failures
/// - Use `Result<T, NavError>` for fallible operations
/// - The CORE never retries; retry policy belongs to the control loop
#[derive(Debug, Error)]
pub enum NavError {
    /// The current platform has no outgoing edges.
    #[error("No route available from platform {0:?}")]
    NoRouteAvailable(PlatformId),

    /// No committed platform contains the sampled position.
    #[error("No platform contains position ({x}, {y})")]
    PlatformNotFound { x: i32, y: i32 },

    /// The platform id is not part of the navigation graph.
    #[error("Unknown platform: {0:?}")]
    UnknownPlatform(PlatformId),

    /// Map data was requested but nothing is persisted.
    #[error("Map data missing: {0}")]
    MapDataMissing(String),

    /// A segment commit was rejected.
    #[error("Degenerate segment: {0}")]
    DegenerateSegment(String),

    /// A tuning value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
