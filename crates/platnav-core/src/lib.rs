//! # platnav-core
//!
//! Terrain inference and exploration for 2-D platform layouts.
//!
//! A stream of `(x, y)` position samples is segmented into horizontal
//! platforms and vertical ladders. A navigation graph is then computed
//! from platform geometry and a set of jump tolerances, and a move selector
//! walks that graph preferring edges it has not traversed yet.
//!
//! ## Pipeline
//!
//! 1. [`StreamSegmenter`] turns samples into a [`SegmentStore`] (mapping mode)
//! 2. [`GraphBuilder`] derives a [`NavigationGraph`] from the frozen store
//! 3. [`MoveSelector`] (or the per-tick [`NavSession`]) picks maneuvers
//!
//! ## Constraints
//!
//! - Screen coordinates: y grows downwards
//! - Integer arithmetic only; distances are compared squared
//! - `BTreeMap`/`BTreeSet` everywhere so output does not depend on hashing
//! - Randomness comes only from a caller-supplied `rand::Rng`

// =============================================================================
// MODULES
// =============================================================================

pub mod builder;
pub mod config;
pub mod formats;
pub mod graph;
pub mod primitives;
pub mod segmenter;
pub mod segments;
pub mod selector;
pub mod session;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Coordinate, EdgeId, Ladder, ManeuverKind, NavError, Platform, PlatformId, PlatformKind, Reach,
    Rect,
};

// =============================================================================
// RE-EXPORTS: Mapping and Navigation
// =============================================================================

pub use builder::{GraphBuilder, build_graph};
pub use config::TerrainConfig;
pub use graph::{Edge, NavigationGraph};
pub use segmenter::StreamSegmenter;
pub use segments::{PlatformRecord, SegmentStore};
pub use selector::{MoveSelector, Recovery};
pub use session::{NavSession, Plan};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{
    MapData, PersistenceHeader, load_map_file, map_from_bytes, map_to_bytes, save_map_file,
};

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::MapMetrics;
