//! # Innate Primitives
//!
//! Compile-time defaults and format constants for the platnav CORE.
//!
//! The tuning values below are the defaults of [`TerrainConfig`]; callers
//! override them through the config, never by mutating these constants.
//!
//! ## Primitives
//!
//! 1. **Segmentation**: jitter tolerances and minimum run lengths.
//! 2. **Reachability**: jump range and the two double-jump height tiers.
//! 3. **Persistence**: map file magic bytes and format version.
//!
//! [`TerrainConfig`]: crate::config::TerrainConfig

// =============================================================================
// SEGMENTATION
// =============================================================================

/// Horizontal jitter (in minimap pixels) tolerated between consecutive
/// samples of the same platform run.
pub const PLATFORM_VARIANCE: u32 = 3;

/// Vertical jitter tolerated between consecutive samples of the same ladder run.
pub const LADDER_VARIANCE: u32 = 2;

/// Minimum number of distinct samples before a horizontal run is committed.
pub const MINIMUM_PLATFORM_LENGTH: usize = 10;

/// Minimum number of distinct samples before a vertical run is committed.
pub const MINIMUM_LADDER_LENGTH: usize = 5;

// =============================================================================
// REACHABILITY
// =============================================================================

/// Maximum endpoint-to-endpoint distance covered by a sideways glide jump.
pub const JUMP_RANGE: u32 = 16;

/// Height covered by a partial double jump.
pub const DBLJUMP_HALF_HEIGHT: u32 = 20;

/// Height covered by a full double jump.
///
/// Absolute jump height is about 31 including the marker's own size.
pub const DOUBLEJUMP_MAX_HEIGHT: u32 = 31;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Magic bytes for the map file header.
///
/// - File Header = Magic Bytes ("PNAV") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"PNAV";

/// Current map format version.
///
/// Increment this when making breaking changes to `MapData`.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum number of segments of one kind accepted from a map file.
pub const MAX_SEGMENT_COUNT: usize = 100_000;
