//! # Map Persistence Format
//!
//! Binary serialization for mapped terrain.
//!
//! Format: Header (5 bytes) + postcard-serialized [`MapData`].
//! - 4 bytes: Magic ("PNAV")
//! - 1 byte: Version
//!
//! Segment invariants are enforced while decoding: a sloped or reversed
//! platform in the payload fails the whole load.
//!
//! ## Limits
//!
//! - Maximum payload size (`MAX_MAP_PAYLOAD_SIZE`), checked before decoding
//! - Maximum segment count per kind (`MAX_SEGMENT_COUNT`)

use crate::segments::SegmentStore;
use crate::{Ladder, NavError, Platform, PlatformKind, Rect, primitives};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum accepted size of an encoded map, in bytes (16 MB).
pub const MAX_MAP_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Header only.
const MIN_FILE_SIZE: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The persistence header precedes all map data.
#[derive(Debug, Clone, Copy)]
pub struct PersistenceHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl PersistenceHeader {
    /// Create a new header with current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), NavError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(NavError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(NavError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NavError> {
        let Some(header) = bytes.get(..MIN_FILE_SIZE) else {
            return Err(NavError::SerializationError(
                "Header too short".to_string(),
            ));
        };
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&header[0..4]);
        Ok(Self {
            magic,
            version: header[4],
        })
    }
}

impl Default for PersistenceHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// MAP DATA
// =============================================================================

/// Everything needed to rebuild a [`SegmentStore`] plus the minimap box the
/// coordinates refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    pub platforms: Vec<Platform>,
    pub oneway: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    pub minimap: Option<Rect>,
}

impl MapData {
    /// Snapshot the segments of a store. Visited coordinates are not kept.
    #[must_use]
    pub fn from_store(store: &SegmentStore, minimap: Option<Rect>) -> Self {
        Self {
            platforms: store.platforms().map(|(_, p)| *p).collect(),
            oneway: store.oneway_platforms().map(|(_, p)| *p).collect(),
            ladders: store.ladders().to_vec(),
            minimap,
        }
    }

    /// Rebuild a store. Ordinary platforms get ids before one-way ones.
    #[must_use]
    pub fn to_store(&self) -> SegmentStore {
        let mut store = SegmentStore::new();
        for platform in &self.platforms {
            store.insert_platform(PlatformKind::Ordinary, *platform);
        }
        for platform in &self.oneway {
            store.insert_platform(PlatformKind::Oneway, *platform);
        }
        for ladder in &self.ladders {
            store.insert_ladder(*ladder);
        }
        store
    }

    fn check_limits(&self) -> Result<(), NavError> {
        let counts = [
            ("platforms", self.platforms.len()),
            ("oneway", self.oneway.len()),
            ("ladders", self.ladders.len()),
        ];
        for (name, count) in counts {
            if count > primitives::MAX_SEGMENT_COUNT {
                return Err(NavError::SerializationError(format!(
                    "{} count {} exceeds maximum {}",
                    name,
                    count,
                    primitives::MAX_SEGMENT_COUNT
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize map data to bytes (header + payload).
pub fn map_to_bytes(map: &MapData) -> Result<Vec<u8>, NavError> {
    map.check_limits()?;
    let header = PersistenceHeader::new();

    let payload =
        postcard::to_stdvec(map).map_err(|e| NavError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(MIN_FILE_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize map data from bytes.
///
/// Size and header are validated before the payload is decoded.
pub fn map_from_bytes(bytes: &[u8]) -> Result<MapData, NavError> {
    if bytes.len() < MIN_FILE_SIZE {
        return Err(NavError::SerializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_MAP_PAYLOAD_SIZE {
        return Err(NavError::SerializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_MAP_PAYLOAD_SIZE
        )));
    }

    let header = PersistenceHeader::from_bytes(bytes)?;
    header.validate()?;

    let map: MapData = postcard::from_bytes(&bytes[MIN_FILE_SIZE..]).map_err(|e| {
        NavError::SerializationError(format!("Failed to deserialize map data: {}", e))
    })?;
    map.check_limits()?;

    Ok(map)
}

// =============================================================================
// FILE HELPERS
// =============================================================================

/// Write map data to `path`, replacing any existing file.
pub fn save_map_file(path: impl AsRef<Path>, map: &MapData) -> Result<(), NavError> {
    let bytes = map_to_bytes(map)?;
    std::fs::write(path.as_ref(), bytes)
        .map_err(|e| NavError::IoError(format!("Write {}: {}", path.as_ref().display(), e)))
}

/// Read map data from `path`.
///
/// A missing file is `MapDataMissing`; a present but unreadable or corrupt
/// file is an I/O or serialization error.
pub fn load_map_file(path: impl AsRef<Path>) -> Result<MapData, NavError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NavError::MapDataMissing(path.display().to_string()));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| NavError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_MAP_PAYLOAD_SIZE as u64 {
        return Err(NavError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_MAP_PAYLOAD_SIZE
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| NavError::IoError(format!("Read {}: {}", path.display(), e)))?;
    map_from_bytes(&bytes)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn sample_map() -> MapData {
        MapData {
            platforms: vec![
                Platform::new(c(0, 100), c(50, 100)).expect("platform"),
                Platform::new(c(60, 80), c(100, 80)).expect("platform"),
            ],
            oneway: vec![Platform::new(c(10, 60), c(30, 60)).expect("platform")],
            ladders: vec![Ladder::new(c(55, 80), c(55, 100)).expect("ladder")],
            minimap: Some(Rect::new(8, 24, 180, 120)),
        }
    }

    #[test]
    fn header_roundtrip() {
        let header = PersistenceHeader::new();
        let bytes = header.to_bytes();
        let restored = PersistenceHeader::from_bytes(&bytes).expect("parse header");

        assert_eq!(restored.magic, *primitives::MAGIC_BYTES);
        assert_eq!(restored.version, primitives::FORMAT_VERSION);
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let bytes1 = map_to_bytes(&sample_map()).expect("first serialize");
        let restored = map_from_bytes(&bytes1).expect("deserialize");
        let bytes2 = map_to_bytes(&restored).expect("second serialize");

        assert_eq!(restored, sample_map());
        assert_eq!(
            bytes1, bytes2,
            "save -> load -> save must produce identical bytes"
        );
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = map_to_bytes(&sample_map()).expect("serialize");
        bytes[0..4].copy_from_slice(b"XXXX");
        assert!(map_from_bytes(&bytes).is_err());
    }

    #[test]
    fn future_version_rejected() {
        let mut bytes = map_to_bytes(&sample_map()).expect("serialize");
        bytes[4] = primitives::FORMAT_VERSION + 1;
        assert!(matches!(
            map_from_bytes(&bytes),
            Err(NavError::SerializationError(_))
        ));
    }

    #[test]
    fn truncated_data_rejected() {
        assert!(map_from_bytes(b"PNA").is_err());
        let bytes = map_to_bytes(&sample_map()).expect("serialize");
        assert!(map_from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }

    #[test]
    fn store_conversion_keeps_segments() {
        let store = sample_map().to_store();
        assert_eq!(store.platform_count(), 2);
        assert_eq!(store.oneway_count(), 1);
        assert_eq!(store.ladders().len(), 1);

        let back = MapData::from_store(&store, Some(Rect::new(8, 24, 180, 120)));
        assert_eq!(back, sample_map());
    }

    #[test]
    fn missing_file_is_map_data_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_map_file(dir.path().join("absent.pnav"));
        assert!(matches!(result, Err(NavError::MapDataMissing(_))));
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("map.pnav");

        save_map_file(&path, &sample_map()).expect("save");
        let loaded = load_map_file(&path).expect("load");
        assert_eq!(loaded, sample_map());
    }
}
