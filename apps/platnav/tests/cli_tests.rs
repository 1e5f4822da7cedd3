//! Tests for trace/config parsing and the file-backed CLI commands.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use platnav::cli::{
    MapRequest, cmd_export, cmd_map, load_config, parse_minimap, parse_trace, replay_walk,
};
use platnav_core::{
    Coordinate, MapData, NavError, Platform, PlatformKind, Rect, SegmentStore, TerrainConfig,
    load_map_file, save_map_file,
};
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn walk_trace(xs: std::ops::RangeInclusive<i32>, y: i32) -> String {
    xs.map(|x| format!("{},{}\n", x, y)).collect()
}

fn platform(x1: i32, x2: i32, y: i32) -> Platform {
    Platform::new(Coordinate::new(x1, y), Coordinate::new(x2, y)).expect("platform")
}

// =============================================================================
// TRACE PARSING
// =============================================================================

#[test]
fn parse_text_trace_skips_comments() {
    let samples = parse_trace("# recorded walk\n10,20\n\n 11 , 20 \n# end\n").expect("parse");
    assert_eq!(samples, vec![Coordinate::new(10, 20), Coordinate::new(11, 20)]);
}

#[test]
fn parse_json_trace() {
    let samples = parse_trace("[[1, 2], [3, -4]]").expect("parse");
    assert_eq!(samples, vec![Coordinate::new(1, 2), Coordinate::new(3, -4)]);
}

#[test]
fn malformed_line_reports_line_number() {
    let err = parse_trace("1,2\n3;4\n").expect_err("should fail");
    match err {
        NavError::SerializationError(msg) => assert!(msg.starts_with("Line 2")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn minimap_parsing() {
    assert_eq!(parse_minimap("8, 24,180,120"), Ok(Rect::new(8, 24, 180, 120)));
    assert!(parse_minimap("8,24,180").is_err());
    assert!(parse_minimap("8,24,-1,120").is_err());
}

// =============================================================================
// CONFIG LOADING
// =============================================================================

#[test]
fn config_defaults_without_file() {
    assert_eq!(load_config(None).expect("config"), TerrainConfig::default());
}

#[test]
fn config_file_overrides_some_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(dir.path(), "terrain.toml", "jump_range = 24\nplatform_variance = 4\n");

    let config = load_config(Some(path.as_path())).expect("config");
    assert_eq!(config.jump_range, 24);
    assert_eq!(config.platform_variance, 4);
    assert_eq!(
        config.doublejump_max_height,
        TerrainConfig::default().doublejump_max_height
    );
}

#[test]
fn config_rejects_unknown_keys_and_bad_tiers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let unknown = write(dir.path(), "unknown.toml", "jump_rnage = 24\n");
    let inverted = write(
        dir.path(),
        "inverted.toml",
        "dbljump_half_height = 40\ndoublejump_max_height = 30\n",
    );

    assert!(matches!(
        load_config(Some(unknown.as_path())),
        Err(NavError::InvalidConfig(_))
    ));
    assert!(matches!(
        load_config(Some(inverted.as_path())),
        Err(NavError::InvalidConfig(_))
    ));
}

// =============================================================================
// MAP COMMAND
// =============================================================================

#[test]
fn map_command_writes_segments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let trace = write(dir.path(), "walk.txt", &walk_trace(0..=40, 100));
    let oneway = write(dir.path(), "ledge.txt", &walk_trace(10..=30, 70));
    let map_path = dir.path().join("mapdata.pnav");

    let request = MapRequest {
        trace,
        oneway_trace: Some(oneway),
        minimap: Some(Rect::new(8, 24, 180, 120)),
        append: false,
    };
    cmd_map(&map_path, TerrainConfig::default(), &request, true).expect("map");

    let map = load_map_file(&map_path).expect("load");
    assert_eq!(map.platforms, vec![platform(0, 40, 100)]);
    assert_eq!(map.oneway, vec![platform(10, 30, 70)]);
    assert_eq!(map.minimap, Some(Rect::new(8, 24, 180, 120)));
}

#[test]
fn map_append_keeps_existing_platforms() {
    let dir = tempfile::tempdir().expect("tempdir");
    let map_path = dir.path().join("mapdata.pnav");
    let first = write(dir.path(), "first.txt", &walk_trace(0..=40, 100));
    let second = write(dir.path(), "second.txt", &walk_trace(100..=140, 60));

    let mut request = MapRequest {
        trace: first,
        oneway_trace: None,
        minimap: Some(Rect::new(0, 0, 200, 150)),
        append: true,
    };
    cmd_map(&map_path, TerrainConfig::default(), &request, true).expect("first map");

    request.trace = second;
    request.minimap = None;
    cmd_map(&map_path, TerrainConfig::default(), &request, true).expect("second map");

    let map = load_map_file(&map_path).expect("load");
    assert_eq!(map.platforms, vec![platform(0, 40, 100), platform(100, 140, 60)]);
    assert_eq!(map.minimap, Some(Rect::new(0, 0, 200, 150)));
}

#[test]
fn missing_trace_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let request = MapRequest {
        trace: dir.path().join("absent.txt"),
        oneway_trace: None,
        minimap: None,
        append: false,
    };
    assert!(matches!(
        cmd_map(&dir.path().join("m.pnav"), TerrainConfig::default(), &request, true),
        Err(NavError::IoError(_))
    ));
}

// =============================================================================
// WALK / EXPORT
// =============================================================================

fn two_tier_store() -> SegmentStore {
    let mut store = SegmentStore::new();
    store.insert_platform(PlatformKind::Ordinary, platform(0, 100, 100));
    store.insert_platform(PlatformKind::Ordinary, platform(20, 60, 85));
    store
}

#[test]
fn walk_alternates_between_tiers() {
    let report = replay_walk(
        two_tier_store(),
        TerrainConfig::default(),
        Coordinate::new(50, 100),
        6,
        3,
    )
    .expect("walk");

    assert_eq!(report.steps.len(), 6);
    let targets: Vec<u32> = report.steps.iter().map(|s| s.to).collect();
    assert_eq!(targets, vec![1, 0, 1, 0, 1, 0]);
    assert!(report.completed_cycles >= 2);
    assert!(report.stuck_on.is_none());
    for step in &report.steps {
        assert_eq!(step.landing.y, if step.to == 1 { 85 } else { 100 });
    }
}

#[test]
fn walk_stops_on_dead_end() {
    let mut store = SegmentStore::new();
    store.insert_platform(PlatformKind::Ordinary, platform(0, 20, 100));
    store.insert_platform(PlatformKind::Ordinary, platform(500, 520, 100));

    let report = replay_walk(store, TerrainConfig::default(), Coordinate::new(5, 100), 4, 0)
        .expect("walk");
    assert!(report.steps.is_empty());
    assert_eq!(report.stuck_on, Some(0));
}

#[test]
fn walk_from_nowhere_is_not_found() {
    let result = replay_walk(
        two_tier_store(),
        TerrainConfig::default(),
        Coordinate::new(50, 90),
        3,
        0,
    );
    assert!(matches!(
        result,
        Err(NavError::PlatformNotFound { x: 50, y: 90 })
    ));
}

#[test]
fn export_writes_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let map_path = dir.path().join("mapdata.pnav");
    let output = dir.path().join("map.json");
    let map = MapData::from_store(&two_tier_store(), None);
    save_map_file(&map_path, &map).expect("save");

    cmd_export(&map_path, &output).expect("export");

    let json = std::fs::read_to_string(&output).expect("read export");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["platforms"].as_array().map(Vec::len), Some(2));
    assert!(value["minimap"].is_null());
}
