//! # CLI Command Implementations
//!
//! Trace and config loading plus one function per subcommand.

use platnav_core::{
    Coordinate, GraphBuilder, MapData, MapMetrics, NavError, NavSession, Rect, SegmentStore,
    StreamSegmenter, TerrainConfig, load_map_file, save_map_file,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum trace file size (64 MB).
const MAX_TRACE_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Maximum number of samples accepted from one trace.
pub const MAX_TRACE_SAMPLES: usize = 4_000_000;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), NavError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| NavError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(NavError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path and make sure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, NavError> {
    let canonical = path.canonicalize().map_err(|e| {
        NavError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(NavError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, NavError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        NavError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(NavError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| NavError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// INPUT PARSING
// =============================================================================

/// Parse a position trace.
///
/// Accepts a JSON array of `[x, y]` pairs, or text with one `x,y` per line.
/// Blank lines and lines starting with `#` are skipped in the text form.
pub fn parse_trace(contents: &str) -> Result<Vec<Coordinate>, NavError> {
    let trimmed = contents.trim_start();

    let samples: Vec<Coordinate> = if trimmed.starts_with('[') {
        let pairs: Vec<(i32, i32)> = serde_json::from_str(trimmed)
            .map_err(|e| NavError::SerializationError(format!("Invalid JSON trace: {}", e)))?;
        pairs
            .into_iter()
            .map(|(x, y)| Coordinate::new(x, y))
            .collect()
    } else {
        let mut samples = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            samples.push(parse_sample(line).ok_or_else(|| {
                NavError::SerializationError(format!(
                    "Line {}: expected `x,y`, got {:?}",
                    index + 1,
                    line
                ))
            })?);
        }
        samples
    };

    if samples.len() > MAX_TRACE_SAMPLES {
        return Err(NavError::SerializationError(format!(
            "Sample count {} exceeds maximum allowed {}",
            samples.len(),
            MAX_TRACE_SAMPLES
        )));
    }
    Ok(samples)
}

fn parse_sample(line: &str) -> Option<Coordinate> {
    let (x, y) = line.split_once(',')?;
    Some(Coordinate::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Parse `x,y,width,height` into a minimap box.
pub fn parse_minimap(value: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts[..] else {
        return Err(format!("expected x,y,width,height, got {:?}", value));
    };
    let invalid = |name: &str, raw: &str| format!("invalid {} {:?}", name, raw);

    Ok(Rect::new(
        x.parse().map_err(|_| invalid("x", x))?,
        y.parse().map_err(|_| invalid("y", y))?,
        width.parse().map_err(|_| invalid("width", width))?,
        height.parse().map_err(|_| invalid("height", height))?,
    ))
}

/// Read a trace file from disk.
pub fn load_trace(path: &Path) -> Result<Vec<Coordinate>, NavError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_TRACE_FILE_SIZE)?;

    let contents = std::fs::read_to_string(&validated)
        .map_err(|e| NavError::IoError(format!("Read {}: {}", path.display(), e)))?;
    parse_trace(&contents)
}

/// Load terrain tuning from a TOML file, or the defaults when no file is
/// given. Missing keys keep their default value.
pub fn load_config(path: Option<&Path>) -> Result<TerrainConfig, NavError> {
    let Some(path) = path else {
        return Ok(TerrainConfig::default());
    };

    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_CONFIG_FILE_SIZE)?;
    let contents = std::fs::read_to_string(&validated)
        .map_err(|e| NavError::IoError(format!("Read {}: {}", path.display(), e)))?;

    let config: TerrainConfig = toml::from_str(&contents)
        .map_err(|e| NavError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
    config.validate()?;

    tracing::debug!(?config, "terrain config loaded");
    Ok(config)
}

// =============================================================================
// MAP COMMAND
// =============================================================================

/// Inputs of the `map` command.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub trace: PathBuf,
    pub oneway_trace: Option<PathBuf>,
    pub minimap: Option<Rect>,
    pub append: bool,
}

/// Segment the traces and write the resulting map.
pub fn cmd_map(
    map_path: &Path,
    config: TerrainConfig,
    request: &MapRequest,
    json_mode: bool,
) -> Result<(), NavError> {
    let samples = load_trace(&request.trace)?;
    let oneway_samples = match &request.oneway_trace {
        Some(path) => load_trace(path)?,
        None => Vec::new(),
    };

    let (store, previous_minimap) = if request.append {
        match load_map_file(map_path) {
            Ok(existing) => (existing.to_store(), existing.minimap),
            Err(NavError::MapDataMissing(_)) => {
                tracing::info!("No map at {:?}, starting a new one", map_path);
                (SegmentStore::new(), None)
            }
            Err(e) => return Err(e),
        }
    } else {
        (SegmentStore::new(), None)
    };

    let mut segmenter = StreamSegmenter::resume(config, store)?;
    for sample in &samples {
        segmenter.observe(sample.x, sample.y);
    }
    for sample in &oneway_samples {
        segmenter.observe_oneway(sample.x, sample.y);
    }
    let store = segmenter.finish();

    let minimap = request.minimap.or(previous_minimap);
    let map = MapData::from_store(&store, minimap);
    save_map_file(map_path, &map)?;

    tracing::info!(
        samples = samples.len(),
        oneway_samples = oneway_samples.len(),
        "map written to {:?}",
        map_path
    );

    if json_mode {
        print_json(&serde_json::json!({
            "map": map_path.to_string_lossy(),
            "samples": samples.len(),
            "oneway_samples": oneway_samples.len(),
            "platforms": map.platforms.len(),
            "oneway": map.oneway.len(),
            "ladders": map.ladders.len(),
        }));
        return Ok(());
    }

    println!("Mapped {} samples ({} one-way)", samples.len(), oneway_samples.len());
    println!(
        "Map now has {} platforms, {} one-way platforms, {} ladders",
        map.platforms.len(),
        map.oneway.len(),
        map.ladders.len()
    );
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show map and graph metrics.
pub fn cmd_status(map_path: &Path, config: TerrainConfig, json_mode: bool) -> Result<(), NavError> {
    let map = load_map_file(map_path)?;
    let store = map.to_store();
    let graph = GraphBuilder::new(config).build(&store);
    let metrics = MapMetrics::collect(&store, &graph);

    if json_mode {
        print_json(&serde_json::json!({
            "map": map_path.to_string_lossy(),
            "minimap": map.minimap,
            "metrics": metrics,
        }));
        return Ok(());
    }

    println!("platnav Map Status");
    println!("==================");
    println!("Map:      {:?}", map_path);
    match map.minimap {
        Some(rect) => println!(
            "Minimap:  {}x{} at ({}, {})",
            rect.width, rect.height, rect.x, rect.y
        ),
        None => println!("Minimap:  unknown"),
    }
    println!();
    println!("Platforms:  {}", metrics.platform_count);
    println!("One-way:    {}", metrics.oneway_count);
    println!("Ladders:    {}", metrics.ladder_count);
    println!("Edges:      {}", metrics.edge_count);
    println!("Dead ends:  {}", metrics.dead_ends);
    println!();
    println!("Edges by maneuver:");
    for (name, count) in &metrics.maneuvers {
        println!("  {:<18} {}", name, count);
    }

    Ok(())
}

// =============================================================================
// GRAPH COMMAND
// =============================================================================

/// Dump every platform with its outgoing edges.
pub fn cmd_graph(map_path: &Path, config: TerrainConfig, json_mode: bool) -> Result<(), NavError> {
    let store = load_map_file(map_path)?.to_store();
    let graph = GraphBuilder::new(config).build(&store);

    if json_mode {
        let mut platforms = Vec::new();
        for id in graph.platform_ids() {
            let edges = graph.edges_from(id)?;
            platforms.push(serde_json::json!({
                "id": id.0,
                "platform": graph.platform(id).map(|p| p.to_string()),
                "edges": edges,
            }));
        }
        print_json(&serde_json::json!({ "platforms": platforms }));
        return Ok(());
    }

    for id in graph.platform_ids() {
        let label = graph
            .platform(id)
            .map(|p| p.to_string())
            .unwrap_or_default();
        let kind = store
            .platform(id)
            .map(|record| format!("{:?}", record.kind).to_lowercase())
            .unwrap_or_default();
        println!("#{} {} ({})", id.0, label, kind);

        let edges = graph.edges_from(id)?;
        if edges.is_empty() {
            println!("    (no edges)");
        }
        for edge in edges {
            println!(
                "    -> #{} {} from {}..{}",
                edge.to.0, edge.maneuver, edge.lower.x, edge.upper.x
            );
        }
    }

    Ok(())
}

// =============================================================================
// LOCATE COMMAND
// =============================================================================

/// Find the platform under `(x, y)`.
pub fn cmd_locate(map_path: &Path, x: i32, y: i32, json_mode: bool) -> Result<(), NavError> {
    let store = load_map_file(map_path)?.to_store();
    let found = store
        .locate(x, y)
        .and_then(|id| store.platform(id).map(|record| (id, record)));

    if json_mode {
        let output = match found {
            Some((id, record)) => serde_json::json!({
                "x": x,
                "y": y,
                "found": true,
                "platform": id.0,
                "kind": record.kind,
                "span": record.platform.to_string(),
            }),
            None => serde_json::json!({ "x": x, "y": y, "found": false }),
        };
        print_json(&output);
        return Ok(());
    }

    match found {
        Some((id, record)) => println!(
            "({}, {}) is on platform #{} {} ({:?})",
            x, y, id.0, record.platform, record.kind
        ),
        None => println!("({}, {}) is not on any platform", x, y),
    }
    Ok(())
}

// =============================================================================
// WALK COMMAND
// =============================================================================

/// One step of a replayed exploration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WalkStep {
    pub from: u32,
    pub to: u32,
    pub maneuver: String,
    pub anchor: Coordinate,
    pub landing: Coordinate,
}

/// Outcome of a replayed exploration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WalkReport {
    pub steps: Vec<WalkStep>,
    pub completed_cycles: u64,
    pub visited_edges: usize,
    pub edge_count: usize,
    /// Set when the walk stopped early on a platform with no edges.
    pub stuck_on: Option<u32>,
}

/// Replay `steps` plans from `(x, y)`.
///
/// Every maneuver is assumed to succeed: the next position is the anchor's
/// x clamped onto the goal platform, at the goal's height.
pub fn replay_walk(
    store: SegmentStore,
    config: TerrainConfig,
    start: Coordinate,
    steps: usize,
    seed: u64,
) -> Result<WalkReport, NavError> {
    let mut session = NavSession::new(store, config, ChaCha8Rng::seed_from_u64(seed))?;
    let mut position = start;
    let mut walked = Vec::with_capacity(steps);
    let mut stuck_on = None;

    for _ in 0..steps {
        let plan = match session.tick(position.x, position.y) {
            Ok(plan) => plan,
            Err(NavError::NoRouteAvailable(id)) => {
                let recovery = session.recovery();
                tracing::warn!(?id, ?recovery, "no route, walk stopped");
                stuck_on = Some(id.0);
                break;
            }
            Err(e) => return Err(e),
        };

        let goal = session
            .graph()
            .platform(plan.edge.to)
            .ok_or(NavError::UnknownPlatform(plan.edge.to))?;
        let landing = Coordinate::new(
            plan.anchor.x.clamp(goal.start().x, goal.end().x),
            goal.y(),
        );

        walked.push(WalkStep {
            from: plan.from.0,
            to: plan.edge.to.0,
            maneuver: plan.edge.maneuver.name().to_string(),
            anchor: plan.anchor,
            landing,
        });
        position = landing;
    }

    // confirm the final landing so it counts toward coverage
    if stuck_on.is_none() && !walked.is_empty() {
        match session.tick(position.x, position.y) {
            Ok(_) | Err(NavError::NoRouteAvailable(_)) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(WalkReport {
        steps: walked,
        completed_cycles: session.completed_cycles(),
        visited_edges: session.graph().visited_count(),
        edge_count: session.graph().edge_count(),
        stuck_on,
    })
}

/// Replay exploration from a position and print the steps.
pub fn cmd_walk(
    map_path: &Path,
    config: TerrainConfig,
    x: i32,
    y: i32,
    steps: usize,
    seed: u64,
    json_mode: bool,
) -> Result<(), NavError> {
    let store = load_map_file(map_path)?.to_store();
    let report = replay_walk(store, config, Coordinate::new(x, y), steps, seed)?;

    if json_mode {
        print_json(&serde_json::json!(report));
        return Ok(());
    }

    for (index, step) in report.steps.iter().enumerate() {
        println!(
            "{:>4}: #{} -> #{} {} from {} landing {}",
            index + 1,
            step.from,
            step.to,
            step.maneuver,
            step.anchor,
            step.landing
        );
    }
    if let Some(id) = report.stuck_on {
        println!("Stopped: platform #{} has no edges", id);
    }
    println!();
    println!(
        "Visited {}/{} edges, {} completed cycles",
        report.visited_edges, report.edge_count, report.completed_cycles
    );
    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Write the map as pretty-printed JSON.
pub fn cmd_export(map_path: &Path, output: &Path) -> Result<(), NavError> {
    let map = load_map_file(map_path)?;
    let validated = validate_output_path(output)?;

    let json = serde_json::to_string_pretty(&map)
        .map_err(|e| NavError::SerializationError(e.to_string()))?;
    std::fs::write(&validated, json)
        .map_err(|e| NavError::IoError(format!("Write {}: {}", validated.display(), e)))?;

    println!("Exported map to {:?}", output);
    Ok(())
}
