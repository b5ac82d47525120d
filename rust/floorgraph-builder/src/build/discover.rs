use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use floorgraph_core::{FloorError, FloorId};

pub const GRAPH_SUFFIX: &str = "-graph.json";
pub const OUTLINE_SUFFIX: &str = "-outline.json";

/// The documents found for one floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorFiles {
    pub floor: FloorId,
    pub outline: Option<PathBuf>,
    pub graph: Option<PathBuf>,
}

/// Everything found under the data directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Readable building directories, sorted.
    pub buildings: Vec<String>,
    /// Sorted by building then level.
    pub floors: Vec<FloorFiles>,
    /// Building directories that could not be listed. None of their floors
    /// are in `floors`.
    pub unreadable: Vec<(String, FloorError)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocKind {
    Outline,
    Graph,
}

/// Reads `GHC-5-graph.json` as floor `GHC-5` and the document kind. The
/// building part must match the directory it was found in.
fn classify(building_code: &str, file_name: &str) -> Option<(FloorId, DocKind)> {
    let (stem, kind) = if let Some(s) = file_name.strip_suffix(GRAPH_SUFFIX) {
        (s, DocKind::Graph)
    } else if let Some(s) = file_name.strip_suffix(OUTLINE_SUFFIX) {
        (s, DocKind::Outline)
    } else {
        return None;
    };
    let floor: FloorId = stem.parse().ok()?;
    (floor.building_code == building_code).then_some((floor, kind))
}

fn scan_building(dir: &Path, building_code: &str) -> io::Result<Vec<(FloorId, DocKind, PathBuf)>> {
    let mut docs = Vec::new();
    for doc in fs::read_dir(dir)? {
        let doc = doc?;
        let file_name = doc.file_name().to_string_lossy().into_owned();
        match classify(building_code, &file_name) {
            Some((floor, kind)) => docs.push((floor, kind, doc.path())),
            None if file_name.ends_with(GRAPH_SUFFIX) || file_name.ends_with(OUTLINE_SUFFIX) => {
                warn!(file = %file_name, building = %building_code, "floor document does not match its building directory");
            }
            None => {}
        }
    }
    Ok(docs)
}

/// Walks `<data_dir>/<BUILDING>/<BUILDING>-<LEVEL>-{graph,outline}.json`.
/// Only an unreadable `data_dir` is an error; a building directory that
/// cannot be read is logged and returned in [`Discovery::unreadable`].
pub fn discover_floors(data_dir: &Path) -> Result<Discovery> {
    let mut found = Discovery::default();
    let mut floors: BTreeMap<FloorId, FloorFiles> = BTreeMap::new();

    let entries = fs::read_dir(data_dir).with_context(|| format!("reading {:?}", data_dir))?;
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = ?data_dir, error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let building_code = entry.file_name().to_string_lossy().into_owned();
        // follows symlinked building directories
        let scanned = fs::metadata(entry.path()).and_then(|meta| {
            if meta.is_dir() {
                scan_building(&entry.path(), &building_code).map(Some)
            } else {
                Ok(None)
            }
        });
        let docs = match scanned {
            Ok(Some(docs)) => docs,
            Ok(None) => continue,
            Err(e) => {
                warn!(building = %building_code, path = ?entry.path(), error = %e, "building directory could not be read");
                let err = FloorError::UnreadableBuilding { building_code: building_code.clone(), reason: e.to_string() };
                found.unreadable.push((building_code, err));
                continue;
            }
        };
        for (floor, kind, path) in docs {
            let slot = floors
                .entry(floor.clone())
                .or_insert_with(|| FloorFiles { floor, outline: None, graph: None });
            match kind {
                DocKind::Outline => slot.outline = Some(path),
                DocKind::Graph => slot.graph = Some(path),
            }
        }
        found.buildings.push(building_code);
    }
    found.buildings.sort();
    found.unreadable.sort_by(|a, b| a.0.cmp(&b.0));
    found.floors = floors.into_values().collect();
    Ok(found)
}
