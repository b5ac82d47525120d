use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use floorgraph_core::pipeline::FloorInput;
use floorgraph_core::{FloorError, FloorGraph, FloorId, Outline, Placements};

use super::discover::FloorFiles;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("opening {:?}", path))?;
    let value = serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parsing {:?}", path))?;
    Ok(value)
}

pub fn load_placements(path: &Path) -> Result<Placements> {
    read_json(path).with_context(|| format!("loading placements {:?}", path))
}

fn read_floor_doc<T: DeserializeOwned>(floor: &FloorId, what: &'static str, path: &Path) -> Result<T, FloorError> {
    read_json(path).map_err(|e| FloorError::malformed(floor, what, format!("{:#}", e)))
}

/// Reads both documents of a floor. A graph without an outline cannot be
/// centered, so that floor is rejected as malformed.
pub fn load_floor(files: &FloorFiles) -> Result<FloorInput, FloorError> {
    let floor = &files.floor;
    let outline_path = files
        .outline
        .as_deref()
        .ok_or_else(|| FloorError::malformed(floor, "outline", "no outline document for this floor"))?;
    let outline: Outline = read_floor_doc(floor, "outline", outline_path)?;
    let graph = match files.graph.as_deref() {
        Some(path) => Some(read_floor_doc::<FloorGraph>(floor, "graph", path)?),
        None => None,
    };
    Ok(FloorInput { floor: floor.clone(), outline, graph })
}
