use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use floorgraph_core::PipelineOutput;

pub const FLOOR_GRAPH_FILE: &str = "high_level_floor_plan.json";
pub const ALL_GRAPH_FILE: &str = "all_graph.json";
pub const FLOOR_PLAN_MAP_FILE: &str = "floorPlanMap.json";
pub const SEARCH_MAP_FILE: &str = "searchMap.json";

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let f = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, value).with_context(|| format!("writing {:?}", path))?;
    w.flush().with_context(|| format!("flushing {:?}", path))?;
    Ok(())
}

/// Writes the four output documents into `out_dir`.
pub fn write_outputs(out_dir: &Path, output: &PipelineOutput) -> Result<()> {
    let targets = [FLOOR_GRAPH_FILE, ALL_GRAPH_FILE, FLOOR_PLAN_MAP_FILE, SEARCH_MAP_FILE].map(|f| out_dir.join(f));
    write_json(&targets[0], &output.connectivity)?;
    write_json(&targets[1], &output.graph)?;
    write_json(&targets[2], &output.rooms.floor_plans)?;
    write_json(&targets[3], &output.rooms.search)?;
    for path in &targets {
        info!(path = ?path, "wrote output");
    }
    Ok(())
}
