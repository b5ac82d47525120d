pub mod discover;
pub mod load;
pub mod write;

use anyhow::Result;
use tracing::info;

use floorgraph_core::{Pipeline, PipelineOutput, Placements};

use crate::config::Config;
use discover::discover_floors;
use load::{load_floor, load_placements};
use write::{write_json, write_outputs};

/// Reads every floor under the data directory, runs the pipeline and writes
/// the outputs. Per-floor and per-building problems end up in the report,
/// not in the `Err`.
pub fn run(cfg: &Config) -> Result<PipelineOutput> {
    cfg.options.validate()?;
    let found = discover_floors(&cfg.data_dir)?;
    info!(
        buildings = found.buildings.len(),
        floors = found.floors.len(),
        unreadable = found.unreadable.len(),
        dir = ?cfg.data_dir,
        "discovered floors"
    );

    let mut inputs = Vec::with_capacity(found.floors.len());
    let mut unreadable = Vec::new();
    for files in &found.floors {
        match load_floor(files) {
            Ok(input) => inputs.push(input),
            Err(e) => unreadable.push((files.floor.clone(), e)),
        }
    }

    let placements = match &cfg.placements_path {
        Some(path) => load_placements(path)?,
        None => {
            let p = Placements::from_outlines(inputs.iter().map(|i| (&i.floor, &i.outline)));
            info!(placements = p.len(), "collected placements from outlines");
            p
        }
    };

    let mut pipeline = Pipeline::new(placements, cfg.options.clone());
    for building in &found.buildings {
        pipeline.register_building(building);
    }
    for (building, err) in &found.unreadable {
        pipeline.record_failure(building, err);
    }
    for (floor, err) in &unreadable {
        pipeline.record_failure(floor, err);
    }
    pipeline.process_all(inputs);
    let output = pipeline.finish();

    write_outputs(&cfg.out_dir, &output)?;
    if let Some(path) = &cfg.report_path {
        write_json(path, &output.report)?;
        info!(path = ?path, "wrote run report");
    }
    Ok(output)
}
