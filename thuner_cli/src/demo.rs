/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The "ODIN" software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the minimal end-to-end demo driver: tracks one synthetic "cell" object
//! across one or more intervals against [`crate::synthetic::SyntheticAdapter`],
//! then (optionally) stitches the intervals and runs post-run analysis.
//! Everything beyond this - real dataset adapters, a full multi-level
//! configuration surface, plotting - is out of scope; this exists so the
//! rest of the workspace has one runnable path exercising every stage.

use tracing::info;

use thuner_attr::{Attribute, AttributeDataType, AttributeEntry, AttributeGroup, AttributeType, RetrievalKind};
use thuner_common::datetime::EpochSeconds;
use thuner_detect::{DetectOptions, DetectionMethod};
use thuner_flow::FlowOptions;
use thuner_grid::options::{CartesianGridOptions, GridOptions};
use thuner_match::MatchOptions;
use thuner_paths::Paths;
use thuner_stitch::{stitch_run, StitchOptions};
use thuner_track::loop_::{advance, detect_next_mask, load_grid};
use thuner_track::{MaskOptions, MaskStore, ObjectMethod, ObjectOptions, ObjectTracks, TrackedMask};

use crate::errors::{CliError, Result};
use crate::synthetic::SyntheticAdapter;

#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub out: std::path::PathBuf,
    pub intervals: usize,
    pub steps_per_interval: usize,
    pub step_seconds: i64,
    pub grid_size: usize,
    pub grid_spacing_m: f32,
    pub run_analysis: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        DemoOptions {
            out: std::path::PathBuf::from("thuner_demo_out"),
            intervals: 2,
            steps_per_interval: 6,
            step_seconds: 600,
            grid_size: 20,
            grid_spacing_m: 1000.0,
            run_analysis: true,
        }
    }
}

fn grid_options(options: &DemoOptions) -> GridOptions {
    let n = options.grid_size;
    let spacing = options.grid_spacing_m;
    GridOptions::Cartesian(CartesianGridOptions {
        y: (0..n).map(|i| i as f32 * spacing).collect(),
        x: (0..n).map(|i| i as f32 * spacing).collect(),
        altitude: vec![0.0],
        central_latitude: 0.0,
        central_longitude: 0.0,
        projection: None,
        cartesian_spacing: [spacing, spacing],
        regrid: true,
    })
}

fn attribute_float(name: &str, units: &str, description: &str, retrieval: RetrievalKind) -> Attribute {
    Attribute { name: name.to_string(), data_type: AttributeDataType::Float, precision: Some(5), units: Some(units.to_string()), description: description.to_string(), retrieval }
}

fn core_attribute_type() -> AttributeType {
    AttributeType {
        name: "core".to_string(),
        member: None,
        entries: vec![
            AttributeEntry::Single(Attribute {
                name: "id".to_string(),
                data_type: AttributeDataType::Int,
                precision: None,
                units: None,
                description: "per-step object label".to_string(),
                retrieval: RetrievalKind::Id,
            }),
            AttributeEntry::Single(Attribute {
                name: "universal_id".to_string(),
                data_type: AttributeDataType::Int,
                precision: None,
                units: None,
                description: "identity stable across the object's lifetime".to_string(),
                retrieval: RetrievalKind::UniversalId,
            }),
            AttributeEntry::Single(Attribute {
                name: "time".to_string(),
                data_type: AttributeDataType::Datetime,
                precision: None,
                units: None,
                description: "valid time of this record".to_string(),
                retrieval: RetrievalKind::Time,
            }),
            AttributeEntry::Single(Attribute {
                name: "area_km2".to_string(),
                data_type: AttributeDataType::Float,
                precision: Some(3),
                units: Some("km^2".to_string()),
                description: "object area".to_string(),
                retrieval: RetrievalKind::AreaKm2,
            }),
            AttributeEntry::Group(AttributeGroup {
                retrieval: RetrievalKind::FlowVelocity,
                columns: vec![
                    attribute_float("u_flow", "m/s", "flow-corrected east-west velocity", RetrievalKind::FlowVelocity),
                    attribute_float("v_flow", "m/s", "flow-corrected north-south velocity", RetrievalKind::FlowVelocity),
                ],
            }),
            AttributeEntry::Single(Attribute {
                name: "parents".to_string(),
                data_type: AttributeDataType::String,
                precision: None,
                units: None,
                description: "space-separated parent labels from the previous step".to_string(),
                retrieval: RetrievalKind::Parents,
            }),
        ],
    }
}

fn quality_attribute_type() -> AttributeType {
    AttributeType {
        name: "quality".to_string(),
        member: None,
        entries: vec![
            AttributeEntry::Single(Attribute {
                name: "universal_id".to_string(),
                data_type: AttributeDataType::Int,
                precision: None,
                units: None,
                description: "identity stable across the object's lifetime".to_string(),
                retrieval: RetrievalKind::UniversalId,
            }),
            AttributeEntry::Single(Attribute {
                name: "time".to_string(),
                data_type: AttributeDataType::Datetime,
                precision: None,
                units: None,
                description: "valid time of this record".to_string(),
                retrieval: RetrievalKind::Time,
            }),
            AttributeEntry::Single(Attribute {
                name: "boundary_overlap".to_string(),
                data_type: AttributeDataType::Float,
                precision: Some(3),
                units: None,
                description: "fraction of boundary pixels touching the domain edge".to_string(),
                retrieval: RetrievalKind::BoundaryOverlap,
            }),
            AttributeEntry::Single(Attribute {
                name: "contained".to_string(),
                data_type: AttributeDataType::Int,
                precision: None,
                units: None,
                description: "1 when the object does not touch the domain boundary".to_string(),
                retrieval: RetrievalKind::Contained,
            }),
        ],
    }
}

fn cell_object_options() -> ObjectOptions {
    ObjectOptions {
        name: "cell".to_string(),
        hierarchy_level: 0,
        dataset: "synthetic".to_string(),
        deque_length: 3,
        mask_options: MaskOptions::default(),
        write_interval_minutes: 10,
        allowed_gap_minutes: 30,
        attribute_types: vec![core_attribute_type(), quality_attribute_type()],
        method: ObjectMethod::Detect(DetectOptions { method: DetectionMethod::Threshold { threshold: 40.0 }, flatten: None, min_area_km2: Some(1.0) }),
        tracking: Some(MatchOptions::default()),
        flow: FlowOptions::default(),
    }
}

/// flushes every attribute table regardless of its own write schedule -
/// the per-step [`advance`] flush is on a timer, but a demo run needs the
/// last partial window on disk too, once tracking for an interval ends.
fn flush_remaining(paths: &Paths, tracks: &mut ObjectTracks) -> Result<()> {
    let keys: Vec<String> = tracks.attribute_tables.keys().cloned().collect();
    for key in keys {
        let (member, type_name) = match key.split_once('/') {
            Some((member, type_name)) => (Some(member.to_string()), type_name.to_string()),
            None => (None, key.clone()),
        };
        let _ = &type_name;
        if let Some(table) = tracks.attribute_tables.get_mut(&key) {
            thuner_attr::flush::flush(paths, &tracks.options.name, member.as_deref(), table)?;
        }
    }
    Ok(())
}

/// runs the synthetic demo pipeline end to end, writing every stage's
/// output under `options.out`.
pub fn run_demo(options: &DemoOptions) -> Result<()> {
    if options.intervals == 0 || options.steps_per_interval == 0 {
        return Err(CliError::Config("intervals and steps_per_interval must both be at least 1".to_string()));
    }

    let run_paths = Paths::new(&options.out);
    run_paths.ensure_dirs()?;
    let grid = grid_options(options);
    let (rows, cols) = grid.shape();

    for interval_index in 0..options.intervals {
        let interval_paths = run_paths.interval_dir(interval_index);
        interval_paths.ensure_dirs()?;

        let mut tracks = ObjectTracks::new(cell_object_options());
        let mut mask_store = MaskStore::create(&interval_paths, "cell", rows, cols)?;

        let interval_start = EpochSeconds::new(interval_index as i64 * options.steps_per_interval as i64 * options.step_seconds);
        let mut adapter = SyntheticAdapter::new(grid.clone(), EpochSeconds::new(0), (0.0, 0.01), 2.0, 50.0);

        for step in 0..options.steps_per_interval {
            let time = EpochSeconds::new(interval_start.seconds() + step as i64 * options.step_seconds);
            load_grid(&mut tracks, &mut adapter, time)?;
            let mask = detect_next_mask(&tracks)?;
            advance(&mut tracks, &interval_paths, Some(&mut mask_store), time, mask.map(TrackedMask::Detected))?;
        }

        flush_remaining(&interval_paths, &mut tracks)?;
        info!(interval = interval_index, steps_written = mask_store.steps_written(), "interval tracking complete");
    }

    if options.intervals > 1 {
        let report = stitch_run(run_paths.root(), &StitchOptions::default())?;
        for object in &report.objects {
            info!(object = %object.object, frames = object.frame_count, ids = object.final_id_count, "stitched");
        }
    } else {
        // a single-interval run already sits in its own `interval_0/`
        // subtree; promote it to the run root so downstream paths
        // (`masks/`, `attributes/`) look the same regardless of how many
        // intervals were tracked.
        let only_interval = run_paths.interval_dir(0);
        for subdir in ["masks", "attributes"] {
            let from = only_interval.root().join(subdir);
            let to = run_paths.root().join(subdir);
            if from.is_dir() {
                copy_dir(&from, &to)?;
            }
        }
        std::fs::remove_dir_all(only_interval.root())?;
    }

    if options.run_analysis {
        let analysis_options: thuner_analysis::AnalysisOptions = serde_yaml::from_str("object: cell\nquadrant_labels: [e, n, w, s]\n")
            .map_err(|error| CliError::Config(format!("built-in demo analysis options failed to parse: {error}")))?;
        let report = thuner_analysis::analyze_run(&run_paths, &analysis_options)?;
        info!(tracked = report.objects_tracked, passing_quality = report.objects_passing_quality, "analysis complete");
    }

    Ok(())
}

fn copy_dir(from: &std::path::Path, to: &std::path::Path) -> std::io::Result<()> {
    std::fs::create_dir_all(to)?;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let path = entry.path();
        let destination = to.join(entry.file_name());
        if path.is_dir() {
            copy_dir(&path, &destination)?;
        } else {
            std::fs::copy(&path, &destination)?;
        }
    }
    Ok(())
}
