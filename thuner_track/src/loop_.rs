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

//! the per-step, per-object control flow: roll time forward, obtain the
//! next mask (detect or group), match it against the previous step, mint
//! or inherit universal ids, record attributes, and write masks/flush
//! attributes on their own schedules. Ported from `track_object` in
//! `original_source/thuner/track.py`, with the dataset-dispatch and
//! object-identity bookkeeping it leaves implicit in Python's duck typing
//! made explicit.

use std::collections::HashMap;

use ndarray::Array2;
use tracing::{debug, info, warn};

use thuner_attr::dispatch;
use thuner_common::datetime::EpochSeconds;
use thuner_flow::{global_flow, local_flow};
use thuner_grid::field_grid::FieldGrid;
use thuner_grid::geometry::{pixel_to_cartesian_vector, pixel_to_lonlat};
use thuner_grid::object_mask::ObjectMask;
use thuner_match::cost::object_geometries;
use thuner_match::match_masks;
use thuner_paths::Paths;

use crate::adapter::{AdapterError, DatasetAdapter};
use crate::errors::{Result, TrackError};
use crate::mask_store::MaskStore;
use crate::options::ObjectMethod;
use crate::record::ObjectRecord;
use crate::tracks::{ObjectTracks, TrackedMask};

fn adapter_error(dataset: &str, source: AdapterError) -> TrackError {
    TrackError::Adapter { dataset: dataset.to_string(), source }
}

/// loads (via the adapter) and pushes the gridded field valid at `time`.
/// Only object types whose mask comes from `detect` need this - a grouped
/// object is built entirely from sibling object types' own masks.
pub fn load_grid(tracks: &mut ObjectTracks, adapter: &mut dyn DatasetAdapter, time: EpochSeconds) -> Result<()> {
    adapter.update_input_record(time).map_err(|source| adapter_error(&tracks.options.dataset, source))?;
    let grid = adapter.grid_from_dataset(time).map_err(|source| adapter_error(&tracks.options.dataset, source))?;
    tracks.grids.push(grid);
    Ok(())
}

/// the 2-D field a detected object type's detector and flow estimator
/// both operate on: the configured `flatten`, or the first altitude
/// level when none is configured.
fn flattened_level(grid: &FieldGrid, tracks: &ObjectTracks) -> Result<Array2<f32>> {
    match &tracks.options.method {
        ObjectMethod::Detect(detect_options) => match &detect_options.flatten {
            Some(flatten) => Ok(thuner_detect::flatten(grid, flatten)?),
            None => Ok(grid.level(0).to_owned()),
        },
        ObjectMethod::Group(_) => Ok(grid.level(0).to_owned()),
    }
}

/// runs detection on the most recently loaded grid.
pub fn detect_next_mask(tracks: &ObjectTracks) -> Result<Option<ObjectMask>> {
    let ObjectMethod::Detect(detect_options) = &tracks.options.method else {
        return Err(TrackError::Config(format!("{:?}: detect_next_mask called on a grouped object", tracks.options.name)));
    };
    let grid = tracks.grids.latest().ok_or_else(|| TrackError::Config(format!("{:?}: no grid loaded for detection", tracks.options.name)))?;
    Ok(thuner_detect::detect(grid, detect_options)?)
}

/// runs grouping over the current masks of this object's configured
/// member object types, looked up from the sibling `ObjectTracks` the
/// caller (the per-level driver) supplies in `member_order`.
pub fn group_next_mask(tracks: &ObjectTracks, members: &[ObjectMask]) -> Result<Option<TrackedMask>> {
    if members.is_empty() {
        return Ok(None);
    }
    let grouped = thuner_group::group_members(members)?;
    if grouped.group_ids().is_empty() {
        Ok(None)
    } else {
        Ok(Some(TrackedMask::Grouped(grouped)))
    }
}

/// builds one [`ObjectRecord`] per label present in `mask`, using
/// `match_result` (already computed against the previous step) for flow
/// and parent bookkeeping, and appends them to `tracks`' in-memory
/// attribute tables for every configured attribute type.
fn record_attributes(
    tracks: &mut ObjectTracks,
    mask: &ObjectMask,
    grid: Option<&FieldGrid>,
    time: EpochSeconds,
    universal_ids: &HashMap<u32, u64>,
    match_result: &thuner_match::MatchResult,
    dt_seconds: Option<f64>,
) -> Result<()> {
    let geometries = grid.map(|g| object_geometries(mask, &g.grid));

    for &label in &mask.object_ids() {
        let geometry = geometries.as_ref().and_then(|g| g.get(&label));
        let center_lat_lon = match (geometry, grid) {
            (Some(geometry), Some(grid)) => pixel_to_lonlat(&grid.grid, geometry.center.0, geometry.center.1),
            _ => None,
        };
        let area_km2 = geometry.map(|g| g.area_km2).unwrap_or(0.0);
        let flow_velocity_ms = match (match_result.corrected_flows.get(&label), dt_seconds) {
            (Some(&(dr, dc)), Some(dt)) if dt > 0.0 => Some((dr / dt, dc / dt)),
            _ => None,
        };
        // centre-to-centre displacement velocity (spec §4.7 core
        // attribute "displacement velocity"): convert the matched pair's
        // pixel displacement to metres at the object's own centre before
        // dividing by the step's dt, rather than treating pixel/s as m/s.
        let displacement_velocity_ms = match (match_result.displacements.get(&label), geometry, grid, dt_seconds) {
            (Some(&delta), Some(geometry), Some(grid), Some(dt)) if dt > 0.0 => {
                let (dy, dx) = pixel_to_cartesian_vector(geometry.center.0.round() as usize, geometry.center.1.round() as usize, delta, &grid.grid);
                Some((dy / dt, dx / dt))
            }
            _ => None,
        };
        let boundary_overlap_fraction = grid.and_then(|g| thuner_attr::quality::boundary_overlap_fraction(mask, &g.masks, label));
        let contour = mask.pixels_of(label).into_iter().map(|(row, col)| (row as f64, col as f64)).collect::<Vec<_>>();

        let record = ObjectRecord {
            id: label as i64,
            universal_id: universal_ids.get(&label).copied().unwrap_or(0) as i64,
            time,
            center_lat_lon,
            area_km2,
            flow_velocity_ms,
            displacement_velocity_ms,
            parents: match_result.parents.get(&label).map(|p| p.iter().map(|&l| l as i64).collect()).unwrap_or_default(),
            mask_contour: contour,
            boundary_overlap_fraction,
            profile_samples: HashMap::new(),
            tag_samples: HashMap::new(),
        };

        let attribute_types: Vec<_> = tracks.options.attribute_types.clone();
        for attribute_type in &attribute_types {
            let key = match &attribute_type.member {
                Some(member) => format!("{member}/{}", attribute_type.name),
                None => attribute_type.name.clone(),
            };
            if let Some(table) = tracks.attribute_tables.get_mut(&key) {
                let mut values = Vec::new();
                for entry in &attribute_type.entries {
                    values.extend(dispatch(&entry_retrieval(entry), &record));
                }
                table.push_row(values)?;
            }
        }
    }
    Ok(())
}

fn entry_retrieval(entry: &thuner_attr::AttributeEntry) -> thuner_attr::RetrievalKind {
    match entry {
        thuner_attr::AttributeEntry::Single(attribute) => attribute.retrieval.clone(),
        thuner_attr::AttributeEntry::Group(group) => group.retrieval.clone(),
    }
}

/// the shared tail of `track_object`: given the mask already produced for
/// this step (detected or grouped), matches it against the previous step,
/// mints/inherits universal ids, records attributes, writes masks and
/// flushes attribute tables on their configured schedules.
pub fn advance(
    tracks: &mut ObjectTracks,
    paths: &Paths,
    mask_store: Option<&mut MaskStore>,
    next_time: EpochSeconds,
    next_mask: Option<TrackedMask>,
) -> Result<()> {
    let previous_time = tracks.times.latest().copied();
    tracks.times.push(next_time);

    let Some(next_tracked) = next_mask else {
        debug!(object = %tracks.options.name, "no objects this step");
        tracks.masks.push(TrackedMask::Detected(ObjectMask::from_labels(Array2::from_elem((0, 0), 0u32))));
        return Ok(());
    };

    let next_matching_mask = next_tracked.matching_mask(&tracks.options).cloned();
    let prev_matching_mask = tracks.masks.latest().and_then(|m| m.matching_mask(&tracks.options)).cloned();

    let dt_seconds = match (previous_time, Some(next_time)) {
        (Some(prev), Some(next)) => Some(next.interval_since(prev)),
        _ => None,
    };

    // TINT/MINT `history` term (spec §4.4 step 3: "last step displacement
    // `h` for this id, scaled by time-interval ratio"): the previous
    // step's own match already persisted each surviving label's
    // centre-to-centre displacement, keyed by the label it now carries as
    // this step's `prev_mask`. Scale it by the ratio of this step's
    // interval to that one so `h` stays in "expected displacement for
    // this step's dt" units before the case-table comparisons in
    // `select_corrected_flow` run.
    let history: HashMap<u32, (f64, f64)> = match (tracks.match_records.latest(), dt_seconds) {
        (Some(previous_record), Some(dt)) => {
            let ratio = match previous_record.interval_seconds {
                Some(prev_dt) if prev_dt > 0.0 => dt / prev_dt,
                _ => 1.0,
            };
            previous_record.displacements.iter().map(|(&label, &(dr, dc))| (label, (dr * ratio, dc * ratio))).collect()
        }
        _ => HashMap::new(),
    };

    let mut match_result = match (&prev_matching_mask, &next_matching_mask, &tracks.options.tracking) {
        (Some(prev_mask), Some(next_mask_geom), Some(match_options)) => {
            let grid = tracks.grids.latest();
            let prev_grid = tracks.grids.previous();
            match (grid, prev_grid, matches!(tracks.options.method, ObjectMethod::Detect(_))) {
                (Some(next_grid), Some(prev_grid), true) => {
                    let prev_field = flattened_level(prev_grid, tracks)?;
                    let next_field = flattened_level(next_grid, tracks)?;
                    let geometries = object_geometries(prev_mask, &next_grid.grid);
                    let mut local_flows = HashMap::new();
                    for (&label, geometry) in &geometries {
                        let box_ = thuner_flow::PixelBox::from_bounds(geometry.bbox.0, geometry.bbox.1 + 1, geometry.bbox.2, geometry.bbox.3 + 1);
                        match local_flow(prev_field.view(), next_field.view(), &next_grid.grid, box_, tracks.options.flow.local_flow_margin_km) {
                            Ok(flow) => { local_flows.insert(label, flow); }
                            Err(error) => warn!(object = %tracks.options.name, %error, "local flow failed, defaulting to zero"),
                        }
                    }
                    let shape = prev_field.dim();
                    let centre = (shape.0 / 2, shape.1 / 2);
                    let global = global_flow(prev_field.view(), next_field.view(), &next_grid.grid, centre, tracks.options.flow.global_flow_margin_km)
                        .unwrap_or((0.0, 0.0));
                    match_masks(prev_mask, next_mask_geom, &next_grid.grid, &local_flows, global, &history, match_options)?
                }
                (Some(next_grid), _, false) => {
                    match_masks(prev_mask, next_mask_geom, &next_grid.grid, &HashMap::new(), (0.0, 0.0), &history, match_options)?
                }
                _ => thuner_match::MatchResult::default(),
            }
        }
        _ => thuner_match::MatchResult::default(),
    };
    match_result.interval_seconds = dt_seconds;

    let next_labels = next_matching_mask.as_ref().map(|m| m.object_ids()).unwrap_or_default();
    let universal_ids = tracks.advance_identities(&match_result, &next_labels);

    if let Some(mask) = &next_matching_mask {
        let grid = tracks.grids.latest();
        record_attributes(tracks, mask, grid, next_time, &universal_ids, &match_result, dt_seconds)?;
    }

    if tracks.options.mask_options.save {
        if let (Some(mask_store), Some(mask)) = (mask_store, &next_matching_mask) {
            // persist the identity-stable mask (§4.4 step 7: "relabel
            // next_mask via old id -> universal id, store as
            // matched_mask"), not the detector/grouper's own per-step
            // numbering - the interval stitcher matches masks at interval
            // boundaries by these labels directly.
            let universal_mask = mask.relabel_with(&universal_ids.iter().map(|(&label, &uid)| (label, uid as u32)).collect());
            mask_store.append(&universal_mask)?;
        }
    }

    if tracks.write_interval_reached(next_time) {
        let keys: Vec<String> = tracks.attribute_tables.keys().cloned().collect();
        for key in keys {
            let (member, type_name) = match key.split_once('/') {
                Some((member, type_name)) => (Some(member.to_string()), type_name.to_string()),
                None => (None, key.clone()),
            };
            if let Some(table) = tracks.attribute_tables.get_mut(&key) {
                thuner_attr::flush::flush(paths, &tracks.options.name, member.as_deref(), table)?;
            }
            let _ = type_name;
        }
        tracks.last_write_time = Some(next_time);
        info!(object = %tracks.options.name, time = %next_time, "flushed attributes");
    }

    tracks.masks.push(next_tracked);
    tracks.match_records.push(match_result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use thuner_detect::{DetectOptions, DetectionMethod};
    use thuner_flow::FlowOptions;
    use thuner_grid::options::{CartesianGridOptions, GridOptions};
    use thuner_match::MatchOptions;

    use crate::options::{MaskOptions, ObjectOptions};

    fn grid_options(n: usize, spacing: f32) -> GridOptions {
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

    fn detected_options() -> ObjectOptions {
        ObjectOptions {
            name: "cell".to_string(),
            hierarchy_level: 0,
            dataset: "synthetic".to_string(),
            deque_length: 3,
            mask_options: MaskOptions::default(),
            write_interval_minutes: 60,
            allowed_gap_minutes: 30,
            attribute_types: vec![],
            method: ObjectMethod::Detect(DetectOptions { method: DetectionMethod::Threshold { threshold: 40.0 }, flatten: None, min_area_km2: None }),
            tracking: Some(MatchOptions::default()),
            flow: FlowOptions::default(),
        }
    }

    fn field_at(grid: &GridOptions, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>, time: i64) -> FieldGrid {
        let (nrows, ncols) = grid.shape();
        let mut values = ndarray::Array3::from_elem((1, nrows, ncols), 0.0f32);
        for r in rows {
            for c in cols.clone() {
                values[[0, r, c]] = 50.0;
            }
        }
        let domain_mask = Array2::from_elem((nrows, ncols), true);
        FieldGrid::new("refl", grid.clone(), values, domain_mask, Some(EpochSeconds::new(time))).unwrap()
    }

    #[test]
    fn stationary_object_keeps_its_universal_id_across_steps() {
        let grid = grid_options(20, 1000.0);
        let paths = Paths::new(std::env::temp_dir().join(format!("thuner_track_loop_test_{}", std::process::id())));
        let mut tracks = ObjectTracks::new(detected_options());

        tracks.grids.push(field_at(&grid, 5..10, 5..10, 0));
        let mask0 = detect_next_mask(&tracks).unwrap();
        advance(&mut tracks, &paths, None, EpochSeconds::new(0), mask0.map(TrackedMask::Detected)).unwrap();
        let id_step0 = *tracks.label_to_universal_id.get(&1).unwrap();

        tracks.grids.push(field_at(&grid, 5..10, 5..10, 60));
        let mask1 = detect_next_mask(&tracks).unwrap();
        advance(&mut tracks, &paths, None, EpochSeconds::new(60), mask1.map(TrackedMask::Detected)).unwrap();
        let id_step1 = *tracks.label_to_universal_id.get(&1).unwrap();

        assert_eq!(id_step0, id_step1);
        std::fs::remove_dir_all(paths.root()).ok();
    }

    #[test]
    fn object_disappearing_then_reappearing_gets_a_new_id() {
        let grid = grid_options(20, 1000.0);
        let paths = Paths::new(std::env::temp_dir().join(format!("thuner_track_loop_test_gap_{}", std::process::id())));
        let mut tracks = ObjectTracks::new(detected_options());

        tracks.grids.push(field_at(&grid, 5..10, 5..10, 0));
        let mask0 = detect_next_mask(&tracks).unwrap();
        advance(&mut tracks, &paths, None, EpochSeconds::new(0), mask0.map(TrackedMask::Detected)).unwrap();
        let id_step0 = *tracks.label_to_universal_id.get(&1).unwrap();

        // empty step: object vanishes.
        tracks.grids.push(field_at(&grid, 0..0, 0..0, 60));
        advance(&mut tracks, &paths, None, EpochSeconds::new(60), None).unwrap();

        tracks.grids.push(field_at(&grid, 5..10, 5..10, 120));
        let mask2 = detect_next_mask(&tracks).unwrap();
        advance(&mut tracks, &paths, None, EpochSeconds::new(120), mask2.map(TrackedMask::Detected)).unwrap();
        let id_step2 = *tracks.label_to_universal_id.get(&1).unwrap();

        assert_ne!(id_step0, id_step2);
        std::fs::remove_dir_all(paths.root()).ok();
    }
}
