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

//! top-level orchestration of one run's interval stitch: discover
//! `interval_<i>/` subtrees, require they track the same set of object
//! types, link masks at each boundary, sequentially reassign ids, and
//! write the concatenated `<out>/masks/<object>.zarr` and
//! `<out>/attributes/<object>/...csv` the rest of the pipeline consumes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::warn;

use thuner_paths::Paths;

use crate::attributes::{stitch_attribute_table, AttributeSchema};
use crate::boundary::boundary_map;
use crate::errors::{Result, StitchError};
use crate::mask_io::MaskSeries;
use crate::masks::stitch_masks;
use crate::reassign::reassign;

#[derive(Debug, Clone)]
pub struct StitchOptions {
    pub schema: AttributeSchema,
    /// when `false` (the default), `interval_<i>/` subtrees are removed
    /// once the stitched output has been written successfully.
    pub keep_interval_dirs: bool,
}

impl Default for StitchOptions {
    fn default() -> Self { StitchOptions { schema: AttributeSchema::default(), keep_interval_dirs: false } }
}

#[derive(Debug, Clone)]
pub struct StitchedObject {
    pub object: String,
    pub frame_count: usize,
    pub final_id_count: u32,
    /// indices `i` where the boundary between interval `i` and `i+1`
    /// disagreed and no cross-interval id linkage could be drawn there.
    pub unlinked_boundaries: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct StitchReport {
    pub objects: Vec<StitchedObject>,
}

fn interval_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found: Vec<(usize, PathBuf)> = Vec::new();
    if root.is_dir() {
        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(index_str) = name.strip_prefix("interval_") {
                if let Ok(index) = index_str.parse::<usize>() {
                    found.push((index, entry.path()));
                }
            }
        }
    }
    if found.is_empty() {
        return Err(StitchError::NoIntervals(root.to_path_buf()));
    }
    found.sort_by_key(|(index, _)| *index);
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

fn object_names(interval_root: &Path) -> Result<BTreeSet<String>> {
    let masks_dir = Paths::new(interval_root).masks_dir();
    let mut names = BTreeSet::new();
    if masks_dir.is_dir() {
        for entry in std::fs::read_dir(&masks_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str().and_then(|n| n.strip_suffix(".zarr")) {
                names.insert(name.to_string());
            }
        }
    }
    Ok(names)
}

/// every `.csv` file under `attributes/<object>/`, as a path relative to
/// that directory - e.g. `core.csv`, or `convective/core.csv` for a
/// grouped object's member-scoped table.
fn relative_csv_paths(attributes_object_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    fn walk(base: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                walk(base, &path, out)?;
            } else if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                out.push(path.strip_prefix(base).expect("walked path is under base").to_path_buf());
            }
        }
        Ok(())
    }
    if attributes_object_dir.is_dir() {
        walk(attributes_object_dir, attributes_object_dir, &mut out)?;
    }
    Ok(out)
}

fn max_label(series: &MaskSeries) -> Result<u32> {
    let mut max = 0u32;
    for t in 0..series.len() {
        let frame = series.read(t)?;
        max = max.max(frame.iter().copied().max().unwrap_or(0));
    }
    Ok(max)
}

fn stitch_object(intervals: &[PathBuf], object: &str, options: &StitchOptions, out_paths: &Paths) -> Result<StitchedObject> {
    let mut series = Vec::with_capacity(intervals.len());
    for interval in intervals {
        series.push(MaskSeries::open(&Paths::new(interval).mask_store_path(object))?);
    }

    let max_ids: Vec<u32> = series.iter().map(max_label).collect::<Result<_>>()?;

    let mut boundaries = Vec::with_capacity(series.len().saturating_sub(1));
    let mut unlinked = Vec::new();
    for i in 0..series.len().saturating_sub(1) {
        let linkage = if series[i].is_empty() || series[i + 1].is_empty() {
            None
        } else {
            let last = series[i].read(series[i].len() - 1)?;
            let first = series[i + 1].read(0)?;
            boundary_map(&last, &first)
        };
        if linkage.is_none() {
            warn!(object, boundary = i, "interval boundary regions disagree, no cross-interval id linkage drawn here");
            unlinked.push(i);
        }
        boundaries.push(linkage);
    }

    let remaps = reassign(&max_ids, &boundaries);
    let final_id_count = remaps.iter().flat_map(|m| m.values()).copied().max().unwrap_or(0);

    let frame_count = stitch_masks(&series, &remaps, &out_paths.mask_store_path(object))?;

    // union of relative csv paths (e.g. `core.csv`, `ellipse.csv`,
    // `convective/core.csv`) present in any interval for this object.
    let mut relative_paths: BTreeSet<PathBuf> = BTreeSet::new();
    for interval in intervals {
        let dir = interval.join("attributes").join(object);
        for path in relative_csv_paths(&dir)? {
            relative_paths.insert(path);
        }
    }

    for relative in &relative_paths {
        let sources: Vec<(usize, PathBuf)> = intervals
            .iter()
            .enumerate()
            .filter_map(|(i, interval)| {
                let path = interval.join("attributes").join(object).join(relative);
                path.is_file().then_some((i, path))
            })
            .collect();
        if sources.is_empty() {
            continue;
        }
        let destination = out_paths.attributes_dir().join(object).join(relative);
        stitch_attribute_table(&sources, &destination, &options.schema, &remaps)?;

        // the `.yml` sidecar is identical content across intervals (it
        // describes the schema, not any data); copy the first one found.
        for (_, source) in &sources {
            let yml_source = source.with_extension("yml");
            if yml_source.is_file() {
                let yml_destination = destination.with_extension("yml");
                std::fs::copy(&yml_source, &yml_destination)?;
                break;
            }
        }
    }

    Ok(StitchedObject { object: object.to_string(), frame_count, final_id_count, unlinked_boundaries: unlinked })
}

/// stitches every `interval_<i>/` subtree under `root` into `root`'s
/// top-level `masks/`/`attributes/` output, per spec.md §4.9.
pub fn stitch_run(root: &Path, options: &StitchOptions) -> Result<StitchReport> {
    let intervals = interval_dirs(root)?;
    let out_paths = Paths::new(root);
    out_paths.ensure_dirs()?;

    let first_objects = object_names(&intervals[0])?;
    for (index, interval) in intervals.iter().enumerate().skip(1) {
        let these_objects = object_names(interval)?;
        if let Some(missing) = first_objects.difference(&these_objects).next() {
            return Err(StitchError::InconsistentObjectSet { earlier: 0, later: index, object: missing.clone() });
        }
        if let Some(extra) = these_objects.difference(&first_objects).next() {
            return Err(StitchError::InconsistentObjectSet { earlier: index, later: 0, object: extra.clone() });
        }
    }

    let mut objects = Vec::with_capacity(first_objects.len());
    for object in &first_objects {
        objects.push(stitch_object(&intervals, object, options, &out_paths)?);
    }

    if !options.keep_interval_dirs {
        for interval in &intervals {
            std::fs::remove_dir_all(interval)?;
        }
    }

    Ok(StitchReport { objects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask_io::MaskSeriesWriter;
    use ndarray::array;

    fn write_core_csv(path: &Path, rows: &[(&str, &str, &str)]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut text = String::from("time,universal_id,parents\n");
        for (time, id, parents) in rows {
            text.push_str(&format!("{time},{id},{parents}\n"));
        }
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn stitches_two_intervals_of_a_stationary_object() {
        let root = std::env::temp_dir().join(format!("thuner_stitch_run_test_{}", std::process::id()));
        std::fs::remove_dir_all(&root).ok();
        std::fs::create_dir_all(&root).unwrap();

        let paths_0 = Paths::new(root.join("interval_0"));
        let mut w0 = MaskSeriesWriter::create(&paths_0.mask_store_path("cell"), 2, 2).unwrap();
        w0.append(&array![[1u32, 0], [0, 0]]).unwrap();
        w0.append(&array![[1u32, 0], [0, 0]]).unwrap();
        write_core_csv(
            &paths_0.attribute_table_path("cell", None, "core"),
            &[("2020-01-01T00:00:00Z", "1", ""), ("2020-01-01T00:10:00Z", "1", "")],
        );

        let paths_1 = Paths::new(root.join("interval_1"));
        let mut w1 = MaskSeriesWriter::create(&paths_1.mask_store_path("cell"), 2, 2).unwrap();
        w1.append(&array![[1u32, 0], [0, 0]]).unwrap(); // duplicate boundary frame, fresh counter
        w1.append(&array![[1u32, 0], [0, 0]]).unwrap();
        write_core_csv(
            &paths_1.attribute_table_path("cell", None, "core"),
            &[("2020-01-01T00:10:00Z", "1", ""), ("2020-01-01T00:20:00Z", "1", "")],
        );

        let report = stitch_run(&root, &StitchOptions { keep_interval_dirs: true, ..StitchOptions::default() }).unwrap();
        assert_eq!(report.objects.len(), 1);
        let cell = &report.objects[0];
        assert_eq!(cell.object, "cell");
        assert_eq!(cell.frame_count, 3);
        assert_eq!(cell.final_id_count, 1);
        assert!(cell.unlinked_boundaries.is_empty());

        let out_paths = Paths::new(&root);
        let stitched_core = std::fs::read_to_string(out_paths.attribute_table_path("cell", None, "core")).unwrap();
        let lines: Vec<&str> = stitched_core.lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 distinct times
        assert!(lines.iter().skip(1).all(|line| line.starts_with(|c: char| c.is_ascii_digit()) && line.contains(",1,")));

        std::fs::remove_dir_all(&root).ok();
    }
}
