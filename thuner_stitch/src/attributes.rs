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

//! the attribute-csv side of interval stitching: every id/universal_id
//! and `parents` cell in one interval's attribute table is rewritten
//! through that interval's [`IntervalRemap`](crate::reassign::IntervalRemap)
//! before the per-interval files are concatenated, via
//! `thuner_attr::aggregate::concatenate_and_sort`, into one run-level
//! table (spec.md §4.9 step 3's "relabel parents columns identically
//! using the same mapping").

use std::path::Path;

use thuner_attr::aggregate::concatenate_and_sort;

use crate::errors::{Result, StitchError};
use crate::reassign::IntervalRemap;

/// which columns of an attribute csv carry ids that need remapping, and
/// which column(s) to sort the stitched table by.
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub id_columns: Vec<String>,
    pub parents_column: Option<String>,
    pub index_columns: Vec<String>,
}

impl Default for AttributeSchema {
    fn default() -> Self {
        AttributeSchema {
            id_columns: vec!["id".to_string(), "universal_id".to_string()],
            parents_column: Some("parents".to_string()),
            index_columns: vec!["time".to_string(), "universal_id".to_string()],
        }
    }
}

fn csv_error(path: &Path, source: csv::Error) -> StitchError {
    StitchError::Csv { path: path.display().to_string(), source }
}

fn remap_token(token: &str, remap: &IntervalRemap) -> String {
    match token.parse::<u32>() {
        Ok(old) => remap.get(&old).map(|new| new.to_string()).unwrap_or_else(|| token.to_string()),
        Err(_) => token.to_string(),
    }
}

/// rewrites `source`'s id-bearing columns through `remap`, writing the
/// result to `destination`. Rows whose cell does not parse as an id (e.g.
/// an `NA` for a still-unmatched record) pass through unchanged.
pub fn remap_csv(source: &Path, destination: &Path, schema: &AttributeSchema, remap: &IntervalRemap) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(source).map_err(|e| csv_error(source, e))?;
    let headers: Vec<String> = reader.headers().map_err(|e| csv_error(source, e))?.iter().map(str::to_string).collect();
    let id_indices: Vec<usize> = schema.id_columns.iter().filter_map(|name| headers.iter().position(|h| h == name)).collect();
    let parents_index = schema.parents_column.as_ref().and_then(|name| headers.iter().position(|h| h == name));

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(destination).map_err(|e| csv_error(destination, e))?;
    writer.write_record(&headers).map_err(|e| csv_error(destination, e))?;

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(source, e))?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        for &index in &id_indices {
            if let Some(cell) = row.get_mut(index) {
                if !cell.is_empty() {
                    *cell = remap_token(cell, remap);
                }
            }
        }
        if let Some(index) = parents_index {
            if let Some(cell) = row.get_mut(index) {
                if !cell.is_empty() {
                    *cell = cell.split_whitespace().map(|token| remap_token(token, remap)).collect::<Vec<_>>().join(" ");
                }
            }
        }
        writer.write_record(&row).map_err(|e| csv_error(destination, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// remaps every interval's copy of one attribute table, then
/// concatenates and sorts them into the stitched run-level table at
/// `destination`.
pub fn stitch_attribute_table(sources: &[(usize, std::path::PathBuf)], destination: &Path, schema: &AttributeSchema, remaps: &[IntervalRemap]) -> Result<()> {
    let scratch_dir = destination.parent().unwrap_or_else(|| Path::new(".")).join(".stitch_scratch");
    std::fs::create_dir_all(&scratch_dir)?;

    let mut scratch_paths = Vec::with_capacity(sources.len());
    for (interval_index, source) in sources {
        let scratch = scratch_dir.join(format!("interval_{interval_index}.csv"));
        remap_csv(source, &scratch, schema, &remaps[*interval_index])?;
        scratch_paths.push(scratch);
    }

    let header = csv::ReaderBuilder::new().has_headers(true).from_path(&scratch_paths[0]).map_err(|e| csv_error(&scratch_paths[0], e))?.headers().map_err(|e| csv_error(&scratch_paths[0], e))?.clone();
    let index_columns: Vec<usize> = schema.index_columns.iter().filter_map(|name| header.iter().position(|h| h == name)).collect();

    concatenate_and_sort(&scratch_paths, destination, &index_columns)?;

    for path in &scratch_paths {
        std::fs::remove_file(path).ok();
    }
    std::fs::remove_dir(&scratch_dir).ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_csv_rewrites_id_and_parents_columns() {
        let root = std::env::temp_dir().join(format!("thuner_stitch_attr_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let source = root.join("core.csv");
        std::fs::write(&source, "time,universal_id,parents\n2020-01-01T00:00:00Z,1,\n2020-01-01T00:10:00Z,2,1\n").unwrap();

        let mut remap = IntervalRemap::new();
        remap.insert(1, 101);
        remap.insert(2, 102);

        let destination = root.join("core.remapped.csv");
        remap_csv(&source, &destination, &AttributeSchema::default(), &remap).unwrap();

        let contents = std::fs::read_to_string(&destination).unwrap();
        assert_eq!(contents, "time,universal_id,parents\n2020-01-01T00:00:00Z,101,\n2020-01-01T00:10:00Z,102,101\n");
        std::fs::remove_dir_all(&root).ok();
    }
}
