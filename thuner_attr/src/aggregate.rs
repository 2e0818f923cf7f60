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

//! concatenation of per-interval attribute tables into one run-level
//! table, the attribute-side counterpart of the mask stitcher: each
//! tracking interval wrote its own `attributes/<object>/<type>.csv` under
//! `interval_<i>/`, and once the intervals are stitched into one
//! continuous set of universal ids the attribute rows are concatenated,
//! sorted by `index_columns`, and rewritten as a single file - mirroring
//! `original_source/thuner/attribute/attribute.py::aggregate_attributes`.

use std::path::Path;

use crate::errors::{AttrError, Result};

/// reads every csv in `sources` (same header, which is taken from the
/// first file), concatenates their data rows, stable-sorts by the given
/// 0-based `index_columns` (interpreted lexicographically as strings -
/// callers that need numeric ordering pre-format the column, e.g. zero
/// padded ids), drops every row but the first among those that tie on
/// `index_columns` - two sources covering an overlapping boundary (as
/// adjacent tracking intervals do) each contribute a row for that shared
/// instant, and `sources` order decides which one survives - and writes
/// the result to `destination`.
pub fn concatenate_and_sort(sources: &[impl AsRef<Path>], destination: &Path, index_columns: &[usize]) -> Result<()> {
    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for source in sources {
        let source = source.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(source)
            .map_err(|e| AttrError::Csv { path: source.display().to_string(), source: e })?;

        let this_header: Vec<String> = reader
            .headers()
            .map_err(|e| AttrError::Csv { path: source.display().to_string(), source: e })?
            .iter()
            .map(str::to_string)
            .collect();
        if header.is_none() {
            header = Some(this_header);
        }

        for record in reader.records() {
            let record = record.map_err(|e| AttrError::Csv { path: source.display().to_string(), source: e })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
    }

    rows.sort_by(|a, b| {
        for &col in index_columns {
            let ord = a.get(col).cmp(&b.get(col));
            if ord != std::cmp::Ordering::Equal {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    });
    rows.dedup_by(|a, b| index_columns.iter().all(|&col| a.get(col) == b.get(col)));

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|source| AttrError::Io { path: parent.display().to_string(), source })?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(destination)
        .map_err(|e| AttrError::Csv { path: destination.display().to_string(), source: e })?;
    if let Some(header) = header {
        writer.write_record(&header).map_err(|e| AttrError::Csv { path: destination.display().to_string(), source: e })?;
    }
    for row in rows {
        writer.write_record(&row).map_err(|e| AttrError::Csv { path: destination.display().to_string(), source: e })?;
    }
    writer.flush().map_err(|source| AttrError::Io { path: destination.display().to_string(), source })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_and_sorts_by_index_column() {
        let root = std::env::temp_dir().join(format!("thuner_attr_aggregate_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();

        let a = root.join("interval_0.csv");
        let b = root.join("interval_1.csv");
        std::fs::write(&a, "id,area\n3,10.0\n1,20.0\n").unwrap();
        std::fs::write(&b, "id,area\n2,30.0\n").unwrap();

        let destination = root.join("aggregated.csv");
        concatenate_and_sort(&[&a, &b], &destination, &[0]).unwrap();

        let contents = std::fs::read_to_string(&destination).unwrap();
        assert_eq!(contents, "id,area\n1,20.0\n2,30.0\n3,10.0\n");

        std::fs::remove_dir_all(&root).ok();
    }
}
