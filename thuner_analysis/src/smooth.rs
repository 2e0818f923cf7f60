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

//! a centered rolling-mean temporal smoother over one or more numeric
//! columns, applied independently within each tracked object's own time
//! series - a translation of
//! `original_source/thuner/analyze/utils.py::temporal_smooth` /
//! `smooth_flow_velocities`, which groups a velocities table by every
//! index except `time` and applies `rolling(window, min_periods=1,
//! center=True).mean()` to each group.

use std::collections::HashMap;
use std::path::Path;

use crate::errors::{AnalysisError, Result};
use crate::table::Table;

/// indices of one group's rows, in ascending time order.
fn grouped_by_id(ids: &[u64], time: &[&str]) -> Vec<Vec<usize>> {
    let mut groups: HashMap<u64, Vec<usize>> = HashMap::new();
    for (row, &id) in ids.iter().enumerate() {
        groups.entry(id).or_default().push(row);
    }
    let mut order: Vec<u64> = groups.keys().copied().collect();
    order.sort_unstable();
    order
        .into_iter()
        .map(|id| {
            let mut rows = groups.remove(&id).unwrap();
            rows.sort_by(|&a, &b| time[a].cmp(time[b]));
            rows
        })
        .collect()
}

/// mean of the valid (non-`None`) values in `values[lo..=hi]`; `None`
/// when every value in the window is missing.
fn window_mean(values: &[Option<f64>], center: usize, window: usize) -> Option<f64> {
    let half_before = (window - 1) / 2;
    let half_after = window / 2;
    let lo = center.saturating_sub(half_before);
    let hi = (center + half_after).min(values.len() - 1);
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in &values[lo..=hi] {
        if let Some(v) = value {
            sum += v;
            count += 1;
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// smooths `value_columns` of `table` in place within each distinct
/// `id_column` group, ordered by `time_column`. Rows whose smoothed
/// value is still missing (every sample in its window was `None`) are
/// written back as an empty cell, matching the source convention for an
/// unmatched record.
pub fn temporal_smooth(path: &Path, table: &Table, id_column: &str, time_column: &str, value_columns: &[&str], window: usize) -> Result<Table> {
    if window == 0 {
        return Err(AnalysisError::InvalidWindow(window));
    }
    let id_index = table.column_index(path, id_column)?;
    let time_index = table.column_index(path, time_column)?;
    let ids: Vec<u64> = table
        .rows
        .iter()
        .map(|row| row[id_index].parse::<u64>().unwrap_or(0))
        .collect();
    let time: Vec<&str> = table.rows.iter().map(|row| row[time_index].as_str()).collect();
    let groups = grouped_by_id(&ids, &time);

    let mut smoothed_columns = Vec::with_capacity(value_columns.len());
    for &column in value_columns {
        let values = table.column_f64(path, column)?;
        let mut smoothed = vec![None; values.len()];
        for group in &groups {
            let group_values: Vec<Option<f64>> = group.iter().map(|&row| values[row]).collect();
            for (local_index, &row) in group.iter().enumerate() {
                smoothed[row] = window_mean(&group_values, local_index, window);
            }
        }
        smoothed_columns.push(smoothed);
    }

    let mut out = table.clone();
    for (column, smoothed) in value_columns.iter().zip(smoothed_columns) {
        let index = table.column_index(path, column)?;
        for (row, value) in smoothed.into_iter().enumerate() {
            out.rows[row][index] = value.map(|v| format!("{v:.5}")).unwrap_or_default();
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooths_independently_per_object() {
        let path = Path::new("velocities.csv");
        let table = Table {
            headers: vec!["time".into(), "universal_id".into(), "u".into()],
            rows: vec![
                vec!["t0".into(), "1".into(), "0".into()],
                vec!["t0".into(), "2".into(), "100".into()],
                vec!["t1".into(), "1".into(), "10".into()],
                vec!["t1".into(), "2".into(), "100".into()],
                vec!["t2".into(), "1".into(), "20".into()],
                vec!["t2".into(), "2".into(), "100".into()],
            ],
        };
        let smoothed = temporal_smooth(path, &table, "universal_id", "time", &["u"], 3).unwrap();
        // object 2's constant series is unaffected by smoothing.
        assert_eq!(smoothed.rows[1][2], "100.00000");
        assert_eq!(smoothed.rows[3][2], "100.00000");
        // object 1's middle point averages its full centered window (0, 10, 20).
        assert_eq!(smoothed.rows[2][2], "10.00000");
    }

    #[test]
    fn rejects_a_zero_window() {
        let table = Table::default();
        let err = temporal_smooth(Path::new("x.csv"), &table, "id", "time", &[], 0);
        assert!(matches!(err, Err(AnalysisError::InvalidWindow(0))));
    }
}
