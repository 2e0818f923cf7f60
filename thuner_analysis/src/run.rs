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

//! post-run analysis driver: smooths one object's flow velocities,
//! applies quality control, and optionally classifies the smoothed
//! velocity's direction, writing `<out>/analysis/{velocities,quality,
//! classification}.csv`. Grounded on
//! `original_source/thuner/analyze/utils.py`'s `smooth_flow_velocities`
//! and `quality_control`, and `original_source/thor/analyze/mcs.py`'s
//! `classify_all`, run as one pass rather than three independent
//! entry points since every THUNER run has exactly one analysis stage.

use std::path::Path;

use tracing::info;

use thuner_paths::Paths;

use crate::classify::{angle_between, classify};
use crate::errors::Result;
use crate::options::AnalysisOptions;
use crate::quality::{filter_rows, passing_ids};
use crate::smooth::temporal_smooth;
use crate::table::Table;

#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    pub objects_tracked: usize,
    pub objects_passing_quality: usize,
    pub velocity_rows: usize,
}

pub fn analyze_run(paths: &Paths, options: &AnalysisOptions) -> Result<AnalysisReport> {
    options.validate()?;
    let analysis_dir = paths.root().join("analysis");
    std::fs::create_dir_all(&analysis_dir)?;

    let core_path = paths.attribute_table_path(&options.object, None, &options.core_attribute_type);
    let core_table = Table::read_csv(&core_path)?;
    let objects_tracked = core_table.column_u64(&core_path, "universal_id")?.into_iter().collect::<std::collections::HashSet<_>>().len();

    let mut smoothed = temporal_smooth(&core_path, &core_table, "universal_id", "time", &[options.u_column.as_str(), options.v_column.as_str()], options.smoothing_window)?;
    // ground-relative velocity is always reported as `u`/`v`, whatever the
    // source attribute columns were named, matching the original's
    // `rename(columns={"u_flow": "u", "v_flow": "v"})`.
    for (header, renamed) in [(&options.u_column, "u"), (&options.v_column, "v")] {
        if let Some(index) = smoothed.headers.iter().position(|h| h == header) {
            smoothed.headers[index] = renamed.to_string();
        }
    }
    let velocity_path = analysis_dir.join("velocities.csv");
    smoothed.write_csv(&velocity_path)?;
    let velocity_rows = smoothed.rows.len();

    let quality_path = paths.attribute_table_path(&options.object, None, &options.quality_attribute_type);
    let objects_passing_quality = if quality_path.is_file() {
        let quality_table = Table::read_csv(&quality_path)?;
        let passing = passing_ids(&quality_path, &quality_table, "universal_id", &options.overlap_column, &options.quality_options())?;
        let filtered = filter_rows(&quality_path, &quality_table, "universal_id", &passing)?;
        filtered.write_csv(&analysis_dir.join("quality.csv"))?;
        passing.len()
    } else {
        info!(object = %options.object, "no quality attribute table found, skipping quality filtering");
        0
    };

    if let Some(labels) = &options.quadrant_labels {
        write_classification(&velocity_path, &smoothed, labels, &analysis_dir.join("classification.csv"))?;
    }

    Ok(AnalysisReport { objects_tracked, objects_passing_quality, velocity_rows })
}

/// classifies each row's smoothed `(u, v)` direction relative to due
/// east (`angle_between(1, 0, u, v)`) into one of `labels`' equal
/// sectors, writing `time,universal_id,classification`.
fn write_classification(path: &Path, velocities: &Table, labels: &[String], destination: &Path) -> Result<()> {
    let time_index = velocities.column_index(path, "time")?;
    let id_index = velocities.column_index(path, "universal_id")?;
    let u = velocities.column_f64(path, "u")?;
    let v = velocities.column_f64(path, "v")?;

    let mut out = Table { headers: vec!["time".to_string(), "universal_id".to_string(), "classification".to_string()], rows: Vec::with_capacity(velocities.rows.len()) };
    for (row_index, row) in velocities.rows.iter().enumerate() {
        let label = match (u[row_index], v[row_index]) {
            (Some(u), Some(v)) => classify(angle_between(1.0, 0.0, u, v), labels).to_string(),
            _ => String::new(),
        };
        out.rows.push(vec![row[time_index].clone(), row[id_index].clone(), label]);
    }
    out.write_csv(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn runs_the_full_analysis_pipeline() {
        let root = std::env::temp_dir().join(format!("thuner_analysis_run_test_{}", std::process::id()));
        std::fs::remove_dir_all(&root).ok();
        let paths = Paths::new(&root);

        write(
            &paths.attribute_table_path("cell", None, "core"),
            "time,universal_id,u_flow,v_flow\n2020-01-01T00:00:00Z,1,5,0\n2020-01-01T00:10:00Z,1,5,0\n",
        );
        write(
            &paths.attribute_table_path("cell", None, "quality"),
            "time,universal_id,boundary_overlap\n2020-01-01T00:00:00Z,1,0.0\n2020-01-01T00:10:00Z,1,0.0\n",
        );

        let mut options: AnalysisOptions = serde_yaml::from_str("object: cell\n").unwrap();
        options.quadrant_labels = Some(vec!["e".into(), "n".into(), "w".into(), "s".into()]);

        let report = analyze_run(&paths, &options).unwrap();
        assert_eq!(report.objects_tracked, 1);
        assert_eq!(report.objects_passing_quality, 1);
        assert_eq!(report.velocity_rows, 2);

        let classification = std::fs::read_to_string(root.join("analysis").join("classification.csv")).unwrap();
        assert!(classification.lines().skip(1).all(|line| line.ends_with(",e")));

        std::fs::remove_dir_all(&root).ok();
    }
}
