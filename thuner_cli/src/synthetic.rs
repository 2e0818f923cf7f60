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

//! a synthetic [`thuner_track::DatasetAdapter`] standing in for a real
//! radar/satellite backend: no files exist anywhere, every grid is
//! computed on demand from a single moving circular reflectivity blob.
//! Exists so the demo driver in [`crate::demo`] can exercise the whole
//! detect/track/stitch/analyze pipeline without a real dataset.

use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3};

use thuner_common::datetime::EpochSeconds;
use thuner_grid::field_grid::FieldGrid;
use thuner_grid::options::GridOptions;
use thuner_track::AdapterError;

pub struct SyntheticAdapter {
    grid: GridOptions,
    start: EpochSeconds,
    /// cells travelled per second, along (row, col).
    velocity_cells_per_second: (f64, f64),
    radius_cells: f64,
    intensity: f32,
}

impl SyntheticAdapter {
    pub fn new(grid: GridOptions, start: EpochSeconds, velocity_cells_per_second: (f64, f64), radius_cells: f64, intensity: f32) -> Self {
        SyntheticAdapter { grid, start, velocity_cells_per_second, radius_cells, intensity }
    }

    fn blob_center(&self, time: EpochSeconds) -> (f64, f64) {
        let elapsed = time.interval_since(self.start);
        let (rows, cols) = self.grid.shape();
        let row = (rows as f64) / 4.0 + elapsed * self.velocity_cells_per_second.0;
        let col = (cols as f64) / 4.0 + elapsed * self.velocity_cells_per_second.1;
        (row, col)
    }
}

impl thuner_track::DatasetAdapter for SyntheticAdapter {
    /// there is nothing on disk to enumerate; one synthetic placeholder
    /// path per requested window stands in for `get_filepaths`' real job.
    fn get_filepaths(&self, start: EpochSeconds, end: EpochSeconds) -> Result<Vec<PathBuf>, AdapterError> {
        Ok(vec![PathBuf::from(format!("synthetic://{start}_{end}"))])
    }

    /// the synthetic field is computed directly from `time`, so there is
    /// no rolling file window to advance - this just records the request.
    fn update_input_record(&mut self, _time: EpochSeconds) -> Result<(), AdapterError> {
        Ok(())
    }

    fn grid_from_dataset(&self, time: EpochSeconds) -> Result<FieldGrid, AdapterError> {
        let (rows, cols) = self.grid.shape();
        let (center_row, center_col) = self.blob_center(time);
        let mut values = Array3::<f32>::zeros((1, rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let dr = row as f64 - center_row;
                let dc = col as f64 - center_col;
                if (dr * dr + dc * dc).sqrt() <= self.radius_cells {
                    values[[0, row, col]] = self.intensity;
                }
            }
        }
        let domain_mask = Array2::from_elem((rows, cols), true);
        FieldGrid::new("reflectivity", self.grid.clone(), values, domain_mask, Some(time)).map_err(|error| Box::new(error) as AdapterError)
    }

    /// no raw file to convert: the field is already synthesized in
    /// [`grid_from_dataset`](Self::grid_from_dataset).
    fn convert_dataset(&mut self, _filepath: &Path) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thuner_grid::options::CartesianGridOptions;
    use thuner_track::DatasetAdapter;

    fn grid(n: usize, spacing: f32) -> GridOptions {
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

    #[test]
    fn blob_moves_between_two_requested_times() {
        let adapter = SyntheticAdapter::new(grid(20, 1000.0), EpochSeconds::new(0), (0.0, 0.01), 2.0, 50.0);
        let first = adapter.grid_from_dataset(EpochSeconds::new(0)).unwrap();
        let later = adapter.grid_from_dataset(EpochSeconds::new(600)).unwrap();
        assert_ne!(first.level(0).to_owned(), later.level(0).to_owned());
    }

    #[test]
    fn blob_pixels_exceed_a_typical_detection_threshold() {
        let adapter = SyntheticAdapter::new(grid(20, 1000.0), EpochSeconds::new(0), (0.0, 0.0), 2.0, 50.0);
        let field = adapter.grid_from_dataset(EpochSeconds::new(0)).unwrap();
        let max = field.level(0).iter().cloned().fold(f32::MIN, f32::max);
        assert!(max >= 40.0);
    }
}
