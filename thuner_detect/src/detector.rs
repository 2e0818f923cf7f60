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

//! flatten → binary-classify → label → filter, the detector's whole
//! pipeline end to end.

use ndarray::Array2;
use tracing::debug;

use thuner_grid::field_grid::FieldGrid;
use thuner_grid::object_mask::ObjectMask;

use crate::errors::{DetectError, Result};
use crate::labeling::{filter_by_min_area, label_connected};
use crate::options::{DetectOptions, DetectionMethod, Flatten};
use crate::steiner;

/// collapses the (altitude, row, col) field to a single (row, col) slice,
/// per `flatten_method`. `None` (no `flatten` configured) falls back to
/// the first altitude level, matching an already-2-D field given a
/// single-level altitude array.
pub fn flatten(field: &FieldGrid, flatten: &Flatten) -> Result<Array2<f32>> {
    let altitude = field.grid.altitude();
    match flatten {
        Flatten::CrossSection { altitude: z } => {
            let level = altitude
                .iter()
                .position(|a| (a - z).abs() < 1e-3)
                .ok_or(DetectError::UnknownAltitude { requested: *z })?;
            Ok(field.level(level).to_owned())
        }
        Flatten::VerticalMax { start_altitude, end_altitude } => {
            let levels: Vec<usize> = altitude
                .iter()
                .enumerate()
                .filter(|(_, a)| **a >= *start_altitude && **a < *end_altitude)
                .map(|(i, _)| i)
                .collect();
            if levels.is_empty() {
                return Err(DetectError::EmptyAltitudeRange { start: *start_altitude, end: *end_altitude });
            }
            let (_, nrows, ncols) = field.shape();
            let mut out = Array2::from_elem((nrows, ncols), f32::NAN);
            for &level in &levels {
                let slice = field.level(level);
                out.zip_mut_with(&slice, |o, &v| {
                    if v.is_nan() {
                        return;
                    }
                    if o.is_nan() || v > *o {
                        *o = v;
                    }
                });
            }
            Ok(out)
        }
    }
}

/// runs the full detector on one field grid, returning `None` when every
/// candidate object is filtered out: an empty result is represented as
/// the absence of a mask rather than an all-background one.
pub fn detect(field: &FieldGrid, options: &DetectOptions) -> Result<Option<ObjectMask>> {
    let flattened = match &options.flatten {
        Some(f) => flatten(field, f)?,
        None => field.level(0).to_owned(),
    };

    let grid_shape = field.grid.shape();
    if flattened.dim() != grid_shape {
        return Err(DetectError::ShapeMismatch { field: flattened.dim(), grid: grid_shape });
    }

    let binary = match &options.method {
        DetectionMethod::Threshold { threshold } => flattened.mapv(|v| !v.is_nan() && v >= *threshold),
        DetectionMethod::Steiner(steiner_options) => steiner::classify(flattened.view(), &field.grid, steiner_options),
    };

    let labels = label_connected(&binary);
    let mask = ObjectMask::from_labels(labels);
    if mask.object_ids().is_empty() {
        debug!("detector found no candidate objects");
        return Ok(None);
    }

    let mask = match options.min_area_km2 {
        Some(min_area) => {
            if min_area <= 0.0 {
                return Err(DetectError::InvalidMinArea(min_area));
            }
            filter_by_min_area(&mask, &field.grid, min_area)
        }
        None => mask,
    };

    if mask.object_ids().is_empty() {
        debug!("all candidate objects dropped by min_area filter");
        Ok(None)
    } else {
        Ok(Some(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use thuner_common::datetime::EpochSeconds;
    use thuner_grid::field_grid::FieldGrid;
    use thuner_grid::options::{CartesianGridOptions, GridOptions};

    fn single_level_grid(n: usize, spacing: f32) -> GridOptions {
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
    fn threshold_detects_one_block_and_drops_small_noise() {
        let grid = single_level_grid(20, 1000.0);
        let mut values = Array3::from_elem((1, 20, 20), 0.0f32);
        for r in 2..12 {
            for c in 2..12 {
                values[[0, r, c]] = 50.0;
            }
        }
        values[[0, 18, 18]] = 50.0; // single pixel, should be dropped by min_area

        let domain_mask = ndarray::Array2::from_elem((20, 20), true);
        let field = FieldGrid::new("refl", grid, values, domain_mask, Some(EpochSeconds::new(0))).unwrap();

        let options = DetectOptions {
            method: DetectionMethod::Threshold { threshold: 40.0 },
            flatten: None,
            min_area_km2: Some(50.0),
        };

        let mask = detect(&field, &options).unwrap().expect("expected one surviving object");
        assert_eq!(mask.object_ids(), vec![1]);
    }

    #[test]
    fn empty_field_yields_no_mask() {
        let grid = single_level_grid(10, 1000.0);
        let values = Array3::from_elem((1, 10, 10), 0.0f32);
        let domain_mask = ndarray::Array2::from_elem((10, 10), true);
        let field = FieldGrid::new("refl", grid, values, domain_mask, None).unwrap();

        let options = DetectOptions { method: DetectionMethod::Threshold { threshold: 10.0 }, flatten: None, min_area_km2: None };
        assert!(detect(&field, &options).unwrap().is_none());
    }
}
