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

//! Steiner et al. (1995) convective/stratiform classification, ported from
//! `original_source/thor/detect/steiner.py::steiner_scheme`. Distance to a
//! candidate neighbour is geodesic on a geographic grid and Euclidean on a
//! cartesian one; both paths share the same background-mean / convective-
//! radius / peakedness logic.

use ndarray::{Array2, ArrayView2};

use thuner_common::geo::geodesic_distance;
use thuner_grid::options::GridOptions;

use crate::options::SteinerOptions;

/// Δ(dBZ) "peakedness" threshold as a function of background-average
/// reflectivity, Steiner et al. 1995 eq. 2. `delta_z_option` selects the
/// continuous quadratic roll-off (0, the published form) or a coarser
/// 5-bin table (1) some operational variants substitute for it.
fn delta_z_threshold(background_dbz: f32, delta_z_option: i32) -> f32 {
    if delta_z_option == 1 {
        if background_dbz < 0.0 {
            10.0
        } else if background_dbz < 10.0 {
            8.0
        } else if background_dbz < 20.0 {
            6.0
        } else if background_dbz < 30.0 {
            4.0
        } else if background_dbz < 40.0 {
            2.0
        } else {
            0.0
        }
    } else if background_dbz < 0.0 {
        10.0
    } else if background_dbz <= 42.43 {
        10.0 - (background_dbz * background_dbz) / 180.0
    } else {
        0.0
    }
}

/// convective radius (metres) as a function of background-average
/// reflectivity, Steiner et al. 1995 Table 1. `radius_option` 1 halves the
/// published radii, used on finer-resolution grids where the full radius
/// over-smooths distinct cells.
fn convective_radius_m(background_dbz: f32, radius_option: i32) -> f64 {
    let base = if background_dbz < 20.0 {
        1_000.0
    } else if background_dbz < 25.0 {
        2_000.0
    } else if background_dbz < 30.0 {
        3_000.0
    } else if background_dbz < 35.0 {
        4_000.0
    } else if background_dbz < 40.0 {
        5_000.0
    } else {
        6_000.0
    };
    if radius_option == 1 { base / 2.0 } else { base }
}

fn pixel_radius_spans(grid: &GridOptions, row: usize, radius_m: f64) -> (usize, usize) {
    match grid {
        GridOptions::Cartesian(c) => {
            let row_span = (radius_m / c.cartesian_spacing[0] as f64).ceil() as usize;
            let col_span = (radius_m / c.cartesian_spacing[1] as f64).ceil() as usize;
            (row_span.max(1), col_span.max(1))
        }
        GridOptions::Geographic(g) => {
            let lat_span = (radius_m / (g.geographic_spacing[0] as f64 * 111_320.0)).ceil() as usize;
            let lat = g.latitude[row] as f64;
            let metres_per_lon_deg = 111_320.0 * lat.to_radians().cos().abs().max(1e-6);
            let lon_span = (radius_m / (g.geographic_spacing[1] as f64 * metres_per_lon_deg)).ceil() as usize;
            (lat_span.max(1), lon_span.max(1))
        }
    }
}

fn distance_m(grid: &GridOptions, r0: usize, c0: usize, r1: usize, c1: usize) -> f64 {
    match grid {
        GridOptions::Cartesian(c) => {
            let dy = (r1 as f64 - r0 as f64) * c.cartesian_spacing[0] as f64;
            let dx = (c1 as f64 - c0 as f64) * c.cartesian_spacing[1] as f64;
            (dy * dy + dx * dx).sqrt()
        }
        GridOptions::Geographic(g) => geodesic_distance(
            g.longitude[c0] as f64,
            g.latitude[r0] as f64,
            g.longitude[c1] as f64,
            g.latitude[r1] as f64,
        ),
    }
}

/// mean reflectivity of valid (non-NaN) pixels within `radius_m` of
/// `(row,col)`; `None` when no valid pixel falls in range. NaN pixels are
/// treated as background: excluded from the average, not counted as zero.
fn background_mean(field: ArrayView2<f32>, row: usize, col: usize, grid: &GridOptions, radius_m: f64) -> Option<f32> {
    let (nrows, ncols) = field.dim();
    let (row_span, col_span) = pixel_radius_spans(grid, row, radius_m);
    let r0 = row.saturating_sub(row_span);
    let r1 = (row + row_span).min(nrows - 1);
    let c0 = col.saturating_sub(col_span);
    let c1 = (col + col_span).min(ncols - 1);

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for r in r0..=r1 {
        for c in c0..=c1 {
            let v = field[[r, c]];
            if v.is_nan() {
                continue;
            }
            if distance_m(grid, row, col, r, c) <= radius_m {
                sum += v as f64;
                count += 1;
            }
        }
    }
    if count == 0 { None } else { Some((sum / count as f64) as f32) }
}

fn mark_within_radius(convective: &mut Array2<bool>, classified: &mut Array2<bool>, row: usize, col: usize, grid: &GridOptions, radius_m: f64) {
    let (nrows, ncols) = convective.dim();
    let (row_span, col_span) = pixel_radius_spans(grid, row, radius_m);
    let r0 = row.saturating_sub(row_span);
    let r1 = (row + row_span).min(nrows - 1);
    let c0 = col.saturating_sub(col_span);
    let c1 = (col + col_span).min(ncols - 1);
    for r in r0..=r1 {
        for c in c0..=c1 {
            if distance_m(grid, row, col, r, c) <= radius_m {
                convective[[r, c]] = true;
                classified[[r, c]] = true;
            }
        }
    }
}

/// classifies a flattened dBZ field into convective (`true`) / stratiform
/// (`false`) per pixel, following `steiner_scheme`: scan pixels in
/// row-major order, skip any already classified by a previous pixel's
/// convective-radius stamp, otherwise test the absolute-threshold and
/// peakedness criteria against the local background mean.
pub fn classify(field: ArrayView2<f32>, grid: &GridOptions, options: &SteinerOptions) -> Array2<bool> {
    let (nrows, ncols) = field.dim();
    let mut convective = Array2::from_elem((nrows, ncols), false);
    let mut classified = Array2::from_elem((nrows, ncols), false);

    for row in 0..nrows {
        for col in 0..ncols {
            if classified[[row, col]] {
                continue;
            }
            let value = field[[row, col]];
            if value.is_nan() {
                classified[[row, col]] = true;
                continue;
            }

            let background = match background_mean(field, row, col, grid, options.background_radius_m) {
                Some(b) => b,
                None => {
                    classified[[row, col]] = true;
                    continue;
                }
            };

            let exceeds_absolute = options.use_dbz_threshold && value >= options.dbz_threshold;
            let delta = delta_z_threshold(background, options.delta_z_option);
            let exceeds_peak = (value - background) >= delta;

            if exceeds_absolute || exceeds_peak {
                let radius_m = convective_radius_m(background, options.radius_option);
                mark_within_radius(&mut convective, &mut classified, row, col, grid, radius_m);
            } else {
                classified[[row, col]] = true;
            }
        }
    }
    convective
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use thuner_grid::options::CartesianGridOptions;

    fn cartesian_grid(n: usize, spacing: f32) -> GridOptions {
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
    fn isolated_strong_core_is_convective() {
        let grid = cartesian_grid(21, 1000.0);
        let mut field = Array2::from_elem((21, 21), 15.0f32);
        field[[10, 10]] = 55.0;
        let options = SteinerOptions::default();
        let convective = classify(field.view(), &grid, &options);
        assert!(convective[[10, 10]]);
    }

    #[test]
    fn uniform_weak_field_is_entirely_stratiform() {
        let grid = cartesian_grid(11, 1000.0);
        let field = Array2::from_elem((11, 11), 12.0f32);
        let options = SteinerOptions::default();
        let convective = classify(field.view(), &grid, &options);
        assert!(convective.iter().all(|&c| !c));
    }
}
