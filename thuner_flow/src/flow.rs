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

//! bounding-box bookkeeping around the phase-correlation kernel: global
//! flow (one box around the grid centre) and local flow (one box per
//! object, expanded by a margin and clipped to the frame).

use ndarray::{s, Array2, ArrayView2};

use thuner_grid::options::GridOptions;

use crate::errors::{FlowError, Result};
use crate::phase_correlation::phase_correlate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub row0: usize,
    pub row1: usize,
    pub col0: usize,
    pub col1: usize,
}

impl PixelBox {
    pub fn from_bounds(row0: usize, row1: usize, col0: usize, col1: usize) -> Self {
        PixelBox { row0, row1, col0, col1 }
    }

    pub fn center(&self) -> (usize, usize) { ((self.row0 + self.row1) / 2, (self.col0 + self.col1) / 2) }

    pub fn is_empty(&self) -> bool { self.row1 <= self.row0 || self.col1 <= self.col0 }

    /// expands by `(row_margin,col_margin)` pixels on every side, clipped
    /// to `(nrows,ncols)`.
    pub fn expand(&self, row_margin: usize, col_margin: usize, nrows: usize, ncols: usize) -> PixelBox {
        PixelBox {
            row0: self.row0.saturating_sub(row_margin),
            row1: (self.row1 + row_margin).min(nrows),
            col0: self.col0.saturating_sub(col_margin),
            col1: (self.col1 + col_margin).min(ncols),
        }
    }
}

/// converts a km margin to a pixel-space (row,col) half-width at the given
/// row (latitude-dependent zonal spacing on a geographic grid).
pub fn margin_pixels(grid: &GridOptions, margin_km: f32, center_row: usize) -> (usize, usize) {
    let margin_m = margin_km as f64 * 1000.0;
    match grid {
        GridOptions::Cartesian(c) => (
            (margin_m / c.cartesian_spacing[0] as f64).ceil() as usize,
            (margin_m / c.cartesian_spacing[1] as f64).ceil() as usize,
        ),
        GridOptions::Geographic(g) => {
            let row = center_row.min(g.latitude.len().saturating_sub(1));
            let lat = g.latitude.get(row).copied().unwrap_or(0.0) as f64;
            let metres_per_lat_deg = g.geographic_spacing[0] as f64 * 111_320.0;
            let metres_per_lon_deg = g.geographic_spacing[1] as f64 * 111_320.0 * lat.to_radians().cos().abs().max(1e-6);
            ((margin_m / metres_per_lat_deg).ceil() as usize, (margin_m / metres_per_lon_deg).ceil() as usize)
        }
    }
}

fn crop(field: ArrayView2<f32>, box_: PixelBox) -> Array2<f32> {
    field.slice(s![box_.row0..box_.row1, box_.col0..box_.col1]).to_owned()
}

/// phase correlation between `previous` and `current` restricted to
/// `box_`, expanded by `margin_km` around its centre and clipped to the
/// frame. Returns the signed pixel displacement `(delta_row,delta_col)`.
pub fn local_flow(previous: ArrayView2<f32>, current: ArrayView2<f32>, grid: &GridOptions, box_: PixelBox, margin_km: f32) -> Result<(f64, f64)> {
    let (nrows, ncols) = previous.dim();
    if current.dim() != (nrows, ncols) {
        return Err(FlowError::ShapeMismatch { previous: (nrows, ncols), current: current.dim() });
    }
    let center = box_.center();
    let (row_margin, col_margin) = margin_pixels(grid, margin_km, center.0);
    let expanded = box_.expand(row_margin, col_margin, nrows, ncols);
    if expanded.is_empty() {
        return Err(FlowError::EmptyBox { row0: expanded.row0, col0: expanded.col0, row1: expanded.row1, col1: expanded.col1 });
    }
    Ok(phase_correlate(&crop(previous, expanded), &crop(current, expanded)))
}

/// global flow vector: a box around the grid centre expanded by
/// `margin_km`, used either once per step (`unique_global_flow=true`) or
/// recomputed per object around that object's own flow box centre.
pub fn global_flow(previous: ArrayView2<f32>, current: ArrayView2<f32>, grid: &GridOptions, centre: (usize, usize), margin_km: f32) -> Result<(f64, f64)> {
    let (nrows, ncols) = previous.dim();
    if current.dim() != (nrows, ncols) {
        return Err(FlowError::ShapeMismatch { previous: (nrows, ncols), current: current.dim() });
    }
    let (row_margin, col_margin) = margin_pixels(grid, margin_km, centre.0);
    let box_ = PixelBox::from_bounds(centre.0, centre.0 + 1, centre.1, centre.1 + 1).expand(row_margin, col_margin, nrows, ncols);
    if box_.is_empty() {
        return Err(FlowError::EmptyBox { row0: box_.row0, col0: box_.col0, row1: box_.row1, col1: box_.col1 });
    }
    Ok(phase_correlate(&crop(previous, box_), &crop(current, box_)))
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn global_flow_recovers_uniform_translation() {
        let grid = cartesian_grid(60, 1000.0);
        let mut previous = Array2::from_elem((60, 60), 0.0f32);
        for r in 20..30 {
            for c in 20..30 {
                previous[[r, c]] = 45.0;
            }
        }
        let mut current = Array2::from_elem((60, 60), 0.0f32);
        for r in 22..32 {
            for c in 21..31 {
                current[[r, c]] = 45.0;
            }
        }
        let (dr, dc) = global_flow(previous.view(), current.view(), &grid, (30, 30), 100.0).unwrap();
        assert!((dr - 2.0).abs() < 1.0, "dr={dr}");
        assert!((dc - 1.0).abs() < 1.0, "dc={dc}");
    }
}
