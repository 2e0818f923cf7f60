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

//! cell-area tables and pixel/cartesian conversions, ported operation for
//! operation from `original_source/thuner/grid.py`. Distances are computed
//! in `thuner_common::geo` (the `geo` crate's `Geodesic` metric space); this
//! module is purely the grid bookkeeping layered on top.

use ndarray::Array2;

use thuner_common::geo::{geodesic_distance, geographic_to_cartesian_displacement};

use crate::errors::{GridError, Result};
use crate::options::GridOptions;

/// linear extrapolation padding used at both ends of a 1-D spacing array,
/// mirroring `thuner.utils.pad`: the first/last interior value is
/// extrapolated outward rather than repeated, so edge cells get a
/// plausible half-spacing rather than a discontinuity.
fn pad(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() + 2);
    let first = if values.len() >= 2 { 2.0 * values[0] - values[1] } else { values[0] };
    let last = if values.len() >= 2 {
        2.0 * values[values.len() - 1] - values[values.len() - 2]
    } else {
        values[values.len() - 1]
    };
    out.push(first);
    out.extend_from_slice(values);
    out.push(last);
    out
}

fn is_regular(coord: &[f32]) -> bool {
    if coord.len() < 3 {
        return true;
    }
    let d0 = (coord[1] - coord[0]) as f64;
    coord.windows(2).all(|w| ((w[1] - w[0]) as f64 - d0).abs() < 1e-6)
}

/// cell areas in km², following `get_cell_areas`/`get_geographic_cell_areas`.
pub fn cell_areas(grid: &GridOptions) -> Array2<f32> {
    match grid {
        GridOptions::Cartesian(c) => {
            let area_km2 = (c.cartesian_spacing[0] as f64 * c.cartesian_spacing[1] as f64 / 1.0e6) as f32;
            Array2::from_elem((c.y.len(), c.x.len()), area_km2)
        }
        GridOptions::Geographic(g) => geographic_cell_areas(&g.latitude, &g.longitude),
    }
}

/// `get_geographic_cell_areas`: regular-grid fast path takes a single
/// meridional `dy` column (geodesic distance between cells two apart,
/// halved) and a `dx` row per latitude, outer-producted; the irregular
/// fallback builds the full lat/lon meshgrid and differences it pointwise.
pub fn geographic_cell_areas(lats: &[f32], lons: &[f32]) -> Array2<f32> {
    let (nlat, nlon) = (lats.len(), lons.len());
    if nlat < 3 || nlon < 3 {
        return Array2::from_elem((nlat, nlon), 0.0f32);
    }

    if is_regular(lats) && is_regular(lons) {
        let lon0 = lons[0] as f64;
        let dx: Vec<f64> = lats
            .iter()
            .map(|&lat| geodesic_distance(lons[2] as f64, lat as f64, lon0, lat as f64) / 2.0)
            .collect();
        let dy_inner: Vec<f64> = (1..nlat - 1)
            .map(|i| geodesic_distance(lon0, lats[i + 1] as f64, lon0, lats[i - 1] as f64) / 2.0)
            .collect();
        let dy = pad(&dy_inner);

        let mut areas = Array2::zeros((nlat, nlon));
        for row in 0..nlat {
            for col in 0..nlon {
                areas[[row, col]] = ((dx[row] * dy[row]) / 1.0e6) as f32;
            }
        }
        areas
    } else {
        let mut areas = Array2::zeros((nlat, nlon));
        for row in 1..nlat - 1 {
            for col in 1..nlon - 1 {
                let dx = geodesic_distance(lons[col + 1] as f64, lats[row] as f64, lons[col - 1] as f64, lats[row] as f64) / 2.0;
                let dy = geodesic_distance(lons[col] as f64, lats[row + 1] as f64, lons[col] as f64, lats[row - 1] as f64) / 2.0;
                areas[[row, col]] = ((dx * dy) / 1.0e6) as f32;
            }
        }
        // pad both axes by copying the nearest interior row/column, same
        // effect as `np.apply_along_axis(pad, ...)` on a slice this short.
        for col in 1..nlon - 1 {
            areas[[0, col]] = areas[[1, col]];
            areas[[nlat - 1, col]] = areas[[nlat - 2, col]];
        }
        for row in 0..nlat {
            areas[[row, 0]] = areas[[row, 1]];
            areas[[row, nlon - 1]] = areas[[row, nlon - 2]];
        }
        areas
    }
}

/// converts a pixel-space displacement vector `(delta_row, delta_col)`
/// starting at `(row,col)` into a cartesian `(delta_y, delta_x)` metres
/// vector, per `pixel_to_cartesian_vector`.
pub fn pixel_to_cartesian_vector(row: usize, col: usize, delta: (f64, f64), grid: &GridOptions) -> (f64, f64) {
    match grid {
        GridOptions::Cartesian(c) => (
            delta.0 * c.cartesian_spacing[0] as f64,
            delta.1 * c.cartesian_spacing[1] as f64,
        ),
        GridOptions::Geographic(g) => {
            let start_lat = g.latitude[row] as f64;
            let start_lon = g.longitude[col] as f64;
            let end_lat = start_lat + delta.0 * g.geographic_spacing[0] as f64;
            let end_lon = start_lon + delta.1 * g.geographic_spacing[1] as f64;
            geographic_to_cartesian_displacement(start_lat, start_lon, end_lat, end_lon)
        }
    }
}

/// snapped bounds × regular grid covering the input lat/lon extents, per
/// `new_geographic_grid`.
pub fn new_geographic_grid(lats: &[f32], lons: &[f32], dlat: f32, dlon: f32) -> (Vec<f32>, Vec<f32>) {
    let min_lat = (lats.iter().cloned().fold(f32::INFINITY, f32::min) / dlat).floor() * dlat;
    let max_lat = (lats.iter().cloned().fold(f32::NEG_INFINITY, f32::max) / dlat).ceil() * dlat;
    let min_lon = (lons.iter().cloned().fold(f32::INFINITY, f32::min) / dlon).floor() * dlon;
    let max_lon = (lons.iter().cloned().fold(f32::NEG_INFINITY, f32::max) / dlon).ceil() * dlon;

    let steps = |min: f32, max: f32, step: f32| -> Vec<f32> {
        let n = ((max - min) / step).round() as usize;
        (0..=n).map(|i| (((min as f64) + i as f64 * step as f64) * 1e8).round() / 1e8).map(|v| v as f32).collect()
    };
    (steps(min_lat, max_lat, dlat), steps(min_lon, max_lon, dlon))
}

/// linearly interpolates a 1-D coordinate array at a fractional pixel
/// index, clamping at the ends. Used to locate an area-weighted pixel
/// centroid (generally non-integer) on the lat/lon or y/x axis.
fn interp_coord(coord: &[f32], index: f64) -> f64 {
    if coord.is_empty() {
        return 0.0;
    }
    let lo = index.floor().clamp(0.0, (coord.len() - 1) as f64) as usize;
    let hi = (lo + 1).min(coord.len() - 1);
    let frac = (index - lo as f64).clamp(0.0, 1.0);
    let a = coord[lo] as f64;
    let b = coord[hi] as f64;
    a + (b - a) * frac
}

/// maps a fractional pixel coordinate `(row,col)` to `(lon,lat)` degrees on
/// a geographic grid. Meaningless on a cartesian grid (no geographic axes
/// attached), so callers needing a distance between two cartesian-grid
/// centres should use the `cartesian_spacing` metre path instead of this.
pub fn pixel_to_lonlat(grid: &GridOptions, row: f64, col: f64) -> Option<(f64, f64)> {
    match grid {
        GridOptions::Geographic(g) => Some((interp_coord(&g.longitude, col), interp_coord(&g.latitude, row))),
        GridOptions::Cartesian(_) => None,
    }
}

/// distance in kilometres between two fractional pixel centres, geodesic
/// on a geographic grid and Euclidean (via `cartesian_spacing`) on a
/// cartesian one - the metric the matcher's cost function is built on.
pub fn center_distance_km(grid: &GridOptions, p: (f64, f64), q: (f64, f64)) -> f64 {
    match grid {
        GridOptions::Geographic(_) => {
            let (lon1, lat1) = pixel_to_lonlat(grid, p.0, p.1).expect("geographic grid");
            let (lon2, lat2) = pixel_to_lonlat(grid, q.0, q.1).expect("geographic grid");
            geodesic_distance(lon1, lat1, lon2, lat2) / 1000.0
        }
        GridOptions::Cartesian(c) => {
            let dy = (q.0 - p.0) * c.cartesian_spacing[0] as f64;
            let dx = (q.1 - p.1) * c.cartesian_spacing[1] as f64;
            (dy * dy + dx * dx).sqrt() / 1000.0
        }
    }
}

/// finds the rectangular `(row,col)` window enclosing a lat/lon box in a
/// curvilinear (2-D lat/lon) dataset and returns its bounds, per
/// `subset_curvilinear`.
pub fn subset_curvilinear_bounds(
    latitude: &Array2<f32>,
    longitude: &Array2<f32>,
    lat_min: f32,
    lat_max: f32,
    lon_min: f32,
    lon_max: f32,
) -> Result<((usize, usize), (usize, usize))> {
    if latitude.dim() != longitude.dim() {
        return Err(GridError::MissingCoordinates);
    }
    let mut row_bounds: Option<(usize, usize)> = None;
    let mut col_bounds: Option<(usize, usize)> = None;
    for ((row, col), &lat) in latitude.indexed_iter() {
        let lon = longitude[[row, col]];
        if lat >= lat_min && lat <= lat_max && lon >= lon_min && lon <= lon_max {
            row_bounds = Some(match row_bounds {
                None => (row, row),
                Some((lo, hi)) => (lo.min(row), hi.max(row)),
            });
            col_bounds = Some(match col_bounds {
                None => (col, col),
                Some((lo, hi)) => (lo.min(col), hi.max(col)),
            });
        }
    }
    match (row_bounds, col_bounds) {
        (Some(r), Some(c)) => Ok((r, c)),
        _ => Err(GridError::EmptyBoundsSubset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_grid_cell_area_column_matches_direct_geodesic_within_tolerance() {
        let lats: Vec<f32> = (0..40).map(|i| -0.5 + i as f32 * 0.025).collect();
        let lons: Vec<f32> = (0..5).map(|i| -0.05 + i as f32 * 0.025).collect();
        let areas = geographic_cell_areas(&lats, &lons);

        let column_sum: f64 = (0..lats.len()).map(|r| areas[[r, 2]] as f64).sum();
        let direct_dy = geodesic_distance(0.0, lats[0] as f64, 0.0, lats[lats.len() - 1] as f64) / 1000.0;
        let direct_dx = geodesic_distance(lons[1] as f64, 0.0, lons[3] as f64, 0.0) / 2.0 / 1000.0;
        let direct = direct_dy * direct_dx;

        assert!((column_sum - direct).abs() / direct < 0.01, "column_sum={column_sum} direct={direct}");
    }

    #[test]
    fn pad_extrapolates_linearly_at_edges() {
        let padded = pad(&[10.0, 20.0, 30.0]);
        assert_eq!(padded, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn new_geographic_grid_snaps_to_bounds() {
        let (lats, lons) = new_geographic_grid(&[0.013, 0.521], &[10.0, 10.3], 0.025, 0.025);
        assert!((lats[0] - 0.0).abs() < 1e-6);
        assert!((*lats.last().unwrap() - 0.525).abs() < 1e-6);
        assert!((lons[0] - 10.0).abs() < 1e-6);
    }
}
