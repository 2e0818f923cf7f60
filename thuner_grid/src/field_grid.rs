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

//! a single time slice of a scalar field, plus its domain and boundary
//! masks. The original keeps these as bare xarray `Dataset`s with
//! `domain_mask`/`boundary_mask` data variables threaded alongside; here
//! they are fields of one value type so the detector and matcher can't
//! observe one without the other.

use ndarray::Array2;

use thuner_common::datetime::EpochSeconds;

use crate::errors::{GridError, Result};
use crate::options::GridOptions;

/// the valid-data footprint and its outer contour for a single horizontal
/// slice, shared across altitude levels of the same [`FieldGrid`].
#[derive(Debug, Clone)]
pub struct DomainMasks {
    pub domain_mask: Array2<bool>,
    pub boundary_mask: Array2<bool>,
}

impl DomainMasks {
    /// `boundary_mask` is the outer contour of `domain_mask`: cells inside
    /// the domain that have at least one 4-connected neighbour (or grid
    /// edge) outside it.
    pub fn new(domain_mask: Array2<bool>) -> Self {
        let boundary_mask = outer_contour(&domain_mask);
        DomainMasks { domain_mask, boundary_mask }
    }
}

fn outer_contour(domain_mask: &Array2<bool>) -> Array2<bool> {
    let (nrows, ncols) = domain_mask.dim();
    let mut boundary = Array2::from_elem((nrows, ncols), false);
    for row in 0..nrows {
        for col in 0..ncols {
            if !domain_mask[[row, col]] {
                continue;
            }
            let on_edge = row == 0 || col == 0 || row == nrows - 1 || col == ncols - 1;
            let neighbor_outside = on_edge
                || !domain_mask[[row - 1, col]]
                || !domain_mask[[row + 1, col]]
                || !domain_mask[[row, col - 1]]
                || !domain_mask[[row, col + 1]];
            boundary[[row, col]] = neighbor_outside;
        }
    }
    boundary
}

/// a 2-D or 3-D scalar field with its grid and masks attached. `values`
/// is always stored `(altitude, row, col)`; a purely 2-D field (e.g. a
/// satellite brightness-temperature scan) uses a single altitude level.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    pub name: String,
    pub grid: GridOptions,
    pub values: ndarray::Array3<f32>,
    pub masks: DomainMasks,
    pub time: Option<EpochSeconds>,
}

impl FieldGrid {
    pub fn new(name: impl Into<String>, grid: GridOptions, values: ndarray::Array3<f32>, domain_mask: Array2<bool>, time: Option<EpochSeconds>) -> Result<Self> {
        let (nlevels, nrows, ncols) = values.dim();
        let (grid_rows, grid_cols) = grid.shape();
        if nrows != grid_rows || ncols != grid_cols {
            return Err(GridError::ShapeMismatch { shape: (nrows, ncols), rows: grid_rows, cols: grid_cols });
        }
        if domain_mask.dim() != (nrows, ncols) {
            return Err(GridError::ShapeMismatch { shape: domain_mask.dim(), rows: nrows, cols: ncols });
        }
        let _ = nlevels;
        Ok(FieldGrid { name: name.into(), grid, values, masks: DomainMasks::new(domain_mask), time })
    }

    pub fn shape(&self) -> (usize, usize, usize) { self.values.dim() }

    /// the horizontal slice at the given altitude level index.
    pub fn level(&self, level: usize) -> ndarray::ArrayView2<'_, f32> { self.values.index_axis(ndarray::Axis(0), level) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn boundary_mask_is_outer_ring_of_a_filled_rectangle() {
        let mut domain = Array2::from_elem((5, 5), false);
        for r in 1..4 {
            for c in 1..4 {
                domain[[r, c]] = true;
            }
        }
        let masks = DomainMasks::new(domain);
        assert!(masks.boundary_mask[[1, 1]]);
        assert!(masks.boundary_mask[[2, 2]] == false);
        assert!(masks.boundary_mask[[1, 2]]);
    }

    #[test]
    fn full_domain_mask_has_boundary_only_at_edges() {
        let domain = Array2::from_elem((4, 4), true);
        let masks = DomainMasks::new(domain);
        assert!(masks.boundary_mask[[0, 0]]);
        assert!(!masks.boundary_mask[[1, 1]]);
        assert!(!masks.boundary_mask[[2, 2]]);
        let _ = array![[1.0]];
    }
}
