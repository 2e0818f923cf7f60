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

//! domain-edge quality attributes, ported from
//! `original_source/thor/quality/quality.py`: an object is "contained"
//! when none of its pixels sit on the valid-domain's own outer boundary,
//! i.e. it isn't a storm whose true extent was clipped by the edge of the
//! available data.

use thuner_grid::field_grid::DomainMasks;
use thuner_grid::object_mask::ObjectMask;

/// an object is considered clipped once at least this fraction of its
/// pixels lie on the domain boundary.
pub const CONTAINED_THRESHOLD: f64 = 0.0;

/// fraction of `label`'s pixels that fall on `masks.boundary_mask`.
pub fn boundary_overlap_fraction(mask: &ObjectMask, masks: &DomainMasks, label: u32) -> Option<f64> {
    let pixels = mask.pixels_of(label);
    if pixels.is_empty() {
        return None;
    }
    let on_boundary = pixels.iter().filter(|&&(row, col)| masks.boundary_mask[[row, col]]).count();
    Some(on_boundary as f64 / pixels.len() as f64)
}

/// `true` when the object does not touch the domain boundary at all.
pub fn contained(mask: &ObjectMask, masks: &DomainMasks, label: u32) -> Option<bool> {
    boundary_overlap_fraction(mask, masks, label).map(|fraction| fraction <= CONTAINED_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn object_touching_edge_is_not_contained() {
        let domain = Array2::from_elem((4, 4), true);
        let masks = DomainMasks::new(domain);
        let mut labels = Array2::from_elem((4, 4), 0u32);
        labels[[0, 0]] = 1;
        labels[[1, 1]] = 1;
        let mask = ObjectMask::from_labels(labels);
        assert_eq!(contained(&mask, &masks, 1), Some(false));
    }

    #[test]
    fn object_away_from_edge_is_contained() {
        let domain = Array2::from_elem((5, 5), true);
        let masks = DomainMasks::new(domain);
        let mut labels = Array2::from_elem((5, 5), 0u32);
        labels[[2, 2]] = 1;
        let mask = ObjectMask::from_labels(labels);
        assert_eq!(contained(&mask, &masks, 1), Some(true));
    }
}
