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

//! 4-connected labeling and minimum-area filtering. Labeling uses
//! `petgraph`'s `UnionFind<usize>` over a flattened pixel index rather than
//! a hand-rolled disjoint-set or flood fill, reaching for a graph/union-find
//! abstraction whenever the data shape fits one.

use std::collections::HashMap;

use ndarray::Array2;
use petgraph::unionfind::UnionFind;

use thuner_grid::geometry::cell_areas;
use thuner_grid::object_mask::ObjectMask;
use thuner_grid::options::GridOptions;

/// labels 4-connected components of `true` pixels in `binary`, returning a
/// dense `1..=n` label image (0 = background). Label order follows
/// row-major discovery order, which is what gives the matcher's
/// "previous-object order then appearance order" identity rule its
/// determinism downstream.
pub fn label_connected(binary: &Array2<bool>) -> Array2<u32> {
    let (nrows, ncols) = binary.dim();
    let mut uf = UnionFind::new(nrows * ncols);
    let idx = |r: usize, c: usize| r * ncols + c;

    for r in 0..nrows {
        for c in 0..ncols {
            if !binary[[r, c]] {
                continue;
            }
            if r + 1 < nrows && binary[[r + 1, c]] {
                uf.union(idx(r, c), idx(r + 1, c));
            }
            if c + 1 < ncols && binary[[r, c + 1]] {
                uf.union(idx(r, c), idx(r, c + 1));
            }
        }
    }

    let mut root_to_label: HashMap<usize, u32> = HashMap::new();
    let mut next_label = 1u32;
    let mut labels = Array2::from_elem((nrows, ncols), 0u32);
    for r in 0..nrows {
        for c in 0..ncols {
            if !binary[[r, c]] {
                continue;
            }
            let root = uf.find(idx(r, c));
            let label = *root_to_label.entry(root).or_insert_with(|| {
                let l = next_label;
                next_label += 1;
                l
            });
            labels[[r, c]] = label;
        }
    }
    labels
}

/// drops labels whose summed cell area falls below `min_area_km2` and
/// relabels the survivors `1..=n`, per `clear_small_area_objects`.
pub fn filter_by_min_area(mask: &ObjectMask, grid: &GridOptions, min_area_km2: f32) -> ObjectMask {
    let areas = cell_areas(grid);
    let labels = mask.labels();

    let mut area_by_label: HashMap<u32, f64> = HashMap::new();
    for ((r, c), &label) in labels.indexed_iter() {
        if label == 0 {
            continue;
        }
        *area_by_label.entry(label).or_insert(0.0) += areas[[r, c]] as f64;
    }

    let filtered = labels.mapv(|label| {
        if label == 0 {
            return 0;
        }
        if area_by_label.get(&label).copied().unwrap_or(0.0) >= min_area_km2 as f64 { label } else { 0 }
    });

    ObjectMask::from_labels(filtered).relabel_contiguous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn labels_diagonal_blobs_as_separate_components() {
        let binary = array![[true, false, true], [false, false, false], [true, false, true]];
        let labels = label_connected(&binary);
        let ids: std::collections::BTreeSet<u32> = labels.iter().copied().filter(|&l| l != 0).collect();
        assert_eq!(ids.len(), 4, "diagonal touches don't connect under 4-connectivity");
    }

    #[test]
    fn labels_an_l_shape_as_one_component() {
        let binary = array![[true, false], [true, true]];
        let labels = label_connected(&binary);
        assert_eq!(labels[[0, 0]], labels[[1, 0]]);
        assert_eq!(labels[[1, 0]], labels[[1, 1]]);
    }
}
