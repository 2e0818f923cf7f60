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

//! object geometry extraction and cost-matrix construction, ported from
//! `original_source/thor/match/tint.py::get_costs_matrix`/`get_costs`.

use std::collections::HashMap;

use ndarray::Array2;

use thuner_grid::geometry::{cell_areas, center_distance_km};
use thuner_grid::object_mask::ObjectMask;
use thuner_grid::options::GridOptions;

use crate::types::ObjectGeometry;

/// computes bounding box, area-weighted centroid and km² area for every
/// labeled object in `mask`.
pub fn object_geometries(mask: &ObjectMask, grid: &GridOptions) -> HashMap<u32, ObjectGeometry> {
    let areas = cell_areas(grid);
    let labels = mask.labels();

    struct Acc {
        sum_row: f64,
        sum_col: f64,
        sum_area: f64,
        count: f64,
        row_min: usize,
        row_max: usize,
        col_min: usize,
        col_max: usize,
    }

    let mut acc: HashMap<u32, Acc> = HashMap::new();
    for ((row, col), &label) in labels.indexed_iter() {
        if label == 0 {
            continue;
        }
        let cell_area = areas[[row, col]] as f64;
        let entry = acc.entry(label).or_insert(Acc {
            sum_row: 0.0,
            sum_col: 0.0,
            sum_area: 0.0,
            count: 0.0,
            row_min: row,
            row_max: row,
            col_min: col,
            col_max: col,
        });
        entry.sum_row += row as f64 * cell_area;
        entry.sum_col += col as f64 * cell_area;
        entry.sum_area += cell_area;
        entry.count += 1.0;
        entry.row_min = entry.row_min.min(row);
        entry.row_max = entry.row_max.max(row);
        entry.col_min = entry.col_min.min(col);
        entry.col_max = entry.col_max.max(col);
    }

    acc.into_iter()
        .map(|(label, a)| {
            let center = if a.sum_area > 0.0 { (a.sum_row / a.sum_area, a.sum_col / a.sum_area) } else { (0.0, 0.0) };
            (label, ObjectGeometry { label, center, bbox: (a.row_min, a.row_max, a.col_min, a.col_max), area_km2: a.sum_area })
        })
        .collect()
}

/// `d = geodesic_distance(center_p,center_q)/1000; cost = d +
/// sqrt(|area_q - area_p|)`.
pub fn pair_cost(grid: &GridOptions, p: &ObjectGeometry, q: &ObjectGeometry) -> f64 {
    let distance_km = center_distance_km(grid, p.center, q.center);
    distance_km + (q.area_km2 - p.area_km2).abs().sqrt()
}

/// a shifted search box: `p`'s bounding box expanded by `search_margin_km`
/// and translated by the corrected flow `(delta_row,delta_col)`, clipped
/// to the frame.
pub fn search_box(
    p: &ObjectGeometry,
    flow: (f64, f64),
    margin_px: (i64, i64),
    shape: (usize, usize),
) -> (i64, i64, i64, i64) {
    let (row_min, row_max, col_min, col_max) = p.bbox;
    let row0 = row_min as i64 - margin_px.0 + flow.0.round() as i64;
    let row1 = row_max as i64 + margin_px.0 + flow.0.round() as i64;
    let col0 = col_min as i64 - margin_px.1 + flow.1.round() as i64;
    let col1 = col_max as i64 + margin_px.1 + flow.1.round() as i64;
    (row0.clamp(0, shape.0 as i64 - 1), row1.clamp(0, shape.0 as i64 - 1), col0.clamp(0, shape.1 as i64 - 1), col1.clamp(0, shape.1 as i64 - 1))
}

/// next-mask labels whose bounding box intersects the search box.
pub fn candidates_in_box(next_geometries: &HashMap<u32, ObjectGeometry>, box_: (i64, i64, i64, i64)) -> Vec<u32> {
    let (row0, row1, col0, col1) = box_;
    next_geometries
        .values()
        .filter(|q| {
            let (qr0, qr1, qc0, qc1) = (q.bbox.0 as i64, q.bbox.1 as i64, q.bbox.2 as i64, q.bbox.3 as i64);
            qr0 <= row1 && qr1 >= row0 && qc0 <= col1 && qc1 >= col0
        })
        .map(|q| q.label)
        .collect()
}

/// fraction of `p`'s pixels that fall on `q`'s labeled region in the next
/// mask - the split/merge overlap test.
pub fn overlap_fraction(prev_mask: &Array2<u32>, next_mask: &Array2<u32>, prev_label: u32, next_label: u32) -> f64 {
    let mut overlap = 0usize;
    let mut total = 0usize;
    for ((row, col), &pl) in prev_mask.indexed_iter() {
        if pl != prev_label {
            continue;
        }
        total += 1;
        if next_mask[[row, col]] == next_label {
            overlap += 1;
        }
    }
    if total == 0 { 0.0 } else { overlap as f64 / total as f64 }
}
