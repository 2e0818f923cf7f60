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

//! cost matrix construction, assignment, corrected-flow selection and
//! split/merge parent bookkeeping for one previous→next mask transition.
//! `parents` records genuine merges and splits only - a plain 1:1
//! continuation is not a parent relationship (spec §3: "parents" records
//! inheritance through splits/merges, not identity continuity).

use std::collections::HashMap;

use ndarray::Array2;
use tracing::warn;

use thuner_flow::margin_pixels;
use thuner_grid::object_mask::ObjectMask;
use thuner_grid::options::GridOptions;

use crate::cost::{candidates_in_box, object_geometries, overlap_fraction, pair_cost, search_box};
use crate::corrected_flow::select_corrected_flow;
use crate::errors::{MatchError, Result};
use crate::options::MatchOptions;
use crate::types::MatchResult;

/// matches `prev_mask`'s labeled objects onto `next_mask`'s: cost matrix
/// construction, assignment, corrected-flow selection and split/merge
/// parent bookkeeping in one pass. `local_flows`/`history` are keyed by previous
/// label; `global_flow` is shared unless the caller recomputed one per
/// object (`unique_global_flow=false`), in which case it should pass the
/// appropriate vector through a wrapper that calls this once per object.
pub fn match_masks(
    prev_mask: &ObjectMask,
    next_mask: &ObjectMask,
    grid: &GridOptions,
    local_flows: &HashMap<u32, (f64, f64)>,
    global_flow: (f64, f64),
    history: &HashMap<u32, (f64, f64)>,
    options: &MatchOptions,
) -> Result<MatchResult> {
    if prev_mask.shape() != next_mask.shape() {
        return Err(MatchError::ShapeMismatch { previous: prev_mask.shape(), next: next_mask.shape() });
    }

    let mut prev_labels = prev_mask.object_ids();
    let next_labels = next_mask.object_ids();

    let mut result = MatchResult::default();

    // empty previous mask: nothing to initialise beyond an empty record.
    if prev_labels.is_empty() {
        return Ok(result);
    }

    let prev_geoms = object_geometries(prev_mask, grid);
    let next_geoms = object_geometries(next_mask, grid);

    // empty next mask: every previous object dies, no further bookkeeping.
    if next_labels.is_empty() {
        for &p in &prev_labels {
            result.assignments.insert(p, None);
        }
        return Ok(result);
    }

    prev_labels.sort_unstable();
    let mut sorted_next_labels = next_labels.clone();
    sorted_next_labels.sort_unstable();

    let shape = prev_mask.shape();
    let mut corrected_flow_by_label: HashMap<u32, (f64, f64)> = HashMap::new();

    let n = prev_labels.len().max(sorted_next_labels.len());
    let mut cost_matrix = Array2::from_elem((n, n), options.max_cost);

    for (i, &p) in prev_labels.iter().enumerate() {
        let geom_p = match prev_geoms.get(&p) {
            Some(g) => g,
            None => continue,
        };
        let local = local_flows.get(&p).copied().unwrap_or((0.0, 0.0));
        let hist = history.get(&p).copied();
        let (corrected, case) = select_corrected_flow(local, global_flow, hist, options.policy, options.max_diff, options.max_diff_alt);
        corrected_flow_by_label.insert(p, corrected);
        result.corrected_flows.insert(p, corrected);
        result.cases.insert(p, case);

        let margin_px = margin_pixels(grid, options.search_margin_km, geom_p.center.0.round() as usize);
        let box_ = search_box(geom_p, corrected, (margin_px.0 as i64, margin_px.1 as i64), shape);
        let candidates = candidates_in_box(&next_geoms, box_);

        for q_label in candidates {
            if let Some(geom_q) = next_geoms.get(&q_label) {
                let j = sorted_next_labels.iter().position(|&l| l == q_label).expect("candidate label present in sorted list");
                cost_matrix[[i, j]] = pair_cost(grid, geom_p, geom_q);
            }
        }
    }

    let all_max_cost = cost_matrix.iter().all(|&c| (c - options.max_cost).abs() < 1e-12);
    if all_max_cost {
        warn!("degenerate cost matrix, falling back to all-no-match for this step");
        for &p in &prev_labels {
            result.assignments.insert(p, None);
        }
        return Ok(result);
    }

    let assignment = crate::assignment::solve(&cost_matrix);

    for (i, &p) in prev_labels.iter().enumerate() {
        let j = assignment[i];
        if j >= sorted_next_labels.len() {
            result.assignments.insert(p, None);
            continue;
        }
        let cost = cost_matrix[[i, j]];
        result.costs.insert(p, cost);
        // equality with max_cost is explicitly treated as a death
        if cost >= options.max_cost {
            result.assignments.insert(p, None);
        } else {
            let q_label = sorted_next_labels[j];
            result.assignments.insert(p, Some(q_label));
        }
    }

    // centre-to-centre displacement of every matched pair, keyed by the
    // *next* label - this becomes the following step's TINT/MINT
    // `history` term for that id once it is threaded back in by the
    // caller (the displacement persists forward, the label numbering
    // doesn't).
    for (&p, &assigned) in &result.assignments {
        if let Some(q) = assigned {
            if let (Some(geom_p), Some(geom_q)) = (prev_geoms.get(&p), next_geoms.get(&q)) {
                result.displacements.insert(q, (geom_q.center.0 - geom_p.center.0, geom_q.center.1 - geom_p.center.1));
            }
        }
    }

    // split/merge parent bookkeeping (spec step 5, §3 data model: parents
    // record merge/split inheritance, not identity continuity). Build the
    // previous/next mask overlap graph above `overlap_threshold`; record a
    // parent edge only where it reflects a genuine merge (the next object
    // has >=2 overlapping previous objects) or a genuine split (the
    // previous object overlaps >=2 next objects) - independent of which
    // pair the Hungarian solver happened to pick as the assigned match,
    // since a split's "surviving" branch is exactly as much a child of
    // the original object as the other branch. A 1:1 overlap edge with no
    // other edge on either side is a plain continuation and is not
    // recorded; identity propagation for that case reads `assignments`
    // directly (see `ObjectTracks::advance_identities`), not `parents`.
    let prev_labels_array = prev_mask.labels();
    let next_labels_array = next_mask.labels();

    let mut overlap_edges: Vec<(u32, u32)> = Vec::new();
    for &p in &prev_labels {
        for &q in &sorted_next_labels {
            if overlap_fraction(prev_labels_array, next_labels_array, p, q) > options.overlap_threshold {
                overlap_edges.push((p, q));
            }
        }
    }

    let mut out_degree: HashMap<u32, usize> = HashMap::new();
    let mut in_degree: HashMap<u32, usize> = HashMap::new();
    for &(p, q) in &overlap_edges {
        *out_degree.entry(p).or_insert(0) += 1;
        *in_degree.entry(q).or_insert(0) += 1;
    }

    for (p, q) in overlap_edges {
        if out_degree[&p] > 1 || in_degree[&q] > 1 {
            result.parents.entry(q).or_default().push(p);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use thuner_grid::options::CartesianGridOptions;

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
    fn stationary_object_matches_itself() {
        let mut labels = ndarray::Array2::from_elem((20, 20), 0u32);
        for r in 5..10 {
            for c in 5..10 {
                labels[[r, c]] = 1;
            }
        }
        let mask = ObjectMask::from_labels(labels);
        let grid = grid(20, 1000.0);
        let options = MatchOptions::default();

        let result = match_masks(&mask, &mask, &grid, &HashMap::new(), (0.0, 0.0), &HashMap::new(), &options).unwrap();
        assert_eq!(result.matched_next_label(1), Some(1));
        // a plain 1:1 continuation is not a parent relationship.
        assert!(result.parents.get(&1).is_none());
    }

    #[test]
    fn empty_next_mask_kills_all_previous_objects() {
        let mut prev_labels = ndarray::Array2::from_elem((10, 10), 0u32);
        prev_labels[[3, 3]] = 1;
        let prev = ObjectMask::from_labels(prev_labels);
        let next = ObjectMask::from_labels(ndarray::Array2::from_elem((10, 10), 0u32));
        let grid = grid(10, 1000.0);
        let options = MatchOptions::default();

        let result = match_masks(&prev, &next, &grid, &HashMap::new(), (0.0, 0.0), &HashMap::new(), &options).unwrap();
        assert_eq!(result.dead(), vec![1]);
    }

    #[test]
    fn merge_records_both_previous_objects_as_parents() {
        let prev_labels = array![[1, 1, 0, 2], [1, 1, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0]];
        let next_labels = array![[1, 1, 1, 1], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
        let prev = ObjectMask::from_labels(prev_labels);
        let next = ObjectMask::from_labels(next_labels);
        let grid = grid(4, 1000.0);
        let options = MatchOptions { overlap_threshold: 0.1, ..MatchOptions::default() };

        let result = match_masks(&prev, &next, &grid, &HashMap::new(), (0.0, 0.0), &HashMap::new(), &options).unwrap();
        let mut parents = result.parents.get(&1).cloned().unwrap_or_default();
        parents.sort_unstable();
        assert_eq!(parents, vec![1, 2]);
    }

    #[test]
    fn split_records_the_original_as_parent_of_both_resulting_objects() {
        // one previous blob, two disjoint next blobs each overlapping it.
        let prev_labels = array![[1, 1, 1, 1], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
        let next_labels = array![[1, 1, 0, 2], [1, 1, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0]];
        let prev = ObjectMask::from_labels(prev_labels);
        let next = ObjectMask::from_labels(next_labels);
        let grid = grid(4, 1000.0);
        let options = MatchOptions { overlap_threshold: 0.1, ..MatchOptions::default() };

        let result = match_masks(&prev, &next, &grid, &HashMap::new(), (0.0, 0.0), &HashMap::new(), &options).unwrap();
        // both resulting objects list the pre-split object as parent,
        // regardless of which one the Hungarian solver picked as the
        // nominal continuation.
        assert_eq!(result.parents.get(&1).cloned().unwrap_or_default(), vec![1]);
        assert_eq!(result.parents.get(&2).cloned().unwrap_or_default(), vec![1]);
    }

    #[test]
    fn matched_pair_displacement_is_centre_to_centre() {
        let mut prev_grid_labels = ndarray::Array2::from_elem((20, 20), 0u32);
        for r in 5..10 {
            for c in 5..10 {
                prev_grid_labels[[r, c]] = 1;
            }
        }
        let mut next_grid_labels = ndarray::Array2::from_elem((20, 20), 0u32);
        for r in 6..11 {
            for c in 7..12 {
                next_grid_labels[[r, c]] = 1;
            }
        }
        let prev = ObjectMask::from_labels(prev_grid_labels);
        let next = ObjectMask::from_labels(next_grid_labels);
        let grid = grid(20, 1000.0);
        let options = MatchOptions::default();

        let result = match_masks(&prev, &next, &grid, &HashMap::new(), (0.0, 0.0), &HashMap::new(), &options).unwrap();
        let (dr, dc) = result.displacements[&1];
        assert!((dr - 1.0).abs() < 1e-9);
        assert!((dc - 2.0).abs() < 1e-9);
    }
}
