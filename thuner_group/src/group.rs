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

//! vertical overlap graph across ordered member bands, ported from
//! `original_source/thor/group/group.py::get_connected_components`. Labels
//! are relabeled into one global numbering (running-max offset per band),
//! edges join spatially-overlapping labels in adjacent bands, and
//! components are accepted only when they include at least one label
//! from every member band - the "span requirement".

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use petgraph::unionfind::UnionFind;

use thuner_grid::object_mask::ObjectMask;

use crate::errors::{GroupError, Result};

/// one multi-layer grouped-object mask: one relabeled mask per member,
/// in the same order the members were supplied.
#[derive(Debug, Clone)]
pub struct GroupedMask {
    pub member_masks: Vec<ObjectMask>,
}

impl GroupedMask {
    /// the distinct grouped-object ids present across all members.
    pub fn group_ids(&self) -> Vec<u32> {
        let mut ids: HashSet<u32> = HashSet::new();
        for mask in &self.member_masks {
            ids.extend(mask.object_ids());
        }
        let mut ids: Vec<u32> = ids.into_iter().collect();
        ids.sort_unstable();
        ids
    }
}

/// builds grouped objects from `members`, in ordered-altitude-band order.
pub fn group_members(members: &[ObjectMask]) -> Result<GroupedMask> {
    let n_bands = members.len();
    if n_bands == 0 {
        return Err(GroupError::NoMembers);
    }
    let shape = members[0].shape();
    for mask in &members[1..] {
        if mask.shape() != shape {
            return Err(GroupError::ShapeMismatch { first: shape, other: mask.shape() });
        }
    }

    // step 1: relabel each band's labels into one globally unique numbering.
    let mut offset = 0u32;
    let mut global_labels: Vec<Array2<u32>> = Vec::with_capacity(n_bands);
    let mut label_band: HashMap<u32, usize> = HashMap::new();
    let mut label_index: HashMap<u32, usize> = HashMap::new();

    for (band, mask) in members.iter().enumerate() {
        let shifted = mask.labels().mapv(|l| if l == 0 { 0 } else { l + offset });
        let mut max_label = offset;
        for l in mask.object_ids() {
            let global = l + offset;
            let index = label_index.len();
            label_band.insert(global, band);
            label_index.insert(global, index);
            max_label = max_label.max(global);
        }
        global_labels.push(shifted);
        offset = max_label;
    }

    // step 2: union labels of adjacent bands wherever their masks overlap.
    let mut uf = UnionFind::new(label_index.len().max(1));
    for i in 0..n_bands.saturating_sub(1) {
        let band_a = &global_labels[i];
        let band_b = &global_labels[i + 1];
        for ((row, col), &a) in band_a.indexed_iter() {
            if a == 0 {
                continue;
            }
            let b = band_b[[row, col]];
            if b == 0 {
                continue;
            }
            if let (Some(&ia), Some(&ib)) = (label_index.get(&a), label_index.get(&b)) {
                uf.union(ia, ib);
            }
        }
    }

    // step 3: group by connected component, keep only components spanning every band.
    let mut components: HashMap<usize, Vec<u32>> = HashMap::new();
    for (&label, &index) in &label_index {
        components.entry(uf.find(index)).or_default().push(label);
    }

    let mut accepted: Vec<Vec<u32>> = components
        .into_values()
        .filter(|labels| {
            let bands_present: HashSet<usize> = labels.iter().map(|l| label_band[l]).collect();
            bands_present.len() == n_bands
        })
        .collect();
    // deterministic numbering by the smallest (= earliest discovered) global label.
    accepted.sort_by_key(|labels| *labels.iter().min().unwrap());

    let mut label_to_group: HashMap<u32, u32> = HashMap::new();
    for (k, labels) in accepted.iter().enumerate() {
        for &l in labels {
            label_to_group.insert(l, (k + 1) as u32);
        }
    }

    let member_masks = global_labels
        .iter()
        .map(|band| ObjectMask::from_labels(band.mapv(|l| label_to_group.get(&l).copied().unwrap_or(0))))
        .collect();

    Ok(GroupedMask { member_masks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn two_overlapping_bands_form_one_group() {
        let low = ObjectMask::from_labels(array![[1, 1, 0], [0, 0, 0], [0, 0, 2]]);
        let high = ObjectMask::from_labels(array![[1, 0, 0], [0, 0, 0], [0, 0, 1]]);
        let grouped = group_members(&[low, high]).unwrap();
        assert_eq!(grouped.group_ids().len(), 2);
        assert_eq!(grouped.member_masks[0].get(0, 0), grouped.member_masks[1].get(0, 0));
    }

    #[test]
    fn span_requirement_rejects_components_missing_a_band() {
        // labels overlap between bands 0 and 1 at (0,0), but nothing in band 2 overlaps them.
        let band0 = ObjectMask::from_labels(array![[1, 0], [0, 0]]);
        let band1 = ObjectMask::from_labels(array![[1, 0], [0, 0]]);
        let band2 = ObjectMask::from_labels(array![[0, 0], [0, 1]]);
        let grouped = group_members(&[band0, band1, band2]).unwrap();
        assert!(grouped.group_ids().is_empty(), "component spans only 2 of 3 bands, should be rejected");
    }

    #[test]
    fn no_overlap_produces_no_groups() {
        let band0 = ObjectMask::from_labels(array![[1, 0], [0, 0]]);
        let band1 = ObjectMask::from_labels(array![[0, 0], [0, 1]]);
        let grouped = group_members(&[band0, band1]).unwrap();
        assert!(grouped.group_ids().is_empty());
    }
}
