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

//! linking one interval's last tracked frame to the next interval's first
//! tracked frame (the shared overlap time both interval workers tracked
//! independently), per spec.md §4.9 step 2.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;

/// `true` when the non-background footprint of `last` and `first` is
/// pixel-for-pixel identical - the precondition for drawing any id
/// linkage across this boundary at all.
pub fn regions_match(last: &Array2<u32>, first: &Array2<u32>) -> bool {
    last.dim() == first.dim() && last.iter().zip(first.iter()).all(|(&a, &b)| (a != 0) == (b != 0))
}

/// builds the `id-of-last -> id-of-first` correspondence at one interval
/// boundary. Returns `None` when the binary regions disagree (no
/// linkage is drawn at all, per §4.9 step 2's "otherwise leave empty").
/// When the regions do agree, a label is included in the returned map
/// only if every pixel it covers in `last` maps to exactly one label in
/// `first`, and vice versa - the "each source label maps to exactly one
/// destination label and vice versa" requirement. A label on one side
/// whose footprint spans more than one label on the other (the two
/// intervals disagreed about a split/merge exactly at the boundary) is
/// left unmapped rather than guessed at.
pub fn boundary_map(last: &Array2<u32>, first: &Array2<u32>) -> Option<HashMap<u32, u32>> {
    if !regions_match(last, first) {
        return None;
    }

    let mut forward: HashMap<u32, HashSet<u32>> = HashMap::new();
    let mut backward: HashMap<u32, HashSet<u32>> = HashMap::new();
    for (&a, &b) in last.iter().zip(first.iter()) {
        if a == 0 {
            continue;
        }
        forward.entry(a).or_default().insert(b);
        backward.entry(b).or_default().insert(a);
    }

    let mut map = HashMap::new();
    for (&a, bs) in &forward {
        if bs.len() != 1 {
            continue;
        }
        let b = *bs.iter().next().unwrap();
        if backward.get(&b).map(HashSet::len) == Some(1) {
            map.insert(a, b);
        }
    }
    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn identical_frames_map_every_label_to_itself() {
        let last = array![[1u32, 0], [0, 2]];
        let first = array![[1u32, 0], [0, 2]];
        let map = boundary_map(&last, &first).unwrap();
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.get(&2), Some(&2));
    }

    #[test]
    fn renumbered_but_identical_regions_still_link() {
        // same footprint, but the second interval's own counter assigned
        // different label values to the same objects.
        let last = array![[1u32, 0], [0, 2]];
        let first = array![[7u32, 0], [0, 9]];
        let map = boundary_map(&last, &first).unwrap();
        assert_eq!(map.get(&1), Some(&7));
        assert_eq!(map.get(&2), Some(&9));
    }

    #[test]
    fn disagreeing_regions_draw_no_linkage() {
        let last = array![[1u32, 0], [0, 0]];
        let first = array![[0u32, 0], [0, 1]];
        assert!(boundary_map(&last, &first).is_none());
    }

    #[test]
    fn non_bijective_label_is_left_unmapped() {
        // label 1 in `last` covers pixels that are split into labels 7
        // and 8 in `first` - not a clean one-to-one correspondence.
        let last = array![[1u32, 1], [0, 0]];
        let first = array![[7u32, 8], [0, 0]];
        let map = boundary_map(&last, &first).unwrap();
        assert!(map.get(&1).is_none());
    }
}
