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

//! an integer label image, label `0` meaning background. Labels are
//! contiguous within a single time step - the detector and grouper are
//! both responsible for maintaining that invariant on the masks they hand
//! off; `ObjectMask` itself only records and checks it.

use std::collections::BTreeSet;

use ndarray::Array2;

/// label `0` always means background.
pub const BACKGROUND: u32 = 0;

#[derive(Debug, Clone)]
pub struct ObjectMask {
    labels: Array2<u32>,
}

impl ObjectMask {
    pub fn from_labels(labels: Array2<u32>) -> Self { ObjectMask { labels } }

    pub fn shape(&self) -> (usize, usize) { self.labels.dim() }

    pub fn labels(&self) -> &Array2<u32> { &self.labels }

    pub fn get(&self, row: usize, col: usize) -> u32 { self.labels[[row, col]] }

    /// the distinct non-background labels present, in ascending order.
    pub fn object_ids(&self) -> Vec<u32> {
        self.labels.iter().copied().filter(|&l| l != BACKGROUND).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// `true` when the non-background labels are exactly `1..=n` for some
    /// `n`, i.e. contiguous with no gaps - the invariant the data model
    /// requires within a single time step.
    pub fn is_contiguous(&self) -> bool {
        let ids = self.object_ids();
        ids.iter().enumerate().all(|(i, &id)| id as usize == i + 1)
    }

    /// relabels so object ids are contiguous `1..=n`, preserving the
    /// relative order of the original labels. Used after filtering objects
    /// out (e.g. below minimum area) leaves gaps in the label sequence.
    pub fn relabel_contiguous(&self) -> ObjectMask {
        let ids = self.object_ids();
        let mut remap = vec![0u32; ids.iter().copied().max().unwrap_or(0) as usize + 1];
        for (new_id, &old_id) in ids.iter().enumerate() {
            remap[old_id as usize] = (new_id + 1) as u32;
        }
        let labels = self.labels.mapv(|l| if l == BACKGROUND { BACKGROUND } else { remap[l as usize] });
        ObjectMask { labels }
    }

    /// relabels through an arbitrary `old -> new` map, background always
    /// staying `0`. A label with no entry in `map` is dropped to
    /// background rather than panicking - used to relabel a per-step
    /// detector/grouper mask onto universal ids before it is persisted,
    /// where every present label is expected to have an entry but a
    /// caller mid-refactor may not have populated one yet.
    pub fn relabel_with(&self, map: &std::collections::HashMap<u32, u32>) -> ObjectMask {
        let labels = self.labels.mapv(|l| if l == BACKGROUND { BACKGROUND } else { map.get(&l).copied().unwrap_or(BACKGROUND) });
        ObjectMask { labels }
    }

    /// the row/col pixel coordinates belonging to the given label.
    pub fn pixels_of(&self, label: u32) -> Vec<(usize, usize)> {
        self.labels
            .indexed_iter()
            .filter_map(|((row, col), &l)| if l == label { Some((row, col)) } else { None })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn detects_gaps_in_label_sequence() {
        let mask = ObjectMask::from_labels(array![[0, 1, 1], [0, 3, 3], [0, 0, 0]]);
        assert!(!mask.is_contiguous());
        assert_eq!(mask.object_ids(), vec![1, 3]);
    }

    #[test]
    fn relabel_contiguous_closes_gaps_preserving_order() {
        let mask = ObjectMask::from_labels(array![[0, 1, 1], [0, 3, 3], [0, 0, 0]]);
        let relabeled = mask.relabel_contiguous();
        assert!(relabeled.is_contiguous());
        assert_eq!(relabeled.object_ids(), vec![1, 2]);
        assert_eq!(relabeled.get(0, 1), 1);
        assert_eq!(relabeled.get(1, 1), 2);
    }

    #[test]
    fn relabel_with_maps_through_and_drops_unmapped_to_background() {
        let mask = ObjectMask::from_labels(array![[1, 2], [0, 1]]);
        let mut map = std::collections::HashMap::new();
        map.insert(1, 101);
        map.insert(2, 102);
        let relabeled = mask.relabel_with(&map);
        assert_eq!(relabeled.get(0, 0), 101);
        assert_eq!(relabeled.get(0, 1), 102);
        assert_eq!(relabeled.get(1, 0), 0);
        assert_eq!(relabeled.get(1, 1), 101);

        let mask = ObjectMask::from_labels(array![[3, 0]]);
        assert_eq!(mask.relabel_with(&map).get(0, 0), 0);
    }

    #[test]
    fn pixels_of_returns_matching_coordinates() {
        let mask = ObjectMask::from_labels(array![[1, 1], [0, 2]]);
        assert_eq!(mask.pixels_of(1), vec![(0, 0), (0, 1)]);
        assert_eq!(mask.pixels_of(2), vec![(1, 1)]);
    }
}
