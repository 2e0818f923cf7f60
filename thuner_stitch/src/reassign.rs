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

//! sequential id reassignment across intervals (spec.md §4.9 step 3-4):
//! each interval's own `1..=max_id` numbering is offset by the running
//! total of ids minted by every earlier interval, except where a
//! [`boundary_map`](crate::boundary::boundary_map) says an id in this
//! interval is really a continuation of one in the interval before it -
//! those keep the earlier interval's final id instead of taking a fresh
//! one. A final pass renumbers the union of ids actually used down to a
//! dense `1..=N`.

use std::collections::HashMap;

/// one interval's `local id -> final id` table, after dense renumbering.
pub type IntervalRemap = HashMap<u32, u32>;

/// `max_ids[i]` is the highest label interval `i` assigned (its own ids
/// are assumed dense `1..=max_ids[i]`, as every object type's identity
/// counter mints them). `boundary_maps[i]` is the linkage from interval
/// `i`'s last frame to interval `i+1`'s first frame (`None` when the two
/// intervals' boundary frames disagreed and no linkage could be drawn),
/// so `boundary_maps.len() == max_ids.len().saturating_sub(1)`.
pub fn reassign(max_ids: &[u32], boundary_maps: &[Option<HashMap<u32, u32>>]) -> Vec<IntervalRemap> {
    let n = max_ids.len();
    let mut pre_dense: Vec<HashMap<u32, u64>> = Vec::with_capacity(n);
    let mut offset: u64 = 0;

    for i in 0..n {
        // `id-of-(i+1) -> id-of-i` for the boundary immediately before this interval.
        let inverse: HashMap<u32, u32> = if i == 0 {
            HashMap::new()
        } else {
            boundary_maps
                .get(i - 1)
                .and_then(|m| m.as_ref())
                .map(|m| m.iter().map(|(&earlier, &later)| (later, earlier)).collect())
                .unwrap_or_default()
        };

        let mut map = HashMap::with_capacity(max_ids[i] as usize);
        for local_id in 1..=max_ids[i] {
            let final_id = match inverse.get(&local_id).and_then(|prev_local| pre_dense[i - 1].get(prev_local)) {
                Some(&inherited) => inherited,
                None => offset + local_id as u64,
            };
            map.insert(local_id, final_id);
        }
        pre_dense.push(map);
        offset += max_ids[i] as u64;
    }

    let mut distinct: Vec<u64> = pre_dense.iter().flat_map(|m| m.values().copied()).collect();
    distinct.sort_unstable();
    distinct.dedup();
    let dense: HashMap<u64, u32> = distinct.iter().enumerate().map(|(index, &v)| (v, (index + 1) as u32)).collect();

    pre_dense.into_iter().map(|m| m.into_iter().map(|(local, pre)| (local, dense[&pre])).collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_intervals_get_disjoint_offset_ranges() {
        let remap = reassign(&[2, 3], &[None]);
        let ids_0: std::collections::HashSet<u32> = remap[0].values().copied().collect();
        let ids_1: std::collections::HashSet<u32> = remap[1].values().copied().collect();
        assert!(ids_0.is_disjoint(&ids_1));
        let mut all: Vec<u32> = ids_0.union(&ids_1).copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn linked_object_keeps_the_earlier_intervals_final_id() {
        // interval 0 has 2 objects; interval 1's object 1 is a continuation of interval 0's object 2.
        let mut boundary = HashMap::new();
        boundary.insert(2, 1); // earlier-local 2 -> later-local 1
        let remap = reassign(&[2, 1], &[Some(boundary)]);
        assert_eq!(remap[1][&1], remap[0][&2]);
    }

    #[test]
    fn final_ids_are_dense() {
        let mut boundary = HashMap::new();
        boundary.insert(1, 1);
        let remap = reassign(&[1, 2], &[Some(boundary)]);
        let mut all: Vec<u32> = remap.iter().flat_map(|m| m.values().copied()).collect::<std::collections::HashSet<_>>().into_iter().collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2]); // id 1 is shared, new object in interval 1 gets id 2
    }
}
