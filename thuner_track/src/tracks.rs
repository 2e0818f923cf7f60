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

//! `ObjectTracks`: the per-object-type state `original_source/thuner/track.py`
//! keeps in its `ObjectTracks` dataclass, restated as an arena-with-indices
//! value rather than a bag of parallel `deque`s living on a loosely typed
//! object. One `ObjectTracks` exists per tracked object type for the
//! lifetime of a tracking interval.

use std::collections::HashMap;

use thuner_attr::AttributeTable;
use thuner_common::datetime::EpochSeconds;
use thuner_common::history::History;
use thuner_grid::field_grid::FieldGrid;
use thuner_grid::object_mask::ObjectMask;
use thuner_group::GroupedMask;
use thuner_match::MatchResult;

use crate::identity::IdentityCounter;
use crate::options::{ObjectMethod, ObjectOptions};

/// the mask produced for one object type at one time step: a plain
/// labeled image for a detected object, or the full set of member masks
/// for a grouped one. The matcher always operates on a plain
/// [`ObjectMask`] - [`TrackedMask::matching_mask`] picks out which one.
#[derive(Debug, Clone)]
pub enum TrackedMask {
    Detected(ObjectMask),
    Grouped(GroupedMask),
}

impl TrackedMask {
    pub fn matching_mask(&self, options: &ObjectOptions) -> Option<&ObjectMask> {
        match (self, &options.method) {
            (TrackedMask::Detected(mask), ObjectMethod::Detect(_)) => Some(mask),
            (TrackedMask::Grouped(grouped), ObjectMethod::Group(group_options)) => {
                group_options.matched_object_index().and_then(|index| grouped.member_masks.get(index))
            }
            _ => None,
        }
    }
}

pub struct ObjectTracks {
    pub options: ObjectOptions,
    pub identity: IdentityCounter,
    pub grids: History<FieldGrid>,
    pub times: History<EpochSeconds>,
    pub masks: History<TrackedMask>,
    pub match_records: History<MatchResult>,
    /// the current step's `label -> universal_id` map; replaced wholesale
    /// by [`advance_identities`](Self::advance_identities) every step.
    pub label_to_universal_id: HashMap<u32, u64>,
    /// keyed by `member/type_name` for a grouped object's per-member
    /// tables, or just `type_name` otherwise.
    pub attribute_tables: HashMap<String, AttributeTable>,
    pub last_write_time: Option<EpochSeconds>,
}

fn table_key(attribute_type_name: &str, member: Option<&str>) -> String {
    match member {
        Some(member) => format!("{member}/{attribute_type_name}"),
        None => attribute_type_name.to_string(),
    }
}

impl ObjectTracks {
    pub fn new(options: ObjectOptions) -> Self {
        let deque_length = options.deque_length;
        let mut attribute_tables = HashMap::new();
        for attribute_type in &options.attribute_types {
            let key = table_key(&attribute_type.name, attribute_type.member.as_deref());
            attribute_tables.insert(key, AttributeTable::new(attribute_type.clone()));
        }
        ObjectTracks {
            options,
            identity: IdentityCounter::new(),
            grids: History::new(deque_length),
            times: History::new(deque_length),
            masks: History::new(deque_length),
            match_records: History::new(deque_length.max(1)),
            label_to_universal_id: HashMap::new(),
            attribute_tables,
            last_write_time: None,
        }
    }

    /// assigns a universal id to every label in the newly produced mask,
    /// per spec §4.6 step 6: propagate from `match_result.assignments`
    /// (the Hungarian-assigned pair), not from `parents` - `parents` only
    /// records merge/split inheritance (§3 data model) and is empty for a
    /// plain continuation, so deriving identity from it would mint a
    /// fresh id for every object that isn't part of a merge or split.
    /// When more than one previous object is assigned to the same next
    /// label (a merge with a degenerate/non-injective assignment), the
    /// numerically smallest previous label's id survives, for a
    /// deterministic choice. A next label with no assigned predecessor at
    /// all is a birth and mints a fresh id. Returns the new
    /// `label -> universal_id` map and also replaces
    /// `self.label_to_universal_id` with it.
    pub fn advance_identities(&mut self, match_result: &MatchResult, next_labels: &[u32]) -> HashMap<u32, u64> {
        let mut assigned_by_next: HashMap<u32, u32> = HashMap::new();
        for (&prev_label, &next_label) in &match_result.assignments {
            if let Some(next_label) = next_label {
                assigned_by_next
                    .entry(next_label)
                    .and_modify(|existing| *existing = (*existing).min(prev_label))
                    .or_insert(prev_label);
            }
        }

        let mut next_map = HashMap::with_capacity(next_labels.len());
        for &next_label in next_labels {
            let universal_id = match assigned_by_next.get(&next_label) {
                Some(&parent_label) => self.label_to_universal_id.get(&parent_label).copied().unwrap_or_else(|| self.identity.next()),
                None => self.identity.next(),
            };
            next_map.insert(next_label, universal_id);
        }
        self.label_to_universal_id = next_map.clone();
        next_map
    }

    /// `true` once `current_time` is far enough past the last flush that
    /// this step should write attributes and clear the in-memory tables,
    /// per `write_interval_reached` in the original track loop.
    pub fn write_interval_reached(&self, current_time: EpochSeconds) -> bool {
        match self.last_write_time {
            None => true,
            Some(last) => current_time.interval_since(last) >= (self.options.write_interval_minutes as f64) * 60.0,
        }
    }

    pub fn attribute_table_mut(&mut self, attribute_type_name: &str, member: Option<&str>) -> Option<&mut AttributeTable> {
        self.attribute_tables.get_mut(&table_key(attribute_type_name, member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use thuner_detect::{DetectOptions, DetectionMethod};
    use thuner_flow::FlowOptions;
    use thuner_match::MatchOptions;
    use crate::options::MaskOptions;

    fn minimal_options(name: &str) -> ObjectOptions {
        ObjectOptions {
            name: name.to_string(),
            hierarchy_level: 0,
            dataset: "radar".to_string(),
            deque_length: 3,
            mask_options: MaskOptions::default(),
            write_interval_minutes: 60,
            allowed_gap_minutes: 30,
            attribute_types: vec![],
            method: ObjectMethod::Detect(DetectOptions { method: DetectionMethod::Threshold { threshold: 40.0 }, flatten: None, min_area_km2: None }),
            tracking: Some(MatchOptions::default()),
            flow: FlowOptions::default(),
        }
    }

    #[test]
    fn births_mint_fresh_ids_and_continuations_inherit_the_assigned_predecessor_id() {
        let mut tracks = ObjectTracks::new(minimal_options("cell"));
        // first step: no assignments at all (nothing to propagate from) - a birth.
        let first = tracks.advance_identities(&MatchResult::default(), &[1]);
        let id1 = first[&1];

        // second step: label 1 is Hungarian-assigned to itself, with no
        // parents entry at all (a plain continuation never gets one).
        let mut second_match = MatchResult::default();
        second_match.assignments.insert(1, Some(1));
        let second = tracks.advance_identities(&second_match, &[1]);
        assert_eq!(second[&1], id1);
    }

    #[test]
    fn unrelated_label_gets_a_new_id() {
        let mut tracks = ObjectTracks::new(minimal_options("cell"));
        let mut first_match = MatchResult::default();
        first_match.assignments.insert(1, None);
        let first = tracks.advance_identities(&first_match, &[1]);

        let mut second_match = MatchResult::default();
        // label 2 has no assigned predecessor at all: a birth, not a continuation.
        second_match.assignments.insert(1, None);
        let second = tracks.advance_identities(&second_match, &[2]);
        assert_ne!(second[&2], first[&1]);
    }

    #[test]
    fn merge_inherits_the_smaller_previous_label_deterministically() {
        let mut tracks = ObjectTracks::new(minimal_options("cell"));
        let first = tracks.advance_identities(&MatchResult::default(), &[1, 2]);
        let id1 = first[&1];

        let mut merge_match = MatchResult::default();
        merge_match.assignments.insert(1, Some(1));
        merge_match.assignments.insert(2, Some(1));
        merge_match.parents.insert(1, vec![1, 2]);
        let merged = tracks.advance_identities(&merge_match, &[1]);
        assert_eq!(merged[&1], id1);
    }

    #[test]
    fn write_interval_reached_is_true_before_first_flush() {
        let tracks = ObjectTracks::new(minimal_options("cell"));
        assert!(tracks.write_interval_reached(EpochSeconds::new(0)));
    }

    #[test]
    fn matching_mask_for_detected_object_is_itself() {
        let mask = ObjectMask::from_labels(array![[1, 0], [0, 0]]);
        let tracked = TrackedMask::Detected(mask);
        let options = minimal_options("cell");
        assert!(tracked.matching_mask(&options).is_some());
    }
}
