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

use std::collections::HashMap;

/// the TINT/MINT corrected-flow case table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    /// no history, local and global flow disagree: `f* = global`.
    NoHistoryDisagree = 0,
    /// no history, local and global flow agree: `f* = (local+global)/2`.
    NoHistoryAgree = 1,
    /// history present, everything disagrees: `f* = history`.
    AllDisagree = 2,
    /// history present, local/history disagree but local/global agree: `f* = local`.
    HistoryDisagreesLocalAgreesGlobal = 3,
    /// history present, local/history agree: `f* = (local+history)/2`
    /// (TINT), or the MINT local/global tie-break.
    HistoryAgrees = 4,
}

/// per-pixel-mask geometry of one labeled object, used to build the cost
/// matrix and to express displacements/areas in physical units.
#[derive(Debug, Clone, Copy)]
pub struct ObjectGeometry {
    pub label: u32,
    /// area-weighted pixel centroid `(row,col)`, generally non-integer.
    pub center: (f64, f64),
    /// inclusive pixel bounding box `(row_min,row_max,col_min,col_max)`.
    pub bbox: (usize, usize, usize, usize),
    pub area_km2: f64,
}

/// the full per-step "match_record" bookkeeping: assignment outcome,
/// costs, corrected flows, cases and parent lists for
/// one previous→next mask transition. Universal-id bookkeeping is layered
/// on top of this by `thuner_track`, which is the only place that knows
/// about identity persistence across steps.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// `prev_label -> Some(next_label)` for matched pairs, `None` for
    /// previous objects with no forward match (death).
    pub assignments: HashMap<u32, Option<u32>>,
    pub costs: HashMap<u32, f64>,
    /// corrected flow vector `(delta_row,delta_col)` chosen for each
    /// previous object, regardless of whether it was ultimately matched.
    pub corrected_flows: HashMap<u32, (f64, f64)>,
    pub cases: HashMap<u32, MatchCase>,
    /// `next_label -> [prev_label, ...]`: overlap edges (above
    /// `overlap_threshold`) that are part of a genuine merge (next object
    /// overlaps >=2 previous objects) or split (previous object overlaps
    /// >=2 next objects). A 1:1 overlap edge with no other edge on either
    /// side is a plain continuation and is never recorded here.
    pub parents: HashMap<u32, Vec<u32>>,
    /// `next_label -> (delta_row, delta_col)`: the centre-to-centre pixel
    /// displacement of the matched pair that produced this next-step
    /// label. The caller persists this (scaled by the interval-length
    /// ratio) as the following step's TINT/MINT `history` term for the
    /// object once it propagates forward under this label.
    pub displacements: HashMap<u32, (f64, f64)>,
    /// the time interval, in seconds, this match spanned - carried so the
    /// next step can scale `displacements` by the ratio of its own
    /// interval to this one before using it as `history`.
    pub interval_seconds: Option<f64>,
}

impl MatchResult {
    pub fn matched_next_label(&self, prev_label: u32) -> Option<u32> {
        self.assignments.get(&prev_label).copied().flatten()
    }

    /// previous labels with no forward match at all.
    pub fn dead(&self) -> Vec<u32> {
        self.assignments.iter().filter(|(_, next)| next.is_none()).map(|(prev, _)| *prev).collect()
    }
}
