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

use serde::{Deserialize, Serialize};

/// selects between the original TINT (Tracking and Identification of
/// conTinental convection) case table and the MINT (MCS Identification
/// and Nowcasting Tool) variant, which differs only in case 4's handling
/// of a local/global flow disagreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectedFlowPolicy {
    Tint,
    Mint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub policy: CorrectedFlowPolicy,
    /// margin (km) added around an object's bounding box to build its
    /// search box (after shifting by corrected flow).
    pub search_margin_km: f32,
    /// assignments costlier than this (km + sqrt(km²)) are treated as no
    /// match - equality with `max_cost` is explicitly treated as a death,
    /// not a borderline match.
    pub max_cost: f64,
    /// `shifts_disagree` threshold (pixels/second-scaled) comparing local
    /// flow against global flow / history.
    pub max_diff: f64,
    /// the MINT-only case-4 threshold comparing local flow against global
    /// flow when local and historical flow already disagree.
    pub max_diff_alt: f64,
    /// minimum fraction of a previous object's area that must overlap a
    /// next object's mask for the previous object to be recorded as a
    /// parent (split/merge detection).
    pub overlap_threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            policy: CorrectedFlowPolicy::Tint,
            search_margin_km: 10.0,
            max_cost: 10.0,
            max_diff: 4.0,
            max_diff_alt: 2.0,
            overlap_threshold: 0.5,
        }
    }
}
