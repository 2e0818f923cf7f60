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

//! angular classification of one vector relative to another, generalized
//! from `original_source/thor/analyze/mcs.py`'s `get_angle`/`classify`
//! pair (there specialized to four MCS-specific quadrant schemes -
//! stratiform offset, inflow, tilt, propagation) to an arbitrary number
//! of equal angular sectors labeled by the caller, so the same routine
//! serves any `angle -> compass label` classification spec.md §2 item 10
//! asks for (e.g. eight-octant system propagation direction).

use std::f64::consts::PI;

/// signed angle in `(-π, π]` from vector 1 to vector 2, matching
/// `get_angle`'s "second vector direction minus first vector direction".
pub fn angle_between(u1: f64, v1: f64, u2: f64, v2: f64) -> f64 {
    let angle_1 = v1.atan2(u1);
    let angle_2 = v2.atan2(u2);
    let wrapped = (angle_2 - angle_1 + PI).rem_euclid(2.0 * PI) - PI;
    wrapped
}

/// the label of the sector `angle` (as returned by [`angle_between`])
/// falls in, out of `labels.len()` equal sectors centered on `labels[0]`
/// at angle `0` and proceeding counterclockwise - e.g. 4 labels
/// `["front", "right", "back", "left"]` reproduces the original's
/// quadrant scheme; 8 labels give octant resolution. Panics if `labels`
/// is empty.
pub fn classify<'a>(angle: f64, labels: &'a [String]) -> &'a str {
    let n = labels.len();
    assert!(n > 0, "classify requires at least one label");
    let sector_width = 2.0 * PI / n as f64;
    // shift so sector 0 spans (-width/2, width/2], matching the
    // original's `-pi/4 < angle <= pi/4` front sector for n = 4.
    let shifted = (angle + sector_width / 2.0).rem_euclid(2.0 * PI);
    let index = (shifted / sector_width).floor() as usize % n;
    &labels[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant_labels() -> Vec<String> {
        vec!["front".into(), "right".into(), "back".into(), "left".into()]
    }

    #[test]
    fn zero_angle_is_front() {
        assert_eq!(classify(0.0, &quadrant_labels()), "front");
    }

    #[test]
    fn right_angle_quadrants() {
        assert_eq!(classify(PI / 2.0, &quadrant_labels()), "right");
        assert_eq!(classify(PI, &quadrant_labels()), "back");
        assert_eq!(classify(-PI / 2.0, &quadrant_labels()), "left");
    }

    #[test]
    fn eight_octants_are_distinct() {
        let labels: Vec<String> = ["n", "ne", "e", "se", "s", "sw", "w", "nw"].iter().map(|s| s.to_string()).collect();
        let mut seen = std::collections::HashSet::new();
        for i in 0..8 {
            let angle = i as f64 * PI / 4.0;
            seen.insert(classify(angle, &labels).to_string());
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn angle_between_identical_vectors_is_zero() {
        assert!(angle_between(1.0, 0.0, 1.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn angle_between_perpendicular_vectors() {
        assert!((angle_between(1.0, 0.0, 0.0, 1.0) - PI / 2.0).abs() < 1e-12);
    }
}
