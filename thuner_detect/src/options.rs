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

//! detection options, replacing the original's nested
//! `object_options["detection"][...]` dictionary with a typed enum over
//! the two detection methods (redesign note against string-keyed
//! dispatch dictionaries - compare `detecter_dispatcher` in
//! `original_source/thor/detect/detect.py`, which this crate's `detect`
//! function replaces with a `match`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectOptions {
    pub method: DetectionMethod,
    pub flatten: Option<Flatten>,
    /// minimum object area in km²; objects smaller than this are dropped
    /// and the mask relabeled contiguously (`clear_small_area_objects`).
    pub min_area_km2: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DetectionMethod {
    Threshold { threshold: f32 },
    Steiner(SteinerOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteinerOptions {
    #[serde(default = "default_radius_option")]
    pub radius_option: i32,
    #[serde(default)]
    pub delta_z_option: i32,
    #[serde(default = "default_background_radius_m")]
    pub background_radius_m: f64,
    #[serde(default = "default_dbz_threshold")]
    pub dbz_threshold: f32,
    #[serde(default = "default_true")]
    pub use_dbz_threshold: bool,
}

impl Default for SteinerOptions {
    fn default() -> Self {
        SteinerOptions {
            radius_option: default_radius_option(),
            delta_z_option: 0,
            background_radius_m: default_background_radius_m(),
            dbz_threshold: default_dbz_threshold(),
            use_dbz_threshold: true,
        }
    }
}

fn default_radius_option() -> i32 { 1 }
fn default_background_radius_m() -> f64 { 11_000.0 }
fn default_dbz_threshold() -> f32 { 42.0 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Flatten {
    VerticalMax { start_altitude: f32, end_altitude: f32 },
    CrossSection { altitude: f32 },
}
