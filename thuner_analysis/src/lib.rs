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

//! post-run analysis: temporal smoothing of flow velocities, quality
//! control against domain containment and minimum lifetime, and angular
//! classification of a system's direction relative to another vector.
//! Runs once, after tracking (and, for a multi-interval run, stitching)
//! have produced a run's `masks/`/`attributes/` tree.

pub mod classify;
pub mod errors;
pub mod options;
pub mod quality;
pub mod run;
pub mod smooth;
pub mod table;

pub use classify::{angle_between, classify};
pub use errors::{AnalysisError, Result};
pub use options::AnalysisOptions;
pub use quality::QualityOptions;
pub use run::{analyze_run, AnalysisReport};
pub use table::Table;
