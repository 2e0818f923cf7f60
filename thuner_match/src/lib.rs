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
#![allow(unused)]

//! the TINT/MINT matcher: cost matrix construction, linear-sum
//! assignment, corrected-flow selection, split/merge parent bookkeeping.

pub mod assignment;
pub mod corrected_flow;
pub mod cost;
pub mod errors;
pub mod matcher;
pub mod options;
pub mod types;

pub use errors::{MatchError, Result};
pub use matcher::match_masks;
pub use options::{CorrectedFlowPolicy, MatchOptions};
pub use types::{MatchCase, MatchResult, ObjectGeometry};
