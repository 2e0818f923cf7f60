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

//! stitches a run's independently-tracked `interval_<i>/` subtrees into
//! one continuous set of masks and attribute tables, per spec.md §4.9.
//! A long dataset is tracked in bounded, overlapping intervals so that
//! memory stays flat regardless of run length; this crate is the pass
//! that runs once at the end and removes the seams, giving every object
//! a single identity and a single mask/attribute history across the
//! whole run.

pub mod attributes;
pub mod boundary;
pub mod errors;
pub mod mask_io;
pub mod masks;
pub mod reassign;
pub mod stitch;

pub use attributes::AttributeSchema;
pub use errors::{Result, StitchError};
pub use reassign::IntervalRemap;
pub use stitch::{stitch_run, StitchOptions, StitchReport, StitchedObject};
