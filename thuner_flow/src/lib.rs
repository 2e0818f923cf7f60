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

//! phase-correlation-based optical flow over a bounding box with margin,
//! plus a whole-frame global flow estimate.

pub mod errors;
pub mod flow;
pub mod options;
pub mod phase_correlation;

pub use errors::{FlowError, Result};
pub use flow::{global_flow, local_flow, margin_pixels, PixelBox};
pub use options::FlowOptions;
pub use phase_correlation::phase_correlate;
