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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DetectError>;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("cross_section altitude {requested} not present in grid altitudes")]
    UnknownAltitude { requested: f32 },

    #[error("vertical_max range [{start},{end}] contains no altitude levels")]
    EmptyAltitudeRange { start: f32, end: f32 },

    #[error("min_area must be positive, got {0}")]
    InvalidMinArea(f32),

    #[error("field and grid shapes disagree: field {field:?}, grid {grid:?}")]
    ShapeMismatch { field: (usize, usize), grid: (usize, usize) },
}
