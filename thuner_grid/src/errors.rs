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

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("{coord_name} must be strictly monotonic")]
    NotMonotonic { coord_name: &'static str },

    #[error("{spacing_name} ({spacing}) does not match actual {coord_name} spacing ({actual})")]
    SpacingMismatch { coord_name: &'static str, spacing_name: &'static str, spacing: f64, actual: f64 },

    #[error("{coord_name} is not evenly spaced, cannot validate against {spacing_name}")]
    UnevenSpacing { coord_name: &'static str, spacing_name: &'static str },

    #[error("grid shape {shape:?} does not match coordinate lengths ({rows}, {cols})")]
    ShapeMismatch { shape: (usize, usize), rows: usize, cols: usize },

    #[error("central_latitude and central_longitude must be set for a cartesian grid")]
    MissingCentralPoint,

    #[error("no points found within the requested latitude/longitude bounds")]
    EmptyBoundsSubset,

    #[error("dataset must have latitude and longitude coordinates of matching shape")]
    MissingCoordinates,
}
