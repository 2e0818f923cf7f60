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

pub mod errors;
pub mod field_grid;
pub mod geometry;
pub mod object_mask;
pub mod options;

pub use errors::{GridError, Result};
pub use field_grid::{DomainMasks, FieldGrid};
pub use geometry::{center_distance_km, pixel_to_lonlat};
pub use object_mask::ObjectMask;
pub use options::{CartesianGridOptions, GeographicGridOptions, GridOptions};
