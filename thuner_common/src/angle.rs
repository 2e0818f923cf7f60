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

//! angle normalization helpers and latitude/longitude newtypes, following the
//! odin-rs convention of wrapping raw degree values so callers cannot
//! accidentally mix unnormalized angles or swap lat/lon order.

use std::fmt;

#[inline]
pub fn normalize_90(d: f64) -> f64 {
    let x = d % 360.0;
    if x < -90.0 { -180.0 - x } else if x > 90.0 { 180.0 - x } else { x }
}

#[inline]
pub fn normalize_180(d: f64) -> f64 {
    let x = d % 360.0;
    if x < -180.0 { 360.0 + x } else if x > 180.0 { x - 360.0 } else { x }
}

/// normalizes an angle in degrees into `[0,360)`, used for the longitude
/// convention the grid/geometry module documents ("longitudes normalised to
/// `[0,360)`").
#[inline]
pub fn normalize_360(d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latitude(f64);

impl Latitude {
    pub fn from_degrees(d: f64) -> Self { Latitude(normalize_90(d)) }
    pub fn degrees(&self) -> f64 { self.0 }
    pub fn radians(&self) -> f64 { self.0.to_radians() }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", self.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Longitude(f64);

impl Longitude {
    pub fn from_degrees(d: f64) -> Self { Longitude(normalize_180(d)) }
    pub fn degrees(&self) -> f64 { self.0 }
    pub fn radians(&self) -> f64 { self.0.to_radians() }
    /// the `[0,360)` convention used internally by the geodesic routines.
    pub fn degrees_360(&self) -> f64 { normalize_360(self.0) }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", self.0) }
}

/// a full-circle bearing/orientation in `[0,360)` degrees, used for flow and
/// displacement directions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle360(f64);

impl Angle360 {
    pub fn from_degrees(d: f64) -> Self { Angle360(normalize_360(d)) }
    pub fn degrees(&self) -> f64 { self.0 }
    pub fn radians(&self) -> f64 { self.0.to_radians() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_longitude_wraparound() {
        assert!((normalize_180(190.0) - (-170.0)).abs() < 1e-9);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-9);
    }

    #[test]
    fn latitude_clamps_into_valid_range() {
        let lat = Latitude::from_degrees(95.0);
        assert!((lat.degrees() - 85.0).abs() < 1e-9);
    }
}
