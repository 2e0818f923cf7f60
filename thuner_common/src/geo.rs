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

//! support for geometries on the WGS84 ellipsoid surface. Following
//! odin-rs design principles we use the [geo](https://docs.rs/geo) crate's
//! `Geodesic` metric space rather than hand-rolling ellipsoidal
//! trigonometry, and wrap it behind the [`Latitude`]/[`Longitude`] newtypes
//! so callers keep the ordering and units straight.

use geo::{Distance, Point};
use geo::algorithm::line_measures::metric_spaces::Geodesic;
use geo::algorithm::line_measures::Bearing;

use crate::angle::{Latitude, Longitude};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint(Point<f64>);

impl GeoPoint {
    pub fn from_lon_lat_degrees(lon: f64, lat: f64) -> Self {
        GeoPoint(Point::new(Longitude::from_degrees(lon).degrees(), Latitude::from_degrees(lat).degrees()))
    }

    pub fn longitude(&self) -> Longitude { Longitude::from_degrees(self.0.x()) }
    pub fn latitude(&self) -> Latitude { Latitude::from_degrees(self.0.y()) }
    pub fn point(&self) -> Point<f64> { self.0 }
}

/// great-circle distance on WGS84, in metres. Vectorised callers (the
/// matcher's cost-matrix construction, the cell-area grid) call this per
/// pair; there is no batched FFI boundary to amortise here, unlike the
/// original's `numpy.vectorize` wrapper around `pyproj.Geod.inv`.
pub fn geodesic_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let a = Point::new(lon1, lat1);
    let b = Point::new(lon2, lat2);
    Geodesic::distance(a, b)
}

/// direct (forward) geodesic problem: given an origin, azimuth (degrees
/// clockwise from north) and distance (metres), return the destination
/// (lon,lat) in degrees.
pub fn geodesic_forward(lon: f64, lat: f64, azimuth_deg: f64, distance_m: f64) -> (f64, f64) {
    use geo::algorithm::line_measures::Destination;
    let origin = Point::new(lon, lat);
    let dest = Geodesic::destination(origin, azimuth_deg, distance_m);
    (dest.x(), dest.y())
}

/// decompose the geodesic displacement between two geographic points into
/// cartesian (y,x) metre offsets, following the original's
/// `geographic_to_cartesian_displacement`: the forward azimuth of the
/// geodesic line gives the direction, and `distance*cos/sin(direction)`
/// gives the y/x components.
pub fn geographic_to_cartesian_displacement(start_lat: f64, start_lon: f64, end_lat: f64, end_lon: f64) -> (f64, f64) {
    let start = Point::new(start_lon, start_lat);
    let end = Point::new(end_lon, end_lat);
    let distance = Geodesic::distance(start, end);
    let direction = Geodesic::bearing(start, end).to_radians();
    let y = distance * direction.cos();
    let x = distance * direction.sin();
    (y, x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equatorial_degree_is_about_111km() {
        let d = geodesic_distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_320.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn forward_then_back_is_consistent() {
        let (lon, lat) = geodesic_forward(0.0, 0.0, 90.0, 10_000.0);
        let d = geodesic_distance(0.0, 0.0, lon, lat);
        assert!((d - 10_000.0).abs() < 1.0, "got {d}");
    }
}
