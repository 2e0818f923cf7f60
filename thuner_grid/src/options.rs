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

//! grid options, replacing the original's `dict[str,Any]`-shaped
//! `GridOptions` pydantic model (single class, `name: Literal["geographic",
//! "cartesian"]` discriminator) with an enum over the two real shapes, per
//! the redesign note against stringly-typed discriminators.

use serde::{Deserialize, Serialize};

use crate::errors::{GridError, Result};

/// default altitude spacing (metres) and top (metres), used to synthesize
/// an altitude grid when the caller only specifies `altitude_spacing`.
pub const DEFAULT_ALTITUDE_SPACING_M: f32 = 500.0;
pub const DEFAULT_ALTITUDE_TOP_M: f32 = 20_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum GridOptions {
    Geographic(GeographicGridOptions),
    Cartesian(CartesianGridOptions),
}

impl GridOptions {
    pub fn altitude(&self) -> &[f32] {
        match self {
            GridOptions::Geographic(g) => &g.altitude,
            GridOptions::Cartesian(c) => &c.altitude,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        match self {
            GridOptions::Geographic(g) => (g.latitude.len(), g.longitude.len()),
            GridOptions::Cartesian(c) => (c.y.len(), c.x.len()),
        }
    }

    pub fn regrid(&self) -> bool {
        match self {
            GridOptions::Geographic(g) => g.regrid,
            GridOptions::Cartesian(c) => c.regrid,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            GridOptions::Geographic(g) => g.validate(),
            GridOptions::Cartesian(c) => c.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicGridOptions {
    pub latitude: Vec<f32>,
    pub longitude: Vec<f32>,
    pub altitude: Vec<f32>,
    #[serde(default = "default_geographic_spacing")]
    pub geographic_spacing: [f32; 2],
    #[serde(default = "default_true")]
    pub regrid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartesianGridOptions {
    pub y: Vec<f32>,
    pub x: Vec<f32>,
    pub altitude: Vec<f32>,
    pub central_latitude: f32,
    pub central_longitude: f32,
    pub projection: Option<String>,
    #[serde(default = "default_cartesian_spacing")]
    pub cartesian_spacing: [f32; 2],
    #[serde(default = "default_true")]
    pub regrid: bool,
}

fn default_true() -> bool { true }
fn default_geographic_spacing() -> [f32; 2] { [0.025, 0.025] }
fn default_cartesian_spacing() -> [f32; 2] { [2500.0, 2500.0] }

/// builds the default altitude ladder `0..=20_000` step `altitude_spacing`,
/// mirroring `GridOptions._check_altitude`'s fallback when no explicit
/// altitude array is given.
pub fn default_altitude(spacing: f32) -> Vec<f32> {
    let mut alts = Vec::new();
    let mut a = 0.0f32;
    while a <= DEFAULT_ALTITUDE_TOP_M + 1e-6 {
        alts.push(a);
        a += spacing;
    }
    alts
}

fn check_strictly_monotonic(coord: &[f32], coord_name: &'static str) -> Result<()> {
    if coord.windows(2).any(|w| w[1] <= w[0]) {
        return Err(GridError::NotMonotonic { coord_name });
    }
    Ok(())
}

/// `GridOptions._check_spacing`: when both a coordinate array and a
/// spacing value are supplied, the coordinate must be evenly spaced and
/// that spacing must match, to within `1e-8` (spec-mandated tolerance).
fn check_spacing_matches(coord: &[f32], coord_name: &'static str, spacing: f32, spacing_name: &'static str) -> Result<()> {
    if coord.len() < 2 {
        return Ok(());
    }
    let first_diff = (coord[1] - coord[0]) as f64;
    for w in coord.windows(2) {
        let diff = (w[1] - w[0]) as f64;
        if (diff - first_diff).abs() > 1e-8 {
            return Err(GridError::UnevenSpacing { coord_name, spacing_name });
        }
    }
    if (first_diff - spacing as f64).abs() > 1e-8 {
        return Err(GridError::SpacingMismatch {
            coord_name,
            spacing_name,
            spacing: spacing as f64,
            actual: first_diff,
        });
    }
    Ok(())
}

impl GeographicGridOptions {
    pub fn validate(&self) -> Result<()> {
        check_strictly_monotonic(&self.latitude, "latitude")?;
        check_strictly_monotonic(&self.longitude, "longitude")?;
        check_spacing_matches(&self.latitude, "latitude", self.geographic_spacing[0], "geographic_spacing")?;
        check_spacing_matches(&self.longitude, "longitude", self.geographic_spacing[1], "geographic_spacing")?;
        Ok(())
    }
}

impl CartesianGridOptions {
    pub fn validate(&self) -> Result<()> {
        check_strictly_monotonic(&self.y, "y")?;
        check_strictly_monotonic(&self.x, "x")?;
        check_spacing_matches(&self.y, "y", self.cartesian_spacing[0], "cartesian_spacing")?;
        check_spacing_matches(&self.x, "x", self.cartesian_spacing[1], "cartesian_spacing")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_monotonic_latitude() {
        let opts = GeographicGridOptions {
            latitude: vec![0.0, 0.025, 0.02],
            longitude: vec![0.0, 0.025, 0.05],
            altitude: default_altitude(500.0),
            geographic_spacing: [0.025, 0.025],
            regrid: true,
        };
        assert!(matches!(opts.validate(), Err(GridError::NotMonotonic { .. })));
    }

    #[test]
    fn rejects_spacing_mismatch() {
        let opts = GeographicGridOptions {
            latitude: vec![0.0, 0.025, 0.05],
            longitude: vec![0.0, 0.025, 0.05],
            altitude: default_altitude(500.0),
            geographic_spacing: [0.05, 0.025],
            regrid: true,
        };
        assert!(matches!(opts.validate(), Err(GridError::SpacingMismatch { .. })));
    }

    #[test]
    fn accepts_consistent_grid() {
        let opts = GeographicGridOptions {
            latitude: vec![0.0, 0.025, 0.05, 0.075],
            longitude: vec![10.0, 10.025, 10.05],
            altitude: default_altitude(500.0),
            geographic_spacing: [0.025, 0.025],
            regrid: true,
        };
        assert!(opts.validate().is_ok());
    }
}
