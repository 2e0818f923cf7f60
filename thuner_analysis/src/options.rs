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

//! `options/analysis.yml`, loaded with `thuner_paths::load_yaml_options`
//! alongside the track/data/grid options files, per §6's external
//! interface contract.

use serde::Deserialize;

use crate::errors::{AnalysisError, Result};
use crate::quality::QualityOptions;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisOptions {
    pub object: String,
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
    #[serde(default = "default_max_boundary_overlap")]
    pub max_boundary_overlap: f64,
    #[serde(default = "default_min_lifetime")]
    pub min_lifetime: usize,
    #[serde(default)]
    pub quadrant_labels: Option<Vec<String>>,
    #[serde(default = "default_core_attribute_type")]
    pub core_attribute_type: String,
    #[serde(default = "default_quality_attribute_type")]
    pub quality_attribute_type: String,
    #[serde(default = "default_u_column")]
    pub u_column: String,
    #[serde(default = "default_v_column")]
    pub v_column: String,
    #[serde(default = "default_overlap_column")]
    pub overlap_column: String,
}

fn default_smoothing_window() -> usize { 6 }
fn default_max_boundary_overlap() -> f64 { 0.1 }
fn default_min_lifetime() -> usize { 1 }
fn default_core_attribute_type() -> String { "core".to_string() }
fn default_quality_attribute_type() -> String { "quality".to_string() }
fn default_u_column() -> String { "u_flow".to_string() }
fn default_v_column() -> String { "v_flow".to_string() }
fn default_overlap_column() -> String { "boundary_overlap".to_string() }

impl AnalysisOptions {
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_window == 0 {
            return Err(AnalysisError::InvalidWindow(0));
        }
        Ok(())
    }

    pub fn quality_options(&self) -> QualityOptions {
        QualityOptions { max_boundary_overlap: self.max_boundary_overlap, min_lifetime: self.min_lifetime }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_omitted() {
        let options: AnalysisOptions = serde_yaml::from_str("object: mcs\n").unwrap();
        assert_eq!(options.smoothing_window, 6);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_a_zero_smoothing_window() {
        let options: AnalysisOptions = serde_yaml::from_str("object: mcs\nsmoothing_window: 0\n").unwrap();
        assert!(options.validate().is_err());
    }
}
