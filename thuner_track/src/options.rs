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

//! track options, ported from `original_source/thuner/option/track.py`.
//! `TintOptions`/`MintOptions` are not re-derived here - every field they
//! describe is already a field of `thuner_match::MatchOptions`
//! (`CorrectedFlowPolicy::{Tint,Mint}` selects the case table, the rest of
//! the fields line up one to one), so an `ObjectOptions` just embeds one.

use serde::{Deserialize, Serialize};

use thuner_attr::AttributeType;
use thuner_detect::DetectOptions;
use thuner_flow::FlowOptions;
use thuner_group::GroupOptions;
use thuner_match::MatchOptions;

use crate::errors::{Result, TrackError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskOptions {
    #[serde(default = "default_true")]
    pub save: bool,
    #[serde(default)]
    pub load: bool,
}

fn default_true() -> bool { true }

impl Default for MaskOptions {
    fn default() -> Self { MaskOptions { save: true, load: false } }
}

/// which of the two ways to obtain this object's next mask applies:
/// detection straight off a gridded field, or grouping already-detected
/// member objects into a multi-level object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum ObjectMethod {
    Detect(DetectOptions),
    Group(GroupOptions),
}

/// one tracked object type's full configuration - the Rust analogue of
/// `BaseObjectOptions` joined with whichever of `DetectedObjectOptions`/
/// `GroupedObjectOptions` applies, flattened into one struct since the
/// `method` field already disambiguates which of `DetectOptions`/
/// `GroupOptions` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectOptions {
    pub name: String,
    #[serde(default)]
    pub hierarchy_level: usize,
    pub dataset: String,
    #[serde(default = "default_deque_length")]
    pub deque_length: usize,
    #[serde(default)]
    pub mask_options: MaskOptions,
    #[serde(default = "default_write_interval_minutes")]
    pub write_interval_minutes: u32,
    #[serde(default = "default_allowed_gap_minutes")]
    pub allowed_gap_minutes: u32,
    #[serde(default)]
    pub attribute_types: Vec<AttributeType>,
    pub method: ObjectMethod,
    /// `None` only for an object type that is never matched across time
    /// steps (detected once and left untracked) - every object in a
    /// `TrackOptions` a real run submits carries a tracking policy.
    pub tracking: Option<MatchOptions>,
    #[serde(default)]
    pub flow: FlowOptions,
}

fn default_deque_length() -> usize { 2 }
fn default_write_interval_minutes() -> u32 { 60 }
fn default_allowed_gap_minutes() -> u32 { 30 }

impl ObjectOptions {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TrackError::Config("object name must not be empty".to_string()));
        }
        if !(1..10).contains(&self.deque_length) {
            return Err(TrackError::Config(format!("{:?}: deque_length must be in 1..10, got {}", self.name, self.deque_length)));
        }
        if !(1..24 * 60).contains(&self.write_interval_minutes) {
            return Err(TrackError::Config(format!(
                "{:?}: write_interval_minutes must be in 1..1440, got {}",
                self.name, self.write_interval_minutes
            )));
        }
        if !(1..6 * 60).contains(&self.allowed_gap_minutes) {
            return Err(TrackError::Config(format!(
                "{:?}: allowed_gap_minutes must be in 1..360, got {}",
                self.name, self.allowed_gap_minutes
            )));
        }
        if self.tracking.is_some() && !self.mask_options.save {
            return Err(TrackError::Config(format!("{:?}: mask_options.save must be true when tracking is configured", self.name)));
        }
        if let ObjectMethod::Group(group) = &self.method {
            if group.members.is_empty() {
                return Err(TrackError::Config(format!("{:?}: grouping requires at least one member object", self.name)));
            }
            if group.matched_object_index().is_none() {
                return Err(TrackError::Config(format!(
                    "{:?}: matched_object {:?} is not one of its own members {:?}",
                    self.name, group.matched_object, group.members
                )));
            }
        }
        Ok(())
    }
}

/// one hierarchy level's object types, grounded in `LevelOptions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelOptions {
    pub objects: Vec<ObjectOptions>,
}

impl LevelOptions {
    pub fn object_by_name(&self, name: &str) -> Option<&ObjectOptions> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for object in &self.objects {
            object.validate()?;
            if !seen.insert(object.name.as_str()) {
                return Err(TrackError::Config(format!("duplicate object name {:?} within one hierarchy level", object.name)));
            }
        }
        Ok(())
    }
}

/// the full run's tracking configuration across every hierarchy level,
/// grounded in `TrackOptions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackOptions {
    pub levels: Vec<LevelOptions>,
}

impl TrackOptions {
    pub fn object_by_name(&self, name: &str) -> Option<&ObjectOptions> {
        self.levels.iter().find_map(|level| level.object_by_name(name))
    }

    /// validates every level's own uniqueness plus uniqueness of object
    /// names across the whole run - a grouped object's members are looked
    /// up by name across levels, so the names form one flat namespace.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for level in &self.levels {
            level.validate()?;
            for object in &level.objects {
                if !seen.insert(object.name.as_str()) {
                    return Err(TrackError::Config(format!("duplicate object name {:?} across hierarchy levels", object.name)));
                }
            }
        }
        for level in &self.levels {
            for object in &level.objects {
                if let ObjectMethod::Group(group) = &object.method {
                    for member in &group.members {
                        if self.object_by_name(member).is_none() {
                            return Err(TrackError::Config(format!("{:?}: member object {:?} is not defined anywhere in this run", object.name, member)));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thuner_detect::{DetectOptions, DetectionMethod};

    fn detected(name: &str) -> ObjectOptions {
        ObjectOptions {
            name: name.to_string(),
            hierarchy_level: 0,
            dataset: "radar".to_string(),
            deque_length: 2,
            mask_options: MaskOptions::default(),
            write_interval_minutes: 60,
            allowed_gap_minutes: 30,
            attribute_types: vec![],
            method: ObjectMethod::Detect(DetectOptions { method: DetectionMethod::Threshold { threshold: 40.0 }, flatten: None, min_area_km2: Some(10.0) }),
            tracking: Some(MatchOptions::default()),
            flow: FlowOptions::default(),
        }
    }

    #[test]
    fn rejects_deque_length_out_of_range() {
        let mut object = detected("cell");
        object.deque_length = 0;
        assert!(object.validate().is_err());
        object.deque_length = 12;
        assert!(object.validate().is_err());
    }

    #[test]
    fn rejects_tracking_without_saved_masks() {
        let mut object = detected("cell");
        object.mask_options.save = false;
        assert!(object.validate().is_err());
    }

    #[test]
    fn duplicate_names_across_levels_rejected() {
        let options = TrackOptions {
            levels: vec![LevelOptions { objects: vec![detected("cell")] }, LevelOptions { objects: vec![detected("cell")] }],
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn grouped_object_must_reference_defined_members() {
        let mut grouped = detected("mcs");
        grouped.method = ObjectMethod::Group(GroupOptions { members: vec!["cell".to_string()], matched_object: "cell".to_string() });
        grouped.hierarchy_level = 1;
        let options = TrackOptions { levels: vec![LevelOptions { objects: vec![detected("cell"), grouped] }] };
        assert!(options.validate().is_ok());
    }
}
