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

//! `ObjectRecord`: one object, at one time step, with every quantity
//! `thuner_attr::retrieve::dispatch` might ask for already computed. Kept
//! flat and self-contained rather than holding a reference back into the
//! step's mask/grid, because by the time attributes are flushed the mask
//! that produced it may already have been evicted from the bounded
//! history deque.

use std::collections::HashMap;

use thuner_attr::RetrievalInput;
use thuner_common::datetime::EpochSeconds;

#[derive(Debug, Clone)]
pub struct ObjectRecord {
    pub id: i64,
    pub universal_id: i64,
    pub time: EpochSeconds,
    pub center_lat_lon: Option<(f64, f64)>,
    pub area_km2: f64,
    pub flow_velocity_ms: Option<(f64, f64)>,
    pub displacement_velocity_ms: Option<(f64, f64)>,
    pub parents: Vec<i64>,
    pub mask_contour: Vec<(f64, f64)>,
    pub boundary_overlap_fraction: Option<f64>,
    pub profile_samples: HashMap<String, f64>,
    pub tag_samples: HashMap<String, String>,
}

impl RetrievalInput for ObjectRecord {
    fn id(&self) -> i64 { self.id }
    fn universal_id(&self) -> i64 { self.universal_id }
    fn time(&self) -> EpochSeconds { self.time }
    fn center_lat_lon(&self) -> Option<(f64, f64)> { self.center_lat_lon }
    fn area_km2(&self) -> f64 { self.area_km2 }
    fn flow_velocity_ms(&self) -> Option<(f64, f64)> { self.flow_velocity_ms }
    fn displacement_velocity_ms(&self) -> Option<(f64, f64)> { self.displacement_velocity_ms }
    fn parents(&self) -> Vec<i64> { self.parents.clone() }
    fn mask_contour(&self) -> Vec<(f64, f64)> { self.mask_contour.clone() }
    fn boundary_overlap_fraction(&self) -> Option<f64> { self.boundary_overlap_fraction }
    fn profile_sample(&self, variable: &str) -> Option<f64> { self.profile_samples.get(variable).copied() }
    fn tag_sample(&self, variable: &str) -> Option<String> { self.tag_samples.get(variable).cloned() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thuner_attr::{dispatch, RetrievalKind, Value};

    fn sample() -> ObjectRecord {
        ObjectRecord {
            id: 3,
            universal_id: 103,
            time: EpochSeconds::new(1_700_000_000),
            center_lat_lon: Some((10.0, 20.0)),
            area_km2: 55.0,
            flow_velocity_ms: Some((1.5, -0.5)),
            displacement_velocity_ms: None,
            parents: vec![],
            mask_contour: vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
            boundary_overlap_fraction: Some(0.0),
            profile_samples: HashMap::new(),
            tag_samples: HashMap::new(),
        }
    }

    #[test]
    fn dispatch_reads_object_record_fields() {
        let record = sample();
        assert_eq!(dispatch(&RetrievalKind::Id, &record), vec![Value::Int(3)]);
        assert_eq!(dispatch(&RetrievalKind::UniversalId, &record), vec![Value::Int(103)]);
        assert_eq!(dispatch(&RetrievalKind::Coordinate, &record), vec![Value::Float(10.0), Value::Float(20.0)]);
    }

    #[test]
    fn no_parents_is_null_not_empty_string() {
        let record = sample();
        assert_eq!(dispatch(&RetrievalKind::Parents, &record), vec![Value::Null]);
    }

    #[test]
    fn displacement_velocity_dispatches_as_a_u_v_pair_when_present() {
        let mut record = sample();
        record.displacement_velocity_ms = Some((2.0, -1.0));
        assert_eq!(dispatch(&RetrievalKind::DisplacementVelocity, &record), vec![Value::Float(2.0), Value::Float(-1.0)]);
    }

    #[test]
    fn displacement_velocity_dispatches_as_null_pair_when_absent() {
        let record = sample();
        assert_eq!(dispatch(&RetrievalKind::DisplacementVelocity, &record), vec![Value::Null, Value::Null]);
    }
}
