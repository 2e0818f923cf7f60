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

//! retrieval dispatch: each recorded object is asked, through the
//! `RetrievalInput` trait, for the raw quantities a `RetrievalKind`
//! needs, and `dispatch` turns those into the typed `Value`s a row of an
//! `AttributeTable` holds. Kept independent of the tracked-object type
//! itself (which lives in the track-loop crate) the same way
//! `original_source/thuner/attribute/core.py`'s retrieval functions take a
//! loose `input_records` dict rather than a concrete class - except here
//! the dict is replaced with a trait and the string keys with a closed
//! enum, so an attribute naming a retrieval with no matching arm fails to
//! compile rather than raising `KeyError` at run time.

use serde::{Deserialize, Serialize};

use thuner_common::datetime::EpochSeconds;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalKind {
    Id,
    UniversalId,
    Time,
    /// (latitude, longitude) of the object's pixel-weighted centre of mass.
    Coordinate,
    AreaKm2,
    /// (u, v) component velocity derived from the matched corrected flow.
    FlowVelocity,
    /// (u, v) component velocity derived from actual centroid displacement.
    DisplacementVelocity,
    Parents,
    Ellipse,
    BoundaryOverlap,
    Contained,
    Profile { variable: String },
    Tag { variable: String },
}

/// one retrieved cell value, already in the representation an
/// `AttributeTable` column stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

/// the quantities `dispatch` can ask an object record for. A type in the
/// track-loop crate implements this once per recorded object and every
/// attribute in an options file is answered from the same small surface.
pub trait RetrievalInput {
    fn id(&self) -> i64;
    fn universal_id(&self) -> i64;
    fn time(&self) -> EpochSeconds;
    /// `None` when the object has no pixels (should not occur for a live record).
    fn center_lat_lon(&self) -> Option<(f64, f64)>;
    fn area_km2(&self) -> f64;
    /// flow-corrected velocity components in m/s, `None` for the final
    /// record in a track (no match performed yet) or a record born of a split/merge.
    fn flow_velocity_ms(&self) -> Option<(f64, f64)>;
    /// centroid-displacement velocity components in m/s, `None` under the
    /// same circumstances as `flow_velocity_ms`.
    fn displacement_velocity_ms(&self) -> Option<(f64, f64)>;
    fn parents(&self) -> Vec<i64>;
    /// ordered (row, col) pixel coordinates of the object boundary, for ellipse fitting.
    fn mask_contour(&self) -> Vec<(f64, f64)>;
    /// fraction of the object's boundary pixels touching the domain edge.
    fn boundary_overlap_fraction(&self) -> Option<f64>;
    fn profile_sample(&self, variable: &str) -> Option<f64>;
    fn tag_sample(&self, variable: &str) -> Option<String>;
}

/// resolves one `RetrievalKind` against `input`, returning the value(s) in
/// the same column order `AttributeType::columns` would enumerate for that
/// entry. A `Parents` retrieval returns a comma-joined string - parents are
/// multi-valued and the flat per-row csv model has no list column type,
/// matching `original_source/thuner/attribute/core.py::parents`.
pub fn dispatch<T: RetrievalInput>(kind: &RetrievalKind, input: &T) -> Vec<Value> {
    match kind {
        RetrievalKind::Id => vec![Value::Int(input.id())],
        RetrievalKind::UniversalId => vec![Value::Int(input.universal_id())],
        RetrievalKind::Time => vec![Value::Str(input.time().to_string())],
        RetrievalKind::Coordinate => match input.center_lat_lon() {
            Some((lat, lon)) => vec![Value::Float(lat), Value::Float(lon)],
            None => vec![Value::Null, Value::Null],
        },
        RetrievalKind::AreaKm2 => vec![Value::Float(input.area_km2())],
        RetrievalKind::FlowVelocity => match input.flow_velocity_ms() {
            Some((u, v)) => vec![Value::Float(u), Value::Float(v)],
            None => vec![Value::Null, Value::Null],
        },
        RetrievalKind::DisplacementVelocity => match input.displacement_velocity_ms() {
            Some((u, v)) => vec![Value::Float(u), Value::Float(v)],
            None => vec![Value::Null, Value::Null],
        },
        RetrievalKind::Parents => {
            let parents = input.parents();
            if parents.is_empty() {
                vec![Value::Null]
            } else {
                let joined = parents.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(" ");
                vec![Value::Str(joined)]
            }
        }
        RetrievalKind::Ellipse => {
            let contour = input.mask_contour();
            match crate::ellipse::fit(&contour) {
                Ok(fit) => vec![
                    Value::Float(fit.major_axis),
                    Value::Float(fit.minor_axis),
                    Value::Float(fit.orientation_deg),
                    Value::Float(fit.eccentricity),
                ],
                Err(_) => vec![Value::Null, Value::Null, Value::Null, Value::Null],
            }
        }
        RetrievalKind::BoundaryOverlap => match input.boundary_overlap_fraction() {
            Some(fraction) => vec![Value::Float(fraction)],
            None => vec![Value::Null],
        },
        RetrievalKind::Contained => match input.boundary_overlap_fraction() {
            Some(fraction) => vec![Value::Int(if fraction < crate::quality::CONTAINED_THRESHOLD { 1 } else { 0 })],
            None => vec![Value::Null],
        },
        RetrievalKind::Profile { variable } => match input.profile_sample(variable) {
            Some(v) => vec![Value::Float(v)],
            None => vec![Value::Null],
        },
        RetrievalKind::Tag { variable } => match input.tag_sample(variable) {
            Some(v) => vec![Value::Str(v)],
            None => vec![Value::Null],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubInput;

    impl RetrievalInput for StubInput {
        fn id(&self) -> i64 { 7 }
        fn universal_id(&self) -> i64 { 107 }
        fn time(&self) -> EpochSeconds { EpochSeconds::new(1_700_000_000) }
        fn center_lat_lon(&self) -> Option<(f64, f64)> { Some((12.5, -80.0)) }
        fn area_km2(&self) -> f64 { 42.0 }
        fn flow_velocity_ms(&self) -> Option<(f64, f64)> { None }
        fn displacement_velocity_ms(&self) -> Option<(f64, f64)> { Some((1.0, -2.0)) }
        fn parents(&self) -> Vec<i64> { vec![3, 4] }
        fn mask_contour(&self) -> Vec<(f64, f64)> { vec![] }
        fn boundary_overlap_fraction(&self) -> Option<f64> { Some(0.0) }
        fn profile_sample(&self, _variable: &str) -> Option<f64> { Some(301.5) }
        fn tag_sample(&self, variable: &str) -> Option<String> { Some(format!("{variable}-tag")) }
    }

    #[test]
    fn coordinate_dispatch_returns_lat_then_lon() {
        let values = dispatch(&RetrievalKind::Coordinate, &StubInput);
        assert_eq!(values, vec![Value::Float(12.5), Value::Float(-80.0)]);
    }

    #[test]
    fn parents_joins_with_spaces() {
        let values = dispatch(&RetrievalKind::Parents, &StubInput);
        assert_eq!(values, vec![Value::Str("3 4".to_string())]);
    }

    #[test]
    fn missing_flow_velocity_is_null_pair() {
        let values = dispatch(&RetrievalKind::FlowVelocity, &StubInput);
        assert_eq!(values, vec![Value::Null, Value::Null]);
    }

    #[test]
    fn unoverlapped_boundary_is_contained() {
        let values = dispatch(&RetrievalKind::Contained, &StubInput);
        assert_eq!(values, vec![Value::Int(1)]);
    }
}
