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

//! attribute descriptors: `Attribute`/`AttributeGroup`/`AttributeType`.
//! Unlike `original_source/thuner/attribute/core.py`, which dispatches
//! retrieval by looking a function up in a module-level dict keyed by
//! string, every descriptor here carries a `RetrievalKind` value - a
//! closed enum `thuner_attr::retrieve::dispatch` matches exhaustively, so
//! an "unknown attribute" is a compile error, not a runtime one.

use serde::{Deserialize, Serialize};

use crate::retrieve::RetrievalKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeDataType {
    Int,
    Float,
    String,
    /// seconds-resolution ISO-8601 instant, stored internally as an
    /// `EpochSeconds` and written as `time=datetime-seconds`.
    Datetime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub data_type: AttributeDataType,
    /// decimal places for a float column; `None` for non-float columns.
    pub precision: Option<u8>,
    pub units: Option<String>,
    pub description: String,
    pub retrieval: RetrievalKind,
}

/// several related columns sharing one retrieval call (e.g. latitude +
/// longitude from one centre-of-mass computation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub columns: Vec<Attribute>,
    pub retrieval: RetrievalKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeEntry {
    Single(Attribute),
    Group(AttributeGroup),
}

impl AttributeEntry {
    pub fn columns(&self) -> Vec<&Attribute> {
        match self {
            AttributeEntry::Single(attribute) => vec![attribute],
            AttributeEntry::Group(group) => group.columns.iter().collect(),
        }
    }
}

/// one named group of attributes written to one csv table, e.g. `core`,
/// `ellipse`, `quality`, `profile`, `tag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeType {
    pub name: String,
    pub entries: Vec<AttributeEntry>,
    /// for grouped objects, the member this attribute type is scoped to
    /// (`attributes/<object>/<member>/<type>.csv`); `None` for object-level
    /// attribute types.
    pub member: Option<String>,
}

impl AttributeType {
    pub fn columns(&self) -> Vec<&Attribute> {
        self.entries.iter().flat_map(|e| e.columns()).collect()
    }
}
