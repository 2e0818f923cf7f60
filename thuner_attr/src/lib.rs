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

//! per-object attribute tables: declarative schema, typed retrieval
//! dispatch, columnar accumulation, periodic csv+yml flush, and
//! end-of-run aggregation across tracking intervals.

pub mod aggregate;
pub mod ellipse;
pub mod errors;
pub mod flush;
pub mod options;
pub mod quality;
pub mod retrieve;
pub mod table;

pub use aggregate::concatenate_and_sort;
pub use ellipse::EllipseFit;
pub use errors::{AttrError, Result};
pub use options::{Attribute, AttributeDataType, AttributeEntry, AttributeGroup, AttributeType};
pub use retrieve::{dispatch, RetrievalInput, RetrievalKind, Value};
pub use table::{AttributeTable, ColumnBuffer};
