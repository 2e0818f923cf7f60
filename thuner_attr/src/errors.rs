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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AttrError>;

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("column {0:?} is not part of this table's schema")]
    UnknownColumn(String),

    #[error("column {name:?} got {got} values, expected {expected} (table row count)")]
    RowCountMismatch { name: String, got: usize, expected: usize },

    #[error("IO error writing {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },

    #[error("csv error writing {path}: {source}")]
    Csv { path: String, #[source] source: csv::Error },

    #[error("yaml error writing metadata {path}: {source}")]
    Yaml { path: String, #[source] source: serde_yaml::Error },

    #[error("attribute flush to {path} failed twice: {source}")]
    FlushRetriesExhausted { path: String, #[source] source: std::io::Error },

    #[error("ellipse fit needs at least 3 distinct contour points, got {0}")]
    DegenerateContour(usize),
}
