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

pub type Result<T> = std::result::Result<T, StitchError>;

/// the stitcher's error taxonomy. Per the core error handling design,
/// a disagreement at one interval boundary (`BoundaryMismatch`) is not
/// fatal to the run - the caller logs it via `tracing::warn!` and leaves
/// that boundary unlinked (ids restart there), matching §7's "no
/// cross-interval identity linkage is drawn across that boundary". Every
/// other variant here is a hard I/O or structural failure.
#[derive(Error, Debug)]
pub enum StitchError {
    #[error(transparent)]
    Attr(#[from] thuner_attr::AttrError),

    #[error(transparent)]
    Paths(#[from] thuner_paths::PathsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error in {path}: {source}")]
    Csv { path: String, #[source] source: csv::Error },

    #[error("zarr error for {path}: {message}")]
    Zarr { path: String, message: String },

    #[error("no intervals found under {0:?}")]
    NoIntervals(std::path::PathBuf),

    #[error("interval {later} is missing object {object:?} present in interval {earlier}")]
    InconsistentObjectSet { earlier: usize, later: usize, object: String },

    #[error("interval {0} has no recorded object {1:?}")]
    UnknownObject(usize, String),
}
