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

//! the seam between the track loop and a concrete data source, replacing
//! `original_source/thuner/data/dispatch.py`'s per-dataset dict of loose
//! functions (`get_filepaths`, `update_track_input_records`, ...) with one
//! trait. Kept a plain synchronous trait, not `async_trait`: the track
//! loop itself is single-threaded per interval (concurrency lives one
//! level up, across intervals), so there is nothing here to `.await`.

use std::path::{Path, PathBuf};

use thuner_common::datetime::EpochSeconds;
use thuner_grid::field_grid::FieldGrid;

pub type AdapterError = Box<dyn std::error::Error + Send + Sync>;

/// everything the track loop needs from one named dataset: where its
/// files are, how to window-load them around a requested time, and how to
/// turn the loaded state into the [`FieldGrid`] the detector/grouper
/// operate on. Errors are pre-boxed rather than an associated type so a
/// run's driver can hold a `HashMap<String, Box<dyn DatasetAdapter>>`
/// across heterogeneous dataset backends - one run's satellite adapter
/// and radar adapter have nothing else in common.
pub trait DatasetAdapter {
    /// filepaths covering `[start, end]`, in chronological order - the
    /// adapter's own analogue of `get_filepaths`.
    fn get_filepaths(&self, start: EpochSeconds, end: EpochSeconds) -> Result<Vec<PathBuf>, AdapterError>;

    /// advances whatever internal file/window state the adapter keeps so
    /// that a subsequent `grid_from_dataset(time)` can succeed, loading
    /// new files as needed. Mirrors `BaseInputRecord`'s rolling
    /// `_current_file_index`/`_time_list` bookkeeping.
    fn update_input_record(&mut self, time: EpochSeconds) -> Result<(), AdapterError>;

    /// the gridded field valid at `time`, built from whatever the adapter
    /// currently has loaded.
    fn grid_from_dataset(&self, time: EpochSeconds) -> Result<FieldGrid, AdapterError>;

    /// converts one raw input file into the adapter's working
    /// representation (e.g. regridding onto the run's target grid) -
    /// mirrors the original's per-dataset `convert_<dataset>` step, run
    /// once per newly-opened file rather than once per time step.
    fn convert_dataset(&mut self, filepath: &Path) -> Result<(), AdapterError>;
}
