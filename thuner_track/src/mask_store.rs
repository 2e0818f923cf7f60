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

//! append-only zarr v3 mask store, one array per tracked object type at
//! `masks/<object>.zarr`, chunked `(time, row, col)` with one whole
//! `(row, col)` slice per chunk and `uint32` labels, background `0`. Built
//! directly on `zarrs_storage`'s key/value store traits rather than the
//! higher-level `zarr_s::array::Array` builder: a one-chunk-per-step
//! append only needs `get`/`set` against two conventional keys
//! (`zarr.json`, `c/<t>/0/0`), so the lower-level surface is enough and
//! keeps this module's contract with the zarr v3 spec explicit rather
//! than mediated by an array-building API this crate never exercises
//! elsewhere.

use std::sync::Arc;

use zarrs_filesystem::FilesystemStore;
use zarrs_storage::{StoreKey, WritableStorageTraits};

use thuner_grid::object_mask::ObjectMask;
use thuner_paths::Paths;

use crate::errors::{Result, TrackError};

fn store_error(object: &str, message: impl std::fmt::Display) -> TrackError {
    TrackError::MaskStore { object: object.to_string(), message: message.to_string() }
}

pub struct MaskStore {
    store: Arc<FilesystemStore>,
    object: String,
    rows: usize,
    cols: usize,
    n_written: usize,
}

impl MaskStore {
    /// opens (creating if absent) the zarr store for `object`'s masks at
    /// `paths.mask_store_path(object)`, sized for a `(rows, cols)` frame.
    pub fn create(paths: &Paths, object: &str, rows: usize, cols: usize) -> Result<Self> {
        let root = paths.mask_store_path(object);
        std::fs::create_dir_all(&root)?;
        let store = Arc::new(FilesystemStore::new(&root).map_err(|error| store_error(object, error))?);
        let mask_store = MaskStore { store, object: object.to_string(), rows, cols, n_written: 0 };
        mask_store.write_metadata()?;
        Ok(mask_store)
    }

    fn write_metadata(&self) -> Result<()> {
        let metadata = serde_json::json!({
            "zarr_format": 3,
            "node_type": "array",
            "shape": [self.n_written, self.rows, self.cols],
            "data_type": "uint32",
            "chunk_grid": {
                "name": "regular",
                "configuration": { "chunk_shape": [1, self.rows, self.cols] },
            },
            "chunk_key_encoding": {
                "name": "default",
                "configuration": { "separator": "/" },
            },
            "fill_value": 0,
            "codecs": [{ "name": "bytes", "configuration": { "endian": "little" } }],
            "attributes": { "object": self.object },
        });
        let bytes = serde_json::to_vec(&metadata).map_err(|error| store_error(&self.object, error))?;
        let key = StoreKey::new("zarr.json").map_err(|error| store_error(&self.object, error))?;
        self.store.set(&key, bytes.into()).map_err(|error| store_error(&self.object, error))?;
        Ok(())
    }

    /// appends one time step's labels as the next chunk, then rewrites
    /// `zarr.json` with the grown shape - a store left mid-write after a
    /// crash still has a valid `zarr.json` for every chunk actually on
    /// disk, since the metadata write always comes last.
    pub fn append(&mut self, mask: &ObjectMask) -> Result<()> {
        let (rows, cols) = mask.shape();
        if (rows, cols) != (self.rows, self.cols) {
            return Err(store_error(&self.object, format!("mask shape ({rows},{cols}) does not match store shape ({},{})", self.rows, self.cols)));
        }
        let mut bytes = Vec::with_capacity(rows * cols * 4);
        for &label in mask.labels().iter() {
            bytes.extend_from_slice(&label.to_le_bytes());
        }
        let key = StoreKey::new(&format!("c/{}/0/0", self.n_written)).map_err(|error| store_error(&self.object, error))?;
        self.store.set(&key, bytes.into()).map_err(|error| store_error(&self.object, error))?;
        self.n_written += 1;
        self.write_metadata()
    }

    pub fn steps_written(&self) -> usize { self.n_written }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn appends_grow_the_step_count() {
        let root = std::env::temp_dir().join(format!("thuner_track_mask_store_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let paths = Paths::new(&root);

        let mut store = MaskStore::create(&paths, "cell", 2, 2).unwrap();
        assert_eq!(store.steps_written(), 0);

        let mask = ObjectMask::from_labels(array![[1, 0], [0, 2]]);
        store.append(&mask).unwrap();
        store.append(&mask).unwrap();
        assert_eq!(store.steps_written(), 2);

        let zarr_json = paths.mask_store_path("cell").join("zarr.json");
        assert!(zarr_json.exists());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let root = std::env::temp_dir().join(format!("thuner_track_mask_store_test_shape_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let paths = Paths::new(&root);
        let mut store = MaskStore::create(&paths, "cell", 2, 2).unwrap();
        let mask = ObjectMask::from_labels(array![[1, 0, 0], [0, 2, 0]]);
        assert!(store.append(&mask).is_err());
        std::fs::remove_dir_all(&root).ok();
    }
}
