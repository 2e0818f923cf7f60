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

//! the stitcher's own read/write access to the zarr v3 mask stores
//! `thuner_track::mask_store::MaskStore` writes - one chunk per time step
//! at key `c/<t>/0/0`, `uint32` little-endian labels, shape tracked in
//! `zarr.json`. The stitcher is a standalone post-run pass over another
//! process's output tree, so it does not depend on `thuner_track`;
//! instead it re-derives the same narrow key/shape conventions directly
//! against `zarrs_storage`, grounded on `thuner_track::mask_store`'s
//! choice of the low-level key/value store surface over the higher-level
//! `zarrs` array builder.

use std::path::Path;
use std::sync::Arc;

use ndarray::Array2;
use zarrs_filesystem::FilesystemStore;
use zarrs_storage::{ReadableStorageTraits, StoreKey, WritableStorageTraits};

use crate::errors::{Result, StitchError};

fn zarr_error(path: &Path, message: impl std::fmt::Display) -> StitchError {
    StitchError::Zarr { path: path.display().to_string(), message: message.to_string() }
}

/// read-only handle onto an already-written mask store.
pub struct MaskSeries {
    store: Arc<FilesystemStore>,
    root: std::path::PathBuf,
    rows: usize,
    cols: usize,
    n: usize,
}

impl MaskSeries {
    pub fn open(root: &Path) -> Result<Self> {
        let store = Arc::new(FilesystemStore::new(root).map_err(|e| zarr_error(root, e))?);
        let key = StoreKey::new("zarr.json").map_err(|e| zarr_error(root, e))?;
        let bytes = store.get(&key).map_err(|e| zarr_error(root, e))?.ok_or_else(|| zarr_error(root, "missing zarr.json"))?;
        let metadata: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| zarr_error(root, e))?;
        let shape = metadata["shape"].as_array().ok_or_else(|| zarr_error(root, "zarr.json has no shape"))?;
        let as_usize = |i: usize| shape.get(i).and_then(|v| v.as_u64()).map(|v| v as usize).ok_or_else(|| zarr_error(root, "malformed shape"));
        let n = as_usize(0)?;
        let rows = as_usize(1)?;
        let cols = as_usize(2)?;
        Ok(MaskSeries { store, root: root.to_path_buf(), rows, cols, n })
    }

    pub fn len(&self) -> usize { self.n }
    pub fn is_empty(&self) -> bool { self.n == 0 }
    pub fn shape(&self) -> (usize, usize) { (self.rows, self.cols) }

    /// reads the labels at time index `t` as a dense `(rows, cols)` array.
    pub fn read(&self, t: usize) -> Result<Array2<u32>> {
        if t >= self.n {
            return Err(zarr_error(&self.root, format!("time index {t} out of range (len {})", self.n)));
        }
        let key = StoreKey::new(&format!("c/{t}/0/0")).map_err(|e| zarr_error(&self.root, e))?;
        let bytes = self.store.get(&key).map_err(|e| zarr_error(&self.root, e))?.ok_or_else(|| zarr_error(&self.root, format!("missing chunk {t}")))?;
        let expected = self.rows * self.cols * 4;
        if bytes.len() != expected {
            return Err(zarr_error(&self.root, format!("chunk {t} has {} bytes, expected {expected}", bytes.len())));
        }
        let mut labels = Array2::<u32>::zeros((self.rows, self.cols));
        for (i, value) in labels.iter_mut().enumerate() {
            let offset = i * 4;
            *value = u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]]);
        }
        Ok(labels)
    }
}

/// append-only writer for the stitched, run-level mask store at
/// `<out>/masks/<object>.zarr` - the same on-disk shape `MaskSeries`
/// reads back, built fresh rather than reusing any one interval's store.
pub struct MaskSeriesWriter {
    store: Arc<FilesystemStore>,
    root: std::path::PathBuf,
    rows: usize,
    cols: usize,
    n_written: usize,
}

impl MaskSeriesWriter {
    pub fn create(root: &Path, rows: usize, cols: usize) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        let store = Arc::new(FilesystemStore::new(root).map_err(|e| zarr_error(root, e))?);
        let writer = MaskSeriesWriter { store, root: root.to_path_buf(), rows, cols, n_written: 0 };
        writer.write_metadata()?;
        Ok(writer)
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
        });
        let bytes = serde_json::to_vec(&metadata).map_err(|e| zarr_error(&self.root, e))?;
        let key = StoreKey::new("zarr.json").map_err(|e| zarr_error(&self.root, e))?;
        self.store.set(&key, bytes.into()).map_err(|e| zarr_error(&self.root, e))?;
        Ok(())
    }

    pub fn append(&mut self, labels: &Array2<u32>) -> Result<()> {
        if labels.dim() != (self.rows, self.cols) {
            return Err(zarr_error(&self.root, format!("frame shape {:?} does not match store shape ({},{})", labels.dim(), self.rows, self.cols)));
        }
        let mut bytes = Vec::with_capacity(self.rows * self.cols * 4);
        for &label in labels.iter() {
            bytes.extend_from_slice(&label.to_le_bytes());
        }
        let key = StoreKey::new(&format!("c/{}/0/0", self.n_written)).map_err(|e| zarr_error(&self.root, e))?;
        self.store.set(&key, bytes.into()).map_err(|e| zarr_error(&self.root, e))?;
        self.n_written += 1;
        self.write_metadata()
    }

    pub fn frames_written(&self) -> usize { self.n_written }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn writes_then_reads_back_identical_frames() {
        let root = std::env::temp_dir().join(format!("thuner_stitch_mask_io_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();

        let mut writer = MaskSeriesWriter::create(&root, 2, 2).unwrap();
        writer.append(&array![[1u32, 0], [0, 2]]).unwrap();
        writer.append(&array![[1u32, 1], [0, 0]]).unwrap();
        assert_eq!(writer.frames_written(), 2);

        let series = MaskSeries::open(&root).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.shape(), (2, 2));
        assert_eq!(series.read(0).unwrap(), array![[1u32, 0], [0, 2]]);
        assert_eq!(series.read(1).unwrap(), array![[1u32, 1], [0, 0]]);

        std::fs::remove_dir_all(&root).ok();
    }
}
