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

//! concatenates one object's per-interval mask stores into the single
//! run-level store at `<out>/masks/<object>.zarr`, relabeling every
//! frame through that interval's [`IntervalRemap`](crate::reassign::IntervalRemap)
//! and slicing out the duplicated overlap frame every interval after the
//! first shares with the one before it (spec.md §4.9 step 4).

use std::path::Path;

use ndarray::Array2;

use crate::errors::Result;
use crate::mask_io::{MaskSeries, MaskSeriesWriter};
use crate::reassign::IntervalRemap;

fn relabel_frame(frame: &Array2<u32>, remap: &IntervalRemap) -> Array2<u32> {
    frame.mapv(|label| if label == 0 { 0 } else { remap.get(&label).copied().unwrap_or(0) })
}

/// `series` holds one opened [`MaskSeries`] per interval in order;
/// `remaps[i]` is interval `i`'s id table. Interval `0` contributes every
/// frame it has; every later interval skips its first frame, which is
/// the same wall-clock time as the previous interval's last frame.
pub fn stitch_masks(series: &[MaskSeries], remaps: &[IntervalRemap], destination: &Path) -> Result<usize> {
    let (rows, cols) = series.first().map(|s| s.shape()).unwrap_or((0, 0));
    let mut writer = MaskSeriesWriter::create(destination, rows, cols)?;

    for (interval_index, one_series) in series.iter().enumerate() {
        let start = if interval_index == 0 { 0 } else { 1.min(one_series.len()) };
        for t in start..one_series.len() {
            let frame = one_series.read(t)?;
            writer.append(&relabel_frame(&frame, &remaps[interval_index]))?;
        }
    }
    Ok(writer.frames_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask_io::MaskSeriesWriter;
    use ndarray::array;

    #[test]
    fn drops_the_duplicated_boundary_frame() {
        let root = std::env::temp_dir().join(format!("thuner_stitch_masks_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();

        let interval_0 = root.join("interval_0");
        let mut w0 = MaskSeriesWriter::create(&interval_0, 2, 2).unwrap();
        w0.append(&array![[1u32, 0], [0, 0]]).unwrap();
        w0.append(&array![[1u32, 0], [0, 0]]).unwrap(); // shared boundary frame

        let interval_1 = root.join("interval_1");
        let mut w1 = MaskSeriesWriter::create(&interval_1, 2, 2).unwrap();
        w1.append(&array![[5u32, 0], [0, 0]]).unwrap(); // duplicate of interval_0's last frame
        w1.append(&array![[5u32, 0], [0, 0]]).unwrap();

        let series_0 = MaskSeries::open(&interval_0).unwrap();
        let series_1 = MaskSeries::open(&interval_1).unwrap();

        let mut remap_0 = IntervalRemap::new();
        remap_0.insert(1, 1);
        let mut remap_1 = IntervalRemap::new();
        remap_1.insert(5, 1);

        let destination = root.join("stitched.zarr");
        let frames = stitch_masks(&[series_0, series_1], &[remap_0, remap_1], &destination).unwrap();
        assert_eq!(frames, 3); // 2 from interval 0, 1 from interval 1 (boundary frame dropped)

        let stitched = MaskSeries::open(&destination).unwrap();
        for t in 0..3 {
            assert_eq!(stitched.read(t).unwrap()[[0, 0]], 1);
        }

        std::fs::remove_dir_all(&root).ok();
    }
}
