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

//! stitching a translating object tracked as two overlapping intervals
//! should reproduce what tracking it as one continuous run would have
//! produced, modulo id renumbering: same number of frames, one surviving
//! universal id, and a boundary frame counted exactly once.

use std::path::Path;

use ndarray::array;

use thuner_paths::Paths;
use thuner_stitch::mask_io::MaskSeriesWriter;
use thuner_stitch::{stitch_run, StitchOptions};

fn write_core_csv(path: &Path, rows: &[(&str, &str, &str)]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut text = String::from("time,universal_id,parents\n");
    for (time, id, parents) in rows {
        text.push_str(&format!("{time},{id},{parents}\n"));
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn stitching_two_intervals_reproduces_a_single_continuous_track() {
    let root = std::env::temp_dir().join(format!("thuner_stitch_integration_test_{}", std::process::id()));
    std::fs::remove_dir_all(&root).ok();
    std::fs::create_dir_all(&root).unwrap();

    // interval 0: the object occupies column 1, then 2, then 3 of a 1x4
    // strip (a one-pixel-per-step translation), label 1 throughout.
    let paths_0 = Paths::new(root.join("interval_0"));
    let mut writer_0 = MaskSeriesWriter::create(&paths_0.mask_store_path("cell"), 1, 4).unwrap();
    writer_0.append(&array![[0u32, 1, 0, 0]]).unwrap();
    writer_0.append(&array![[0u32, 0, 1, 0]]).unwrap();
    writer_0.append(&array![[0u32, 0, 0, 1]]).unwrap(); // this frame is the shared boundary
    write_core_csv(
        &paths_0.attribute_table_path("cell", None, "core"),
        &[
            ("2020-01-01T00:00:00Z", "1", ""),
            ("2020-01-01T00:10:00Z", "1", "1"),
            ("2020-01-01T00:20:00Z", "1", "1"),
        ],
    );

    // interval 1: a fresh tracker restarted at the boundary frame (its
    // own label numbering starts over at 1) continues the translation.
    let paths_1 = Paths::new(root.join("interval_1"));
    let mut writer_1 = MaskSeriesWriter::create(&paths_1.mask_store_path("cell"), 1, 4).unwrap();
    writer_1.append(&array![[0u32, 0, 0, 1]]).unwrap(); // duplicate of interval 0's last frame
    writer_1.append(&array![[0u32, 0, 0, 0]]).unwrap(); // object has left the domain
    write_core_csv(
        &paths_1.attribute_table_path("cell", None, "core"),
        &[("2020-01-01T00:20:00Z", "1", ""), ("2020-01-01T00:30:00Z", "1", "1")],
    );

    let report = stitch_run(&root, &StitchOptions { keep_interval_dirs: false, ..StitchOptions::default() }).unwrap();
    assert_eq!(report.objects.len(), 1);
    let cell = &report.objects[0];
    assert_eq!(cell.object, "cell");
    // 3 frames from interval 0 + 1 new frame from interval 1 (the shared
    // boundary frame counted once, not twice).
    assert_eq!(cell.frame_count, 4);
    assert_eq!(cell.final_id_count, 1);
    assert!(cell.unlinked_boundaries.is_empty());

    let out_paths = Paths::new(&root);
    let stitched_core = std::fs::read_to_string(out_paths.attribute_table_path("cell", None, "core")).unwrap();
    let lines: Vec<&str> = stitched_core.lines().collect();
    // header + 4 distinct times (the boundary time appears once in each
    // interval's own csv, but both rows describe the same moment).
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().skip(1).all(|line| line.contains(",1,")));

    assert!(!root.join("interval_0").exists());
    assert!(!root.join("interval_1").exists());

    std::fs::remove_dir_all(&root).ok();
}
