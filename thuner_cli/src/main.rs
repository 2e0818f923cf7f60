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

//! `thuner`: the minimal end-to-end demo binary, plus thin wrappers
//! around the already-standalone interval stitcher and post-run
//! analysis. A real deployment supplies its own dataset adapters and
//! options files and drives `thuner_track` directly; this binary exists
//! to prove the pipeline runs start to finish.

mod demo;
mod errors;
mod synthetic;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use errors::Result;

#[derive(Parser)]
#[command(name = "thuner", about = "thunderstorm event reconnaissance", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// run the synthetic end-to-end demo: detect, track, stitch, analyze.
    Demo {
        #[arg(long, default_value = "thuner_demo_out")]
        out: PathBuf,
        #[arg(long, default_value_t = 2)]
        intervals: usize,
        #[arg(long, default_value_t = 6)]
        steps_per_interval: usize,
        #[arg(long, default_value_t = 600)]
        step_seconds: i64,
        #[arg(long, default_value_t = 20)]
        grid_size: usize,
        #[arg(long, default_value_t = 1000.0)]
        grid_spacing_m: f32,
        #[arg(long)]
        skip_analysis: bool,
    },
    /// stitch an already-tracked run's `interval_<i>/` subtrees in place.
    Stitch {
        root: PathBuf,
        #[arg(long)]
        keep_interval_dirs: bool,
    },
    /// run post-run analysis against an already-tracked (and, if
    /// multi-interval, already-stitched) run.
    Analyze {
        root: PathBuf,
        #[arg(long)]
        object: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Demo { out, intervals, steps_per_interval, step_seconds, grid_size, grid_spacing_m, skip_analysis } => {
            demo::run_demo(&demo::DemoOptions { out, intervals, steps_per_interval, step_seconds, grid_size, grid_spacing_m, run_analysis: !skip_analysis })
        }
        Command::Stitch { root, keep_interval_dirs } => {
            let report = thuner_stitch::stitch_run(&root, &thuner_stitch::StitchOptions { keep_interval_dirs, ..thuner_stitch::StitchOptions::default() })?;
            for object in &report.objects {
                tracing::info!(object = %object.object, frames = object.frame_count, ids = object.final_id_count, "stitched");
            }
            Ok(())
        }
        Command::Analyze { root, object } => {
            let paths = thuner_paths::Paths::new(&root);
            let options: thuner_analysis::AnalysisOptions = serde_yaml::from_str(&format!("object: {object}\n"))
                .map_err(|error| errors::CliError::Config(format!("failed to build analysis options: {error}")))?;
            let report = thuner_analysis::analyze_run(&paths, &options)?;
            tracing::info!(tracked = report.objects_tracked, passing_quality = report.objects_passing_quality, "analysis complete");
            Ok(())
        }
    }
}
