//! `thuner_paths` replaces the global mutable config/output-directory
//! singleton the original tracker relies on with a `Paths` value that is
//! constructed once by the driver and threaded explicitly through the
//! core (track loop, attribute writer, mask writer, stitcher). Tests
//! build a `Paths` rooted at a `tempdir` instead of touching process-wide
//! state.

use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;

pub mod errors;
pub use errors::{PathsError, Result};

/// the on-disk layout of a single run, following the `<out>/...` tree
/// documented in the external interfaces section: `options/`, `masks/`,
/// `attributes/`, `records/`, and (pre-stitch) `interval_<i>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Paths { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options_dir(&self) -> PathBuf {
        self.root.join("options")
    }

    pub fn masks_dir(&self) -> PathBuf {
        self.root.join("masks")
    }

    pub fn attributes_dir(&self) -> PathBuf {
        self.root.join("attributes")
    }

    pub fn records_dir(&self) -> PathBuf {
        self.root.join("records")
    }

    pub fn filepaths_dir(&self) -> PathBuf {
        self.records_dir().join("filepaths")
    }

    pub fn regridder_weights_dir(&self) -> PathBuf {
        self.records_dir().join("regridder_weights")
    }

    /// directory of a single tracking interval before stitching.
    pub fn interval_dir(&self, index: usize) -> Self {
        Paths::new(self.root.join(format!("interval_{index}")))
    }

    pub fn attribute_table_path(&self, object: &str, member: Option<&str>, attribute_type: &str) -> PathBuf {
        match member {
            Some(member) => self.attributes_dir().join(object).join(member).join(format!("{attribute_type}.csv")),
            None => self.attributes_dir().join(object).join(format!("{attribute_type}.csv")),
        }
    }

    pub fn attribute_metadata_path(&self, object: &str, member: Option<&str>, attribute_type: &str) -> PathBuf {
        self.attribute_table_path(object, member, attribute_type).with_extension("yml")
    }

    pub fn mask_store_path(&self, object: &str) -> PathBuf {
        self.masks_dir().join(format!("{object}.zarr"))
    }

    /// ensures every top-level subtree exists; called once by the driver
    /// before the track loop starts writing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.options_dir(), self.masks_dir(), self.attributes_dir(), self.filepaths_dir(), self.regridder_weights_dir()] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

/// load a YAML options file from `paths.options_dir()/<name>.yml`, per the
/// external interface contract (`options/{data,grid,track,visualize,
/// analysis}.yml`).
pub fn load_yaml_options<T: DeserializeOwned>(paths: &Paths, name: &str) -> Result<T> {
    let path = paths.options_dir().join(format!("{name}.yml"));
    load_yaml_file(&path)
}

pub fn load_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&text).map_err(|source| PathsError::Yaml { path: path.display().to_string(), source })
}

/// load a RON fixture - used internally by tests and for the few
/// non-user-facing internal config values (mirrors `odin_build`'s
/// RON-based `define_load_config!` without the build-script/embedded-
/// resource machinery, which THUNER has no use for since it ships no web
/// assets).
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    ron::de::from_str(&text).map_err(|source| PathsError::Ron { path: path.display().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_layout() {
        let paths = Paths::new("/tmp/run_0");
        assert_eq!(paths.masks_dir(), PathBuf::from("/tmp/run_0/masks"));
        assert_eq!(paths.attribute_table_path("cell", None, "core"), PathBuf::from("/tmp/run_0/attributes/cell/core.csv"));
        assert_eq!(paths.attribute_table_path("mcs", Some("convective"), "core"), PathBuf::from("/tmp/run_0/attributes/mcs/convective/core.csv"));
        assert_eq!(paths.interval_dir(3).root(), Path::new("/tmp/run_0/interval_3"));
    }
}
