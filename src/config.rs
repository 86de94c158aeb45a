//! Project layout: where lists, configs, templates and audio live.
//!
//! A layout is assembled once at startup and handed to
//! [`ArtifactPaths::resolve`](crate::paths::ArtifactPaths::resolve). The
//! defaults match the standard recipe tree:
//!
//! ```text
//! <root>/
//! ├── conf/
//! │   ├── default/   # speaker_default_<rate>.yml, pair_default.yml
//! │   ├── speaker/   # <speaker>.yml
//! │   ├── pair/      # <source>-<target>.yml
//! │   └── figure/    # F0 histograms
//! ├── data/
//! │   ├── wav/<speaker>/*.wav
//! │   └── pair/<source>-<target>/
//! └── list/          # <speaker>_train.list, <speaker>_eval.list
//! ```
//!
//! Any field can be overridden from a JSON file; missing fields keep
//! their defaults. Relative directories are joined onto `root`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::InitError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectLayout {
    /// Recipe root; every other directory is resolved against it.
    pub root: PathBuf,
    pub conf_dir: PathBuf,
    pub data_dir: PathBuf,
    pub list_dir: PathBuf,
    /// Subdirectory of `data_dir` holding one folder per speaker.
    pub wav_subdir: String,
    /// Subdirectory of `data_dir` reserved for pair-specific data.
    pub pair_data_subdir: String,
    pub speaker_conf_subdir: String,
    pub pair_conf_subdir: String,
    pub template_subdir: String,
    pub figure_subdir: String,
    /// Stem prefix of the speaker template; the sampling rate is appended.
    pub speaker_template_prefix: String,
    pub pair_template_stem: String,
    pub list_extension: String,
    pub config_extension: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            conf_dir: PathBuf::from("conf"),
            data_dir: PathBuf::from("data"),
            list_dir: PathBuf::from("list"),
            wav_subdir: "wav".to_string(),
            pair_data_subdir: "pair".to_string(),
            speaker_conf_subdir: "speaker".to_string(),
            pair_conf_subdir: "pair".to_string(),
            template_subdir: "default".to_string(),
            figure_subdir: "figure".to_string(),
            speaker_template_prefix: "speaker_default_".to_string(),
            pair_template_stem: "pair_default".to_string(),
            list_extension: "list".to_string(),
            config_extension: "yml".to_string(),
        }
    }
}

impl ProjectLayout {
    /// Default layout under `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Load a layout override from a JSON file.
    ///
    /// When the file does not set `root`, `fallback_root` is used.
    pub fn from_json_file(path: &Path, fallback_root: &Path) -> Result<Self, InitError> {
        let content = std::fs::read_to_string(path).map_err(|source| InitError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| InitError::Layout(format!("{}: {e}", path.display())))?;
        let has_root = value.get("root").is_some();

        let mut layout: ProjectLayout = serde_json::from_value(value)
            .map_err(|e| InitError::Layout(format!("{}: {e}", path.display())))?;
        if !has_root {
            layout.root = fallback_root.to_path_buf();
        }
        log::debug!("Loaded layout from {}: {layout:?}", path.display());
        Ok(layout)
    }

    pub fn conf_dir(&self) -> PathBuf {
        self.root.join(&self.conf_dir)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    pub fn list_dir(&self) -> PathBuf {
        self.root.join(&self.list_dir)
    }

    pub fn wav_dir(&self) -> PathBuf {
        self.data_dir().join(&self.wav_subdir)
    }
}
