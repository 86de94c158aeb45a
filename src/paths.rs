use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::ProjectLayout;
use crate::{SpeakerRole, UseSplit};

/// Every path the initializer reads or writes for one conversion pair.
///
/// Resolution is pure: nothing here touches the filesystem, and nothing is
/// checked for existence until a stage actually uses the path.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    labels: HashMap<SpeakerRole, String>,
    lists: HashMap<(SpeakerRole, UseSplit), PathBuf>,
    speaker_configs: HashMap<SpeakerRole, PathBuf>,
    audio_dirs: HashMap<SpeakerRole, PathBuf>,
    pub sampling_rate: u32,
    pub pair_config: PathBuf,
    pub speaker_template: PathBuf,
    pub pair_template: PathBuf,
    pub audio_root: PathBuf,
    pub figure_dir: PathBuf,
    /// Reserved for pair-specific training data; never written here.
    pub pair_data_dir: PathBuf,
}

impl ArtifactPaths {
    pub fn resolve(
        layout: &ProjectLayout,
        source: &str,
        target: &str,
        sampling_rate: u32,
    ) -> Self {
        let conf_dir = layout.conf_dir();
        let list_dir = layout.list_dir();
        let audio_root = layout.wav_dir();
        let pair = format!("{source}-{target}");
        let yml = |stem: &str| format!("{stem}.{}", layout.config_extension);

        let labels: HashMap<SpeakerRole, String> = [
            (SpeakerRole::Source, source.to_string()),
            (SpeakerRole::Target, target.to_string()),
        ]
        .into_iter()
        .collect();

        let mut lists = HashMap::new();
        let mut speaker_configs = HashMap::new();
        let mut audio_dirs = HashMap::new();
        for (&role, label) in &labels {
            for split in UseSplit::ALL {
                let file = format!("{label}_{split}.{}", layout.list_extension);
                lists.insert((role, split), list_dir.join(file));
            }
            speaker_configs.insert(
                role,
                conf_dir.join(&layout.speaker_conf_subdir).join(yml(label)),
            );
            audio_dirs.insert(role, audio_root.join(label));
        }

        let template_dir = conf_dir.join(&layout.template_subdir);
        Self {
            labels,
            lists,
            speaker_configs,
            audio_dirs,
            sampling_rate,
            pair_config: conf_dir.join(&layout.pair_conf_subdir).join(yml(&pair)),
            speaker_template: template_dir.join(yml(&format!(
                "{}{sampling_rate}",
                layout.speaker_template_prefix
            ))),
            pair_template: template_dir.join(yml(&layout.pair_template_stem)),
            figure_dir: conf_dir.join(&layout.figure_subdir),
            pair_data_dir: layout.data_dir().join(&layout.pair_data_subdir).join(&pair),
            audio_root,
        }
    }

    pub fn label(&self, role: SpeakerRole) -> &str {
        &self.labels[&role]
    }

    /// `<list-dir>/<speaker>_<split>.list`
    pub fn list(&self, role: SpeakerRole, split: UseSplit) -> &Path {
        &self.lists[&(role, split)]
    }

    /// `<conf-dir>/speaker/<speaker>.yml`
    pub fn speaker_config(&self, role: SpeakerRole) -> &Path {
        &self.speaker_configs[&role]
    }

    /// `<data-dir>/wav/<speaker>`
    pub fn audio_dir(&self, role: SpeakerRole) -> &Path {
        &self.audio_dirs[&role]
    }
}
