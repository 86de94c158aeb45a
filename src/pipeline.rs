//! Stage orchestration.
//!
//! The three stages are independent and any non-empty subset may run.
//! Enabled stages always execute in ascending order. Nothing enforces the
//! operator-level ordering (figures read the train lists written by stage 1),
//! and a failing step leaves everything written before it in place so a
//! re-run picks up where the last one stopped.

use std::fmt;

use crate::manifest::build_manifest;
use crate::paths::ArtifactPaths;
use crate::template::materialize;
use crate::{Existing, F0RangeEstimator, InitError, SpeakerRole, UseSplit};

/// One of the three initialization stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Lists,
    Configs,
    Figures,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Lists, Stage::Configs, Stage::Figures];

    /// 1-based stage number as used on the command line.
    pub fn number(self) -> u8 {
        match self {
            Stage::Lists => 1,
            Stage::Configs => 2,
            Stage::Figures => 3,
        }
    }

    fn banner(self) -> &'static str {
        match self {
            Stage::Lists => "create initial list files",
            Stage::Configs => "create configure files",
            Stage::Figures => "create figures to define F0 range",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.banner())
    }
}

/// Which stages to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSelection {
    pub lists: bool,
    pub configs: bool,
    pub figures: bool,
}

impl StepSelection {
    pub fn all() -> Self {
        Self {
            lists: true,
            configs: true,
            figures: true,
        }
    }

    pub fn contains(&self, stage: Stage) -> bool {
        match stage {
            Stage::Lists => self.lists,
            Stage::Configs => self.configs,
            Stage::Figures => self.figures,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.lists || self.configs || self.figures)
    }

    /// Enabled stages in execution order.
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        Stage::ALL.into_iter().filter(|&stage| self.contains(stage))
    }
}

/// Drives the stages for one source/target pair.
pub struct Initializer {
    paths: ArtifactPaths,
}

impl Initializer {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Run every selected stage once, in ascending order.
    ///
    /// Fails with [`InitError::NoStepSelected`] before any filesystem access
    /// when `selection` is empty. Any other error aborts the run.
    pub fn run<E>(&self, selection: StepSelection, estimator: &mut E) -> Result<(), InitError>
    where
        E: F0RangeEstimator + ?Sized,
    {
        if selection.is_empty() {
            return Err(InitError::NoStepSelected);
        }

        for stage in selection.stages() {
            println!("### {stage} ###");
            log::info!(
                "Running stage {stage} for {} -> {}",
                self.paths.label(SpeakerRole::Source),
                self.paths.label(SpeakerRole::Target)
            );
            match stage {
                Stage::Lists => self.create_lists()?,
                Stage::Configs => self.create_configs()?,
                Stage::Figures => self.create_figures(estimator)?,
            }
        }
        Ok(())
    }

    fn create_lists(&self) -> Result<(), InitError> {
        for split in UseSplit::ALL {
            for role in SpeakerRole::ALL {
                build_manifest(
                    self.paths.list(role, split),
                    self.paths.audio_dir(role),
                    Existing::Keep,
                )?;
            }
        }
        println!("# Please modify train and eval list files, if you want. #");
        Ok(())
    }

    fn create_configs(&self) -> Result<(), InitError> {
        for role in SpeakerRole::ALL {
            materialize(
                self.paths.speaker_config(role),
                &self.paths.speaker_template,
                Existing::Keep,
            )?;
        }
        materialize(
            &self.paths.pair_config,
            &self.paths.pair_template,
            Existing::Keep,
        )?;
        Ok(())
    }

    fn create_figures<E>(&self, estimator: &mut E) -> Result<(), InitError>
    where
        E: F0RangeEstimator + ?Sized,
    {
        for role in SpeakerRole::ALL {
            let speaker = self.paths.label(role);
            estimator
                .estimate(
                    speaker,
                    self.paths.list(role, UseSplit::Train),
                    &self.paths.audio_root,
                    &self.paths.figure_dir,
                )
                .map_err(|source| InitError::Estimation {
                    speaker: speaker.to_string(),
                    source,
                })?;
        }
        println!("# Please modify f0 range values in speaker-dependent YAML files based on the figure #");
        Ok(())
    }
}
