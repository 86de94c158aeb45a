//! End-to-end runs of the initializer over a temporary recipe tree.
//!
//! A recording stub stands in for F0 estimation so stage selection and
//! idempotence can be checked without real audio.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};
use vc_init::config::ProjectLayout;
use vc_init::paths::ArtifactPaths;
use vc_init::pipeline::{Initializer, StepSelection};
use vc_init::{F0RangeEstimator, InitError, SpeakerRole, UseSplit};

const SPEAKER_TEMPLATE: &str = "minf0: 40\nmaxf0: 700\n";
const PAIR_TEMPLATE: &str = "jacc: 1\n";

#[derive(Default)]
struct RecordingEstimator {
    calls: Vec<(String, PathBuf, PathBuf, PathBuf)>,
    fail_for: Option<String>,
}

impl F0RangeEstimator for RecordingEstimator {
    fn estimate(
        &mut self,
        speaker: &str,
        train_list: &Path,
        audio_root: &Path,
        figure_dir: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_for.as_deref() == Some(speaker) {
            return Err(format!("cannot read audio for {speaker}").into());
        }
        self.calls.push((
            speaker.to_string(),
            train_list.to_path_buf(),
            audio_root.to_path_buf(),
            figure_dir.to_path_buf(),
        ));
        fs::create_dir_all(figure_dir)?;
        fs::write(figure_dir.join(format!("{speaker}_f0histogram.svg")), "<svg/>")?;
        Ok(())
    }
}

/// Recipe tree with templates, audio for SF1/TF1 and empty output dirs.
fn recipe() -> (TempDir, ArtifactPaths) {
    let dir = tempdir().unwrap();
    let root = dir.path();
    for sub in ["conf/default", "conf/speaker", "conf/pair", "list"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(
        root.join("conf/default/speaker_default_22050.yml"),
        SPEAKER_TEMPLATE,
    )
    .unwrap();
    fs::write(root.join("conf/default/pair_default.yml"), PAIR_TEMPLATE).unwrap();
    for speaker in ["SF1", "TF1"] {
        let wav_dir = root.join("data/wav").join(speaker);
        fs::create_dir_all(&wav_dir).unwrap();
        for name in ["100002.wav", "100001.wav", "README.txt"] {
            fs::write(wav_dir.join(name), b"").unwrap();
        }
    }

    let paths = ArtifactPaths::resolve(&ProjectLayout::rooted(root), "SF1", "TF1", 22050);
    (dir, paths)
}

/// Every regular file under `dir`, relative and sorted.
fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).unwrap().to_path_buf();
                out.push((rel, fs::read(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

fn only(lists: bool, configs: bool, figures: bool) -> StepSelection {
    StepSelection {
        lists,
        configs,
        figures,
    }
}

#[test]
fn full_run_creates_every_artifact() {
    let (_dir, paths) = recipe();
    let mut estimator = RecordingEstimator::default();

    Initializer::new(paths.clone())
        .run(StepSelection::all(), &mut estimator)
        .unwrap();

    let sep = std::path::MAIN_SEPARATOR;
    for role in SpeakerRole::ALL {
        let label = paths.label(role);
        let expected = format!("{label}{sep}100001\n{label}{sep}100002\n");
        for split in UseSplit::ALL {
            assert_eq!(fs::read_to_string(paths.list(role, split)).unwrap(), expected);
        }
        assert_eq!(
            fs::read_to_string(paths.speaker_config(role)).unwrap(),
            SPEAKER_TEMPLATE
        );
    }
    assert_eq!(fs::read_to_string(&paths.pair_config).unwrap(), PAIR_TEMPLATE);

    let speakers: Vec<&str> = estimator.calls.iter().map(|c| c.0.as_str()).collect();
    assert_eq!(speakers, vec!["SF1", "TF1"]);
    let (_, list, audio_root, figure_dir) = &estimator.calls[1];
    assert_eq!(list, paths.list(SpeakerRole::Target, UseSplit::Train));
    assert_eq!(audio_root, &paths.audio_root);
    assert_eq!(figure_dir, &paths.figure_dir);
    assert!(!paths.pair_data_dir.exists());
}

#[test]
fn rerun_preserves_generated_and_edited_artifacts() {
    let (dir, paths) = recipe();
    let init = Initializer::new(paths.clone());
    init.run(only(true, true, false), &mut RecordingEstimator::default())
        .unwrap();

    let sep = std::path::MAIN_SEPARATOR;
    let eval = paths.list(SpeakerRole::Source, UseSplit::Eval);
    fs::write(eval, format!("SF1{sep}100002\n")).unwrap();
    fs::write(paths.speaker_config(SpeakerRole::Target), "minf0: 150\n").unwrap();
    fs::write(paths.audio_dir(SpeakerRole::Source).join("100003.wav"), b"").unwrap();
    let before = snapshot(dir.path());

    init.run(only(true, true, false), &mut RecordingEstimator::default())
        .unwrap();

    assert_eq!(snapshot(dir.path()), before);
    assert_eq!(fs::read_to_string(eval).unwrap(), format!("SF1{sep}100002\n"));
}

#[test]
fn configs_only_touches_no_lists_or_figures() {
    let (dir, paths) = recipe();
    let before = snapshot(dir.path());
    let mut estimator = RecordingEstimator::default();

    Initializer::new(paths.clone())
        .run(only(false, true, false), &mut estimator)
        .unwrap();

    let after = snapshot(dir.path());
    let added: Vec<&PathBuf> = after
        .iter()
        .filter(|entry| !before.contains(entry))
        .map(|(path, _)| path)
        .collect();
    assert_eq!(
        added,
        vec![
            &Path::new("conf").join("pair").join("SF1-TF1.yml"),
            &Path::new("conf").join("speaker").join("SF1.yml"),
            &Path::new("conf").join("speaker").join("TF1.yml"),
        ]
    );
    assert!(estimator.calls.is_empty());
    assert!(!paths.figure_dir.exists());
}

#[test]
fn lists_and_figures_skip_configs() {
    let (_dir, paths) = recipe();
    let mut estimator = RecordingEstimator::default();

    Initializer::new(paths.clone())
        .run(only(true, false, true), &mut estimator)
        .unwrap();

    for role in SpeakerRole::ALL {
        assert!(paths.list(role, UseSplit::Train).exists());
        assert!(!paths.speaker_config(role).exists());
        assert!(paths
            .figure_dir
            .join(format!("{}_f0histogram.svg", paths.label(role)))
            .exists());
    }
    assert!(!paths.pair_config.exists());
    assert_eq!(estimator.calls.len(), 2);
}

#[test]
fn empty_selection_fails_before_any_write() {
    let (dir, paths) = recipe();
    let before = snapshot(dir.path());
    let mut estimator = RecordingEstimator::default();

    let err = Initializer::new(paths)
        .run(StepSelection::default(), &mut estimator)
        .unwrap_err();

    assert!(matches!(err, InitError::NoStepSelected));
    assert_eq!(snapshot(dir.path()), before);
    assert!(estimator.calls.is_empty());
}

#[test]
fn missing_speaker_audio_aborts_lists() {
    let (dir, _) = recipe();
    let paths = ArtifactPaths::resolve(&ProjectLayout::rooted(dir.path()), "SF1", "XX9", 22050);

    let err = Initializer::new(paths.clone())
        .run(only(true, false, false), &mut RecordingEstimator::default())
        .unwrap_err();

    assert!(matches!(err, InitError::AudioDirNotFound(ref p) if p == paths.audio_dir(SpeakerRole::Target)));
    // Written before the failure and kept for the next run.
    assert!(paths.list(SpeakerRole::Source, UseSplit::Train).exists());
    assert!(!paths.list(SpeakerRole::Target, UseSplit::Train).exists());
    assert!(!paths.list(SpeakerRole::Source, UseSplit::Eval).exists());
}

#[test]
fn missing_template_aborts_configs() {
    let (dir, _) = recipe();
    let paths = ArtifactPaths::resolve(&ProjectLayout::rooted(dir.path()), "SF1", "TF1", 44100);

    let err = Initializer::new(paths.clone())
        .run(only(false, true, false), &mut RecordingEstimator::default())
        .unwrap_err();

    assert!(matches!(err, InitError::TemplateNotFound(ref p) if p == &paths.speaker_template));
    assert!(!paths.speaker_config(SpeakerRole::Source).exists());
}

#[test]
fn estimator_failure_names_the_speaker() {
    let (_dir, paths) = recipe();
    let mut estimator = RecordingEstimator {
        fail_for: Some("TF1".to_string()),
        ..Default::default()
    };

    let err = Initializer::new(paths)
        .run(StepSelection::all(), &mut estimator)
        .unwrap_err();

    match err {
        InitError::Estimation { speaker, source } => {
            assert_eq!(speaker, "TF1");
            assert_eq!(source.to_string(), "cannot read audio for TF1");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(estimator.calls.len(), 1);
}

#[cfg(feature = "histogram")]
#[test]
fn figures_without_train_list_report_the_list_path() {
    use vc_init::estimators::histogram::HistogramEstimator;

    let (_dir, paths) = recipe();
    let err = Initializer::new(paths.clone())
        .run(only(false, false, true), &mut HistogramEstimator::default())
        .unwrap_err();

    assert!(matches!(err, InitError::Estimation { ref speaker, .. } if speaker == "SF1"));
    let message = err.to_string();
    assert!(message.contains("SF1_train.list"), "{message}");
    assert!(!paths.figure_dir.exists());
}
