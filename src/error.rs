use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("{0} already exists")]
    ArtifactExists(PathBuf),
    #[error("Audio directory not found: {0}. Place the speaker's WAV files under it first.")]
    AudioDirNotFound(PathBuf),
    #[error("Template configuration file not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("No step selected. Pass at least one of --step1, --step2, --step3.")]
    NoStepSelected,
    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
    #[error("Invalid layout file: {0}")]
    Layout(String),
    #[error("F0 range estimation failed for speaker '{speaker}': {source}")]
    Estimation {
        speaker: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
