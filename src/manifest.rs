//! Utterance list generation.
//!
//! A list file names one utterance per line as `<speaker>/<stem>` (with the
//! host path separator), relative to the audio root. For a speaker `SPK`
//! whose directory holds `001.wav`, `002.wav` and `notes.txt`:
//!
//! ```text
//! SPK/001
//! SPK/002
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Existing, InitError, Outcome};

/// Extension (without the dot) of files that become list entries.
pub const AUDIO_EXTENSION: &str = "wav";

/// Write the utterance list for the speaker whose audio lives in `audio_dir`.
///
/// The speaker label is the last component of `audio_dir`. Entries are
/// sorted, so the output does not depend on directory enumeration order.
/// An existing `destination` is never rewritten; see [`Existing`].
pub fn build_manifest(
    destination: &Path,
    audio_dir: &Path,
    on_existing: Existing,
) -> Result<Outcome, InitError> {
    if destination.exists() {
        return match on_existing {
            Existing::Keep => {
                println!("The list file {} already exists.", destination.display());
                Ok(Outcome::Skipped)
            }
            Existing::Reject => Err(InitError::ArtifactExists(destination.to_path_buf())),
        };
    }

    if !audio_dir.is_dir() {
        return Err(InitError::AudioDirNotFound(audio_dir.to_path_buf()));
    }

    println!("Generate {}", destination.display());
    let entries = utterance_entries(audio_dir)?;
    log::debug!(
        "{} utterances found in {}",
        entries.len(),
        audio_dir.display()
    );

    let mut content = String::new();
    for entry in &entries {
        content.push_str(entry);
        content.push('\n');
    }
    fs::write(destination, content).map_err(|source| InitError::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    Ok(Outcome::Created)
}

/// Sorted `<speaker>/<stem>` entries for every `.wav` file in `audio_dir`.
pub fn utterance_entries(audio_dir: &Path) -> Result<Vec<String>, InitError> {
    let label = audio_dir
        .file_name()
        .ok_or_else(|| InitError::AudioDirNotFound(audio_dir.to_path_buf()))?;

    let read_err = |source| InitError::Read {
        path: audio_dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(audio_dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.extension() != Some(OsStr::new(AUDIO_EXTENSION)) || !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let relative: PathBuf = Path::new(label).join(stem);
        let line = relative
            .to_str()
            .ok_or_else(|| InitError::NonUtf8Path(path.clone()))?
            .to_string();
        entries.push(line);
    }

    entries.sort_unstable();
    Ok(entries)
}
