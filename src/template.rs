use std::fs;
use std::path::Path;

use crate::{Existing, InitError, Outcome};

/// Create `destination` as a byte-for-byte copy of `template`.
///
/// An existing `destination` is never overwritten, so operator edits (tuned
/// F0 bounds and the like) survive re-runs. The parent directory of
/// `destination` must already exist.
pub fn materialize(
    destination: &Path,
    template: &Path,
    on_existing: Existing,
) -> Result<Outcome, InitError> {
    if destination.exists() {
        return match on_existing {
            Existing::Keep => {
                println!(
                    "The configuration file {} already exists.",
                    destination.display()
                );
                Ok(Outcome::Skipped)
            }
            Existing::Reject => Err(InitError::ArtifactExists(destination.to_path_buf())),
        };
    }

    if !template.is_file() {
        return Err(InitError::TemplateNotFound(template.to_path_buf()));
    }

    eprintln!("Generate {}", destination.display());
    let bytes = fs::copy(template, destination).map_err(|source| InitError::Write {
        path: destination.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Copied {} ({bytes} bytes) to {}",
        template.display(),
        destination.display()
    );
    Ok(Outcome::Created)
}

#[cfg(test)]
mod tests {
    use super::materialize;
    use crate::{Existing, InitError, Outcome};
    use std::fs;
    use tempfile::tempdir;

    const TEMPLATE: &[u8] = b"# speaker defaults\nminf0: 40\nmaxf0: 700\r\nnpow: -20\n";

    #[test]
    fn copy_is_byte_identical() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("speaker_default_22050.yml");
        let dest = dir.path().join("SF1.yml");
        fs::write(&template, TEMPLATE).unwrap();

        assert_eq!(
            materialize(&dest, &template, Existing::Keep).unwrap(),
            Outcome::Created
        );
        assert_eq!(fs::read(&dest).unwrap(), TEMPLATE);
        assert_eq!(fs::read(&template).unwrap(), TEMPLATE);
    }

    #[test]
    fn edited_config_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("pair_default.yml");
        let dest = dir.path().join("SF1-TF1.yml");
        fs::write(&template, TEMPLATE).unwrap();
        fs::write(&dest, "minf0: 120\n").unwrap();

        assert_eq!(
            materialize(&dest, &template, Existing::Keep).unwrap(),
            Outcome::Skipped
        );
        assert_eq!(fs::read_to_string(&dest).unwrap(), "minf0: 120\n");
    }

    #[test]
    fn existing_config_is_skipped_even_without_template() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("SF1.yml");
        fs::write(&dest, "kept\n").unwrap();

        let outcome = materialize(&dest, &dir.path().join("missing.yml"), Existing::Keep).unwrap();
        assert_eq!(outcome, Outcome::Skipped);
    }

    #[test]
    fn reject_policy_errors_on_existing_config() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("pair_default.yml");
        let dest = dir.path().join("SF1-TF1.yml");
        fs::write(&template, TEMPLATE).unwrap();
        fs::write(&dest, "mine\n").unwrap();

        let err = materialize(&dest, &template, Existing::Reject).unwrap_err();
        assert!(matches!(err, InitError::ArtifactExists(_)));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "mine\n");
    }

    #[test]
    fn missing_template_fails_without_writing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("SF1.yml");

        let err = materialize(&dest, &dir.path().join("speaker_default_8000.yml"), Existing::Keep)
            .unwrap_err();
        assert!(matches!(err, InitError::TemplateNotFound(_)));
        assert!(!dest.exists());
    }

    #[test]
    fn missing_parent_directory_names_the_destination() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("pair_default.yml");
        let dest = dir.path().join("pair").join("a-b.yml");
        fs::write(&template, TEMPLATE).unwrap();

        let err = materialize(&dest, &template, Existing::Keep).unwrap_err();
        assert!(matches!(err, InitError::Write { ref path, .. } if path == &dest));
        assert!(err.to_string().contains("a-b.yml"), "{err}");
    }
}
