//! JSON document persistence for the profile sequence.
//!
//! The output is a pretty-printed JSON array of profiles. The optional
//! input document (`--in`) is the same shape, read back verbatim.

use std::path::Path;

use tracing::info;

use confscrape_shared::{ConfscrapeError, Profile, Result};

/// Write the profile sequence as a pretty-printed JSON array.
pub fn write_profiles(path: &Path, profiles: &[Profile]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(profiles)
        .map_err(|e| ConfscrapeError::Decode(format!("serializing profiles: {e}")))?;
    json.push('\n');

    std::fs::write(path, json).map_err(|e| ConfscrapeError::io(path, e))?;

    info!(path = %path.display(), count = profiles.len(), "wrote profile document");
    Ok(())
}

/// Read a profile sequence previously written by [`write_profiles`].
pub fn read_profiles(path: &Path) -> Result<Vec<Profile>> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfscrapeError::io(path, e))?;

    serde_json::from_str(&content)
        .map_err(|e| ConfscrapeError::Decode(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profiles() -> Vec<Profile> {
        vec![
            Profile {
                id: "1".into(),
                name: "Ada Lovelace".into(),
                title: "Engineer".into(),
                company: "Analytical Engines".into(),
                location: "United Kingdom".into(),
                linkedin_url: "https://linkedin.com/in/ada".into(),
                possible_linkedin_urls: vec!["https://linkedin.com/in/ada2".into()],
            },
            Profile {
                id: "2".into(),
                name: String::new(),
                ..Profile::default()
            },
        ]
    }

    #[test]
    fn roundtrip_preserves_the_sequence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("profiles.json");

        let profiles = sample_profiles();
        write_profiles(&path, &profiles).expect("write");
        let read_back = read_profiles(&path).expect("read");

        assert_eq!(read_back, profiles);
    }

    #[test]
    fn output_is_a_pretty_printed_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("profiles.json");

        write_profiles(&path, &sample_profiles()).expect("write");
        let content = std::fs::read_to_string(&path).expect("read file");

        assert!(content.starts_with("[\n"));
        assert!(content.ends_with("\n"));
        assert!(content.contains("\"name\": \"Ada Lovelace\""));
    }

    #[test]
    fn empty_sequence_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("profiles.json");

        write_profiles(&path, &[]).expect("write");
        assert!(read_profiles(&path).expect("read").is_empty());
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_profiles(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfscrapeError::Io { .. }));
    }

    #[test]
    fn malformed_input_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "{not json").expect("write file");

        let err = read_profiles(&path).unwrap_err();
        assert!(matches!(err, ConfscrapeError::Decode(_)));
    }
}
