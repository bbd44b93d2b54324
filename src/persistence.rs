// File: src/persistence.rs
use crate::core::lexicon::Lexicon;
use crate::core::types::{CategoryWords, LexiconEntry};
use crate::error::StorageError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk form of the dictionary: one row per word, sorted by word.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    entries: Vec<LexiconEntry>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io { path: path.to_path_buf(), source }
}

/// Writes `lexicon` to `path` atomically: the snapshot goes to a temp file in the same
/// directory which is then renamed over the target.
pub fn save_to_disk(lexicon: &Lexicon, path: &Path) -> Result<(), StorageError> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(io_error(parent_dir))?;

    let state = SerializableState { entries: lexicon.entries() };

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_error(parent_dir))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        bincode::serialize_into(&mut writer, &state)
            .map_err(|source| StorageError::Encode { path: path.to_path_buf(), source })?;
        writer.flush().map_err(io_error(path))?;
    }
    temp_file.as_file().sync_all().map_err(io_error(path))?;

    temp_file.persist(path).map_err(|e| io_error(path)(e.error))?;
    Ok(())
}

/// Reads a snapshot written by [`save_to_disk`]. A missing file is an empty lexicon.
pub fn load_from_disk(path: &Path) -> Result<Lexicon, StorageError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Lexicon::new()),
        Err(e) => return Err(io_error(path)(e)),
    };
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::deserialize_from(reader)
        .map_err(|source| StorageError::Decode { path: path.to_path_buf(), source })?;

    Ok(Lexicon::from_entries(state.entries))
}

/// Reads a `{category: [words]}` JSON document.
pub fn read_categories_json(path: &Path) -> Result<CategoryWords, StorageError> {
    let raw = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&raw).map_err(|source| StorageError::Json { path: path.to_path_buf(), source })
}

/// Writes a `{category: [words]}` JSON document, pretty-printed.
pub fn write_categories_json(categories: &CategoryWords, path: &Path) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(categories)
        .map_err(|source| StorageError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, json).map_err(io_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryWords {
        let mut categories = CategoryWords::new();
        categories.insert("positive_emotion".into(), vec!["happy".into(), "joy".into()]);
        categories.insert("negative_emotion".into(), vec!["sad".into()]);
        categories
    }

    #[test]
    fn snapshot_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lexicon.bin");
        let lexicon = Lexicon::from_categories(&sample());

        save_to_disk(&lexicon, &path).unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), lexicon);
    }

    #[test]
    fn missing_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lexicon = load_from_disk(&dir.path().join("absent.bin")).unwrap();
        assert!(lexicon.is_empty());
    }

    #[test]
    fn garbage_snapshot_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.bin");
        fs::write(&path, b"abc").unwrap();
        assert!(matches!(load_from_disk(&path), Err(StorageError::Decode { .. })));
    }

    #[test]
    fn categories_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        write_categories_json(&sample(), &path).unwrap();
        assert_eq!(read_categories_json(&path).unwrap(), sample());
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        fs::write(&path, r#"{"social": "friend"}"#).unwrap();
        assert!(matches!(read_categories_json(&path), Err(StorageError::Json { .. })));
    }
}
