//! ZIP backup and restore
//!
//! A backup archives the entire data directory (topics, markdown
//! bodies, review logs, streaks, settings) plus a metadata entry
//! describing the archive.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::topics::{Result, TopicStoreError};

/// Name of the metadata entry stored inside each archive
pub const METADATA_FILE: &str = "_backup_metadata.json";

/// Backup metadata stored in the ZIP file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub topic_count: usize,
    pub review_log_count: usize,
}

/// Export the data directory to a ZIP file
pub fn create_backup(data_dir: &Path, output_path: &Path) -> Result<BackupMetadata> {
    let file = File::create(output_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut topic_count = 0;
    let mut review_log_count = 0;

    for entry in WalkDir::new(data_dir) {
        let entry = entry.map_err(|e| TopicStoreError::Io(std::io::Error::other(e.to_string())))?;
        let path = entry.path();

        let relative_path = path
            .strip_prefix(data_dir)
            .map_err(|_| TopicStoreError::Io(std::io::Error::other("Failed to get relative path")))?;

        if path.is_file() {
            let path_str = relative_path.to_string_lossy();
            if path_str.starts_with("topics/") && path_str.ends_with(".json") {
                topic_count += 1;
            } else if path_str.starts_with("reviews/") && path_str.ends_with(".json") {
                review_log_count += 1;
            }

            let name = relative_path.to_string_lossy();
            zip.start_file(name.as_ref(), options)?;

            let mut file_content = Vec::new();
            File::open(path)?.read_to_end(&mut file_content)?;
            zip.write_all(&file_content)?;
        } else if path.is_dir() && path != data_dir {
            let name = format!("{}/", relative_path.to_string_lossy());
            zip.add_directory(name.as_str(), options)?;
        }
    }

    let metadata = BackupMetadata {
        version: "1.0".to_string(),
        created_at: Utc::now(),
        topic_count,
        review_log_count,
    };

    let metadata_json = serde_json::to_string_pretty(&metadata)?;
    zip.start_file(METADATA_FILE, options)?;
    zip.write_all(metadata_json.as_bytes())?;

    zip.finish()?;

    Ok(metadata)
}

/// Restore a backup archive into a data directory
///
/// Refuses to run when the directory holds anything at all, topics or
/// not; restore into a fresh directory instead of merging over existing
/// data.
pub fn restore_backup(zip_path: &Path, data_dir: &Path) -> Result<BackupMetadata> {
    let metadata = backup_info(zip_path)?;

    if data_dir.exists() && fs::read_dir(data_dir)?.next().is_some() {
        return Err(TopicStoreError::InvalidOperation(
            "data directory is not empty; restore into a fresh directory".to_string(),
        ));
    }

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;

    fs::create_dir_all(data_dir)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();

        // The metadata entry is not part of the data tree
        if name == METADATA_FILE {
            continue;
        }

        let outpath = match file.enclosed_name() {
            Some(p) => data_dir.join(p),
            None => {
                log::warn!("Skipping backup entry with unsafe path: {}", name);
                continue;
            }
        };

        if name.ends_with('/') {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
        }
    }

    Ok(metadata)
}

/// Read backup metadata from a ZIP file without extracting it
pub fn backup_info(zip_path: &Path) -> Result<BackupMetadata> {
    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;

    if let Some(index) = archive.index_for_name(METADATA_FILE) {
        let mut metadata_file = archive.by_index(index)?;
        let mut contents = String::new();
        metadata_file.read_to_string(&mut contents)?;
        let metadata: BackupMetadata = serde_json::from_str(&contents)?;
        return Ok(metadata);
    }

    // Archive without a metadata entry: count the files instead
    let mut topic_count = 0;
    let mut review_log_count = 0;

    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        let name = file.name();
        if name.starts_with("topics/") && name.ends_with(".json") {
            topic_count += 1;
        } else if name.starts_with("reviews/") && name.ends_with(".json") {
            review_log_count += 1;
        }
    }

    Ok(BackupMetadata {
        version: "unknown".to_string(),
        created_at: DateTime::<Utc>::MIN_UTC,
        topic_count,
        review_log_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FixedClock;
    use crate::topics::{CreateTopicRequest, TopicStore};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn seeded_store(dir: &Path) -> TopicStore {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let store = TopicStore::with_clock(dir.to_path_buf(), Box::new(FixedClock(now)));
        let topic = store
            .create_topic(CreateTopicRequest {
                title: "Ohm's law".to_string(),
                tags: vec!["physics".to_string()],
                content: Some("V = IR\n".to_string()),
            })
            .unwrap();
        store.submit_review(topic.id).unwrap();
        store
    }

    #[test]
    fn test_backup_round_trip() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        seeded_store(&data_dir);

        let zip_path = temp.path().join("backup.zip");
        let metadata = create_backup(&data_dir, &zip_path).unwrap();
        assert_eq!(metadata.topic_count, 1);
        assert_eq!(metadata.review_log_count, 1);

        let restore_dir = temp.path().join("restored");
        let restored = restore_backup(&zip_path, &restore_dir).unwrap();
        assert_eq!(restored.topic_count, 1);

        let store = TopicStore::new(restore_dir);
        let topics = store.list_topics().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "Ohm's law");
        assert_eq!(topics[0].review.current_stage, 1);
        assert_eq!(store.read_content(topics[0].id).unwrap(), "V = IR\n");
        assert_eq!(store.review_history(topics[0].id).unwrap().len(), 1);
    }

    #[test]
    fn test_backup_info_reads_metadata_without_extracting() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        seeded_store(&data_dir);

        let zip_path = temp.path().join("backup.zip");
        create_backup(&data_dir, &zip_path).unwrap();

        let info = backup_info(&zip_path).unwrap();
        assert_eq!(info.version, "1.0");
        assert_eq!(info.topic_count, 1);
    }

    #[test]
    fn test_restore_refuses_existing_topics() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        seeded_store(&data_dir);

        let zip_path = temp.path().join("backup.zip");
        create_backup(&data_dir, &zip_path).unwrap();

        let result = restore_backup(&zip_path, &data_dir);
        assert!(matches!(result, Err(TopicStoreError::InvalidOperation(_))));
    }

    #[test]
    fn test_restore_refuses_any_existing_files() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        seeded_store(&data_dir);

        let zip_path = temp.path().join("backup.zip");
        create_backup(&data_dir, &zip_path).unwrap();

        // A directory with only a settings file is still not fresh
        let target = temp.path().join("configured");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("settings.json"), "{}").unwrap();

        let result = restore_backup(&zip_path, &target);
        assert!(matches!(result, Err(TopicStoreError::InvalidOperation(_))));
        assert!(!target.join("topics").exists());
    }

    #[test]
    fn test_restore_skips_entries_outside_data_dir() {
        let temp = TempDir::new().unwrap();
        let zip_path = temp.path().join("crafted.zip");

        let file = File::create(&zip_path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        zip.start_file("../escape.txt", options).unwrap();
        zip.write_all(b"outside").unwrap();
        zip.start_file("topics/ok.json", options).unwrap();
        zip.write_all(b"{}").unwrap();
        zip.finish().unwrap();

        let restore_dir = temp.path().join("restored");
        restore_backup(&zip_path, &restore_dir).unwrap();

        assert!(restore_dir.join("topics").join("ok.json").exists());
        assert!(!temp.path().join("escape.txt").exists());
    }
}
