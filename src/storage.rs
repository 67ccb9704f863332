// File: ./src/storage.rs
// JSON row persistence in the platform data dir
use crate::model::{CellValue, Record};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

pub struct LocalStorage;

impl LocalStorage {
    fn get_path() -> Option<PathBuf> {
        if let Some(proj) = ProjectDirs::from("com", "trougnouf", "gridate") {
            let data_dir = proj.data_dir();
            if !data_dir.exists() {
                let _ = fs::create_dir_all(data_dir);
            }
            return Some(data_dir.join("rows.json"));
        }
        None
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    pub fn save(rows: &[Record]) -> Result<()> {
        if let Some(path) = Self::get_path() {
            let json = serde_json::to_string_pretty(rows)?;
            Self::atomic_write(path, json)?;
        }
        Ok(())
    }

    pub fn save_to(path: &Path, rows: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(rows)?;
        Self::atomic_write(path, json)
    }

    pub fn load() -> Result<Vec<Record>> {
        if let Some(path) = Self::get_path()
            && path.exists()
        {
            // If the file exists but is empty/corrupt, ignore error and return empty vec
            if let Ok(json) = fs::read_to_string(path)
                && let Ok(rows) = serde_json::from_str::<Vec<Record>>(&json)
            {
                return Ok(rows);
            }
        }
        Ok(vec![])
    }

    pub fn load_from(path: &Path) -> Result<Vec<Record>> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn row(pairs: &[(&str, CellValue)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Seed rows shown the first time the dashboard runs, before any data file
/// exists. Shaped like a small production-tracking board with DD/MM/YYYY
/// start/due columns.
pub fn sample_records() -> Vec<Record> {
    vec![
        row(&[
            ("project", text("AQU")),
            ("shot", text("ep01_sh010")),
            ("task_status", text("WIP")),
            ("start_date", text("06/01/2025")),
            ("due_date", text("17/01/2025")),
            ("frames", CellValue::Number(96.0)),
        ]),
        row(&[
            ("project", text("AQU")),
            ("shot", text("ep01_sh020")),
            ("task_status", text("Review")),
            ("start_date", text("13/01/2025")),
            ("due_date", text("24/01/2025")),
            ("frames", CellValue::Number(120.0)),
        ]),
        row(&[
            ("project", text("AQU")),
            ("shot", text("ep01_sh030")),
            ("task_status", text("Todo")),
            ("start_date", text("20/01/2025")),
            ("due_date", text("31/01/2025")),
            ("frames", CellValue::Number(72.0)),
        ]),
        row(&[
            ("project", text("BRM")),
            ("shot", text("ep02_sh110")),
            ("task_status", text("Done")),
            ("start_date", text("02/12/2024")),
            ("due_date", text("20/12/2024")),
            ("frames", CellValue::Number(48.0)),
        ]),
        row(&[
            ("project", text("BRM")),
            ("shot", text("ep02_sh120")),
            ("task_status", text("WIP")),
            ("start_date", text("06/01/2025")),
            ("due_date", CellValue::Null),
            ("frames", CellValue::Number(200.0)),
        ]),
    ]
}
