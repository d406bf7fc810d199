//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HEADER: &str = "genus,species,lineage,decimal_latitude,decimal_longitude\n";

/// Occurrence rows used across the integration suites.
pub const EXAMPLE_ROWS: &str = "\
Egernia,stokesii,north,-22.5,118.2
Egernia,stokesii,south,-31.9,115.8
Ctenotus,pantherinus,,-20.1,130.4
Egernia,stokesii,north,-23.0,119.0
Ctenotus,pantherinus,NA,NA,NA
Ctenotus,pantherinus,west,abc,121.0
Varanus,gouldii,L1,-25.3,134.1
";

/// Test context builder for setting up test environments
pub struct TestContextBuilder {
    temp_dir: TempDir,
    records: Option<String>,
    base_map: Option<(String, Vec<u8>)>,
    initial_files: Vec<(PathBuf, String)>,
}

impl TestContextBuilder {
    /// Create a new test context builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            records: None,
            base_map: None,
            initial_files: Vec::new(),
        })
    }

    /// Write `rows` below the standard header as `records.csv`
    pub fn with_records(mut self, rows: &str) -> Self {
        self.records = Some(format!("{HEADER}{rows}"));
        self
    }

    /// Write a valid polygon shapefile triple with the given stem
    pub fn with_base_map(mut self, stem: &str) -> Self {
        self.base_map = Some((stem.to_string(), polygon_header()));
        self
    }

    /// Add an initial file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.initial_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Build the test context
    pub fn build(self) -> Result<TestContext> {
        let path = self.temp_dir.path();

        if let Some(records) = &self.records {
            fs::write(path.join("records.csv"), records)?;
        }

        if let Some((stem, header)) = &self.base_map {
            write_shapefile(path, stem, header)?;
        }

        for (file_path, content) in self.initial_files {
            let full_path = path.join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full_path, content)?;
        }

        Ok(TestContext {
            temp_dir: self.temp_dir,
        })
    }
}

/// Test context that manages temporary directories and cleanup
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    /// Get the path to the test directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn records(&self) -> PathBuf {
        self.path().join("records.csv")
    }

    /// Read a file from the test directory
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.path().join(path))?)
    }

    /// Check if a file exists
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.path().join(path).exists()
    }
}

/// 100-byte polygon shapefile header with an Australian extent
pub fn polygon_header() -> Vec<u8> {
    let mut header = vec![0u8; 100];
    header[0..4].copy_from_slice(&9994i32.to_be_bytes());
    header[24..28].copy_from_slice(&50i32.to_be_bytes());
    header[28..32].copy_from_slice(&1000i32.to_le_bytes());
    header[32..36].copy_from_slice(&5i32.to_le_bytes());
    header[36..44].copy_from_slice(&112.9f64.to_le_bytes());
    header[44..52].copy_from_slice(&(-43.7f64).to_le_bytes());
    header[52..60].copy_from_slice(&153.6f64.to_le_bytes());
    header[60..68].copy_from_slice(&(-10.6f64).to_le_bytes());
    header
}

/// Write `<stem>.shp`, `<stem>.shx` and `<stem>.dbf` into `dir`
pub fn write_shapefile(dir: &Path, stem: &str, header: &[u8]) -> Result<PathBuf> {
    let shp = dir.join(format!("{stem}.shp"));
    fs::write(&shp, header)?;
    fs::write(dir.join(format!("{stem}.shx")), header)?;
    fs::write(dir.join(format!("{stem}.dbf")), b"")?;
    Ok(shp)
}
