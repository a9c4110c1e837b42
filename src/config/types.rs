use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, stored as `~/.config/hordestats/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stats endpoint queried on every run
    pub api_url: String,
    /// Directory holding the whitelist and every output file
    pub data_dir: PathBuf,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Rows per granularity in the top-models CSV, 0 disables it
    pub top_n: usize,
    pub files: FilesConfig,
    pub normalize: NormalizeConfig,
}

/// File names inside `data_dir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub snapshot: String,
    pub whitelist: String,
    pub csv: String,
    pub xlsx: String,
    pub top_csv: String,
}

/// Optional cleaning steps applied on top of the whitelist mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Map names whose short form ends with a whitelisted short name
    pub suffix_match: bool,
    /// Drop path prefixes and quantization suffixes from unmapped names
    pub strip_quantization: bool,
    /// Merge rows that end up with the same name
    pub merge_duplicates: bool,
}

impl Config {
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.snapshot)
    }

    pub fn whitelist_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.whitelist)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.csv)
    }

    pub fn xlsx_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.xlsx)
    }

    pub fn top_csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.top_csv)
    }
}
