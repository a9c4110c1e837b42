use super::types::{Config, FilesConfig, NormalizeConfig};
use std::path::PathBuf;

/// AI Horde text model statistics
pub const DEFAULT_API_URL: &str = "https://aihorde.net/api/v2/stats/text/models";

pub const DEFAULT_DATA_DIR: &str = "user-files";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            top_n: 0,
            files: FilesConfig::default(),
            normalize: NormalizeConfig::default(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            snapshot: "RawModelUsageData.json".to_string(),
            whitelist: "models.csv".to_string(),
            csv: "usage_data.csv".to_string(),
            xlsx: "usage_data.xlsx".to_string(),
            top_csv: "usage_data_top.csv".to_string(),
        }
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            suffix_match: false,
            strip_quantization: false,
            merge_duplicates: true,
        }
    }
}
