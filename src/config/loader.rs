use super::types::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the default config, falling back to defaults on any error
    pub fn load() -> Config {
        match Config::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Config::default().with_env_overrides()
            }
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from the default location, then apply environment overrides
    pub fn load() -> Result<Config> {
        let config_path = Self::get_config_path();

        let config = if config_path.exists() {
            ConfigLoader::load_from_path(&config_path)?
        } else {
            Config::default()
        };

        Ok(config.with_env_overrides())
    }

    /// Apply `HORDESTATS_API_URL` and `HORDESTATS_DIR`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("HORDESTATS_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }

        if let Ok(dir) = std::env::var("HORDESTATS_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir.trim());
            }
        }

        self
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::get_config_path())
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.config/hordestats/config.toml)
    pub fn get_config_path() -> PathBuf {
        if let Some(dir) = dirs::config_dir() {
            dir.join("hordestats").join("config.toml")
        } else {
            PathBuf::from(".hordestats/config.toml")
        }
    }

    /// Create the default config file if it doesn't exist
    pub fn init() -> Result<()> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url is empty".into()));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "api_url must be an http(s) URL: {}",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".into()));
        }

        let names = [
            ("files.snapshot", &self.files.snapshot),
            ("files.whitelist", &self.files.whitelist),
            ("files.csv", &self.files.csv),
            ("files.xlsx", &self.files.xlsx),
            ("files.top_csv", &self.files.top_csv),
        ];
        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(Error::Config(format!("{} is empty", key)));
            }
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        println!("{}", content);
        Ok(())
    }
}
