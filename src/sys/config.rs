use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_download_directory")]
    pub download_directory: String,
    #[serde(default)]
    pub enable_logging: bool,
}

fn default_backend_url() -> String {
    "https://youtube-video-downloader-jgz9.onrender.com".to_string()
}

fn default_download_directory() -> String {
    ProjectDirs::from("com", "vidfetch", "vidfetch")
        .and_then(|_| {
            directories::UserDirs::new().map(|user_dirs| {
                user_dirs
                    .download_dir()
                    .map(|p| p.join("vidfetch"))
                    .unwrap_or_else(|| user_dirs.home_dir().join("Downloads").join("vidfetch"))
            })
        })
        .unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| ".".to_string());
            Path::new(&home).join("Downloads").join("vidfetch")
        })
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            download_directory: default_download_directory(),
            enable_logging: false,
        }
    }
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        ProjectDirs::from("com", "vidfetch", "vidfetch")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME")
                    .or_else(|_| std::env::var("USERPROFILE"))
                    .unwrap_or_else(|_| ".".to_string());
                Path::new(&home).join(".vidfetch").join("config.toml")
            })
    }

    pub fn get_log_path() -> PathBuf {
        ProjectDirs::from("com", "vidfetch", "vidfetch")
            .map(|proj_dirs| proj_dirs.data_dir().join("vidfetch.log"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME")
                    .or_else(|_| std::env::var("USERPROFILE"))
                    .unwrap_or_else(|_| ".".to_string());
                Path::new(&home).join(".vidfetch").join("vidfetch.log")
            })
    }

    pub fn load() -> Self {
        let path = Self::get_config_path();
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::get_config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = String::from("# vidfetch Configuration\n\n");

        content.push_str("# Base URL of the format/download backend.\n");
        content.push_str(&format!("backend_url = \"{}\"\n\n", self.backend_url));

        content.push_str("# The directory where downloaded files are written.\n");
        content.push_str(&format!(
            "download_directory = \"{}\"\n\n",
            self.download_directory
        ));

        content.push_str("# Whether to write a log file.\n");
        content.push_str(&format!("enable_logging = {}\n", self.enable_logging));

        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config: Config = toml::from_str("enable_logging = true").unwrap();
        assert!(config.enable_logging);
        assert_eq!(config.backend_url, default_backend_url());
        assert!(!config.download_directory.is_empty());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            backend_url: "http://localhost:5000".to_string(),
            download_directory: "/tmp/dl".to_string(),
            enable_logging: true,
        };
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.backend_url, config.backend_url);
        assert_eq!(back.download_directory, config.download_directory);
    }
}
