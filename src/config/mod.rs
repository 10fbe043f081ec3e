use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub snapshot: String,
    /// Seed for the timer target applied when `init` creates the database.
    /// The live target lives in the `timer_state` table afterwards.
    #[serde(default = "default_target_duration")]
    pub target_duration: String,
}

fn default_target_duration() -> String {
    "1h".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            snapshot: Self::snapshot_file().to_string_lossy().to_string(),
            target_duration: default_target_duration(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("uptimer")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".uptimer")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("uptimer.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("uptimer.sqlite")
    }

    /// Return the full path of the shared snapshot read by the widget surface
    pub fn snapshot_file() -> PathBuf {
        Self::config_dir().join("snapshot.json")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A malformed file degrades to defaults with a warning rather than
    /// aborting the command.
    pub fn load() -> Self {
        let path = Self::config_file();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Malformed config file; using defaults");
                Self::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable config file; using defaults");
                Self::default()
            }
        }
    }

    /// Persist the current configuration to the config file.
    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration, database and snapshot paths.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            snapshot: Self::snapshot_file().to_string_lossy().to_string(),
            target_duration: default_target_duration(),
        };

        // Write config file (skipped in test mode)
        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
