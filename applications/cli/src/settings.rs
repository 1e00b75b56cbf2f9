/// CLI configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Length of every simulated track
    #[serde(default = "default_simulated_track_ms")]
    pub simulated_track_ms: u64,

    /// Interval between simulated status updates
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` in the working
    /// directory is used when present. Environment variables prefixed with
    /// `CADENCE_` override both, with `__` between nested keys
    /// (`CADENCE_STORAGE__DATABASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("cadence.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        settings.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.playback.tick_ms == 0 {
            return Err(config::ConfigError::Message(
                "playback.tick_ms must be greater than zero".to_string(),
            ));
        }

        if self.playback.simulated_track_ms < self.playback.tick_ms {
            return Err(config::ConfigError::Message(
                "playback.simulated_track_ms must be at least one tick".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./cadence.db".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        simulated_track_ms: default_simulated_track_ms(),
        tick_ms: default_tick_ms(),
    }
}

fn default_simulated_track_ms() -> u64 {
    30_000
}

fn default_tick_ms() -> u64 {
    500
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "cadence=info,cadence_playback=info,cadence_storage=warn".to_string()
}
