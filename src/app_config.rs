use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    server: Server,
    redis: Redis,
    ipfs: Ipfs,
    startup: Startup,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn redis(&self) -> &Redis {
        &self.redis
    }

    pub fn ipfs(&self) -> &Ipfs {
        &self.ipfs
    }

    pub fn startup(&self) -> &Startup {
        &self.startup
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    address: String,
}

impl Server {
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[derive(Debug, Deserialize)]
pub struct Redis {
    url: String,
    database: String,
}

impl Redis {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the hash that holds every collection.
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[derive(Debug, Deserialize)]
pub struct Ipfs {
    url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Ipfs {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Startup {
    retry_ms: u64,
    #[serde(with = "humantime_serde")]
    retry_max_delay: Duration,
    max_attempts: usize,
}

impl Startup {
    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay(&self) -> Duration {
        self.retry_max_delay
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                server: Server {
                    address: "127.0.0.1:0".to_string(),
                },
                redis: Redis {
                    url: "redis://127.0.0.1:6379".to_string(),
                    database: "readings".to_string(),
                },
                ipfs: Ipfs {
                    url: "http://127.0.0.1:5001".to_string(),
                    timeout: Duration::from_secs(5),
                },
                startup: Startup {
                    retry_ms: 1,
                    retry_max_delay: Duration::from_millis(5),
                    max_attempts: 3,
                },
            },
        }
    }

    pub fn ipfs_url(mut self, url: String) -> Self {
        self.config.ipfs.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
