use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    3000
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("gamedex.db")
}

/// Feed source configuration: one JSON file per platform.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedsConfig {
    #[serde(default = "default_android_feed")]
    pub android: PathBuf,
    #[serde(default = "default_ios_feed")]
    pub ios: PathBuf,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            android: default_android_feed(),
            ios: default_ios_feed(),
        }
    }
}

fn default_android_feed() -> PathBuf {
    PathBuf::from("data/android.top100.json")
}

fn default_ios_feed() -> PathBuf {
    PathBuf::from("data/ios.top100.json")
}
