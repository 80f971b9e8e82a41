pub mod catalog;
pub mod config;
pub mod feed;
pub mod metrics;
pub mod populate;
pub mod testing;

pub use catalog::{
    GameDraft, GameFilter, GameRecord, GameStore, SqliteGameStore, StoreError, ValidationError,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    FeedsConfig, ServerConfig,
};
pub use feed::{load_catalog_feeds, load_feed, FeedDocument, FeedEntry, FeedError};
pub use populate::{PopulateError, PopulateSummary, Populator};
