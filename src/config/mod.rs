//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppInfo, DatabaseConfig, ErrorMapping, LogFormat, LoggingConfig, ServerConfig,
    StorageConfig,
};
