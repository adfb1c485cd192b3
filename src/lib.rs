pub mod choice;
pub mod entry;
pub mod seed;
pub mod sweep;

mod config;
mod error;

pub use choice::{ModelType, OptimizerKind, PoolingStyle};
pub use config::{defaults, PipelineConfig, CONFIG_FILE_NAME, PRETRAIN_MODEL_PATH_ENV};
pub use entry::{ConfigKey, ConfigValue, ValueKind};
pub use error::ConfigError;

pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";
