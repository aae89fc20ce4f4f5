pub mod base;
pub mod paths;

pub use base::{Config, ConfigError, CONFIG_YAML_NAME, SECRETS_YAML_NAME};

pub const API_KEY_KEY: &str = "GOOGLE_API_KEY";
pub const HOST_KEY: &str = "GOOGLE_HOST";
pub const MODEL_KEY: &str = "DEMOPITCH_MODEL";
pub const HACKATHON_KEY: &str = "DEMOPITCH_HACKATHON";
pub const TIMEOUT_KEY: &str = "DEMOPITCH_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
