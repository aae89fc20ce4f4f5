pub mod candidates;
pub mod generate;
pub mod models;

use demopitch::config::{Config, API_KEY_KEY};

/// `--api-key` when given, otherwise `GOOGLE_API_KEY` from the environment or
/// `secrets.yaml`. Empty when neither is set.
pub(crate) fn resolve_api_key(config: &Config, flag: Option<String>) -> String {
    flag.or_else(|| config.get_secret::<String>(API_KEY_KEY).ok())
        .unwrap_or_default()
}
