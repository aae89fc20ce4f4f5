use etcetera::{choose_app_strategy, AppStrategy, AppStrategyArgs};
use std::path::{Path, PathBuf};

/// Environment variable that relocates every directory under a single root.
pub const PATH_ROOT_ENV: &str = "DEMOPITCH_PATH_ROOT";

/// Used when the platform strategy cannot find a home directory.
const FALLBACK_ROOT: &str = ".demopitch";

/// The directories demopitch writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// `config.yaml` and `secrets.yaml`.
    Config,
    /// Logs.
    State,
}

impl AppDir {
    fn leaf(self) -> &'static str {
        match self {
            AppDir::Config => "config",
            AppDir::State => "state",
        }
    }

    pub fn path(self) -> PathBuf {
        if let Some(root) = std::env::var_os(PATH_ROOT_ENV) {
            return PathBuf::from(root).join(self.leaf());
        }

        let args = AppStrategyArgs {
            top_level_domain: "dev".to_string(),
            author: "DemoPitch".to_string(),
            app_name: "demopitch".to_string(),
        };
        match choose_app_strategy(args) {
            Ok(strategy) => match self {
                AppDir::Config => strategy.config_dir(),
                AppDir::State => strategy
                    .state_dir()
                    .unwrap_or_else(|| strategy.data_dir()),
            },
            Err(e) => {
                tracing::warn!(error = %e, "no home directory, using {}", FALLBACK_ROOT);
                PathBuf::from(FALLBACK_ROOT).join(self.leaf())
            }
        }
    }

    pub fn join(self, subpath: impl AsRef<Path>) -> PathBuf {
        self.path().join(subpath)
    }
}
