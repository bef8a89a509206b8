use std::env;
use std::fs;
use std::path::PathBuf;

/// Filesystem layout: where config, secrets and logs live.
///
/// Overrides:
/// - `VECTARA_CHAIN_ROOT`: directory holding a project-level `config.yml`
/// - `VECTARA_CHAIN_DATA_DIR`: user data directory (secrets, user config, logs)
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    pub fn from_env() -> Self {
        let project_root = env::var("VECTARA_CHAIN_ROOT")
            .map(PathBuf::from)
            .or_else(|_| env::current_dir())
            .unwrap_or_else(|_| PathBuf::from("."));

        let user_data_dir = env::var("VECTARA_CHAIN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                directories::ProjectDirs::from("io", "vectara", "vectara-chain")
                    .map(|dirs| dirs.data_dir().to_path_buf())
                    .unwrap_or_else(|| project_root.join(".vectara-chain"))
            });

        Self::with_dirs(project_root, user_data_dir)
    }

    /// Lay out paths under explicit directories, creating the data and log dirs.
    pub fn with_dirs(project_root: PathBuf, user_data_dir: PathBuf) -> Self {
        let log_dir = user_data_dir.join("logs");
        if let Err(err) = fs::create_dir_all(&log_dir) {
            tracing::warn!("Could not create {}: {}", log_dir.display(), err);
        }

        Self {
            secrets_path: user_data_dir.join("secrets.yaml"),
            project_root,
            user_data_dir,
            log_dir,
        }
    }
}
