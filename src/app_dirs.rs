use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("guess-the-word");
            Some(state_dir.join("game.log"))
        } else {
            ProjectDirs::from("", "", "guess-the-word")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("game.log"))
        }
    }
}
