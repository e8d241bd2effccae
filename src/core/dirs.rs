use crate::core::error::{Result, ViewerError};
use std::path::PathBuf;

const APP_DIRECTORY: &str = "frontline-navigator";

/// Per-user configuration directory, honouring `XDG_CONFIG_HOME` on unix-likes
pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIRECTORY))
        .ok_or_else(|| ViewerError::config_error("Could not determine a configuration directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_config_directory_is_app_scoped() {
        let dir = get_config_directory().unwrap();
        assert!(dir.ends_with(APP_DIRECTORY));
    }
}
