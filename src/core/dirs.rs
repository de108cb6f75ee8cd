use crate::core::error::{FleetError, Result};
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or(FleetError::ConfigDirectoryNotFound)
            })?,
        _ => dirs::config_dir().ok_or(FleetError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("git-fleet"))
}

/// `<config dir>/git-fleet/config.yml`
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_directory()?.join("config.yml"))
}

/// `~/.git-fleet.yml`, checked when the default file is missing
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".git-fleet.yml"))
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_default();
    if path == "~" {
        home()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else {
        PathBuf::from(path)
    }
}
