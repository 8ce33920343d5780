//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory name under the config root.
const APP_DIR: &str = "filmgrid";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// In order of preference:
/// - `{dir}/config.toml` when `--dir` was given,
/// - `$XDG_CONFIG_HOME/filmgrid/config.toml`,
/// - `~/.config/filmgrid/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    config_path_from(dir.map(PathBuf::as_path), xdg.as_deref(), home.as_deref())
}

fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    // An empty XDG_CONFIG_HOME counts as unset.
    if let Some(root) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(root.join(APP_DIR).join(CONFIG_FILE));
    }
    match home {
        Some(h) => Ok(h.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("HOME environment variable is not set"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_dir_wins() {
        // Arrange
        let dir = Path::new("/tmp/filmgrid-work");

        // Act
        let path = config_path_from(Some(dir), Some(Path::new("/xdg")), Some(Path::new("/home/u")))
            .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/filmgrid-work/config.toml"));
    }

    #[test]
    fn test_xdg_config_home() {
        // Arrange & Act
        let path =
            config_path_from(None, Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/filmgrid/config.toml"));
    }

    #[test]
    fn test_empty_xdg_falls_back_to_home() {
        // Arrange & Act
        let path = config_path_from(None, Some(Path::new("")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/filmgrid/config.toml"));
    }

    #[test]
    fn test_no_home() {
        // Arrange & Act
        let result = config_path_from(None, None, None);

        // Assert
        assert!(result.unwrap_err().to_string().contains("HOME"));
    }

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/filmgrid-work");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert!(path.ends_with("filmgrid-work/config.toml"));
    }
}
