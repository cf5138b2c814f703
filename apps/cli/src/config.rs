// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration loaded from environment variables.

use std::path::{Path, PathBuf};

/// Environment variable naming the 3D model library root
pub const MODEL_LIB_ENV: &str = "KISYS3DMOD";

/// Tool configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Search root for the electronics tool's 3D model library, if any
    pub model_lib_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            model_lib_dir: resolve_model_lib_dir(
                std::env::var(MODEL_LIB_ENV).ok(),
                &default_model_lib_dirs(),
            ),
        }
    }
}

/// `KISYS3DMOD` wins when set; otherwise the default candidates are probed
/// in order and the first existing directory is taken.
fn resolve_model_lib_dir(env_value: Option<String>, defaults: &[PathBuf]) -> Option<PathBuf> {
    if let Some(dir) = env_value {
        return Some(PathBuf::from(dir));
    }
    defaults.iter().find(|d| d.is_dir()).cloned()
}

#[cfg(target_os = "windows")]
fn default_model_lib_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("C:/Program Files/KiCad/share/kicad/modules/packages3d"),
        PathBuf::from("C:/KiCad/share/kicad/modules/packages3d"),
    ]
}

#[cfg(target_os = "macos")]
fn default_model_lib_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/Library/Application Support/kicad/modules/packages3d"),
        PathBuf::from("/Applications/KiCad/KiCad.app/Contents/SharedSupport/modules/packages3d"),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_model_lib_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/share/kicad/modules/packages3d"),
        PathBuf::from("/usr/local/share/kicad/modules/packages3d"),
    ]
}

/// Resolve a relative input path against the executable's directory,
/// falling back to the current working directory.
pub fn resolve_input(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok());
    match base {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_env_value_wins_over_defaults() {
        let defaults = vec![std::env::temp_dir()];
        let dir = resolve_model_lib_dir(Some("/opt/models".to_string()), &defaults);
        assert_eq!(dir, Some(PathBuf::from("/opt/models")));
    }

    #[test]
    fn test_first_existing_default_wins() {
        let existing = std::env::temp_dir().join(format!("padup-cfg-{}", std::process::id()));
        fs::create_dir_all(&existing).unwrap();

        let defaults = vec![PathBuf::from("/padup-does-not-exist"), existing.clone()];
        assert_eq!(resolve_model_lib_dir(None, &defaults), Some(existing.clone()));

        fs::remove_dir_all(&existing).unwrap();
    }

    #[test]
    fn test_no_env_no_defaults_is_none() {
        let defaults = vec![PathBuf::from("/padup-does-not-exist")];
        assert_eq!(resolve_model_lib_dir(None, &defaults), None);
    }

    #[test]
    fn test_absolute_input_untouched() {
        let p = Path::new("/a/b/c.step");
        assert_eq!(resolve_input(p), PathBuf::from("/a/b/c.step"));
    }
}
