use std::path::PathBuf;

/// Per-application directory resolution
///
/// Follows the XDG base directory conventions on Unix-like systems and
/// APPDATA on Windows:
/// - Config: $XDG_CONFIG_HOME/{name} (default: ~/.config/{name})
/// - Data: $XDG_DATA_HOME/{name} (default: ~/.local/share/{name})
pub struct ProjectPaths {
    name: String,
}

impl ProjectPaths {
    /// Create a ProjectPaths for the given application name
    ///
    /// Returns None when no home directory can be determined.
    pub fn new(name: &str) -> Option<Self> {
        home_dir()?;
        Some(ProjectPaths {
            name: name.to_string(),
        })
    }

    /// Directory for configuration files
    pub fn config_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            windows_appdata().join(&self.name)
        }

        #[cfg(not(target_os = "windows"))]
        {
            env_dir("XDG_CONFIG_HOME", &[".config"]).join(&self.name)
        }
    }

    /// Directory for runtime data (logs, state dumps)
    pub fn data_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            windows_appdata().join(&self.name)
        }

        #[cfg(not(target_os = "windows"))]
        {
            env_dir("XDG_DATA_HOME", &[".local", "share"]).join(&self.name)
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .or_else(|| std::env::var("USERPROFILE").ok())
        .map(PathBuf::from)
}

/// Resolve an XDG directory variable, falling back to the given
/// home-relative components.
#[cfg(not(target_os = "windows"))]
fn env_dir(var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(dir) = std::env::var(var) {
        return PathBuf::from(dir);
    }
    let mut dir = home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in fallback {
        dir.push(part);
    }
    dir
}

#[cfg(target_os = "windows")]
fn windows_appdata() -> PathBuf {
    std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
