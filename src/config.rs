use std::path::Path;

use crate::error::Error;

/// Project configuration loaded from `.objcdoc.toml`.
/// Include/exclude patterns are path prefixes applied to documentation
/// source files relative to the scan root.
pub struct Config {
    exclude: Vec<String>,
    extensions: Vec<String>,
    include: Vec<String>,
}

/// Raw TOML structure for `.objcdoc.toml`.
#[derive(serde::Deserialize)]
struct ObjcdocTomlConfig {
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
}

impl Config {
    /// Load config from `.objcdoc.toml` in the given root directory.
    /// Returns a default that scans everything if the file doesn't exist.
    /// Returns an error if the file exists but is malformed — never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".objcdoc.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::scan_everything_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: ObjcdocTomlConfig = toml::from_str(&content)?;
        let extensions = if raw.extensions.is_empty() {
            Self::default_extensions()
        } else {
            raw.extensions
        };

        Ok(Self {
            exclude: raw.exclude,
            extensions,
            include: raw.include,
        })
    }

    /// Default config that includes everything and excludes nothing.
    fn scan_everything_by_default() -> Self {
        Self {
            exclude: Vec::new(),
            extensions: Self::default_extensions(),
            include: Vec::new(),
        }
    }

    /// Documentation extensions scanned when the config names none.
    fn default_extensions() -> Vec<String> {
        return vec!["md".to_string(), "rst".to_string()];
    }

    /// Check whether a documentation file should be scanned.
    ///
    /// The extension must be in the configured list. A path is then included
    /// if no include patterns are set (scan everything), or if it starts
    /// with at least one include pattern; an included path is excluded if it
    /// starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &Path) -> bool {
        let ext = relative_path
            .extension()
            .and_then(|e| return e.to_str())
            .unwrap_or("");
        if !self.extensions.iter().any(|known| return known == ext) {
            return false;
        }

        let path_str = relative_path.to_string_lossy();
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return path_str.starts_with(p.as_str()));

        if !included {
            return false;
        }

        !self.exclude.iter().any(|p| return path_str.starts_with(p.as_str()))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn default_config_scans_doc_extensions_only() {
        let config = Config::scan_everything_by_default();
        assert!(config.should_scan(Path::new("docs/guide.md")));
        assert!(config.should_scan(Path::new("api.rst")));
        assert!(!config.should_scan(Path::new("src/lib.rs")));
    }

    #[test]
    fn include_and_exclude_are_prefix_filters() {
        let config = Config {
            exclude: vec!["docs/archive/".to_string()],
            extensions: Config::default_extensions(),
            include: vec!["docs/".to_string()],
        };

        assert!(config.should_scan(Path::new("docs/guide.md")));
        assert!(!config.should_scan(Path::new("notes/guide.md")));
        assert!(!config.should_scan(Path::new("docs/archive/old.md")));
    }
}
