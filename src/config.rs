//! Minimal INI-style configuration file reader.
//!
//! ```text
//! # comment
//! global_key = value
//!
//! [Logging]
//! target = "file_and_terminal"
//! level = info
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::log::ConfigError;

#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    /// [`ConfigError::Read`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        Ok(Self::parse(&content))
    }

    /// Parses configuration text. Lines that are neither sections nor
    /// `key = value` pairs are skipped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut cfg = Self::default();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        cfg.globals.insert(key, value);
                    }
                    Some(sec) => {
                        cfg.sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        cfg
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(String::as_str)
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(String::as_str)
    }

    /// Non-empty value from `section`, falling back to a non-empty global key.
    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key)
            .filter(|s| !s.is_empty())
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# process-wide
level = error

[Logging]
target = "file"
path = ./out.log
queue_capacity =
"#;

    #[test]
    fn parses_sections_and_globals() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_global("level"), Some("error"));
        assert_eq!(cfg.get("Logging", "target"), Some("file"));
        assert_eq!(cfg.get("Logging", "path"), Some("./out.log"));
        assert_eq!(cfg.get("Missing", "path"), None);
    }

    #[test]
    fn non_empty_falls_back_to_globals() {
        let cfg = Config::parse(SAMPLE);
        assert_eq!(cfg.get_non_empty("Logging", "level"), Some("error"));
        assert_eq!(cfg.get_non_empty("Logging", "queue_capacity"), None);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/definitely/not/here.conf");
        assert!(matches!(err, Err(ConfigError::Read(_))));
    }
}
