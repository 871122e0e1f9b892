use std::fs;
use std::io::ErrorKind;
use std::path::{ Path, PathBuf };

use serde::Deserialize;

use crate::charset::{ CategorySet, CharacterCategory };
use crate::errors::ConfigError;

const APP_DIR: &str = "passforge";
const CONFIG_FILE: &str = "config.json";

/// Longest password the CLI and config accept.
pub const MAX_LENGTH: usize = 4096;

/// Generation defaults, read from `config.json`. Missing fields keep their
/// built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub specials: bool,
    pub count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length: 12,
            uppercase: true,
            lowercase: true,
            numbers: true,
            specials: true,
            count: 1,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads `explicit` if given, which must exist, otherwise the default
    /// location, which may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::from_file_or_default(&path),
                None => {
                    tracing::debug!("no config directory on this platform, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.length > MAX_LENGTH {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: format!("length {} exceeds {}", config.length, MAX_LENGTH),
            });
        }

        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn categories(&self) -> CategorySet {
        let toggles = [self.uppercase, self.lowercase, self.numbers, self.specials];

        CharacterCategory::ALL
            .into_iter()
            .zip(toggles)
            .filter(|(_, enabled)| *enabled)
            .map(|(category, _)| category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(r#"{ "length": 24, "specials": false }"#).unwrap();

        assert_eq!(config.length, 24);
        assert!(!config.specials);
        assert!(config.uppercase && config.lowercase && config.numbers);
        assert_eq!(config.count, 1);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::parse(r#"{ "lenght": 24 }"#).is_err());
    }

    #[test]
    fn categories_follow_toggles() {
        let config = Config {
            uppercase: false,
            specials: false,
            ..Default::default()
        };

        let categories: Vec<_> = config.categories().into_iter().collect();
        assert_eq!(categories, vec![CharacterCategory::Lowercase, CharacterCategory::Digit]);
        assert_eq!(Config::default().categories().len(), 4);
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{ "length": 32, "count": 3 }}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.length, 32);
        assert_eq!(config.count, 3);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        match Config::load(Some(&path)) {
            Err(ConfigError::Read { source, .. }) => assert_eq!(source.kind(), ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_default_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert_eq!(Config::from_file_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn oversized_length_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "length": 1000000000000000 }"#).unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("exceeds 4096"));

        fs::write(&path, r#"{ "length": 4096 }"#).unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().length, MAX_LENGTH);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ length: ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.json"));
    }
}
