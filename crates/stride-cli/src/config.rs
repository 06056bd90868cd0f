use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use stride_syntax::TokenCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub colored: bool,

    #[serde(default)]
    pub skip_whitespace: bool,

    /// Category name to color name, layered over the built-in theme.
    #[serde(default)]
    pub theme: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colored: true,
            skip_whitespace: false,
            theme: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

pub const DEFAULT_CONFIG: &str = r##"# stride configuration file

# Enable colored output in terminal
colored = true

# Leave whitespace tokens out of `stride tokens`
skip_whitespace = false

# Override colors per token category.
# Colors: black, red, green, yellow, blue, magenta, cyan, white,
# bright_<color>, or a hex value like "#ff8800".
[theme]
# keyword = "magenta"
# function_name = "bright_blue"
# line_comment = "bright_black"
"##;

impl Config {
    /// Load config from .striderc (TOML format)
    pub fn load() -> Result<Self> {
        let config_paths = [
            PathBuf::from(".striderc"),
            PathBuf::from(".striderc.toml"),
            PathBuf::from(".config/striderc"),
        ];

        for path in config_paths {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    /// Load config from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file, refusing to overwrite an existing one.
    pub fn create_default(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file {} already exists", path.display());
        }
        fs::write(path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for name in self.theme.keys() {
            if TokenCategory::from_name(name).is_none() {
                bail!("Unknown token category '{}' in [theme]", name);
            }
        }
        Ok(())
    }

    /// Merge CLI arguments into config
    pub fn merge_cli_args(&mut self, no_color: bool, skip_whitespace: bool) {
        if no_color {
            self.colored = false;
        }

        if skip_whitespace {
            self.skip_whitespace = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.colored);
        assert!(!config.skip_whitespace);
        assert!(config.theme.is_empty());
    }

    #[test]
    fn test_load_from_file_with_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".striderc");
        fs::write(&path, "colored = false\n[theme]\nkeyword = \"red\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert!(!config.colored);
        assert_eq!(config.theme.get("keyword").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_unknown_theme_category_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".striderc");
        fs::write(&path, "[theme]\nkeywords = \"red\"\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("keywords"));
    }

    #[test]
    fn test_create_default_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".striderc.toml");

        Config::create_default(&path).unwrap();
        assert!(Config::load_from_file(&path).is_ok());
        assert!(Config::create_default(&path).is_err());
    }

    #[test]
    fn test_cli_args_override_file() {
        let mut config = Config::default();
        config.merge_cli_args(true, true);
        assert!(!config.colored);
        assert!(config.skip_whitespace);

        let mut config = Config { colored: true, ..Config::default() };
        config.merge_cli_args(false, false);
        assert!(config.colored);
    }
}
