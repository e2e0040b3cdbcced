//! Configuration parsing from files and strings.

use std::{path::Path, str::FromStr};

use crate::{Error, PluginConfig, Result, error::SourceContext, validate::validate_config};

/// Default configuration file name used in error reports.
pub const CONFIG_FILE: &str = "entigen.toml";

impl FromStr for PluginConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, CONFIG_FILE)
    }
}

impl PluginConfig {
    /// Parse a configuration file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse a configuration from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

/// Parse and validate a configuration.
pub fn parse_config(content: &str, filename: &str) -> Result<PluginConfig> {
    let ctx = SourceContext::new(content, filename);
    let config: PluginConfig = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate_config(&config, &ctx)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: PluginConfig = "".parse().unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config: PluginConfig = r#"
            [packages]
            primary_key = "pk"

            [entity]
            doc_suffix = " Record"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.packages.primary_key, "pk");
        assert_eq!(config.packages.example, "example");
        assert_eq!(config.entity.doc_suffix, " Record");
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = "[packages]\nkeys = \"k\"\n".parse::<PluginConfig>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_filename_in_report() {
        let err = PluginConfig::from_str_with_filename("capabilities = []", "custom.toml")
            .unwrap_err();
        let Error::Validation { src, .. } = *err else {
            panic!("expected validation error");
        };
        assert_eq!(src.name(), "custom.toml");
    }
}
