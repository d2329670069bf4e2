use super::Config;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Reads, normalizes and validates a TOML config file.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

pub fn parse_config_str(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    config.normalize();
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<()> {
    let tracking = &config.tracking;

    if tracking.text_extensions.is_empty() && tracking.image_extensions.is_empty() {
        anyhow::bail!("At least one text or image extension must be configured");
    }

    if let Some(empty) = tracking
        .text_extensions
        .iter()
        .chain(&tracking.image_extensions)
        .find(|ext| ext.is_empty())
    {
        anyhow::bail!("Extensions cannot be empty (got {empty:?})");
    }

    let text: HashSet<&str> = tracking.text_extensions.iter().map(String::as_str).collect();
    if let Some(shared) = tracking
        .image_extensions
        .iter()
        .find(|ext| text.contains(ext.as_str()))
    {
        anyhow::bail!("Extension '{shared}' is configured as both text and image");
    }

    for pattern in &tracking.ignore_patterns {
        glob::Pattern::new(pattern)
            .with_context(|| format!("Invalid ignore pattern: {pattern}"))?;
    }

    if config.session.watch_interval_secs == 0 {
        anyhow::bail!("Watch interval must be at least 1 second");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommitPolicy, StatusBaseline};

    #[test]
    fn test_empty_file_uses_defaults() -> Result<()> {
        assert_eq!(parse_config_str("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_sections() -> Result<()> {
        let config = parse_config_str(
            r#"
            [status]
            baseline = "snapshot"

            [commit]
            policy = "skip-and-report"
            "#,
        )?;
        assert_eq!(config.status.baseline, StatusBaseline::Snapshot);
        assert_eq!(config.commit.policy, CommitPolicy::SkipAndReport);
        assert_eq!(config.tracking.text_extensions, vec!["txt"]);
        assert_eq!(config.image.placeholder_width, 1024);
        Ok(())
    }

    #[test]
    fn test_extensions_are_normalized() -> Result<()> {
        let config = parse_config_str(
            r#"
            [tracking]
            text_extensions = [".TXT", "Md"]
            image_extensions = [".png"]
            "#,
        )?;
        assert_eq!(config.tracking.text_extensions, vec!["txt", "md"]);
        assert_eq!(config.tracking.image_extensions, vec!["png"]);
        Ok(())
    }

    #[test]
    fn test_rejects_overlap() {
        let err = parse_config_str(
            r#"
            [tracking]
            text_extensions = ["txt"]
            image_extensions = [".TXT"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("both text and image"));
    }

    #[test]
    fn test_rejects_unknown_enum_value() {
        assert!(parse_config_str("[status]\nbaseline = \"yesterday\"\n").is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        assert!(parse_config_str("[session]\nwatch_interval_secs = 0\n").is_err());
    }

    #[test]
    fn test_rejects_bad_glob() {
        assert!(parse_config_str("[tracking]\nignore_patterns = [\"[\"]\n").is_err());
    }
}
