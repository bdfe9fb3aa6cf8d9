mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./reelsort.toml",
        "~/.config/reelsort/config.toml",
        "/etc/reelsort/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.scrape_concurrency == 0 {
        anyhow::bail!("scrape_concurrency must be at least 1");
    }

    // Templates must compile for their kind
    config.renderer().context("Invalid template")?;

    if config.movies.directory.as_os_str().is_empty() {
        anyhow::bail!("movies directory cannot be empty");
    }
    if config.tvshows.directory.as_os_str().is_empty() {
        anyhow::bail!("tvshows directory cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::LinkAction;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        validate_config(&config).unwrap();
        assert_eq!(config.action, LinkAction::Copy);
        assert_eq!(config.scrape_concurrency, 1);
        assert!(!config.strict);
    }

    #[test]
    fn parses_full_file() {
        let config: Config = toml::from_str(
            r#"
action = "hardlink"
strict = true
force = true
existing_is_fatal = true
scrape_concurrency = 4

[movies]
directory = "/media/Movies"
template = "{title} ({year})"

[tvshows]
directory = "/media/TV"
template = "{show}/S{season:02}E{episode:02}"
"#,
        )
        .unwrap();

        assert_eq!(config.action, LinkAction::Hardlink);
        assert!(config.strict && config.force && config.existing_is_fatal);
        assert_eq!(config.scrape_concurrency, 4);
        assert_eq!(config.movies.directory, std::path::PathBuf::from("/media/Movies"));
        validate_config(&config).unwrap();

        let policy = config.policy();
        assert!(policy.strict && policy.existing_is_fatal);
        assert_eq!(config.renamer().action(), LinkAction::Hardlink);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("action = \"symlink\"").unwrap();
        assert_eq!(config.movies.directory, std::path::PathBuf::from("Movies"));
        assert!(config.tvshows.template.contains("{season:02}"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(toml::from_str::<Config>("action = \"teleport\"").is_err());

        let mut config = Config::default();
        config.scrape_concurrency = 0;
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.movies.template = "{show}".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_template_disables_kind() {
        let mut config = Config::default();
        config.tvshows.template = String::new();
        validate_config(&config).unwrap();
        let episode = crate::media::Media::Episode(crate::media::Episode::new("Show", 1, 1, ""));
        assert!(matches!(
            config.renderer().unwrap().render(&episode),
            Err(reelsort_common::Error::TemplateMissing(_))
        ));
    }
}
