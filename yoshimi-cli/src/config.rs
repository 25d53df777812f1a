use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to read the site description from and where to write the site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Site description (`site.json`)
    pub site: PathBuf,
    /// Build output directory
    pub dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site: PathBuf::from("site.json"),
            dir: PathBuf::from("out"),
        }
    }
}

impl BuildConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (BUILD_DIR, BUILD_SITE)
    /// 3. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        Self::load_with_env(args, None)
    }

    /// Same as [`BuildConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        args: &ArgMatches,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(ConfigBuilder::try_from(&defaults)?);

        // 2. BUILD_DIR -> dir, BUILD_SITE -> site
        builder = builder.add_source(
            Environment::with_prefix("BUILD")
                .prefix_separator("_")
                .source(env),
        );

        // 3. Override with CLI arguments
        let mut cli_overrides = std::collections::HashMap::new();

        if let Some(site) = args.get_one::<String>("site") {
            cli_overrides.insert("site".to_string(), site.clone());
        }
        if let Some(output) = args.get_one::<String>("output") {
            cli_overrides.insert("dir".to_string(), output.clone());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(ConfigBuilder::try_from(&cli_overrides)?);
        }

        let config = builder.build()?;
        let build_config: BuildConfig = config.try_deserialize()?;

        Ok(build_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::build::make_command;

    fn matches(args: &[&str]) -> ArgMatches {
        make_command().try_get_matches_from(args).unwrap()
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_default_config() {
        let config = BuildConfig::load_with_env(&matches(&["gen-site"]), env(&[])).unwrap();
        assert_eq!(config.site, PathBuf::from("site.json"));
        assert_eq!(config.dir, PathBuf::from("out"));
    }

    #[test]
    fn test_env_overrides_default() {
        let config = BuildConfig::load_with_env(
            &matches(&["gen-site"]),
            env(&[("BUILD_DIR", "/srv/www"), ("PATH", "/usr/bin")]),
        )
        .unwrap();
        assert_eq!(config.dir, PathBuf::from("/srv/www"));
        assert_eq!(config.site, PathBuf::from("site.json"));
    }

    #[test]
    fn test_cli_args_override_env() {
        let config = BuildConfig::load_with_env(
            &matches(&["gen-site", "--output", "/custom/output", "--site", "other.json"]),
            env(&[("BUILD_DIR", "/srv/www")]),
        )
        .unwrap();
        assert_eq!(config.dir, PathBuf::from("/custom/output"));
        assert_eq!(config.site, PathBuf::from("other.json"));
    }
}
