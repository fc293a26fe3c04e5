use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::cli::ConfigCommands;
use crate::config::{ConfigError, ProposalConfig};

pub fn execute(cmd: ConfigCommands) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Init { config, force } => {
            let path = init(config, force)?;
            println!("{}", path.display());
        }
        ConfigCommands::Show { config } => {
            let loaded = ProposalConfig::load(config).context("Failed to load config")?;
            print!("{}", loaded.to_toml()?);
        }
    }
    Ok(())
}

/// Writes a default config file. Refuses to overwrite unless `force`.
pub fn init(config_path: Option<PathBuf>, force: bool) -> anyhow::Result<PathBuf> {
    let path = config_path
        .or_else(ProposalConfig::default_config_path)
        .ok_or(ConfigError::NoConfigPath)?;

    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Ok(ProposalConfig::default().save(Some(path))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avquote.toml");

        let written = init(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);
        assert_eq!(
            ProposalConfig::from_file(&path).unwrap(),
            ProposalConfig::default()
        );
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avquote.toml");
        std::fs::write(&path, "[pricing]\ncurrency = \"INR\"\n").unwrap();

        assert!(init(Some(path.clone()), false).is_err());
        assert_eq!(
            ProposalConfig::from_file(&path).unwrap().pricing.currency,
            "INR"
        );

        init(Some(path.clone()), true).unwrap();
        assert_eq!(
            ProposalConfig::from_file(&path).unwrap().pricing.currency,
            "USD"
        );
    }
}
