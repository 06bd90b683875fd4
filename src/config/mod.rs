pub mod decision;
pub mod init;
mod schema;

pub use decision::{
    decision_to_yaml, load_decision, parse_decision, save_decision, DecisionFile, OptionSpec,
    VariableSpec,
};
pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/qdecide/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("qdecide"))
}

/// Get the default config file path (~/.config/qdecide/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/qdecide/config.yaml), and a missing default file yields the
///   built-in defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => match get_config_path() {
            Ok(path) if path.exists() => read_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringPolicy;
    use std::env;

    #[test]
    fn test_explicit_missing_config_errors() {
        let temp_path = env::temp_dir().join("qdecide_test_config_missing.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_explicit_config_loads() {
        let temp_path = env::temp_dir().join("qdecide_test_config_load.yaml");
        fs::write(&temp_path, "policy: qubit\nseed: 3\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.policy, Some(ScoringPolicy::Qubit));
        assert_eq!(config.seed, Some(3));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_path = env::temp_dir().join("qdecide_test_config_invalid.yaml");
        fs::write(&temp_path, "policy: [not, a, policy]\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("qdecide_test_config_invalid.yaml"));

        let _ = fs::remove_file(&temp_path);
    }
}
