use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::scoring::{ScoringEngine, ValueEntry, VariableType};

/// A decision as stored on disk.
///
/// Variable ids are implied by position: the first variable is 1, the
/// second 2, and so on. Option values reference those ids.
///
/// Example YAML:
/// ```yaml
/// name: Запуск нового продукта
/// variables:
///   - { name: Рыночный спрос, type: market, weight: 8 }
///   - { name: Бюджет, type: cost, weight: 7 }
/// options:
///   - name: Премиум-сегмент
///     qubit: 30
///     values:
///       - { variable_id: 1, value: 9 }
///       - { variable_id: 2, value: 4 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DecisionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub variables: Vec<VariableSpec>,

    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec {
    /// Defaults to "Переменная N"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Defaults to cost
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<VariableType>,

    /// Relative importance, nominally 1-10 (default: 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    /// Defaults to "Вариант A", "Вариант B", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Qubit position 0-100, read by the qubit policy only (default: 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit: Option<f64>,

    /// Ratings per variable. When absent every variable is rated 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ValueEntry>>,
}

impl DecisionFile {
    /// Feed the file into a fresh engine: variables first, then options.
    pub fn to_engine(&self) -> ScoringEngine {
        let mut engine = ScoringEngine::new();
        engine.set_decision_name(self.name.as_deref());

        for variable in &self.variables {
            engine.add_variable(variable.name.as_deref(), variable.kind, variable.weight);
        }
        for option in &self.options {
            engine.add_option_with_qubit(
                option.name.as_deref(),
                option.values.clone(),
                option.qubit,
            );
        }

        engine
    }
}

/// Parse a decision from YAML text.
pub fn parse_decision(content: &str) -> Result<DecisionFile> {
    serde_saphyr::from_str(content).context("Failed to parse decision: invalid YAML")
}

/// Load a decision from a YAML file.
pub fn load_decision(path: &Path) -> Result<DecisionFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read decision file at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse decision: invalid YAML in {}", path.display()))
}

/// Serialize a decision to YAML text.
pub fn decision_to_yaml(decision: &DecisionFile) -> Result<String> {
    serde_saphyr::to_string(decision)
        .map_err(|e| anyhow::anyhow!("Failed to serialize decision: {}", e))
}

/// Save a decision atomically, creating parent directories as needed.
pub fn save_decision(path: &Path, decision: &DecisionFile) -> Result<()> {
    let yaml = decision_to_yaml(decision)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write decision to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save decision to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_full_decision() {
        let yaml = r#"
name: Переезд
variables:
  - { name: Цена, type: cost, weight: 8 }
  - { name: Район, type: quality, weight: 2 }
options:
  - name: Центр
    qubit: 70
    values:
      - { variable_id: 1, value: 2 }
      - { variable_id: 2, value: 9 }
  - name: Окраина
"#;
        let decision = parse_decision(yaml).unwrap();
        assert_eq!(decision.name.as_deref(), Some("Переезд"));
        assert_eq!(decision.variables.len(), 2);
        assert_eq!(decision.variables[0].kind, Some(VariableType::Cost));
        assert_eq!(decision.variables[1].weight, Some(2.0));
        assert_eq!(decision.options[0].qubit, Some(70.0));
        assert_eq!(decision.options[0].values.as_ref().map(Vec::len), Some(2));
        assert!(decision.options[1].values.is_none());
    }

    #[test]
    fn test_parse_empty_decision() {
        let decision = parse_decision("{}").unwrap();
        assert!(decision.name.is_none());
        assert!(decision.variables.is_empty());
        assert!(decision.options.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let yaml = r#"
variables:
  - { name: Цена, colour: red }
"#;
        assert!(parse_decision(yaml).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_variable_type() {
        let yaml = r#"
variables:
  - { name: Цена, type: luck }
"#;
        assert!(parse_decision(yaml).is_err());
    }

    #[test]
    fn test_to_engine_applies_defaults() {
        let decision = DecisionFile {
            name: None,
            variables: vec![VariableSpec::default(), VariableSpec::default()],
            options: vec![OptionSpec::default()],
        };
        let engine = decision.to_engine();

        assert_eq!(engine.decision_name(), "Новое решение");
        assert_eq!(engine.variables()[1].name, "Переменная 2");
        assert_eq!(engine.variables()[1].weight, 5.0);
        assert_eq!(engine.options()[0].name, "Вариант A");
        assert_eq!(engine.options()[0].values.len(), 2);
        assert_eq!(engine.options()[0].qubit, 50.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("qdecide_test_decision_roundtrip.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let decision = DecisionFile {
            name: Some("Тест".to_string()),
            variables: vec![VariableSpec {
                name: Some("Время".to_string()),
                kind: Some(VariableType::Time),
                weight: Some(6.0),
            }],
            options: vec![OptionSpec {
                name: Some("Сейчас".to_string()),
                qubit: None,
                values: Some(vec![ValueEntry::new(1, 7.0)]),
            }],
        };

        save_decision(&temp_path, &decision).unwrap();
        let loaded = load_decision(&temp_path).unwrap();
        assert_eq!(loaded, decision);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let temp_path = env::temp_dir().join("qdecide_test_decision_missing.yaml");
        let _ = std::fs::remove_file(&temp_path);
        let err = load_decision(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Failed to read decision file"));
    }
}
