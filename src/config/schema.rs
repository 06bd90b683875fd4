use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::scoring::ScoringPolicy;

/// Defaults for `qdecide analyze`. Command-line flags take precedence.
///
/// Example YAML:
/// ```yaml
/// policy: weighted
/// seed: 42
/// format: table
/// strict: false
/// color: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring policy (default: weighted)
    #[serde(default)]
    pub policy: Option<ScoringPolicy>,

    /// Fixed seed for the synthetic figures; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Output format (default: table)
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Refuse to analyze decisions that fail validation
    #[serde(default)]
    pub strict: bool,

    /// Force colors on or off; auto-detected from the terminal when absent
    #[serde(default)]
    pub color: Option<bool>,
}
