use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a decision variable.
///
/// The kind is descriptive only; scoring treats every variable the same way
/// and only its weight matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    Cost,
    Market,
    Time,
    Quality,
    Resource,
    Positive,
    Negative,
    Neutral,
}

impl VariableType {
    pub const ALL: [VariableType; 8] = [
        VariableType::Cost,
        VariableType::Market,
        VariableType::Time,
        VariableType::Quality,
        VariableType::Resource,
        VariableType::Positive,
        VariableType::Negative,
        VariableType::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Cost => "cost",
            VariableType::Market => "market",
            VariableType::Time => "time",
            VariableType::Quality => "quality",
            VariableType::Resource => "resource",
            VariableType::Positive => "positive",
            VariableType::Negative => "negative",
            VariableType::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableType,
    pub weight: f64, // relative importance, nominally 1-10
}

/// One option's rating against a single variable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ValueEntry {
    pub variable_id: u32,
    pub value: f64,
}

impl ValueEntry {
    pub fn new(variable_id: u32, value: f64) -> Self {
        Self { variable_id, value }
    }
}

/// A candidate choice scored against the registered variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionOption {
    pub id: u32,
    pub name: String,
    pub values: Vec<ValueEntry>,
    /// Qubit position (0-100) read only by the qubit policy.
    pub qubit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    pub fn new(
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A point on the Bloch sphere. Purely decorative: it is drawn at random
/// and carries no information about the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantumState {
    pub theta: f64,
    pub phi: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl QuantumState {
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        Self {
            theta,
            phi,
            x: theta.sin() * phi.cos(),
            y: theta.sin() * phi.sin(),
            z: theta.cos(),
        }
    }
}

/// Snapshot produced by one weighted analysis run.
///
/// `uncertainty_level` and `quantum_state` are synthetic random draws, not
/// statistics derived from the inputs. `confidence` is a function of the
/// winning raw score and `sensitivity` of the variable count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub uncertainty_level: u32,
    pub sensitivity: u32,
    pub optimal_choice: String,
    pub optimal_index: usize,
    pub confidence: u32,
    /// Normalized scores in [0, 100], one per option in option order.
    pub probabilities: Vec<f64>,
    /// Weighted averages before normalization, one per option.
    pub raw_scores: Vec<f64>,
    pub quantum_state: QuantumState,
    pub recommendations: Vec<Recommendation>,
}
