use std::f64::consts::PI;

use super::error::{AnalysisError, Result};
use super::model::{
    AnalysisResult, DecisionOption, QuantumState, ValueEntry, Variable, VariableType,
};
use super::noise::NoiseSource;
use super::qubit::{self, QubitAnalysis};
use super::recommendations::generate_recommendations;

pub const DEFAULT_DECISION_NAME: &str = "Новое решение";
pub const DEFAULT_WEIGHT: f64 = 5.0;
pub const DEFAULT_VALUE: f64 = 5.0;
pub const DEFAULT_QUBIT: f64 = 50.0;

/// Upper bound (exclusive) of the fabricated uncertainty level.
pub const UNCERTAINTY_RANGE: u32 = 30;
pub const MIN_CONFIDENCE: u32 = 70;
pub const MAX_CONFIDENCE: u32 = 95;
pub const MAX_SENSITIVITY: u32 = 3;

/// Collects variables and options for one decision and scores them.
///
/// Ids are assigned sequentially from 1 in insertion order. Build a fresh
/// engine per analysis request; the last result is kept only so callers can
/// fetch it again through [`ScoringEngine::results`].
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    decision_name: String,
    variables: Vec<Variable>,
    options: Vec<DecisionOption>,
    results: Option<AnalysisResult>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            decision_name: DEFAULT_DECISION_NAME.to_string(),
            variables: Vec::new(),
            options: Vec::new(),
            results: None,
        }
    }

    /// Set the decision title. Blank or missing names fall back to the default.
    pub fn set_decision_name(&mut self, name: Option<&str>) -> &mut Self {
        self.decision_name = non_blank(name)
            .unwrap_or(DEFAULT_DECISION_NAME)
            .to_string();
        self
    }

    pub fn decision_name(&self) -> &str {
        &self.decision_name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    /// Register a variable.
    ///
    /// Defaults: name "Переменная N" (N = the new id), type cost, weight 5.
    /// The weight is stored as given, even outside 1-10.
    pub fn add_variable(
        &mut self,
        name: Option<&str>,
        kind: Option<VariableType>,
        weight: Option<f64>,
    ) -> &mut Self {
        let id = next_id(self.variables.len());
        let name = match non_blank(name) {
            Some(name) => name.to_string(),
            None => format!("Переменная {}", id),
        };
        self.variables.push(Variable {
            id,
            name,
            kind: kind.unwrap_or_default(),
            weight: weight.unwrap_or(DEFAULT_WEIGHT),
        });
        self
    }

    /// Register an option.
    ///
    /// Without explicit values every variable registered so far gets a
    /// neutral rating of 5. Variables added later are not back-filled.
    pub fn add_option(&mut self, name: Option<&str>, values: Option<Vec<ValueEntry>>) -> &mut Self {
        self.add_option_with_qubit(name, values, None)
    }

    /// Like [`ScoringEngine::add_option`] but also records the qubit
    /// position used by the qubit policy (default 50).
    pub fn add_option_with_qubit(
        &mut self,
        name: Option<&str>,
        values: Option<Vec<ValueEntry>>,
        qubit: Option<f64>,
    ) -> &mut Self {
        let position = self.options.len();
        let name = match non_blank(name) {
            Some(name) => name.to_string(),
            None => default_option_name(position),
        };
        let values = values.unwrap_or_else(|| {
            self.variables
                .iter()
                .map(|v| ValueEntry::new(v.id, DEFAULT_VALUE))
                .collect()
        });
        self.options.push(DecisionOption {
            id: next_id(position),
            name,
            values,
            qubit: qubit.unwrap_or(DEFAULT_QUBIT),
        });
        self
    }

    /// Score the registered options and keep the result.
    pub fn run_analysis<N: NoiseSource>(&mut self, noise: &mut N) -> Result<&AnalysisResult> {
        let result = score(&self.variables, &self.options, noise)?;
        let stored = self.results.insert(result);
        Ok(&*stored)
    }

    /// Run the alternate qubit policy on the registered data.
    pub fn run_qubit_analysis<N: NoiseSource>(&self, noise: &mut N) -> Result<QubitAnalysis> {
        qubit::analyze(&self.variables, &self.options, noise)
    }

    /// The last completed weighted analysis, if any.
    pub fn results(&self) -> Option<&AnalysisResult> {
        self.results.as_ref()
    }
}

/// Weighted analysis of `options` against `variables`.
///
/// Apart from the draws taken from `noise` (uncertainty first, then the two
/// quantum state angles) the result depends only on the inputs.
pub fn score<N: NoiseSource>(
    variables: &[Variable],
    options: &[DecisionOption],
    noise: &mut N,
) -> Result<AnalysisResult> {
    if variables.is_empty() || options.is_empty() {
        return Err(AnalysisError::InsufficientData {
            variables: variables.len(),
            options: options.len(),
        });
    }

    let uncertainty_level = noise.next_below(UNCERTAINTY_RANGE);
    let sensitivity = sensitivity(variables.len());

    let raw_scores: Vec<f64> = options.iter().map(|o| raw_score(o, variables)).collect();
    let probabilities = normalize(&raw_scores);

    let max_score = raw_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let optimal_index = raw_scores
        .iter()
        .position(|&s| s == max_score)
        .unwrap_or(0);
    let optimal_choice = options
        .get(optimal_index)
        .map(|o| o.name.clone())
        .unwrap_or_default();
    let confidence = confidence(max_score);

    let theta = noise.next_unit() * PI;
    let phi = noise.next_unit() * 2.0 * PI;

    Ok(AnalysisResult {
        uncertainty_level,
        sensitivity,
        optimal_choice,
        optimal_index,
        confidence,
        probabilities,
        raw_scores,
        quantum_state: QuantumState::from_angles(theta, phi),
        recommendations: generate_recommendations(confidence, uncertainty_level, sensitivity),
    })
}

/// Weighted average of an option's ratings.
///
/// Entries whose variable id is unknown count toward neither the sum nor the
/// total weight. An option with nothing to average scores 0.
pub fn raw_score(option: &DecisionOption, variables: &[Variable]) -> f64 {
    let mut score = 0.0;
    let mut total_weight = 0.0;

    for entry in &option.values {
        if let Some(variable) = variables.iter().find(|v| v.id == entry.variable_id) {
            score += entry.value * variable.weight;
            total_weight += variable.weight;
        }
    }

    if total_weight == 0.0 {
        0.0
    } else {
        score / total_weight
    }
}

/// Rescale raw scores to [0, 100] relative to their min and max.
/// When every score is equal the divisor is 1, so everything maps to 0.
pub fn normalize(raw_scores: &[f64]) -> Vec<f64> {
    let max = raw_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = raw_scores.iter().copied().fold(f64::INFINITY, f64::min);
    let spread = if max == min { 1.0 } else { max - min };

    raw_scores
        .iter()
        .map(|s| ((s - min) / spread) * 100.0)
        .collect()
}

/// `70 + floor(max_score * 25)`, held inside [70, 95].
pub fn confidence(max_score: f64) -> u32 {
    let value = f64::from(MIN_CONFIDENCE) + (max_score * 25.0).floor();
    value.clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE)) as u32
}

/// Grows by one for every 2.5 variables, saturating at 3.
pub fn sensitivity(variable_count: usize) -> u32 {
    let steps = (variable_count as f64 * 0.4).floor() as u32;
    (steps + 1).min(MAX_SENSITIVITY)
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len).map_or(u32::MAX, |n| n.saturating_add(1))
}

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

/// "Вариант A", "Вариант B", ... and numbered once the alphabet runs out.
fn default_option_name(position: usize) -> String {
    match u8::try_from(position) {
        Ok(n) if n < 26 => format!("Вариант {}", char::from(b'A' + n)),
        _ => format!("Вариант {}", position + 1),
    }
}
