use serde::{Deserialize, Serialize};

use super::engine::ScoringEngine;
use super::error::Result;
use super::model::AnalysisResult;
use super::noise::NoiseSource;
use super::qubit::QubitAnalysis;

/// Which scoring rule to run. The two rules disagree on their formulas and
/// are kept apart; `Weighted` is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Weighted average of per-variable ratings
    #[default]
    Weighted,
    /// Perturbed per-option qubit positions
    Qubit,
}

impl ScoringPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringPolicy::Weighted => "weighted",
            ScoringPolicy::Qubit => "qubit",
        }
    }
}

/// Outcome of one analysis under either policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum Report {
    Weighted(AnalysisResult),
    Qubit(QubitAnalysis),
}

impl Report {
    pub fn policy(&self) -> ScoringPolicy {
        match self {
            Report::Weighted(_) => ScoringPolicy::Weighted,
            Report::Qubit(_) => ScoringPolicy::Qubit,
        }
    }

    pub fn optimal_choice(&self) -> &str {
        match self {
            Report::Weighted(r) => &r.optimal_choice,
            Report::Qubit(r) => &r.optimal_choice,
        }
    }

    pub fn confidence(&self) -> u32 {
        match self {
            Report::Weighted(r) => r.confidence,
            Report::Qubit(r) => r.confidence,
        }
    }
}

/// Run `policy` against the engine's variables and options.
pub fn analyze<N: NoiseSource>(
    engine: &mut ScoringEngine,
    policy: ScoringPolicy,
    noise: &mut N,
) -> Result<Report> {
    match policy {
        ScoringPolicy::Weighted => engine
            .run_analysis(noise)
            .map(|result| Report::Weighted(result.clone())),
        ScoringPolicy::Qubit => engine.run_qubit_analysis(noise).map(Report::Qubit),
    }
}
