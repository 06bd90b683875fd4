pub mod engine;
pub mod error;
pub mod model;
pub mod noise;
pub mod policy;
pub mod qubit;
pub mod recommendations;
pub mod validation;

pub use engine::{score, ScoringEngine};
pub use error::{AnalysisError, Result};
pub use model::*;
pub use noise::{NoiseSource, ScriptedNoise, SeededNoise};
pub use policy::{analyze, Report, ScoringPolicy};
pub use qubit::QubitAnalysis;
pub use recommendations::generate_recommendations;
pub use validation::validate_decision;
