use std::collections::HashSet;

use crate::config::DecisionFile;

const RATING_MIN: f64 = 1.0;
const RATING_MAX: f64 = 10.0;
const QUBIT_MIN: f64 = 0.0;
const QUBIT_MAX: f64 = 100.0;

/// Check a decision file for values the engine would silently accept.
/// Returns all findings at once (not just the first).
///
/// The engine never rejects these inputs; callers decide whether findings
/// are warnings or fatal.
pub fn validate_decision(decision: &DecisionFile) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if decision.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        errors.push("name: must not be blank".to_string());
    }

    for (i, variable) in decision.variables.iter().enumerate() {
        if variable.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.push(format!("variables[{}].name: must not be blank", i));
        }
        if let Some(weight) = variable.weight {
            if !in_range(weight, RATING_MIN, RATING_MAX) {
                errors.push(format!(
                    "variables[{}].weight: {} is outside {}-{}",
                    i, weight, RATING_MIN, RATING_MAX
                ));
            }
        }
    }

    let variable_count = decision.variables.len();

    for (i, option) in decision.options.iter().enumerate() {
        if option.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.push(format!("options[{}].name: must not be blank", i));
        }

        if let Some(qubit) = option.qubit {
            if !in_range(qubit, QUBIT_MIN, QUBIT_MAX) {
                errors.push(format!(
                    "options[{}].qubit: {} is outside {}-{}",
                    i, qubit, QUBIT_MIN, QUBIT_MAX
                ));
            }
        }

        let Some(values) = &option.values else {
            continue;
        };

        let mut seen = HashSet::new();
        for (j, entry) in values.iter().enumerate() {
            let known = entry.variable_id >= 1 && (entry.variable_id as usize) <= variable_count;
            if !known {
                errors.push(format!(
                    "options[{}].values[{}].variable_id: {} does not match any variable",
                    i, j, entry.variable_id
                ));
            } else if !seen.insert(entry.variable_id) {
                errors.push(format!(
                    "options[{}].values[{}].variable_id: {} is rated more than once",
                    i, j, entry.variable_id
                ));
            }
            if !in_range(entry.value, RATING_MIN, RATING_MAX) {
                errors.push(format!(
                    "options[{}].values[{}].value: {} is outside {}-{}",
                    i, j, entry.value, RATING_MIN, RATING_MAX
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}
