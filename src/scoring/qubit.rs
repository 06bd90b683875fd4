//! Qubit policy: the alternate, simplified scoring rule.
//!
//! Each option carries a "qubit" position in [0, 100] that stands in for the
//! weighted score. The position is perturbed by up to ±10 points before the
//! options are compared, and confidence comes from an unrelated "quantum
//! noise" draw in [15, 40). Variable weights only feed the advice text.

use serde::Serialize;

use super::error::{AnalysisError, Result};
use super::model::{DecisionOption, Priority, Recommendation, Variable};
use super::noise::NoiseSource;

pub const NOISE_FLOOR: u32 = 15;
pub const NOISE_SPAN: u32 = 25;
pub const CONFIDENCE_FLOOR: u32 = 40;
/// Maximum perturbation applied to a qubit position, as a fraction of 1.
pub const PERTURBATION: f64 = 0.1;

const HIGH_CONFIDENCE: u32 = 75;
const MODERATE_CONFIDENCE: u32 = 50;
const HIGH_NOISE: u32 = 30;
const HIGH_IMPACT_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QubitAnalysis {
    pub noise_level: u32,
    pub confidence: u32,
    pub optimal_choice: String,
    pub optimal_index: usize,
    /// Perturbed qubit positions in percent, one per option. Only capped
    /// from above, so a position near 0 can dip below zero.
    pub adjusted: Vec<i32>,
    pub recommendations: Vec<Recommendation>,
}

/// Run the qubit policy.
///
/// Draw order: the noise level, then one perturbation per option in order.
/// An option wins only by strictly beating the best position so far.
pub fn analyze<N: NoiseSource>(
    variables: &[Variable],
    options: &[DecisionOption],
    noise: &mut N,
) -> Result<QubitAnalysis> {
    if options.is_empty() {
        return Err(AnalysisError::InsufficientData {
            variables: variables.len(),
            options: 0,
        });
    }

    let noise_level = noise.next_below(NOISE_SPAN) + NOISE_FLOOR;
    let confidence = 100u32.saturating_sub(noise_level).max(CONFIDENCE_FLOOR);

    let adjusted: Vec<i32> = options
        .iter()
        .map(|option| {
            let shift = noise.next_unit() * 2.0 * PERTURBATION - PERTURBATION;
            let probability = (option.qubit / 100.0 + shift).min(1.0);
            (probability * 100.0 + 0.5).floor() as i32
        })
        .collect();

    let mut optimal_index = 0;
    for (index, percent) in adjusted.iter().enumerate().skip(1) {
        if adjusted.get(optimal_index).is_some_and(|best| percent > best) {
            optimal_index = index;
        }
    }
    let optimal_choice = options
        .get(optimal_index)
        .map(|o| o.name.clone())
        .unwrap_or_default();

    let recommendations =
        qubit_recommendations(confidence, &optimal_choice, noise_level, variables);

    Ok(QubitAnalysis {
        noise_level,
        confidence,
        optimal_choice,
        optimal_index,
        adjusted,
        recommendations,
    })
}

fn qubit_recommendations(
    confidence: u32,
    optimal_choice: &str,
    noise_level: u32,
    variables: &[Variable],
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if confidence > HIGH_CONFIDENCE {
        recs.push(Recommendation::new(
            Priority::Low,
            "Высокая квантовая уверенность",
            format!(
                "Высокая квантовая уверенность ({}%). Рекомендуется выбрать {} с минимальными корректировками.",
                confidence, optimal_choice
            ),
        ));
        recs.push(Recommendation::new(
            Priority::Low,
            "Проверка ключевых переменных",
            "Для еще большей уверенности: проверьте ключевые переменные с наибольшим весом влияния.",
        ));
    } else if confidence > MODERATE_CONFIDENCE {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Умеренная квантовая уверенность",
            format!(
                "Умеренная квантовая уверенность ({}%). {} остается оптимальным выбором, но требует дополнительных проверок.",
                confidence, optimal_choice
            ),
        ));
        recs.push(Recommendation::new(
            Priority::Medium,
            "Снижение квантового шума",
            format!(
                "Уменьшите квантовый шум ({}%), сфокусировавшись на переменных с наибольшим весом и неопределенностью.",
                noise_level
            ),
        ));
    } else {
        recs.push(Recommendation::new(
            Priority::High,
            "Низкая квантовая уверенность",
            format!(
                "Низкая квантовая уверенность ({}%). Рекомендуется пересмотреть основные предположения и собрать дополнительные данные.",
                confidence
            ),
        ));
        recs.push(Recommendation::new(
            Priority::High,
            "Снижение неопределенности",
            "Сфокусируйтесь на уменьшении неопределенности в ключевых переменных перед принятием окончательного решения.",
        ));
    }

    let heaviest = high_impact_variables(variables);
    if !heaviest.is_empty() {
        let listed = heaviest
            .iter()
            .map(|v| format!("{} ({}/10)", v.name, v.weight))
            .collect::<Vec<_>>()
            .join(" и ");
        recs.push(Recommendation::new(
            Priority::Medium,
            "Наибольшее влияние",
            format!("Наибольшее влияние на решение оказывают: {}", listed),
        ));
    }

    if noise_level > HIGH_NOISE {
        recs.push(Recommendation::new(
            Priority::High,
            "Высокий уровень квантового шума",
            format!(
                "Высокий уровень квантового шума ({}%). Проведите дополнительный анализ неопределенностей в ключевых переменных.",
                noise_level
            ),
        ));
    }

    recs.push(Recommendation::new(
        Priority::Low,
        "Регулярное обновление",
        "Для сложных решений с высокой неопределенностью регулярно обновляйте анализ по мере поступления новых данных.",
    ));

    recs
}

/// The two heaviest variables; equal weights keep their input order.
fn high_impact_variables(variables: &[Variable]) -> Vec<&Variable> {
    let mut sorted: Vec<&Variable> = variables.iter().collect();
    sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    sorted.truncate(HIGH_IMPACT_COUNT);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::model::VariableType;
    use crate::scoring::noise::{ScriptedNoise, SeededNoise};

    fn variable(id: u32, name: &str, weight: f64) -> Variable {
        Variable {
            id,
            name: name.to_string(),
            kind: VariableType::Neutral,
            weight,
        }
    }

    fn option(id: u32, name: &str, qubit: f64) -> DecisionOption {
        DecisionOption {
            id,
            name: name.to_string(),
            values: vec![],
            qubit,
        }
    }

    fn demo_options() -> Vec<DecisionOption> {
        vec![
            option(1, "Вариант A", 30.0),
            option(2, "Вариант B", 70.0),
            option(3, "Вариант C", 50.0),
        ]
    }

    #[test]
    fn test_unperturbed_positions() {
        // 0.0 -> noise 15, 0.5 -> zero perturbation
        let mut noise = ScriptedNoise::new(vec![0.0, 0.5, 0.5, 0.5]);
        let result = analyze(&[], &demo_options(), &mut noise).unwrap();

        assert_eq!(result.noise_level, 15);
        assert_eq!(result.confidence, 85);
        assert_eq!(result.adjusted, vec![30, 70, 50]);
        assert_eq!(result.optimal_choice, "Вариант B");
        assert_eq!(result.optimal_index, 1);
    }

    #[test]
    fn test_perturbation_can_flip_winner() {
        // A pushed up by 10, B pushed down by 10, C unchanged
        let mut noise = ScriptedNoise::new(vec![0.0, 0.9999, 0.0, 0.5]);
        let options = vec![option(1, "A", 65.0), option(2, "B", 70.0), option(3, "C", 50.0)];
        let result = analyze(&[], &options, &mut noise).unwrap();

        assert_eq!(result.adjusted, vec![75, 60, 50]);
        assert_eq!(result.optimal_choice, "A");
    }

    #[test]
    fn test_adjusted_capped_at_hundred() {
        let mut noise = ScriptedNoise::new(vec![0.0, 0.9999]);
        let result = analyze(&[], &[option(1, "A", 100.0)], &mut noise).unwrap();
        assert_eq!(result.adjusted, vec![100]);
    }

    #[test]
    fn test_tie_keeps_first() {
        let mut noise = ScriptedNoise::new(vec![0.0, 0.5]);
        let options = vec![option(1, "first", 40.0), option(2, "second", 40.0)];
        let result = analyze(&[], &options, &mut noise).unwrap();
        assert_eq!(result.optimal_choice, "first");
    }

    #[test]
    fn test_negative_positions_still_pick_first() {
        // 0.0 -> noise 15 and a -0.1 shift for every option
        let options = vec![option(1, "first", 0.0), option(2, "second", 0.0)];
        let result = analyze(&[], &options, &mut ScriptedNoise::constant(0.0)).unwrap();

        assert_eq!(result.adjusted, vec![-10, -10]);
        assert_eq!(result.optimal_index, 0);
        assert_eq!(result.optimal_choice, "first");
    }

    #[test]
    fn test_requires_options_only() {
        let err = analyze(&[], &[], &mut ScriptedNoise::constant(0.0)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                variables: 0,
                options: 0
            }
        );
        assert!(analyze(&[], &demo_options(), &mut ScriptedNoise::constant(0.0)).is_ok());
    }

    #[test]
    fn test_noise_and_confidence_ranges() {
        let mut noise = SeededNoise::from_seed(11);
        for _ in 0..500 {
            let result = analyze(&[], &demo_options(), &mut noise).unwrap();
            assert!((15..40).contains(&result.noise_level));
            assert_eq!(result.confidence, 100 - result.noise_level);
        }
    }

    #[test]
    fn test_high_confidence_recommendations() {
        let variables = vec![
            variable(1, "Рыночный спрос", 7.0),
            variable(2, "Бюджет", 9.0),
            variable(3, "Время", 6.0),
        ];
        let mut noise = ScriptedNoise::new(vec![0.0, 0.5, 0.5, 0.5]);
        let result = analyze(&variables, &demo_options(), &mut noise).unwrap();
        let recs = &result.recommendations;

        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].priority, Priority::Low);
        assert!(recs[0].description.contains("(85%)"));
        assert!(recs[0].description.contains("Вариант B"));
        assert_eq!(
            recs[2].description,
            "Наибольшее влияние на решение оказывают: Бюджет (9/10) и Рыночный спрос (7/10)"
        );
        assert_eq!(recs[3].priority, Priority::Low);
    }

    #[test]
    fn test_noisy_run_recommendations() {
        // noise floor(0.9 * 25) + 15 = 37 -> confidence 63
        let mut noise = ScriptedNoise::new(vec![0.9, 0.5, 0.5, 0.5]);
        let result = analyze(&[], &demo_options(), &mut noise).unwrap();
        let recs = &result.recommendations;

        assert_eq!(result.noise_level, 37);
        assert_eq!(result.confidence, 63);
        // moderate pair, high-noise entry, closing entry; no variables listed
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[1].description.contains("(37%)"));
        assert_eq!(recs[2].priority, Priority::High);
        assert_eq!(recs[2].title, "Высокий уровень квантового шума");
    }

    #[test]
    fn test_high_impact_stable_on_equal_weights() {
        let variables = vec![
            variable(1, "a", 5.0),
            variable(2, "b", 5.0),
            variable(3, "c", 5.0),
        ];
        let names: Vec<&str> = high_impact_variables(&variables)
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
