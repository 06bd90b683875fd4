//! Built-in sample decisions.

use crate::config::{DecisionFile, OptionSpec, VariableSpec};
use crate::scoring::{ValueEntry, VariableType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Sample {
    /// Launching a new product: 5 variables, 3 options
    ProductLaunch,
    /// Restructuring a team: 4 variables, 3 options
    TeamStructure,
    /// Demo data for the qubit policy
    QubitDemo,
}

impl Sample {
    pub fn decision(&self) -> DecisionFile {
        match self {
            Sample::ProductLaunch => product_launch(),
            Sample::TeamStructure => team_structure(),
            Sample::QubitDemo => qubit_demo(),
        }
    }
}

fn variable(name: &str, kind: VariableType, weight: f64) -> VariableSpec {
    VariableSpec {
        name: Some(name.to_string()),
        kind: Some(kind),
        weight: Some(weight),
    }
}

/// Option rated against variables 1..=n in order.
fn rated(name: &str, ratings: &[f64]) -> OptionSpec {
    let values = (1u32..)
        .zip(ratings)
        .map(|(id, &value)| ValueEntry::new(id, value))
        .collect();
    OptionSpec {
        name: Some(name.to_string()),
        qubit: None,
        values: Some(values),
    }
}

pub fn product_launch() -> DecisionFile {
    DecisionFile {
        name: Some("Запуск нового продукта".to_string()),
        variables: vec![
            variable("Рыночный спрос", VariableType::Market, 8.0),
            variable("Бюджет", VariableType::Cost, 7.0),
            variable("Сроки", VariableType::Time, 6.0),
            variable("Конкуренция", VariableType::Market, 7.0),
            variable("Качество", VariableType::Quality, 8.0),
        ],
        options: vec![
            rated("Вариант A: Премиум-сегмент", &[9.0, 4.0, 7.0, 3.0, 9.0]),
            rated("Вариант B: Массовый рынок", &[8.0, 7.0, 5.0, 6.0, 6.0]),
            rated("Вариант C: Нишевый продукт", &[6.0, 8.0, 9.0, 2.0, 8.0]),
        ],
    }
}

pub fn team_structure() -> DecisionFile {
    DecisionFile {
        name: Some("Оптимизация структуры команды".to_string()),
        variables: vec![
            variable("Бюджет", VariableType::Cost, 9.0),
            variable("Сроки", VariableType::Time, 7.0),
            variable("Качество", VariableType::Quality, 8.0),
            variable("Гибкость", VariableType::Resource, 6.0),
        ],
        options: vec![
            rated("Вариант A: Найм новых сотрудников", &[3.0, 9.0, 8.0, 4.0]),
            rated("Вариант B: Аутсорсинг", &[6.0, 7.0, 6.0, 8.0]),
            rated("Вариант C: Перераспределение текущих ресурсов", &[9.0, 5.0, 7.0, 6.0]),
        ],
    }
}

/// Variables carry no ratings here; the options are told apart by qubit
/// position alone.
pub fn qubit_demo() -> DecisionFile {
    let qubit = |name: &str, position: f64| OptionSpec {
        name: Some(name.to_string()),
        qubit: Some(position),
        values: None,
    };

    DecisionFile {
        name: Some("Квантовый анализ".to_string()),
        variables: vec![
            variable("Рыночный спрос", VariableType::Positive, 7.0),
            variable("Бюджет", VariableType::Negative, 9.0),
            variable("Время", VariableType::Negative, 6.0),
            variable("Конкуренция", VariableType::Negative, 5.0),
        ],
        options: vec![
            qubit("Вариант A", 30.0),
            qubit("Вариант B", 70.0),
            qubit("Вариант C", 50.0),
        ],
    }
}
