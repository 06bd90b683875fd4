use super::model::{Priority, Recommendation};

/// Confidence strictly above this reads as "high".
pub const HIGH_CONFIDENCE: u32 = 85;
/// Confidence strictly above this (and not high) reads as "moderate".
pub const MODERATE_CONFIDENCE: u32 = 70;
/// Uncertainty strictly above this is flagged as high.
pub const HIGH_UNCERTAINTY: u32 = 25;
/// Uncertainty strictly above this (and not high) is flagged as moderate.
pub const MODERATE_UNCERTAINTY: u32 = 15;

/// Build the advice list for a weighted analysis.
///
/// Blocks are emitted in a fixed order: confidence tier, uncertainty tier
/// (only above 15%), sensitivity, monitoring.
pub fn generate_recommendations(
    confidence: u32,
    uncertainty: u32,
    sensitivity: u32,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(4);

    recommendations.push(confidence_recommendation(confidence));

    if let Some(rec) = uncertainty_recommendation(uncertainty) {
        recommendations.push(rec);
    }

    recommendations.push(Recommendation::new(
        Priority::Medium,
        format!("Чувствительность к {} переменным", sensitivity),
        "Решение особенно чувствительно к изменениям в ключевых переменных. \
         Регулярно пересматривайте данные по этим параметрам.",
    ));

    recommendations.push(Recommendation::new(
        Priority::Low,
        "Мониторинг",
        "Проводите повторный анализ каждые 2 недели или при значительных изменениях в проекте.",
    ));

    recommendations
}

fn confidence_recommendation(confidence: u32) -> Recommendation {
    if confidence > HIGH_CONFIDENCE {
        Recommendation::new(
            Priority::Low,
            "Высокая уверенность в решении",
            format!(
                "Вероятность успеха выбранного варианта ({}%) очень высока. \
                 Можно приступать к реализации.",
                confidence
            ),
        )
    } else if confidence > MODERATE_CONFIDENCE {
        Recommendation::new(
            Priority::Medium,
            "Умеренная уверенность",
            format!(
                "Вероятность успеха выбранного варианта ({}%) удовлетворительна. \
                 Рекомендуется провести дополнительный анализ ключевых переменных.",
                confidence
            ),
        )
    } else {
        Recommendation::new(
            Priority::High,
            "Низкая уверенность",
            format!(
                "Вероятность успеха выбранного варианта ({}%) ниже оптимального уровня. \
                 Необходимо уточнить данные по ключевым переменным.",
                confidence
            ),
        )
    }
}

fn uncertainty_recommendation(uncertainty: u32) -> Option<Recommendation> {
    if uncertainty > HIGH_UNCERTAINTY {
        Some(Recommendation::new(
            Priority::High,
            "Высокая неопределенность",
            format!(
                "Уровень неопределенности ({}%) слишком высок. \
                 Сфокусируйтесь на сборе данных по ключевым переменным.",
                uncertainty
            ),
        ))
    } else if uncertainty > MODERATE_UNCERTAINTY {
        Some(Recommendation::new(
            Priority::Medium,
            "Умеренная неопределенность",
            format!(
                "Уровень неопределенности ({}%) требует внимания к ключевым переменным решения.",
                uncertainty
            ),
        ))
    } else {
        None
    }
}
