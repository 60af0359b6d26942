use super::domain::ScreeningCategory;

/// Names the strongest and weakest category. Ties keep report order.
pub(crate) fn generate_summary(categories: &[ScreeningCategory], overall_label: &str) -> String {
    let mut ranked: Vec<&ScreeningCategory> = categories.iter().collect();
    ranked.sort_by(|left, right| right.score.cmp(&left.score));

    let mut summary = format!("Overall: {overall_label}.");
    if let (Some(best), Some(worst)) = (ranked.first(), ranked.last()) {
        summary.push_str(&format!(
            " Strength: {} ({}). Needs attention: {} ({}).",
            best.name, best.score, worst.name, worst.score
        ));
    }
    summary
}
