use super::domain::{AmpelColor, ScreeningCategory, ScreeningCategoryId};

impl ScreeningCategoryId {
    /// Share of the overall score in percent. The six shares add up to 100.
    pub const fn weight_percent(self) -> u32 {
        match self {
            Self::Strategic => 15,
            Self::Capacity => 20,
            Self::Profitability => 20,
            Self::Deadline => 20,
            Self::Expertise => 15,
            Self::Relationship => 10,
        }
    }

    pub fn weight(self) -> f64 {
        f64::from(self.weight_percent()) / 100.0
    }
}

pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

pub(crate) fn category(
    id: ScreeningCategoryId,
    raw: i32,
    explanation: String,
) -> ScreeningCategory {
    let score = clamp_score(raw);
    ScreeningCategory {
        id,
        name: id.name().to_string(),
        score,
        color: AmpelColor::from_score(score),
        explanation,
    }
}

/// Weighted mean of the category scores, rounded half up.
///
/// Weights are integral percentages so the sum is exact before the single rounding step.
pub fn overall_score(categories: &[ScreeningCategory]) -> u8 {
    let weighted: u32 = categories
        .iter()
        .map(|category| category.id.weight_percent() * u32::from(category.score))
        .sum();
    clamp_score(i32::try_from((weighted + 50) / 100).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: u32 = ScreeningCategoryId::ordered()
            .iter()
            .map(|id| id.weight_percent())
            .sum();
        assert_eq!(total, 100);

        let total: f64 = ScreeningCategoryId::ordered()
            .iter()
            .map(|id| id.weight())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn color_thresholds_are_monotonic() {
        let mut previous = AmpelColor::from_score(0);
        assert_eq!(previous, AmpelColor::Red);
        for score in 0..=100u8 {
            let color = AmpelColor::from_score(score);
            let expected = match score {
                70..=100 => AmpelColor::Green,
                40..=69 => AmpelColor::Yellow,
                _ => AmpelColor::Red,
            };
            assert_eq!(color, expected, "score {score}");
            assert!(rank(color) >= rank(previous));
            previous = color;
        }
    }

    fn rank(color: AmpelColor) -> u8 {
        match color {
            AmpelColor::Red => 0,
            AmpelColor::Yellow => 1,
            AmpelColor::Green => 2,
        }
    }

    #[test]
    fn clamps_out_of_range_scores() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(115), 100);
        assert_eq!(clamp_score(42), 42);
    }

    #[test]
    fn overall_score_rounds_weighted_sum() {
        let scores = [75, 90, 85, 55, 90, 75];
        let categories: Vec<ScreeningCategory> = ScreeningCategoryId::ordered()
            .into_iter()
            .zip(scores)
            .map(|(id, score)| category(id, score, String::new()))
            .collect();

        // 11.25 + 18 + 17 + 11 + 13.5 + 7.5 = 78.25
        assert_eq!(overall_score(&categories), 78);

        let weak: Vec<ScreeningCategory> = ScreeningCategoryId::ordered()
            .into_iter()
            .zip([50, 25, 35, 10, 50, 40])
            .map(|(id, score)| category(id, score, String::new()))
            .collect();
        // 7.5 + 5 + 7 + 2 + 7.5 + 4 = 33
        assert_eq!(overall_score(&weak), 33);
    }
}
