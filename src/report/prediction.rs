//! Terminal rendering of predictions and the importance ranking

use console::style;

use crate::inference::{AttritionClass, Prediction, RankedFeature};

/// Shown instead of suggestions when a leave prediction matched no rule
pub const NO_RULE_NOTICE: &str = "No rule-based retention suggestion applies to this profile.";

/// One-line verdict, e.g. "Likely to leave (72.0% probability)"
pub fn prediction_headline(prediction: &Prediction) -> String {
    let verdict = match prediction.class {
        AttritionClass::Leave => "Likely to leave",
        AttritionClass::Stay => "Likely to stay",
    };
    format!(
        "{} ({:.1}% probability)",
        verdict,
        prediction.displayed_probability() * 100.0
    )
}

/// Bar of `width` cells scaled against `max`
pub fn importance_bar(importance: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || !importance.is_finite() {
        return String::new();
    }
    let cells = ((importance / max) * width as f64).round() as usize;
    "█".repeat(cells.min(width))
}

/// Print a prediction with its suggestions
pub fn print_prediction(prediction: &Prediction) {
    let headline = prediction_headline(prediction);
    println!();
    match prediction.class {
        AttritionClass::Leave => println!("    {}", style(headline).red().bold()),
        AttritionClass::Stay => println!("    {}", style(headline).green().bold()),
    }
    println!("    {}", style("─".repeat(50)).dim());

    if prediction.has_no_matching_rule() {
        println!("    {}", style(NO_RULE_NOTICE).dim());
    }
    for suggestion in &prediction.suggestions {
        println!("    {} {}", style("•").cyan(), suggestion);
    }
    println!();
}

/// Print the importance ranking as horizontal bars, largest last
pub fn print_importance(ranking: &[RankedFeature]) {
    let max = ranking.iter().map(|r| r.importance).fold(0.0, f64::max);
    let name_width = ranking.iter().map(|r| r.feature.len()).max().unwrap_or(0);

    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style("FEATURE IMPORTANCE").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    for r in ranking {
        println!(
            "    {:<width$}  {} {}",
            r.feature,
            style(importance_bar(r.importance, max, 30)).cyan(),
            style(format!("{:.3}", r.importance)).dim(),
            width = name_width
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(class: AttritionClass, p: f64, suggestions: Vec<&'static str>) -> Prediction {
        Prediction {
            class,
            leave_probability: p,
            suggestions,
        }
    }

    #[test]
    fn test_headline_uses_probability_of_predicted_class() {
        let leave = prediction(AttritionClass::Leave, 0.72, vec![]);
        assert_eq!(prediction_headline(&leave), "Likely to leave (72.0% probability)");

        let stay = prediction(AttritionClass::Stay, 0.2, vec![]);
        assert_eq!(prediction_headline(&stay), "Likely to stay (80.0% probability)");
    }

    #[test]
    fn test_importance_bar_scales_to_width() {
        assert_eq!(importance_bar(0.5, 0.5, 10).chars().count(), 10);
        assert_eq!(importance_bar(0.25, 0.5, 10).chars().count(), 5);
        assert!(importance_bar(0.1, 0.0, 10).is_empty());
    }
}
