//! Result rendering: probability → tier → display view.
//!
//! Everything here is a pure function of the prediction. Tiers are
//! recomputed on every render and never cached.

use serde::Serialize;

use medpredict_contracts::{
    condition::ConditionProfile,
    prediction::{PredictedClass, Prediction, ResultTier},
};

pub const POSITIVE_RECOMMENDATION: &str =
    "We strongly recommend consulting with a healthcare professional for a thorough evaluation.";

pub const NEGATIVE_RECOMMENDATION: &str =
    "While results suggest lower risk, regular medical check-ups are still important for preventive care.";

pub const DISCLAIMER: &str =
    "Note: This analysis is for informational purposes only and should not be considered as medical advice.";

/// Place a probability into its risk band.
///
/// With `p = probability * 100`: `p > 75` is Severe, `50 < p <= 75`
/// Elevated, `25 < p <= 50` Moderate, anything else Low (NaN included).
pub fn classify(probability: f64) -> ResultTier {
    let p = probability * 100.0;
    if p > 75.0 {
        ResultTier::Severe
    } else if p > 50.0 {
        ResultTier::Elevated
    } else if p > 25.0 {
        ResultTier::Moderate
    } else {
        ResultTier::Low
    }
}

/// The recommendation line. Depends only on the class, never on the tier.
pub fn recommendation(class: PredictedClass) -> &'static str {
    match class {
        PredictedClass::Positive => POSITIVE_RECOMMENDATION,
        PredictedClass::Negative => NEGATIVE_RECOMMENDATION,
    }
}

/// Text color class for a tier.
pub fn text_class(tier: ResultTier) -> &'static str {
    match tier {
        ResultTier::Severe => "text-red-400",
        ResultTier::Elevated => "text-orange-400",
        ResultTier::Moderate => "text-yellow-400",
        ResultTier::Low => "text-green-400",
    }
}

/// Background color class for a tier.
pub fn background_class(tier: ResultTier) -> &'static str {
    match tier {
        ResultTier::Severe => "bg-red-500/10",
        ResultTier::Elevated => "bg-orange-500/10",
        ResultTier::Moderate => "bg-yellow-500/10",
        ResultTier::Low => "bg-green-500/10",
    }
}

/// Everything the result panel displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub tier: ResultTier,
    pub text_class: &'static str,
    pub background_class: &'static str,
    /// Backend message, or the condition's default for the predicted class.
    pub headline: String,
    /// Probability as a percentage with one decimal, e.g. "82.0".
    pub confidence: String,
    pub recommendation: &'static str,
    pub disclaimer: &'static str,
}

/// Build the result view for `prediction` on `profile`'s condition.
pub fn render_result(profile: &ConditionProfile, prediction: &Prediction) -> ResultView {
    let tier = classify(prediction.probability);
    let headline = match prediction.message.as_deref() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => profile.default_message(prediction.predicted_class).to_string(),
    };

    ResultView {
        tier,
        text_class: text_class(tier),
        background_class: background_class(tier),
        headline,
        confidence: format!("{:.1}", prediction.probability * 100.0),
        recommendation: recommendation(prediction.predicted_class),
        disclaimer: DISCLAIMER,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
