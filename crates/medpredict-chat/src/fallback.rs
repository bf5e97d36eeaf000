//! Canned replies used when the text-generation backend is unavailable.

/// Reply to "how are you" messages. Returned without a network call.
pub const GREETING_REPLY: &str = "I'm doing well, thank you! I'm here to help you with any medical questions or concerns. Would you like to know about our disease prediction tools?";

const DEFAULT_REPLY: &str = "I'm focused on helping with medical questions and disease prediction. Would you like to learn about our health assessment tools?";

/// Keyword table, checked in order against the lowercased message.
/// A rule matches when any of its keywords is a substring.
const FALLBACK_RULES: &[(&[&str], &str)] = &[
    (
        &["how are you"],
        "I'm here to help with your medical questions! Would you like to learn about our disease prediction tools?",
    ),
    (
        &["diabetes"],
        "I can help you understand diabetes and its risk factors. Would you like to use our diabetes prediction tool?",
    ),
    (
        &["heart"],
        "Heart disease has many risk factors we can analyze. Would you like to check your heart disease risk?",
    ),
    (
        &["parkinson"],
        "Our Parkinson's disease prediction tool uses voice analysis. Would you like to learn more?",
    ),
    (
        &["cancer"],
        "Early detection is crucial for breast cancer. Would you like to use our prediction tool?",
    ),
    (
        &["hello", "hi"],
        "Hello! I'm your medical AI assistant. I can help you understand various diseases and use our prediction tools. What would you like to know about?",
    ),
];

/// True for messages answered by `GREETING_REPLY` directly.
pub fn is_greeting(message: &str) -> bool {
    message.to_lowercase().contains("how are you")
}

/// The offline reply for `message`. Always returns something.
pub fn fallback_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    FALLBACK_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

/// Wrap a user message in the assistant prompt.
pub fn build_prompt(message: &str) -> String {
    format!(
        "As a medical AI assistant, please provide a brief, professional response to: {message}. Focus on health-related aspects if applicable."
    )
}
